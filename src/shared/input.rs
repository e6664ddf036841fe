//! Lenient input scalars for admin forms.
//!
//! Admin forms post numbers and booleans either as JSON scalars or as
//! strings. These types accept both shapes and leave the decision to the
//! validators in [`super::validation`].

use serde::{Deserialize, Deserializer, Serialize};

/// A number or a string that should hold one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(serde_json::Number),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => n.as_f64(),
            Numeric::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Integer value with decimals truncated. `None` outside the `i32` range.
    pub fn to_i32(&self) -> Option<i32> {
        self.as_f64()
            .map(f64::trunc)
            .filter(|v| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(v))
            .map(|v| v as i32)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Number(value.into())
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

/// A boolean-ish form value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Flag {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Flag::Bool(b) => Some(*b),
            Flag::Number(n) => match n.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            Flag::Text(s) => match s.trim() {
                "1" | "true" => Some(true),
                "0" | "false" => Some(false),
                _ => None,
            },
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::Bool(value)
    }
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
