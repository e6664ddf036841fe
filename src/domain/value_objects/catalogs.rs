//! Fixed id catalogs referenced by creator scripts and metric snapshots.
//!
//! Ids are persisted in integer columns, so they must stay stable.

use serde::Serialize;

/// One entry of an admin `<select>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: &'static str,
}

/// Unknown catalog id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {catalog} id: {id}")]
pub struct UnknownId {
    pub catalog: &'static str,
    pub id: i64,
}

/// Lifecycle events a creator script reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    WorkingStatusChange,
    WorkingStatusTimeout,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::WorkingStatusChange, EventType::WorkingStatusTimeout];

    pub fn id(self) -> i32 {
        match self {
            EventType::WorkingStatusChange => 1,
            EventType::WorkingStatusTimeout => 2,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            EventType::WorkingStatusChange => "Working status changed",
            EventType::WorkingStatusTimeout => "Working status timed out",
        }
    }

    pub fn admin_setup_options() -> Vec<SelectOption<i32>> {
        Self::ALL
            .iter()
            .map(|t| SelectOption {
                value: t.id(),
                label: t.label(),
            })
            .collect()
    }
}

/// What a creator script does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    SendEmail,
}

impl ActionType {
    pub const ALL: [ActionType; 1] = [ActionType::SendEmail];

    pub fn id(self) -> i32 {
        match self {
            ActionType::SendEmail => 1,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionType::SendEmail => "Send email",
        }
    }

    pub fn admin_setup_options() -> Vec<SelectOption<i32>> {
        Self::ALL
            .iter()
            .map(|t| SelectOption {
                value: t.id(),
                label: t.label(),
            })
            .collect()
    }
}

/// Kinds of text content attached to a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextContentType {
    EmailTemplate,
}

impl TextContentType {
    pub fn id(self) -> i32 {
        match self {
            TextContentType::EmailTemplate => 1,
        }
    }
}

/// Working status of a creator inside a brand's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkingStatus {
    New,
    Invited,
    Applied,
    Approved,
    ProductShipped,
    ContentPosted,
    Completed,
    Rejected,
}

impl WorkingStatus {
    pub const ALL: [WorkingStatus; 8] = [
        WorkingStatus::New,
        WorkingStatus::Invited,
        WorkingStatus::Applied,
        WorkingStatus::Approved,
        WorkingStatus::ProductShipped,
        WorkingStatus::ContentPosted,
        WorkingStatus::Completed,
        WorkingStatus::Rejected,
    ];

    pub fn id(self) -> i32 {
        match self {
            WorkingStatus::New => 1,
            WorkingStatus::Invited => 2,
            WorkingStatus::Applied => 3,
            WorkingStatus::Approved => 4,
            WorkingStatus::ProductShipped => 5,
            WorkingStatus::ContentPosted => 6,
            WorkingStatus::Completed => 7,
            WorkingStatus::Rejected => 8,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Lookup that fails on an unknown or missing id.
    pub fn find_or_fail(id: Option<i32>) -> Result<Self, UnknownId> {
        id.and_then(Self::from_id).ok_or(UnknownId {
            catalog: "working status",
            id: id.map(i64::from).unwrap_or_default(),
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkingStatus::New => "New",
            WorkingStatus::Invited => "Invited",
            WorkingStatus::Applied => "Applied",
            WorkingStatus::Approved => "Approved",
            WorkingStatus::ProductShipped => "Product shipped",
            WorkingStatus::ContentPosted => "Content posted",
            WorkingStatus::Completed => "Completed",
            WorkingStatus::Rejected => "Rejected",
        }
    }

    /// Whether the brand has accepted the creator at this point.
    pub fn is_approved_or_later(self) -> bool {
        matches!(
            self,
            WorkingStatus::Approved
                | WorkingStatus::ProductShipped
                | WorkingStatus::ContentPosted
                | WorkingStatus::Completed
        )
    }

    pub fn admin_setup_options() -> Vec<SelectOption<i32>> {
        Self::ALL
            .iter()
            .map(|s| SelectOption {
                value: s.id(),
                label: s.label(),
            })
            .collect()
    }
}

/// Who receives a script's email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    LaAdmin,
    Creator,
}

impl Recipient {
    pub const ALL: [Recipient; 2] = [Recipient::LaAdmin, Recipient::Creator];

    pub fn as_str(self) -> &'static str {
        match self {
            Recipient::LaAdmin => "la_admin",
            Recipient::Creator => "creator",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Recipient::LaAdmin => "LocalAway manager",
            Recipient::Creator => "Creator",
        }
    }

    pub fn admin_setup_options() -> Vec<SelectOption<&'static str>> {
        Self::ALL
            .iter()
            .map(|r| SelectOption {
                value: r.as_str(),
                label: r.label(),
            })
            .collect()
    }
}

/// Categories of metric snapshot groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricGroupCategory {
    BrandPerformance,
}

impl MetricGroupCategory {
    pub fn id(self) -> i32 {
        match self {
            MetricGroupCategory::BrandPerformance => 1,
        }
    }
}
