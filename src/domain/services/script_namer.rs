//! Automatic naming of creator scripts.

use crate::domain::value_objects::{ActionType, EventType, ScriptParams};

/// Builds a name from a script's event, action and params.
pub struct ScriptNamer;

impl ScriptNamer {
    /// Name used when a script is saved without one.
    ///
    /// e.g. `Working status changed to Approved → Send email to Creator`
    pub fn auto_pick_name(event_type_id: i32, action_type_id: i32, params: &ScriptParams) -> String {
        format!(
            "{} → {}",
            Self::describe_event(event_type_id, params),
            Self::describe_action(action_type_id, params)
        )
    }

    fn describe_event(event_type_id: i32, params: &ScriptParams) -> String {
        match EventType::from_id(event_type_id) {
            Some(EventType::WorkingStatusChange) => match params.status_to() {
                Ok(status) => format!("Working status changed to {}", status.label()),
                Err(_) => EventType::WorkingStatusChange.label().to_string(),
            },
            Some(EventType::WorkingStatusTimeout) => {
                let status = params
                    .status()
                    .map(|s| format!("Working status {}", s.label()))
                    .unwrap_or_else(|_| "Working status".to_string());
                let hours = params.timeout_hours.unwrap_or(0);
                if hours >= 24 {
                    format!("{} timed out after {} days", status, params.timeout_in_round_days())
                } else {
                    format!("{} timed out after {} hours", status, hours)
                }
            }
            None => format!("Event #{}", event_type_id),
        }
    }

    fn describe_action(action_type_id: i32, params: &ScriptParams) -> String {
        match ActionType::from_id(action_type_id) {
            Some(ActionType::SendEmail) => match params.recipient() {
                Some(recipient) => format!("Send email to {}", recipient.label()),
                None => ActionType::SendEmail.label().to_string(),
            },
            None => format!("Action #{}", action_type_id),
        }
    }
}
