//! Store operations as data.
//!
//! Every mutation the store accepts is an `Action`. Applied actions are
//! journaled so a session can be replayed on top of a restored snapshot.

use serde::{Deserialize, Serialize};

use crate::models::{Appointment, Owner, Pet};

/// A single store mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    /// Simulated sign-in; credentials are not checked or recorded
    Login { email: String },
    Signup { email: String, name: String },
    Logout,
    SetCurrentPet { pet_id: String },
    AddPet { pet: Pet },
    UpdatePet { pet: Pet },
    UpdateOwner { owner: Owner },
    CreateAppointment { appointment: Appointment },
    UpdateAppointment { appointment: Appointment },
    SetCurrentAppointment { appointment: Option<Appointment> },
    MarkNotificationRead { notification_id: String },
    ToggleChat,
    SetChatOpen { open: bool },
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Login { .. } => "login",
            Action::Signup { .. } => "signup",
            Action::Logout => "logout",
            Action::SetCurrentPet { .. } => "set_current_pet",
            Action::AddPet { .. } => "add_pet",
            Action::UpdatePet { .. } => "update_pet",
            Action::UpdateOwner { .. } => "update_owner",
            Action::CreateAppointment { .. } => "create_appointment",
            Action::UpdateAppointment { .. } => "update_appointment",
            Action::SetCurrentAppointment { .. } => "set_current_appointment",
            Action::MarkNotificationRead { .. } => "mark_notification_read",
            Action::ToggleChat => "toggle_chat",
            Action::SetChatOpen { .. } => "set_chat_open",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_tagging() {
        let json = serde_json::to_string(&Action::MarkNotificationRead {
            notification_id: "notif-1".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"markNotificationRead","payload":{"notification_id":"notif-1"}}"#
        );

        let unit = serde_json::to_string(&Action::Logout).unwrap();
        assert_eq!(unit, r#"{"type":"logout"}"#);
    }

    #[test]
    fn test_optional_payload_parses() {
        let action: Action = serde_json::from_str(
            r#"{"type":"setCurrentAppointment","payload":{"appointment":null}}"#,
        )
        .unwrap();
        assert_eq!(action, Action::SetCurrentAppointment { appointment: None });
        assert_eq!(action.name(), "set_current_appointment");
    }
}
