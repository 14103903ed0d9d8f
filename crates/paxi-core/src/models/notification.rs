//! Owner notifications.

use serde::{Deserialize, Serialize};

/// Notification category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Approval,
    /// Something the owner has to do (upload a photo, fill a questionnaire)
    Action,
    Message,
}

/// A notification shown in the owner's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Only ever transitions false -> true
    pub read: bool,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Approval => "approval",
            NotificationKind::Action => "action",
            NotificationKind::Message => "message",
        }
    }
}

impl Notification {
    /// Whether the notification asks the owner to do something.
    pub fn requires_action(&self) -> bool {
        self.kind == NotificationKind::Action && self.action_url.is_some()
    }
}
