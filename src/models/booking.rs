//! Booking model matching the booking API's booking resource.

use serde::{Deserialize, Serialize};

use super::{Event, UserRef};

/// A booking of one seat at one event.
///
/// Full payloads nest the user and event; trimmed ones only carry the ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub event: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub qr_code_path: Option<String>,
}

impl Booking {
    /// Event this booking counts against: nested event first, then `eventId`.
    pub fn event_ref(&self) -> Option<i64> {
        self.event.as_ref().map(|e| e.id).or(self.event_id)
    }

    /// Username, or a raw id label when the nested user is missing.
    pub fn user_label(&self) -> String {
        match &self.user {
            Some(user) => user.label(),
            None => format!("user_id:{}", id_or_na(self.user_id)),
        }
    }

    /// Event title, or a raw id label when the nested event is missing.
    pub fn event_label(&self) -> String {
        match &self.event {
            Some(event) => match event.title.as_deref() {
                Some(title) if !title.is_empty() => title.to_string(),
                _ => format!("id:{}", event.id),
            },
            None => format!("event_id:{}", id_or_na(self.event_id)),
        }
    }
}

fn id_or_na(id: Option<i64>) -> String {
    id.map(|id| id.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
