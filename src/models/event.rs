//! Event model matching the booking API's event resource.

use serde::{Deserialize, Serialize};

use crate::errors::{ClientError, ClientResult};

/// A bookable event. Owned by the server; the client only caches it per load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Some payloads carry `start` instead of `date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
}

impl Event {
    pub fn title_or_untitled(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "Untitled",
        }
    }

    /// `date`, else `start`.
    pub fn starts_on(&self) -> Option<&str> {
        self.date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(self.start.as_deref().filter(|s| !s.is_empty()))
    }

    /// Missing or negative capacity counts as zero.
    pub fn capacity_or_zero(&self) -> u32 {
        self.capacity
            .map(|c| c.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0)
    }
}

/// Request body for creating a new event (admin form).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub capacity: Option<i64>,
}

impl NewEvent {
    /// Trim the free-text fields the way the form does before submitting.
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date,
            capacity: self.capacity,
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation("Title is required".to_string()));
        }
        if self.capacity.is_some_and(|c| c < 0) {
            return Err(ClientError::Validation(
                "Capacity must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
