//! User actions as data.
//!
//! Each clickable action (book, delete, cancel, create) is an [`Intent`].
//! [`dispatch`] runs any intent through the same steps: confirm, send one
//! authenticated mutation, report the outcome through the [`PageHost`]. The
//! page that dispatched decides what to re-fetch.

use crate::api::{ApiBody, ApiClient};
use crate::errors::{ClientError, ClientResult};
use crate::models::NewEvent;

/// Blocking dialogs and navigation offered by whatever hosts the page.
pub trait PageHost: Send {
    /// Ask a yes/no question; `false` aborts the action.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Show a blocking message.
    fn alert(&mut self, message: &str);
    /// Navigate away, e.g. to the login page.
    fn redirect(&mut self, page: &str);
}

/// A mutating user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Book a seat. `confirm` is set for calendar clicks, not for list buttons.
    BookEvent {
        event_id: i64,
        title: String,
        confirm: bool,
    },
    DeleteEvent {
        event_id: i64,
        title: String,
    },
    /// Admin table cancel
    CancelBooking { booking_id: i64 },
    /// "My tickets" cancel
    CancelTicket { booking_id: i64 },
    CreateEvent(NewEvent),
}

impl Intent {
    /// Prompt shown before anything is sent, if this action asks first.
    pub fn confirmation(&self) -> Option<String> {
        match self {
            Intent::BookEvent {
                title,
                confirm: true,
                ..
            } => Some(format!("Book event \"{}\"?", title)),
            Intent::BookEvent { .. } | Intent::CreateEvent(_) => None,
            Intent::DeleteEvent { title, .. } => Some(format!(
                "Delete event \"{}\"? This will remove related bookings.",
                title
            )),
            Intent::CancelBooking { .. } | Intent::CancelTicket { .. } => {
                Some("Cancel this booking?".to_string())
            }
        }
    }

    /// Alert shown after the mutation succeeds.
    pub fn success_notice(&self) -> Option<&'static str> {
        match self {
            Intent::BookEvent { .. } => Some("Booked successfully"),
            Intent::CancelTicket { .. } => Some("Booking cancelled."),
            _ => None,
        }
    }

    /// Alert shown when the mutation fails.
    pub fn failure_message(&self, err: &ClientError) -> String {
        match self {
            Intent::BookEvent { .. } => format!("Booking failed: {}", err),
            Intent::DeleteEvent { .. } => format!("Delete failed: {}", err),
            Intent::CancelBooking { .. } => format!("Cancel failed: {}", err),
            Intent::CancelTicket { .. } if err.is_transport() => "Cancel failed".to_string(),
            Intent::CancelTicket { .. } => format!("Failed to cancel: {}", err.detail()),
            Intent::CreateEvent(_) => format!("Create failed: {}", err),
        }
    }

    async fn execute(&self, api: &ApiClient) -> ClientResult<ApiBody> {
        match self {
            Intent::BookEvent { event_id, .. } => api.book_event(*event_id).await,
            Intent::DeleteEvent { event_id, .. } => api.delete_event(*event_id).await,
            Intent::CancelBooking { booking_id } | Intent::CancelTicket { booking_id } => {
                api.cancel_booking(*booking_id).await
            }
            Intent::CreateEvent(event) => {
                event.validate()?;
                api.create_event(event).await
            }
        }
    }
}

/// What happened to a dispatched intent.
#[derive(Debug)]
pub enum Dispatch {
    /// The user said no at the prompt; nothing was sent
    Declined,
    /// The server accepted the mutation
    Completed(ApiBody),
    /// The mutation failed and the host has been alerted
    Failed(ClientError),
}

impl Dispatch {
    pub fn is_completed(&self) -> bool {
        matches!(self, Dispatch::Completed(_))
    }
}

/// Confirm, send, and report one intent. No retries.
pub async fn dispatch(api: &ApiClient, host: &mut dyn PageHost, intent: &Intent) -> Dispatch {
    if let Some(prompt) = intent.confirmation() {
        if !host.confirm(&prompt) {
            tracing::debug!("Declined: {:?}", intent);
            return Dispatch::Declined;
        }
    }

    match intent.execute(api).await {
        Ok(body) => {
            if let Some(notice) = intent.success_notice() {
                host.alert(notice);
            }
            Dispatch::Completed(body)
        }
        Err(err) => {
            tracing::warn!("{:?} failed: {}", intent, err);
            host.alert(&intent.failure_message(&err));
            Dispatch::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_prompts() {
        let from_calendar = Intent::BookEvent {
            event_id: 1,
            title: "Jazz Night".to_string(),
            confirm: true,
        };
        assert_eq!(
            from_calendar.confirmation().as_deref(),
            Some("Book event \"Jazz Night\"?")
        );

        let from_list = Intent::BookEvent {
            event_id: 1,
            title: "Jazz Night".to_string(),
            confirm: false,
        };
        assert_eq!(from_list.confirmation(), None);

        let delete = Intent::DeleteEvent {
            event_id: 2,
            title: "Expo".to_string(),
        };
        assert_eq!(
            delete.confirmation().as_deref(),
            Some("Delete event \"Expo\"? This will remove related bookings.")
        );
        assert_eq!(
            Intent::CancelBooking { booking_id: 3 }.confirmation().as_deref(),
            Some("Cancel this booking?")
        );
    }

    #[test]
    fn test_ticket_cancel_failure_messages() {
        let intent = Intent::CancelTicket { booking_id: 4 };

        let offline = ClientError::Transport("connection refused".to_string());
        assert_eq!(intent.failure_message(&offline), "Cancel failed");

        let rejected = ClientError::Request {
            status: 404,
            reason: "Not Found".to_string(),
            body: "Booking not found".to_string(),
        };
        assert_eq!(
            intent.failure_message(&rejected),
            "Failed to cancel: Booking not found"
        );
    }

    #[test]
    fn test_failure_message_keeps_status() {
        let intent = Intent::BookEvent {
            event_id: 1,
            title: "x".to_string(),
            confirm: false,
        };
        let err = ClientError::Auth {
            status: 401,
            body: String::new(),
        };
        assert_eq!(
            intent.failure_message(&err),
            "Booking failed: Auth error (401). Please login."
        );
    }
}
