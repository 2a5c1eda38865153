//! Admin page: events table with delete, bookings table with cancel, and the create-event form.

use crate::api::ApiClient;
use crate::commands::{dispatch, Dispatch, Intent, PageHost};
use crate::errors::ClientError;
use crate::models::{Event, NewEvent};
use crate::views::{admin_booking_rows, admin_event_rows, AdminBookingRow, AdminEventRow, Listing};

/// Tone of the create-form message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub tone: Tone,
    pub text: String,
}

/// Controller for the admin page.
pub struct AdminPage {
    api: ApiClient,
    events: Listing<AdminEventRow>,
    bookings: Listing<AdminBookingRow>,
    create_message: Option<FormMessage>,
    notice: Option<String>,
}

impl AdminPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            events: Listing::Loading,
            bookings: Listing::Loading,
            create_message: None,
            notice: None,
        }
    }

    /// Page load: both tables.
    pub async fn open(api: ApiClient) -> Self {
        let mut page = Self::new(api);
        page.refresh().await;
        page
    }

    /// The refresh control.
    pub async fn refresh(&mut self) {
        self.load_events().await;
        self.load_bookings().await;
    }

    pub async fn load_events(&mut self) {
        self.events = Listing::Loading;
        self.events = match self.api.list_events().await {
            Ok(events) => admin_event_rows(&events),
            Err(err) => Listing::Placeholder(format!("Error loading events: {}", err)),
        };
    }

    pub async fn load_bookings(&mut self) {
        self.bookings = Listing::Loading;
        self.bookings = match self.api.list_bookings().await {
            Ok(bookings) => admin_booking_rows(&bookings),
            Err(err @ ClientError::Auth { .. }) => {
                tracing::warn!("Bookings not available: {}", err);
                Listing::Placeholder(format!("Bookings not available: {}", err.detail()))
            }
            Err(err) => Listing::Placeholder(format!("Error loading bookings: {}", err)),
        };
    }

    /// Submit the create-event form. Returns `true` when the form should be reset.
    pub async fn create_event(&mut self, host: &mut dyn PageHost, form: NewEvent) -> bool {
        self.create_message = None;
        let outcome = self.handle(host, Intent::CreateEvent(form.trimmed())).await;
        outcome.is_completed()
    }

    pub async fn delete_event(&mut self, host: &mut dyn PageHost, event_id: i64) -> Dispatch {
        let intent = self
            .events
            .rows()
            .iter()
            .find(|row| row.id == event_id)
            .map(AdminEventRow::delete_intent);

        match intent {
            Some(intent) => self.handle(host, intent).await,
            None => self.reject(host, "Delete failed", format!("Event {} not found", event_id)),
        }
    }

    pub async fn cancel_booking(&mut self, host: &mut dyn PageHost, booking_id: i64) -> Dispatch {
        let intent = self
            .bookings
            .rows()
            .iter()
            .find(|row| row.id == booking_id)
            .map(AdminBookingRow::cancel_intent);

        match intent {
            Some(intent) => self.handle(host, intent).await,
            None => self.reject(host, "Cancel failed", format!("Booking {} not found", booking_id)),
        }
    }

    /// Run an intent and re-fetch what it touched: cancel reloads bookings,
    /// everything else reloads both tables.
    pub async fn handle(&mut self, host: &mut dyn PageHost, intent: Intent) -> Dispatch {
        self.notice = None;
        let outcome = dispatch(&self.api, host, &intent).await;

        match (&intent, &outcome) {
            (Intent::CreateEvent(_), Dispatch::Completed(body)) => {
                self.create_message = Some(created_message(body.clone().into_json::<Event>()));
                self.refresh().await;
            }
            (Intent::CreateEvent(_), Dispatch::Failed(err)) => {
                self.create_message = Some(FormMessage {
                    tone: Tone::Error,
                    text: format!("Error: {}", err),
                });
            }
            (Intent::CancelBooking { .. }, Dispatch::Completed(_)) => self.load_bookings().await,
            (_, Dispatch::Completed(_)) => self.refresh().await,
            (_, Dispatch::Failed(err)) => self.notice = Some(intent.failure_message(err)),
            (_, Dispatch::Declined) => {}
        }

        outcome
    }

    fn reject(&mut self, host: &mut dyn PageHost, prefix: &str, reason: String) -> Dispatch {
        let err = ClientError::Validation(reason);
        let message = format!("{}: {}", prefix, err);
        host.alert(&message);
        self.notice = Some(message);
        Dispatch::Failed(err)
    }

    pub fn events(&self) -> &Listing<AdminEventRow> {
        &self.events
    }

    pub fn bookings(&self) -> &Listing<AdminBookingRow> {
        &self.bookings
    }

    pub fn create_message(&self) -> Option<&FormMessage> {
        self.create_message.as_ref()
    }

    /// Inline message left by the last failed action.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

fn created_message(created: Result<Event, ClientError>) -> FormMessage {
    match created {
        Ok(event) => FormMessage {
            tone: Tone::Success,
            text: format!(
                "Created event: {} (id: {})",
                event.title.unwrap_or_default(),
                event.id
            ),
        },
        Err(err) => {
            tracing::warn!("Created event body did not parse: {}", err);
            FormMessage {
                tone: Tone::Success,
                text: "Created event".to_string(),
            }
        }
    }
}
