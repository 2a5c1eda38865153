//! "My tickets" page: the current user's bookings with QR codes.

use crate::api::ApiClient;
use crate::commands::{dispatch, Dispatch, Intent, PageHost};
use crate::views::{ticket_cards, Listing, TicketCard};

/// Controller for the tickets page.
pub struct TicketsPage {
    api: ApiClient,
    login_page: String,
    tickets: Listing<TicketCard>,
    redirected: bool,
}

impl TicketsPage {
    pub fn new(api: ApiClient, login_page: impl Into<String>) -> Self {
        Self {
            api,
            login_page: login_page.into(),
            tickets: Listing::Loading,
            redirected: false,
        }
    }

    pub async fn open(api: ApiClient, login_page: impl Into<String>, host: &mut dyn PageHost) -> Self {
        let mut page = Self::new(api, login_page);
        page.load(host).await;
        page
    }

    /// Load the current user's bookings. A 401 sends the host to the login page.
    pub async fn load(&mut self, host: &mut dyn PageHost) {
        self.tickets = Listing::Loading;
        self.redirected = false;

        match self.api.my_bookings().await {
            Ok(bookings) => {
                let cards = ticket_cards(&bookings, |id| self.api.qr_code_url(id));
                self.tickets = Listing::Rows(cards);
            }
            Err(err) if err.status() == Some(401) => {
                tracing::info!("Not logged in, redirecting to {}", self.login_page);
                host.redirect(&self.login_page);
                self.redirected = true;
            }
            Err(err) => {
                tracing::error!("Failed to load bookings: {}", err);
                self.tickets = Listing::Placeholder(format!("Failed to load bookings: {}", err));
            }
        }
    }

    pub async fn cancel(&mut self, host: &mut dyn PageHost, booking_id: i64) -> Dispatch {
        let outcome = dispatch(&self.api, host, &Intent::CancelTicket { booking_id }).await;
        if outcome.is_completed() {
            self.load(host).await;
        }
        outcome
    }

    pub fn tickets(&self) -> &Listing<TicketCard> {
        &self.tickets
    }

    /// The last load sent the host to the login page; nothing here is worth showing.
    pub fn redirected(&self) -> bool {
        self.redirected
    }

    /// Loaded, and nothing booked.
    pub fn no_tickets(&self) -> bool {
        matches!(&self.tickets, Listing::Rows(rows) if rows.is_empty())
    }
}
