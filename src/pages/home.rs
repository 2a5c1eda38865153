//! Public page: calendar, available-events list, search, and the account panel.

use std::time::Duration;

use tokio::time::Instant;

use crate::api::ApiClient;
use crate::commands::{dispatch, Dispatch, Intent, PageHost};
use crate::errors::ClientError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::session::{self, AuthPanel, HeaderBar, PanelTab};
use crate::views::{AvailableEventRow, CalendarWidget, EventBoard, Listing, SearchBox};

/// The loading line above the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingLine {
    #[default]
    Hidden,
    Loading,
    /// Stays visible until the next successful fetch
    Failed(String),
}

/// Fields of the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub mobile: String,
}

/// Controller for the public page.
pub struct HomePage<W: CalendarWidget> {
    api: ApiClient,
    board: EventBoard,
    available: Listing<AvailableEventRow>,
    calendar: W,
    search: SearchBox,
    loading: LoadingLine,
    message: Option<String>,
    header: HeaderBar,
    panel: AuthPanel,
    panel_open: bool,
    login_message: Option<String>,
    register_message: Option<String>,
}

impl<W: CalendarWidget> HomePage<W> {
    pub fn new(api: ApiClient, calendar: W, search_debounce: Duration) -> Self {
        let mut page = Self {
            api,
            board: EventBoard::default(),
            available: Listing::Loading,
            calendar,
            search: SearchBox::new(search_debounce),
            loading: LoadingLine::Hidden,
            message: None,
            header: HeaderBar::default(),
            panel: AuthPanel::SignedOut(PanelTab::Login),
            panel_open: false,
            login_message: None,
            register_message: None,
        };
        page.refresh_auth();
        page
    }

    /// Page load: header and panel from the stored token, then data.
    pub async fn open(api: ApiClient, calendar: W, search_debounce: Duration) -> Self {
        let mut page = Self::new(api, calendar, search_debounce);
        page.fetch_data().await;
        page
    }

    /// Fetch events, then bookings, rebuild the view-model, render calendar and list.
    ///
    /// A bookings failure is shown but not fatal; counts are then empty.
    pub async fn fetch_data(&mut self) {
        self.loading = LoadingLine::Loading;
        self.message = None;

        let events = match self.api.list_events().await {
            Ok(events) => events,
            Err(err) => {
                tracing::error!("Failed to load events: {}", err);
                self.loading = LoadingLine::Failed(format!("Failed to load data: {}", err));
                self.available = Listing::Placeholder(format!("Failed to load data. {}", err));
                return;
            }
        };

        let bookings = match self.api.list_bookings().await {
            Ok(bookings) => bookings,
            Err(err) => {
                tracing::warn!("Bookings not loaded: {}", err);
                self.message = Some(format!("Bookings not loaded: {}", err));
                Vec::new()
            }
        };

        self.board = EventBoard::new(events, &bookings);
        self.calendar.render(self.board.calendar_entries());
        self.render_list();
        self.loading = LoadingLine::Hidden;
    }

    fn render_list(&mut self) {
        self.available = self.board.rows(self.search.applied());
    }

    /// Re-read the token and update header and account panel.
    pub fn refresh_auth(&mut self) {
        let session = self.api.session();
        self.header = HeaderBar::from(&session);
        self.panel = AuthPanel::for_session(&session);
    }

    /// Run an intent and, on success, re-fetch everything once.
    pub async fn handle(&mut self, host: &mut dyn PageHost, intent: Intent) -> Dispatch {
        let outcome = dispatch(&self.api, host, &intent).await;
        if outcome.is_completed() {
            self.fetch_data().await;
        }
        outcome
    }

    /// The "Book" button of a list row. Rows without seats have no button.
    pub async fn book(&mut self, host: &mut dyn PageHost, event_id: i64) -> Dispatch {
        let intent = self
            .available
            .rows()
            .iter()
            .find(|row| row.id == event_id)
            .and_then(AvailableEventRow::book_intent);

        match intent {
            Some(intent) => self.handle(host, intent).await,
            None => {
                let err = ClientError::Validation(format!("Event {} is not available", event_id));
                host.alert(&format!("Booking failed: {}", err));
                Dispatch::Failed(err)
            }
        }
    }

    /// A click on a calendar entry: confirm, then book.
    pub async fn calendar_click(&mut self, host: &mut dyn PageHost, event_id: i64) -> Dispatch {
        let intent = self.calendar.entry(event_id).map(|e| e.click_intent());
        match intent {
            Some(intent) => self.handle(host, intent).await,
            None => {
                let err = ClientError::Validation(format!("Event {} is not on the calendar", event_id));
                host.alert(&format!("Booking failed: {}", err));
                Dispatch::Failed(err)
            }
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) {
        self.login_message = None;
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.login_message = Some("Enter username and password".to_string());
            return;
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.api.login(&request).await {
            Ok(response) => match response.token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    if let Err(err) = self.sign_in(&token).await {
                        self.login_message = Some(format!("Login error: {}", err));
                    }
                }
                None => {
                    self.login_message = Some("Login succeeded but token missing".to_string());
                }
            },
            Err(err @ ClientError::Rejected { .. }) => {
                self.login_message = Some(err.to_string());
            }
            Err(err) => {
                tracing::error!("Login error: {}", err);
                self.login_message = Some(format!("Login error: {}", err));
            }
        }
    }

    /// Register, then log straight in with the same credentials.
    pub async fn register(&mut self, form: RegistrationForm) {
        self.register_message = None;
        let username = form.username.trim().to_string();
        let mobile = Some(form.mobile.trim().to_string()).filter(|m| !m.is_empty());

        if username.is_empty() || form.password.is_empty() {
            self.register_message = Some("Enter username and password".to_string());
            return;
        }
        if form.password != form.password_confirm {
            self.register_message = Some("Passwords do not match".to_string());
            return;
        }

        let request = RegisterRequest {
            username: username.clone(),
            password: form.password.clone(),
            mobile,
        };
        match self.api.register(&request).await {
            Ok(created) => tracing::info!("Registered user {:?}", created.username),
            Err(err @ ClientError::Rejected { .. }) => {
                self.register_message = Some(err.to_string());
                return;
            }
            Err(err) => {
                tracing::error!("Register error: {}", err);
                self.register_message = Some(format!("Register error: {}", err));
                return;
            }
        }

        let login = LoginRequest {
            username,
            password: form.password,
        };
        let token = match self.api.login(&login).await {
            Ok(response) => response.token.filter(|t| !t.is_empty()),
            Err(err) => {
                tracing::warn!("Login after register failed: {}", err);
                None
            }
        };
        match token {
            Some(token) => {
                if let Err(err) = self.sign_in(&token).await {
                    self.register_message = Some(format!("Register error: {}", err));
                }
            }
            None => self.register_message = Some("Registered. Please login.".to_string()),
        }
    }

    async fn sign_in(&mut self, token: &str) -> Result<(), ClientError> {
        session::set_token(self.api.store(), token)?;
        self.refresh_auth();
        self.close_panel();
        self.fetch_data().await;
        Ok(())
    }

    pub async fn logout(&mut self) {
        if let Err(err) = session::clear_token(self.api.store()) {
            tracing::error!("Failed to clear token: {}", err);
            self.message = Some(format!("Logout failed: {}", err));
        }
        self.refresh_auth();
        self.close_panel();
        self.fetch_data().await;
    }

    pub fn toggle_panel(&mut self) {
        if self.panel_open {
            self.close_panel();
        } else {
            self.refresh_auth();
            self.panel_open = true;
        }
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Switch the signed-out panel between the login and register forms.
    pub fn show_tab(&mut self, tab: PanelTab) {
        if let AuthPanel::SignedOut(_) = self.panel {
            self.panel = AuthPanel::SignedOut(tab);
        }
    }

    /// A keystroke in the search field.
    pub fn search_input(&mut self, text: &str) {
        self.search.input(text, Instant::now());
    }

    /// Apply the pending search if its debounce window has passed.
    pub fn apply_due_search(&mut self, now: Instant) -> bool {
        if self.search.take_due(now).is_some() {
            self.render_list();
            true
        } else {
            false
        }
    }

    /// Wait out the debounce window and re-render with the pending query.
    pub async fn settle_search(&mut self) -> bool {
        if self.search.settle().await.is_some() {
            self.render_list();
            true
        } else {
            false
        }
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.render_list();
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn board(&self) -> &EventBoard {
        &self.board
    }

    pub fn available(&self) -> &Listing<AvailableEventRow> {
        &self.available
    }

    pub fn calendar(&self) -> &W {
        &self.calendar
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    pub fn loading(&self) -> &LoadingLine {
        &self.loading
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn header(&self) -> &HeaderBar {
        &self.header
    }

    pub fn panel(&self) -> &AuthPanel {
        &self.panel
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn login_message(&self) -> Option<&str> {
        self.login_message.as_deref()
    }

    pub fn register_message(&self) -> Option<&str> {
        self.register_message.as_deref()
    }
}
