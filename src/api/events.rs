//! Event endpoints.

use super::{ApiBody, ApiClient, RequestOptions};
use crate::errors::ClientResult;
use crate::models::{Event, NewEvent};

impl ApiClient {
    /// GET /events - List all events.
    pub async fn list_events(&self) -> ClientResult<Vec<Event>> {
        self.fetch("/events", RequestOptions::get()).await?.into_list()
    }

    /// POST /events - Create an event (admin).
    pub async fn create_event(&self, event: &NewEvent) -> ClientResult<ApiBody> {
        let body = serde_json::to_value(event)?;
        self.fetch("/events", RequestOptions::post(Some(body))).await
    }

    /// DELETE /events/{id} - Delete an event and its bookings (admin).
    pub async fn delete_event(&self, event_id: i64) -> ClientResult<ApiBody> {
        self.fetch(&format!("/events/{}", event_id), RequestOptions::delete())
            .await
    }
}
