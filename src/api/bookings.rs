//! Booking endpoints, including the QR code image.

use reqwest::header::{HeaderValue, ACCEPT};

use super::{ApiBody, ApiClient, RequestOptions};
use crate::errors::ClientResult;
use crate::models::Booking;

impl ApiClient {
    /// GET /bookings - List all bookings (admin-authorized).
    pub async fn list_bookings(&self) -> ClientResult<Vec<Booking>> {
        self.fetch("/bookings", RequestOptions::get()).await?.into_list()
    }

    /// GET /bookings/me - List the current user's bookings.
    pub async fn my_bookings(&self) -> ClientResult<Vec<Booking>> {
        self.fetch("/bookings/me", RequestOptions::get())
            .await?
            .into_list()
    }

    /// POST /bookings/book/{eventId} - Book a seat for the current user.
    pub async fn book_event(&self, event_id: i64) -> ClientResult<ApiBody> {
        self.fetch(
            &format!("/bookings/book/{}", event_id),
            RequestOptions::post(None),
        )
        .await
    }

    /// DELETE /bookings/{id} - Cancel a booking.
    pub async fn cancel_booking(&self, booking_id: i64) -> ClientResult<ApiBody> {
        self.fetch(&format!("/bookings/{}", booking_id), RequestOptions::delete())
            .await
    }

    /// Absolute URL of a booking's QR code image, for both preview and download.
    pub fn qr_code_url(&self, booking_id: i64) -> String {
        self.url(&format!("/bookings/{}/qrcode", booking_id))
    }

    /// GET /bookings/{id}/qrcode - Fetch the QR code image bytes.
    pub async fn download_qr_code(&self, booking_id: i64) -> ClientResult<Vec<u8>> {
        let opts = RequestOptions::get().with_header(ACCEPT, HeaderValue::from_static("image/*"));
        let response = self
            .send(&format!("/bookings/{}/qrcode", booking_id), opts, true)
            .await?;
        let response = super::check_status(response).await?;

        Ok(response.bytes().await?.to_vec())
    }
}
