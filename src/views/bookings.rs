//! Booking renderers: the admin bookings table and the "my tickets" cards.

use std::fmt;

use crate::commands::Intent;
use crate::models::Booking;

use super::Listing;

pub const NO_BOOKINGS_FOUND: &str = "No bookings found";

/// Link to a stored QR image, relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrLink {
    pub href: String,
    pub text: String,
}

/// One row of the admin bookings table.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminBookingRow {
    pub id: i64,
    pub user: String,
    pub event: String,
    pub qr: Option<QrLink>,
}

impl AdminBookingRow {
    pub fn from_booking(booking: &Booking) -> Self {
        let qr = booking
            .qr_code_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|path| QrLink {
                href: format!("/{}", path.trim_start_matches('/')),
                text: path.to_string(),
            });

        Self {
            id: booking.id,
            user: booking.user_label(),
            event: booking.event_label(),
            qr,
        }
    }

    pub fn cancel_intent(&self) -> Intent {
        Intent::CancelBooking {
            booking_id: self.id,
        }
    }
}

impl fmt::Display for AdminBookingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qr = self.qr.as_ref().map(|q| q.href.as_str()).unwrap_or("—");
        write!(
            f,
            "#{:<5} {:<20} {:<32} {}  [Cancel]",
            self.id, self.user, self.event, qr
        )
    }
}

pub fn admin_booking_rows(bookings: &[Booking]) -> Listing<AdminBookingRow> {
    Listing::from_rows(
        bookings.iter().map(AdminBookingRow::from_booking).collect(),
        NO_BOOKINGS_FOUND,
    )
}

/// One card on the "my tickets" page.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketCard {
    pub booking_id: i64,
    pub title: String,
    pub date: String,
    pub capacity: String,
    pub booked_by: String,
    /// Inline QR preview source
    pub qr_image_url: String,
    /// "Download QR" target; the same endpoint as the preview
    pub download_url: String,
}

impl TicketCard {
    pub fn new(booking: &Booking, qr_url: String) -> Self {
        let event = booking.event.as_ref();

        let title = event
            .and_then(|e| e.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Event".to_string());
        let date = event
            .and_then(|e| e.date.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "—".to_string());
        let capacity = event
            .and_then(|e| e.capacity)
            .filter(|c| *c != 0)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "—".to_string());
        let booked_by = booking.user.clone().unwrap_or_default().label();

        Self {
            booking_id: booking.id,
            title,
            date,
            capacity,
            booked_by,
            download_url: qr_url.clone(),
            qr_image_url: qr_url,
        }
    }

    pub fn cancel_intent(&self) -> Intent {
        Intent::CancelTicket {
            booking_id: self.booking_id,
        }
    }
}

impl fmt::Display for TicketCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "    Date: {} • Capacity: {}", self.date, self.capacity)?;
        writeln!(
            f,
            "    Booked by: {} • Booking ID: {}",
            self.booked_by, self.booking_id
        )?;
        write!(f, "    QR: {}  [Download QR] [Cancel Booking]", self.download_url)
    }
}

/// Cards for the current user's bookings. `qr_url` maps a booking id to its QR endpoint.
pub fn ticket_cards(bookings: &[Booking], qr_url: impl Fn(i64) -> String) -> Vec<TicketCard> {
    bookings
        .iter()
        .map(|b| TicketCard::new(b, qr_url(b.id)))
        .collect()
}
