//! Event list renderers for the admin table and the public availability list.

use std::collections::HashMap;
use std::fmt;

use crate::commands::Intent;
use crate::models::{Booking, Event};

use super::{CalendarEntry, Listing};

pub const NO_EVENTS_FOUND: &str = "No events found";
pub const NO_EVENTS_MATCH: &str = "No events match.";

/// One row of the admin events table.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminEventRow {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub capacity: String,
}

impl AdminEventRow {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone().unwrap_or_default(),
            date: event.date.clone().unwrap_or_default(),
            capacity: event.capacity.map(|c| c.to_string()).unwrap_or_default(),
        }
    }

    pub fn delete_intent(&self) -> Intent {
        Intent::DeleteEvent {
            event_id: self.id,
            title: self.title.clone(),
        }
    }
}

impl fmt::Display for AdminEventRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<5} {:<32} {:<20} {:>8}  [Delete]",
            self.id, self.title, self.date, self.capacity
        )
    }
}

pub fn admin_event_rows(events: &[Event]) -> Listing<AdminEventRow> {
    Listing::from_rows(
        events.iter().map(AdminEventRow::from_event).collect(),
        NO_EVENTS_FOUND,
    )
}

/// Seats left at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Remaining(u32),
    Full,
}

impl Availability {
    pub fn from_remaining(remaining: u32) -> Self {
        if remaining > 0 {
            Availability::Remaining(remaining)
        } else {
            Availability::Full
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Remaining(n) => write!(f, "{} left", n),
            Availability::Full => write!(f, "Full"),
        }
    }
}

/// One entry of the public "available events" list.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableEventRow {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub capacity: u32,
    pub booked: u32,
    pub availability: Availability,
}

impl AvailableEventRow {
    /// Only rows with seats left get a "Book" button.
    pub fn is_bookable(&self) -> bool {
        matches!(self.availability, Availability::Remaining(_))
    }

    pub fn book_intent(&self) -> Option<Intent> {
        self.is_bookable().then(|| Intent::BookEvent {
            event_id: self.id,
            title: self.title.clone(),
            confirm: false,
        })
    }
}

impl fmt::Display for AvailableEventRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}\n    {} • Capacity: {} • Booked: {}  [{}]{}",
            self.id,
            self.title,
            self.date,
            self.capacity,
            self.booked,
            self.availability,
            if self.is_bookable() { " [Book]" } else { "" }
        )
    }
}

/// Bookings per event id. Bookings without an event reference are skipped.
pub fn count_bookings(bookings: &[Booking]) -> HashMap<i64, u32> {
    let mut counts = HashMap::new();
    for event_id in bookings.iter().filter_map(Booking::event_ref) {
        *counts.entry(event_id).or_insert(0) += 1;
    }
    counts
}

/// Case-insensitive substring match on title and location; plain substring
/// match on the date. An empty query matches everything.
pub fn matches_filter(event: &Event, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    event
        .title
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains(&q))
        || event.date.as_deref().is_some_and(|d| d.contains(&q))
        || event
            .location
            .as_deref()
            .is_some_and(|l| l.to_lowercase().contains(&q))
}

/// The public page's view-model: the last fetched events and the booking
/// count per event. Rebuilt wholesale after every fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBoard {
    events: Vec<Event>,
    booking_counts: HashMap<i64, u32>,
}

impl EventBoard {
    pub fn new(events: Vec<Event>, bookings: &[Booking]) -> Self {
        Self {
            events,
            booking_counts: count_bookings(bookings),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, event_id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    pub fn booked(&self, event_id: i64) -> u32 {
        self.booking_counts.get(&event_id).copied().unwrap_or(0)
    }

    /// `max(capacity - booked, 0)`
    pub fn remaining(&self, event: &Event) -> u32 {
        event.capacity_or_zero().saturating_sub(self.booked(event.id))
    }

    pub fn row(&self, event: &Event) -> AvailableEventRow {
        let booked = self.booked(event.id);
        AvailableEventRow {
            id: event.id,
            title: event.title_or_untitled().to_string(),
            date: event.date.clone().unwrap_or_default(),
            capacity: event.capacity_or_zero(),
            booked,
            availability: Availability::from_remaining(self.remaining(event)),
        }
    }

    /// Rows for every event matching `filter`.
    pub fn rows(&self, filter: &str) -> Listing<AvailableEventRow> {
        Listing::from_rows(
            self.events
                .iter()
                .filter(|e| matches_filter(e, filter))
                .map(|e| self.row(e))
                .collect(),
            NO_EVENTS_MATCH,
        )
    }

    pub fn calendar_entries(&self) -> Vec<CalendarEntry> {
        self.events.iter().map(CalendarEntry::from_event).collect()
    }
}
