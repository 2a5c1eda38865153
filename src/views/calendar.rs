//! Calendar adapter.
//!
//! Events are mapped to `{id, title, start}` entries and handed to a
//! [`CalendarWidget`]. Clicking an entry books it after a confirmation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::commands::Intent;
use crate::models::Event;

/// One calendar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub id: i64,
    pub title: String,
    pub start: Option<String>,
}

impl CalendarEntry {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title_or_untitled().to_string(),
            start: event.starts_on().map(str::to_string),
        }
    }

    /// Calendar day of `start`, when it parses as a date or date-time.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.as_deref().and_then(parse_day)
    }

    pub fn click_intent(&self) -> Intent {
        Intent::BookEvent {
            event_id: self.id,
            title: self.title.clone(),
            confirm: true,
        }
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Seam for the calendar widget the page renders into.
pub trait CalendarWidget: Send {
    /// Replace whatever is shown with `entries`.
    fn render(&mut self, entries: Vec<CalendarEntry>);

    /// Entry with the given id, for click handling.
    fn entry(&self, id: i64) -> Option<&CalendarEntry>;
}

/// Text agenda: entries grouped per day, unparsable dates listed last.
#[derive(Debug, Clone, Default)]
pub struct AgendaCalendar {
    entries: Vec<CalendarEntry>,
    renders: usize,
}

impl AgendaCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    /// How many times the widget has been (re)built.
    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn days(&self) -> BTreeMap<NaiveDate, Vec<&CalendarEntry>> {
        let mut days: BTreeMap<NaiveDate, Vec<&CalendarEntry>> = BTreeMap::new();
        for entry in &self.entries {
            if let Some(day) = entry.start_date() {
                days.entry(day).or_default().push(entry);
            }
        }
        days
    }

    pub fn unscheduled(&self) -> Vec<&CalendarEntry> {
        self.entries
            .iter()
            .filter(|e| e.start_date().is_none())
            .collect()
    }
}

impl CalendarWidget for AgendaCalendar {
    fn render(&mut self, entries: Vec<CalendarEntry>) {
        self.entries = entries;
        self.renders += 1;
    }

    fn entry(&self, id: i64) -> Option<&CalendarEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

impl fmt::Display for AgendaCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (day, entries) in self.days() {
            writeln!(f, "{}", day.format("%a %Y-%m-%d"))?;
            for entry in entries {
                writeln!(f, "    #{} {}", entry.id, entry.title)?;
            }
        }
        let unscheduled = self.unscheduled();
        if !unscheduled.is_empty() {
            writeln!(f, "Unscheduled")?;
            for entry in unscheduled {
                writeln!(f, "    #{} {}", entry.id, entry.title)?;
            }
        }
        Ok(())
    }
}
