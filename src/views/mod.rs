//! View renderers.
//!
//! Views turn fetched data into row models the pages hold and print. They
//! never fetch; each row knows which [`Intent`](crate::commands::Intent) its
//! action button produces.

pub mod bookings;
pub mod calendar;
pub mod events;
pub mod search;

use std::fmt;

pub use bookings::*;
pub use calendar::*;
pub use events::*;
pub use search::*;

/// What a list or table currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Loading,
    /// A single muted line: empty state or error text
    Placeholder(String),
    Rows(Vec<T>),
}

impl<T> Listing<T> {
    /// Rows, or the placeholder when there are none.
    pub fn from_rows(rows: Vec<T>, empty_text: &str) -> Self {
        if rows.is_empty() {
            Listing::Placeholder(empty_text.to_string())
        } else {
            Listing::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Listing::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Listing::Placeholder(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Listing::Loading)
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Listing::Loading
    }
}

impl<T: fmt::Display> fmt::Display for Listing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Loading => writeln!(f, "Loading..."),
            Listing::Placeholder(text) => writeln!(f, "{}", text),
            Listing::Rows(rows) => rows.iter().try_for_each(|row| writeln!(f, "{}", row)),
        }
    }
}
