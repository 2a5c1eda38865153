//! Page controllers.
//!
//! Each page owns its view-model and rendered listings, turns user actions
//! into [`Intent`](crate::commands::Intent)s, and decides what to re-fetch
//! once a mutation succeeds.

mod admin;
mod home;
mod tickets;

pub use admin::*;
pub use home::*;
pub use tickets::*;
