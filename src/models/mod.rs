//! Data models for the event booking API.
//!
//! Field names follow the server's camelCase JSON.

mod booking;
mod event;
mod user;

pub use booking::*;
pub use event::*;
pub use user::*;
