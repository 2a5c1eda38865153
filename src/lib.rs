//! Event Booking Client
//!
//! Session handling, authenticated fetch, view-models and page controllers
//! for the event booking REST API: the public calendar/booking page, the
//! admin tables, and the "my tickets" list.

pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod pages;
pub mod session;
pub mod storage;
pub mod views;

pub use api::{ApiBody, ApiClient, RequestOptions};
pub use commands::{dispatch, Dispatch, Intent, PageHost};
pub use config::Config;
pub use errors::{ClientError, ClientResult};
pub use session::{Claims, Session};
pub use storage::{FileStorage, MemoryStorage, TokenStore};
