//! Shared library for the calendar events service.
//!
//! Request handling, validated commands, and PostgreSQL-backed event storage
//! used by the `calendar` Lambda.

pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod http;
pub mod models;
pub mod params;
pub mod repo;
pub mod secrets;

pub use config::{Config, DatabaseSource};
pub use error::{Error, Result};
pub use handler::CalendarHandler;
pub use models::{CreateEvent, DateRange, DeleteEvent, Event, UpdateEvent};
pub use repo::{EventStore, PgEventStore};
pub use secrets::{get_database_credentials, get_secret, DatabaseCredentials};
