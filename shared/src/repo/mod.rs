//! Event storage.
//!
//! [`EventStore`] is the seam between request handling and persistence. Every
//! method maps to exactly one SQL statement in [`PgEventStore`]; commands
//! arrive already validated.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{CreateEvent, DateRange, DeleteEvent, Event, UpdateEvent};
use crate::Result;

#[cfg(test)]
pub(crate) mod memory;
mod postgres;

pub use postgres::PgEventStore;

/// Persistence operations for calendar events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert a new event and return it with its assigned id.
    async fn create_event(&self, command: &CreateEvent) -> Result<Event>;

    /// Delete the event matching both id and date.
    ///
    /// Deleting a row that does not exist is not an error.
    async fn delete_event(&self, command: &DeleteEvent) -> Result<()>;

    /// Events owned by `user_id` on exactly `date`. Empty when none match.
    async fn events_for_day(&self, user_id: i64, date: NaiveDate) -> Result<Vec<Event>>;

    /// Events owned by `user_id` within the inclusive `range`.
    async fn events_for_dates(&self, user_id: i64, range: DateRange) -> Result<Vec<Event>>;

    /// Replace an event's title and return the updated row.
    ///
    /// Returns [`crate::Error::NotFound`] when no row matches.
    async fn update_event(&self, command: &UpdateEvent) -> Result<Event>;
}
