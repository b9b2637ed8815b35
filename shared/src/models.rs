//! Calendar data models and validated commands.
//!
//! Commands can only be built through their constructors, which run the
//! validation once. The storage layer accepts them as-is.

use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

use crate::{Error, Result};

/// A stored calendar event, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Event {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub title: String,
}

/// Create a new event for a user on a given day.
#[derive(Debug, Clone, Validate)]
pub struct CreateEvent {
    #[validate(range(min = 1, message = "user_id must be a positive integer"))]
    user_id: i64,
    date: NaiveDate,
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: String,
}

impl CreateEvent {
    /// Build a create command. The title is trimmed before validation.
    pub fn new(user_id: i64, date: NaiveDate, title: &str) -> Result<Self> {
        let command = Self {
            user_id,
            date,
            title: title.trim().to_string(),
        };
        command.validate()?;
        Ok(command)
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Rename an event, optionally only when it belongs to `user_id`.
#[derive(Debug, Clone, Validate)]
pub struct UpdateEvent {
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    id: i64,
    #[validate(range(min = 1, message = "user_id must be a positive integer"))]
    user_id: Option<i64>,
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: String,
}

impl UpdateEvent {
    pub fn new(id: i64, title: &str, user_id: Option<i64>) -> Result<Self> {
        let command = Self {
            id,
            user_id,
            title: title.trim().to_string(),
        };
        command.validate()?;
        Ok(command)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Remove the event identified by `id` scheduled on `date`.
#[derive(Debug, Clone, Copy, Validate)]
pub struct DeleteEvent {
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    id: i64,
    date: NaiveDate,
}

impl DeleteEvent {
    pub fn new(id: i64, date: NaiveDate) -> Result<Self> {
        let command = Self { id, date };
        command.validate()?;
        Ok(command)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Inclusive date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::Validation(format!(
                "range end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
