//! PostgreSQL-backed [`EventStore`].

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use super::EventStore;
use crate::models::{CreateEvent, DateRange, DeleteEvent, Event, UpdateEvent};
use crate::{Error, Result};

/// Event store backed by a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn create_event(&self, command: &CreateEvent) -> Result<Event> {
        let event: Event = sqlx::query_as(
            r#"
            INSERT INTO events (user_id, date, title)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, date, title
            "#,
        )
        .bind(command.user_id())
        .bind(command.date())
        .bind(command.title())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn delete_event(&self, command: &DeleteEvent) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND date = $2")
            .bind(command.id())
            .bind(command.date())
            .execute(&self.pool)
            .await?;

        debug!(
            id = command.id(),
            date = %command.date(),
            rows_affected = result.rows_affected(),
            "delete_event finished"
        );
        Ok(())
    }

    async fn events_for_day(&self, user_id: i64, date: NaiveDate) -> Result<Vec<Event>> {
        let events: Vec<Event> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, title
            FROM events
            WHERE user_id = $1 AND date = $2
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn events_for_dates(&self, user_id: i64, range: DateRange) -> Result<Vec<Event>> {
        let events: Vec<Event> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, title
            FROM events
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn update_event(&self, command: &UpdateEvent) -> Result<Event> {
        let event: Option<Event> = sqlx::query_as(
            r#"
            UPDATE events
            SET title = $1
            WHERE id = $2 AND ($3::BIGINT IS NULL OR user_id = $3)
            RETURNING id, user_id, date, title
            "#,
        )
        .bind(command.title())
        .bind(command.id())
        .bind(command.user_id())
        .fetch_optional(&self.pool)
        .await?;

        event.ok_or_else(|| Error::NotFound(format!("event {} not found", command.id())))
    }
}
