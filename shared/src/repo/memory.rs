//! In-memory [`EventStore`] for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::EventStore;
use crate::models::{CreateEvent, DateRange, DeleteEvent, Event, UpdateEvent};
use crate::{Error, Result};

#[derive(Debug, Default)]
pub(crate) struct InMemoryEventStore {
    rows: Mutex<Vec<Event>>,
}

impl InMemoryEventStore {
    pub(crate) fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create_event(&self, command: &CreateEvent) -> Result<Event> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let event = Event {
            id,
            user_id: command.user_id(),
            date: command.date(),
            title: command.title().to_string(),
        };
        rows.push(event.clone());
        Ok(event)
    }

    async fn delete_event(&self, command: &DeleteEvent) -> Result<()> {
        self.rows
            .lock()
            .unwrap()
            .retain(|e| !(e.id == command.id() && e.date == command.date()));
        Ok(())
    }

    async fn events_for_day(&self, user_id: i64, date: NaiveDate) -> Result<Vec<Event>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && e.date == date)
            .cloned()
            .collect())
    }

    async fn events_for_dates(&self, user_id: i64, range: DateRange) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(e.date))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.id));
        Ok(events)
    }

    async fn update_event(&self, command: &UpdateEvent) -> Result<Event> {
        let mut rows = self.rows.lock().unwrap();
        let event = rows
            .iter_mut()
            .find(|e| {
                e.id == command.id() && command.user_id().map_or(true, |user| e.user_id == user)
            })
            .ok_or_else(|| Error::NotFound(format!("event {} not found", command.id())))?;
        event.title = command.title().to_string();
        Ok(event.clone())
    }
}
