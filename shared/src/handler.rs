//! Calendar request handling.
//!
//! Endpoints:
//! - POST /create_event - Create an event (`user_id`, `date`, `title`)
//! - GET /events_for_day - Events on a day (`user_id`, `date`)
//! - GET /events_for_week - Events from `date` through `date + 7 days`
//! - GET /events_for_month - Events from `date` through `date + 1 month`
//! - POST /update_event - Rename an event (`id`, `title`, optional `user_id`)
//! - POST /delete_event - Delete an event (`id`, `date`)

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lambda_http::http::Method;
use lambda_http::{Body, Request, RequestExt, Response};
use tracing::{error, info, warn};

use crate::http::{error_response, json_response, Confirmation};
use crate::models::{CreateEvent, DeleteEvent, UpdateEvent};
use crate::params::{month_range, week_range, RequestParams};
use crate::repo::EventStore;
use crate::{Error, Result};

/// Routes calendar requests to an [`EventStore`].
pub struct CalendarHandler {
    store: Arc<dyn EventStore>,
    query_timeout: Duration,
}

impl CalendarHandler {
    pub fn new(store: Arc<dyn EventStore>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Handle one invocation. Failures are rendered as JSON error responses;
    /// only a response that cannot be built at all escapes as `Err`.
    pub async fn handle(
        &self,
        event: Request,
    ) -> std::result::Result<Response<Body>, lambda_http::Error> {
        let method = event.method().clone();
        let raw_path = event.uri().path();
        // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
        let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

        info!("Calendar request: {} {}", method, path);

        match self.route(&method, path, &event).await {
            Ok(response) => Ok(response),
            Err(e) => {
                if e.status_code() >= 500 {
                    error!(error = %e, "{} {} failed", method, path);
                } else {
                    warn!(error = %e, "{} {} rejected", method, path);
                }
                Ok(error_response(&e)?)
            }
        }
    }

    async fn route(&self, method: &Method, path: &str, event: &Request) -> Result<Response<Body>> {
        let expected = match path {
            "/create_event" | "/update_event" | "/delete_event" => Method::POST,
            "/events_for_day" | "/events_for_week" | "/events_for_month" => Method::GET,
            _ => return Err(Error::NotFound(format!("no route for {}", path))),
        };
        if *method != expected {
            return Err(Error::MethodNotAllowed(format!(
                "{} requires {}",
                path, expected
            )));
        }

        let params = RequestParams::from_request(event)?;
        let budget = self.budget(event);

        match path {
            "/create_event" => self.create_event(&params, budget).await,
            "/events_for_day" => self.events_for_day(&params, budget).await,
            "/events_for_week" => self.events_for_week(&params, budget).await,
            "/events_for_month" => self.events_for_month(&params, budget).await,
            "/update_event" => self.update_event(&params, budget).await,
            _ => self.delete_event(&params, budget).await,
        }
    }

    async fn create_event(
        &self,
        params: &RequestParams,
        budget: Duration,
    ) -> Result<Response<Body>> {
        let command = CreateEvent::new(params.user_id()?, params.date()?, params.title()?)?;
        let event = within(budget, self.store.create_event(&command)).await?;
        info!(id = event.id, user_id = event.user_id, "Event created");
        json_response(200, &Confirmation::new("event created").with_id(event.id))
    }

    async fn events_for_day(
        &self,
        params: &RequestParams,
        budget: Duration,
    ) -> Result<Response<Body>> {
        let user_id = params.user_id()?;
        let date = params.date()?;
        let events = within(budget, self.store.events_for_day(user_id, date)).await?;
        json_response(200, &events)
    }

    async fn events_for_week(
        &self,
        params: &RequestParams,
        budget: Duration,
    ) -> Result<Response<Body>> {
        let user_id = params.user_id()?;
        let range = week_range(params.date()?)?;
        let events = within(budget, self.store.events_for_dates(user_id, range)).await?;
        json_response(200, &events)
    }

    async fn events_for_month(
        &self,
        params: &RequestParams,
        budget: Duration,
    ) -> Result<Response<Body>> {
        let user_id = params.user_id()?;
        let range = month_range(params.date()?)?;
        let events = within(budget, self.store.events_for_dates(user_id, range)).await?;
        json_response(200, &events)
    }

    async fn update_event(
        &self,
        params: &RequestParams,
        budget: Duration,
    ) -> Result<Response<Body>> {
        let command =
            UpdateEvent::new(params.id()?, params.title()?, params.optional_user_id()?)?;
        let event = within(budget, self.store.update_event(&command)).await?;
        json_response(200, &event)
    }

    async fn delete_event(
        &self,
        params: &RequestParams,
        budget: Duration,
    ) -> Result<Response<Body>> {
        let command = DeleteEvent::new(params.id()?, params.date()?)?;
        within(budget, self.store.delete_event(&command)).await?;
        json_response(200, &Confirmation::new("event deleted"))
    }

    /// Time allowed for the store call: the configured timeout, shortened to
    /// whatever is left before the invocation deadline.
    fn budget(&self, event: &Request) -> Duration {
        let remaining = event.lambda_context_ref().and_then(|ctx| {
            let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
            Some(Duration::from_millis(ctx.deadline).saturating_sub(now))
        });
        match remaining {
            Some(remaining) => remaining.min(self.query_timeout),
            None => self.query_timeout,
        }
    }
}

/// Run a store call, dropping it (and cancelling its query) once `budget` elapses.
async fn within<T>(budget: Duration, call: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(budget, call)
        .await
        .map_err(|_| Error::DeadlineExceeded(budget))?
}
