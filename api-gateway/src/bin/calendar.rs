//! Calendar Lambda - Handles the calendar event endpoints.
//!
//! See [`calendar_shared::handler`] for the routes.

use std::sync::Arc;

use calendar_shared::{db, CalendarHandler, Config, PgEventStore};
use lambda_http::{run, service_fn, Error};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let pool = db::create_pool(&config).await?;
    if config.run_migrations {
        db::run_migrations(&pool).await?;
    }

    let handler = Arc::new(CalendarHandler::new(
        Arc::new(PgEventStore::new(pool)),
        config.query_timeout,
    ));
    info!("Calendar Lambda ready");

    run(service_fn(move |event| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(event).await }
    }))
    .await
}
