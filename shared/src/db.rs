//! Database connection management.

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::{Config, DatabaseSource};
use crate::secrets::get_database_credentials;
use crate::{Error, Result};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a database connection pool.
///
/// The pool is created once per execution environment and shared by every
/// concurrent invocation.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout);

    let pool = match &config.database {
        DatabaseSource::Url(url) => options.connect(url).await?,
        DatabaseSource::Secret {
            host,
            name,
            secret_arn,
        } => {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);
            let credentials = get_database_credentials(&secrets_client, secret_arn).await?;
            options
                .connect_with(credentials.connect_options(host, name)?)
                .await?
        }
    };

    info!(
        max_connections = config.max_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Apply embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR.run(pool).await.map_err(Error::Migration)?;
    info!("Database migrations applied");
    Ok(())
}
