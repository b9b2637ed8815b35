//! AWS Secrets Manager integration.

use std::collections::HashMap;
use std::sync::OnceLock;

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Secret strings already fetched during this execution environment's lifetime.
static SECRETS_CACHE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<String, String>> {
    SECRETS_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

const DEFAULT_PORT: u16 = 5432;

/// Database credentials from Secrets Manager.
#[derive(Debug, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
}

impl DatabaseCredentials {
    /// Build connection options, preferring values stored in the secret.
    ///
    /// `host` may carry an explicit `:port`; a port in the secret wins over it.
    pub fn connect_options(&self, host: &str, database: &str) -> Result<PgConnectOptions> {
        let host = self.host.as_deref().unwrap_or(host);
        let (host, host_port) = match host.rsplit_once(':') {
            Some((name, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| Error::Config(format!("invalid database port in host {:?}", host)))?;
                (name, Some(port))
            }
            None => (host, None),
        };

        Ok(PgConnectOptions::new()
            .host(host)
            .port(self.port.or(host_port).unwrap_or(DEFAULT_PORT))
            .username(&self.username)
            .password(&self.password)
            .database(self.dbname.as_deref().unwrap_or(database)))
    }
}

/// Get a secret value from Secrets Manager with caching.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    if let Some(value) = cache().read().await.get(secret_arn) {
        return Ok(value.clone());
    }

    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))?
        .to_string();

    cache()
        .write()
        .await
        .insert(secret_arn.to_string(), secret_string.clone());

    Ok(secret_string)
}

/// Get database credentials from Secrets Manager.
pub async fn get_database_credentials(
    client: &SecretsClient,
    secret_arn: &str,
) -> Result<DatabaseCredentials> {
    let secret_string = get_secret(client, secret_arn).await?;

    serde_json::from_str(&secret_string)
        .map_err(|e| Error::Aws(format!("Failed to parse database credentials: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(json: &str) -> DatabaseCredentials {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_secret_values_override_config() {
        let creds = credentials(
            r#"{"username":"calendar","password":"p@ss:word","host":"primary.db","port":6432,"dbname":"events"}"#,
        );
        let options = creds.connect_options("fallback.db", "calendar").unwrap();
        assert_eq!(options.get_host(), "primary.db");
        assert_eq!(options.get_port(), 6432);
        assert_eq!(options.get_username(), "calendar");
        assert_eq!(options.get_database(), Some("events"));
    }

    #[test]
    fn test_config_host_and_port_fill_gaps() {
        let creds = credentials(r#"{"username":"calendar","password":"secret"}"#);
        let options = creds.connect_options("db.internal:6543", "calendar").unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("calendar"));

        let options = creds.connect_options("db.internal", "calendar").unwrap();
        assert_eq!(options.get_port(), DEFAULT_PORT);
    }

    #[test]
    fn test_bad_port_in_host_is_rejected() {
        let creds = credentials(r#"{"username":"calendar","password":"secret"}"#);
        assert!(matches!(
            creds.connect_options("db.internal:http", "calendar"),
            Err(Error::Config(_))
        ));
    }
}
