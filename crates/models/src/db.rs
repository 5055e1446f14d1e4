use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Connection pool settings resolved to runtime types.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(raw: &configs::DatabaseConfig) -> Self {
        Self {
            url: raw.url.clone(),
            max_connections: raw.max_connections,
            min_connections: raw.min_connections,
            connect_timeout: Duration::from_secs(raw.connect_timeout_secs),
            idle_timeout: Duration::from_secs(raw.idle_timeout_secs),
            max_lifetime: Duration::from_secs(raw.max_lifetime_secs),
            acquire_timeout: Duration::from_secs(raw.acquire_timeout_secs),
            sqlx_logging: raw.sqlx_logging,
        }
    }
}

impl DatabaseConfig {
    /// Resolve settings from the config file when it exists, otherwise
    /// from `DATABASE_URL` or the split `DB_*` variables.
    pub fn load() -> anyhow::Result<Self> {
        match configs::load_if_present(&configs::config_path())? {
            Some(app) => Self::resolve(app.database),
            None => Self::from_env(),
        }
    }

    /// Environment only; fails when no database is configured.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env if present
        let _ = dotenvy::dotenv();
        Self::resolve(configs::DatabaseConfig::default())
    }

    fn resolve(mut raw: configs::DatabaseConfig) -> anyhow::Result<Self> {
        raw.normalize_from_env();
        raw.validate()?;
        Ok(Self::from(&raw))
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opts = ConnectOptions::new(self.url.clone());
        opts.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .acquire_timeout(self.acquire_timeout)
            .sqlx_logging(self.sqlx_logging);
        opts
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(cfg.connect_options()).await?;
    info!(max_connections = cfg.max_connections, min_connections = cfg.min_connections, "database pool ready");
    Ok(db)
}

/// Connect using the config file, falling back to the environment when the
/// file is absent.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    connect_with_config(&DatabaseConfig::load()?).await
}
