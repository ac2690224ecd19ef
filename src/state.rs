use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::warn;

use crate::auth::jwt::JwtKeys;
use crate::auth::repo::{PgStore, UserStore};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub keys: JwtKeys,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Read the environment, connect to Postgres, apply migrations and derive
    /// the signing keys.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            warn!(error = %e, "migrations did not apply; continuing with the existing schema");
        }

        let keys = JwtKeys::from_config(&config.jwt);
        let store = Arc::new(PgStore::new(pool)) as Arc<dyn UserStore>;
        Ok(Self::from_parts(store, keys, config))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, keys: JwtKeys, config: Arc<AppConfig>) -> Self {
        Self {
            store,
            keys,
            config,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over an in-memory store, signing with a fixed secret.
    pub fn for_tests(store: Arc<crate::auth::repo::testing::MemStore>) -> Self {
        use crate::config::JwtConfig;

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "postgres://unused".into(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_minutes: 5,
            },
        });
        let keys = JwtKeys::from_config(&config.jwt);
        Self::from_parts(store, keys, config)
    }
}
