use crate::auth::session::SessionStore;
use crate::config::AppConfig;
use crate::store::{MemoryStore, PgStore, Store};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        // Run migrations if present
        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migrations failed; continuing with the existing schema");
        }

        let store = Arc::new(PgStore::new(db)) as Arc<dyn Store>;
        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        let ttl = time::Duration::minutes(config.session.ttl_minutes);
        Self {
            store,
            sessions: Arc::new(SessionStore::new(ttl)),
            config,
        }
    }

    /// State over the seeded in-memory store, for tests.
    pub fn fake() -> Self {
        let store = Arc::new(MemoryStore::seeded()) as Arc<dyn Store>;
        Self::from_parts(store, Arc::new(AppConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_migrations_carry_no_accounts() {
        let migrator = sqlx::migrate!("./migrations");
        assert!(migrator.iter().count() > 0);
        for migration in migrator.iter() {
            let sql = migration.sql.to_lowercase();
            assert!(
                !sql.contains("insert into users"),
                "migration {} inserts users",
                migration.version
            );
        }
    }

    #[tokio::test]
    async fn fake_state_starts_without_sessions() {
        let state = AppState::fake();
        assert!(state.sessions.is_empty());
        assert!(!state.store.products().await.unwrap().is_empty());
    }
}
