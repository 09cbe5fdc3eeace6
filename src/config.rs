use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub session: SessionConfig,
}

const DEFAULT_SESSION_SECRET: &str = "cutiscura-secret";

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set; using the built-in development secret");
            DEFAULT_SESSION_SECRET.into()
        });
        let session = SessionConfig {
            secret,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "cutiscura".into()),
            ttl_minutes: parse_or("SESSION_TTL_MINUTES", 60 * 8),
        };
        Ok(Self {
            database_url,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("PORT", 3000),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".into()),
            session,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: 10,
            host: "0.0.0.0".into(),
            port: 3000,
            static_dir: "public".into(),
            session: SessionConfig {
                secret: DEFAULT_SESSION_SECRET.into(),
                issuer: "cutiscura".into(),
                ttl_minutes: 60 * 8,
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    parse_value(std::env::var(key).ok().as_deref(), default)
}

fn parse_value<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_falls_back_on_garbage() {
        assert_eq!(parse_value::<u16>(Some("8081"), 3000), 8081);
        assert_eq!(parse_value::<u16>(Some(" 8081 "), 3000), 8081);
        assert_eq!(parse_value::<u16>(Some("eighty"), 3000), 3000);
        assert_eq!(parse_value::<i64>(None, 480), 480);
    }

    #[test]
    fn default_session_lasts_eight_hours() {
        let config = AppConfig::default();
        assert_eq!(config.session.ttl_minutes, 480);
        assert_eq!(config.port, 3000);
    }
}
