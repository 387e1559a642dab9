use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs the service on in-memory stores.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Profile used when a request does not name one (the unauthenticated dashboard).
    pub demo_profile_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            demo_profile_id: std::env::var("DEMO_PROFILE_ID")
                .unwrap_or_else(|_| "demo-profile-id".to_string()),
        })
    }

    /// The request's profile, or the demo profile when none was given.
    pub fn profile_or_demo(&self, profile_id: Option<String>) -> String {
        profile_id
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| self.demo_profile_id.clone())
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            db_max_connections: 1,
            port: 0,
            rust_log: "debug".to_string(),
            demo_profile_id: "demo-profile-id".to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_or_demo() {
        let config = Config::for_tests();
        assert_eq!(config.profile_or_demo(None), "demo-profile-id");
        assert_eq!(config.profile_or_demo(Some("  ".to_string())), "demo-profile-id");
        assert_eq!(config.profile_or_demo(Some("p-1".to_string())), "p-1");
    }
}
