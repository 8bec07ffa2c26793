// src/config/mod.rs
// All values come from the environment (.env supported); defaults suit local development.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Recommendation Serving
    pub rec_default_limit: i64,
    pub rec_feed_limit: i64,
    pub rec_max_limit: i64,

    // ── CORS Settings
    pub cors_origin: String,

    // ── Logging Configuration
    pub log_level: String,
}

// Handles values with trailing comments and extra whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        let _ = dotenvy::dotenv();

        Self {
            database_url: env_var_or("DATABASE_URL", "sqlite:./campuslink.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 10),
            host: env_var_or("CAMPUSLINK_HOST", "127.0.0.1".to_string()),
            port: env_var_or("CAMPUSLINK_PORT", 8080),
            rec_default_limit: env_var_or("CAMPUSLINK_REC_DEFAULT_LIMIT", 8),
            rec_feed_limit: env_var_or("CAMPUSLINK_REC_FEED_LIMIT", 20),
            rec_max_limit: env_var_or("CAMPUSLINK_REC_MAX_LIMIT", 50),
            cors_origin: env_var_or("CAMPUSLINK_CORS_ORIGIN", "*".to_string()),
            log_level: env_var_or("CAMPUSLINK_LOG_LEVEL", "info".to_string()),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
