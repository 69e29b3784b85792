use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub telegram_bot_token: Option<String>,
    pub telegram_api_url: String,
    pub telegram_timeout_secs: u64,
    pub session_ttl_hours: i64,
    pub login_rps: u32,
    pub bootstrap_admin_username: String,
    pub bootstrap_admin_password: Option<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            telegram_bot_token: get_env_opt("TELEGRAM_BOT_TOKEN"),
            telegram_api_url: get_env_opt("TELEGRAM_API_URL")
                .unwrap_or_else(|| "https://api.telegram.org".to_string()),
            telegram_timeout_secs: get_env_parse_or("TELEGRAM_TIMEOUT_SECS", 10)?,
            session_ttl_hours: get_env_parse_or("SESSION_TTL_HOURS", 12)?,
            login_rps: get_env_parse_or("LOGIN_RPS", 5)?,
            bootstrap_admin_username: get_env_opt("BOOTSTRAP_ADMIN_USERNAME")
                .unwrap_or_else(|| "admin".to_string()),
            bootstrap_admin_password: get_env_opt("BOOTSTRAP_ADMIN_PASSWORD"),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

/// Unset and blank values are treated the same.
fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
