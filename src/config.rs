use std::env;
use std::net::SocketAddr;

use anyhow::{bail, Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite:./funding_portal.sqlite?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Origins allowed by CORS. `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// Serve generated sample data and fixed snapshots when the catalog has nothing to show.
    pub demo_fallback: bool,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            cors_origins: split_origins(DEFAULT_FRONTEND_URL),
            demo_fallback: true,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env (if present) so DATABASE_URL from file is visible
        let _ = dotenvy::dotenv();
        let defaults = Config::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {raw}"))?,
            Err(_) => defaults.bind_addr,
        };

        let cors_origins = env::var("FRONTEND_URL")
            .map(|raw| split_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let demo_fallback = match env::var("DEMO_FALLBACK") {
            Ok(raw) => parse_flag(&raw).with_context(|| "DEMO_FALLBACK must be true or false")?,
            Err(_) => defaults.demo_fallback,
        };

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {raw}"))?,
            Err(_) => defaults.db_max_connections,
        };

        Ok(Self {
            database_url,
            bind_addr,
            cors_origins,
            demo_fallback,
            db_max_connections,
        })
    }
}

pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised flag value: {other}"),
    }
}
