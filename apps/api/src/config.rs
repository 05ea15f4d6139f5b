use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;

use crate::kit::assembler::Budget;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub upload_dir: String,
    pub kit_budget: Budget,
    pub seed_sample_catalog: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite://fitroom.db"),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            kit_budget: match std::env::var("KIT_BUDGET") {
                Ok(raw) => parse_budget(&raw)?,
                Err(_) => Budget::default(),
            },
            seed_sample_catalog: parse_flag(&env_or("SEED_SAMPLE_CATALOG", "true"))
                .context("SEED_SAMPLE_CATALOG must be true or false")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn parse_budget(raw: &str) -> Result<Budget> {
    let amount = Decimal::from_str(raw.trim())
        .with_context(|| format!("KIT_BUDGET '{raw}' is not a decimal amount"))?;
    Budget::new(amount).ok_or_else(|| anyhow!("KIT_BUDGET must be greater than zero, got {raw}"))
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("unrecognized flag value '{other}'")),
    }
}
