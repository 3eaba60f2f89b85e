// src/config.rs
use std::{net::SocketAddr, time::Duration};

use anyhow::{Context, anyhow};
use tracing::Level;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Runtime configuration, read once at startup and injected from there on.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the gateway. Absent is allowed; dispatch then reports it.
    pub api_key: Option<String>,
    pub gateway_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub log_level: Level,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("AI_GATEWAY_API_KEY").or_else(|| get("LOVABLE_API_KEY"));

        let request_timeout = match get("AI_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().with_context(|| format!("AI_REQUEST_TIMEOUT_SECS is not a number: {raw}"))?;
                if secs == 0 {
                    return Err(anyhow!("AI_REQUEST_TIMEOUT_SECS must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().with_context(|| format!("BIND_ADDR is not a socket address: {bind_raw}"))?;

        let log_level: Level = match get("LOG_LEVEL") {
            Some(raw) => raw.parse::<Level>().map_err(|_| anyhow!("LOG_LEVEL is not a valid level: {raw}"))?,
            None => Level::INFO,
        };

        Ok(Self {
            api_key,
            gateway_url: get("AI_GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout,
            bind_addr,
            log_level,
        })
    }
}
