// src/config.rs
use log::{info, warn};
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: f64 = 7.0;

pub const DEFAULT_STOOQ_URL: &str = "https://stooq.com/q/l/";
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
pub const DEFAULT_NEWS_URL: &str = "https://news.google.com/rss/search";

/// Local dev origins of the frontend (vite default port and its fallback).
pub const ALLOWED_ORIGINS: [&str; 4] = [
    "http://127.0.0.1:5173",
    "http://localhost:5173",
    "http://127.0.0.1:5174",
    "http://localhost:5174",
];

/// Endpoints and timeout used by the upstream feed adapters.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub request_timeout: Duration,
    pub stooq_url: String,
    pub coingecko_url: String,
    pub news_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            request_timeout: Duration::from_secs_f64(DEFAULT_REQUEST_TIMEOUT_SECS),
            stooq_url: DEFAULT_STOOQ_URL.to_string(),
            coingecko_url: DEFAULT_COINGECKO_URL.to_string(),
            news_url: DEFAULT_NEWS_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub feeds: FeedConfig,
}

impl Config {
    /// Reads settings from the environment. Call `dotenv().ok()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!("PORT={} is not a valid port, defaulting to {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let request_timeout = parse_timeout(env::var("REQUEST_TIMEOUT").ok().as_deref());
        info!("Upstream request timeout: {:?}", request_timeout);

        let feeds = FeedConfig {
            request_timeout,
            stooq_url: env::var("STOOQ_URL").unwrap_or_else(|_| DEFAULT_STOOQ_URL.to_string()),
            coingecko_url: env::var("COINGECKO_URL")
                .unwrap_or_else(|_| DEFAULT_COINGECKO_URL.to_string()),
            news_url: env::var("NEWS_URL").unwrap_or_else(|_| DEFAULT_NEWS_URL.to_string()),
        };

        Config { port, feeds }
    }
}

/// Timeout in (possibly fractional) seconds; missing, non-numeric or
/// non-positive values fall back to the default.
pub fn parse_timeout(raw: Option<&str>) -> Duration {
    let default = Duration::from_secs_f64(DEFAULT_REQUEST_TIMEOUT_SECS);
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Duration::from_secs_f64(secs),
        _ => {
            warn!("REQUEST_TIMEOUT={} is invalid, defaulting to {}s", raw, DEFAULT_REQUEST_TIMEOUT_SECS);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_to_seven_seconds() {
        assert_eq!(parse_timeout(None), Duration::from_secs(7));
    }

    #[test]
    fn timeout_accepts_fractional_seconds() {
        assert_eq!(parse_timeout(Some("2.5")), Duration::from_millis(2500));
        assert_eq!(parse_timeout(Some(" 10 ")), Duration::from_secs(10));
    }

    #[test]
    fn timeout_rejects_garbage() {
        assert_eq!(parse_timeout(Some("soon")), Duration::from_secs(7));
        assert_eq!(parse_timeout(Some("-3")), Duration::from_secs(7));
        assert_eq!(parse_timeout(Some("0")), Duration::from_secs(7));
    }
}
