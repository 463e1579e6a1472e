//! # Configuration
//!
//! Runtime settings come from the environment, each with a default so a
//! local development server works out of the box:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ATELIER_API_URL` | `http://localhost:5000` | Base URL of the REST server |
//! | `ATELIER_API_TOKEN` | unset | Bearer token for admin endpoints |
//! | `ATELIER_TIMEOUT_SECS` | `30` | Per-request timeout |
//! | `ATELIER_OVERHEAD_PERCENT` | `25` | Overhead applied to the materials subtotal |
//! | `ATELIER_INR_PER_USD` | `83` | Exchange rate for the USD total |
//! | `ATELIER_RETRY_ATTEMPTS` | `3` | Attempts for the product lookup chain |
//! | `ATELIER_RETRY_BASE_MS` | `250` | Delay unit between attempts |

use crate::pricing::PriceConfig;
use atelier_framework::RetryPolicy;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub pricing: PriceConfig,
    pub retry: RetryPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(30),
            pricing: PriceConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_pricing(mut self, pricing: PriceConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Reads the `ATELIER_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs: u64 = parse(&get, "ATELIER_TIMEOUT_SECS", 30)?;
        let overhead_percent: f64 = parse(
            &get,
            "ATELIER_OVERHEAD_PERCENT",
            defaults.pricing.overhead_percent,
        )?;
        let inr_per_usd: f64 = parse(&get, "ATELIER_INR_PER_USD", defaults.pricing.inr_per_usd)?;
        let attempts: u32 = parse(&get, "ATELIER_RETRY_ATTEMPTS", defaults.retry.attempts)?;
        let base_ms: u64 = parse(&get, "ATELIER_RETRY_BASE_MS", 250)?;

        if !(overhead_percent.is_finite() && overhead_percent >= 0.0) {
            return Err(invalid("ATELIER_OVERHEAD_PERCENT", overhead_percent));
        }
        if !(inr_per_usd.is_finite() && inr_per_usd > 0.0) {
            return Err(invalid("ATELIER_INR_PER_USD", inr_per_usd));
        }
        if attempts == 0 {
            return Err(invalid("ATELIER_RETRY_ATTEMPTS", attempts));
        }

        Ok(Self {
            api_url: get("ATELIER_API_URL").unwrap_or(defaults.api_url),
            api_token: get("ATELIER_API_TOKEN"),
            timeout: Duration::from_secs(timeout_secs),
            pricing: PriceConfig {
                overhead_percent,
                inr_per_usd,
            },
            retry: RetryPolicy::new(attempts, Duration::from_millis(base_ms)),
        })
    }
}

fn parse<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
        }),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
    }
}
