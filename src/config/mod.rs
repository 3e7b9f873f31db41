//! Configuration module for cryptosheet.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: market data API, report output and scheduling.

mod api_config;
mod report_config;
mod scheduler_config;

pub use api_config::{ApiEnvConfig, MarketQuery};
pub use report_config::ReportEnvConfig;
pub use scheduler_config::SchedulerEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Main application configuration.
///
/// Loaded once at startup and handed to each component at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiEnvConfig,
    pub report: ReportEnvConfig,
    pub scheduler: SchedulerEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiEnvConfig::from_lookup(&lookup).context("Failed to load API config")?;
        let report = ReportEnvConfig::from_lookup(&lookup);
        let scheduler =
            SchedulerEnvConfig::from_lookup(&lookup).context("Failed to load scheduler config")?;

        Ok(Self {
            api,
            report,
            scheduler,
        })
    }
}

/// Parses `key` if set and non-blank, otherwise returns `default`.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match non_blank(lookup, key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Failed to parse {}={:?}", key, raw)),
        None => Ok(default),
    }
}

pub(crate) fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
