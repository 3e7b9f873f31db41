//! Scheduler configuration parsing from environment variables.

use super::{non_blank, parse_or};
use anyhow::{Context, Result};
use std::time::Duration;

/// Polling schedule
#[derive(Debug, Clone)]
pub struct SchedulerEnvConfig {
    /// Sleep between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Stop after this many cycles; `None` runs until shutdown.
    pub max_cycles: Option<u64>,
}

impl Default for SchedulerEnvConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5 * 60),
            max_cycles: None,
        }
    }
}

impl SchedulerEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let minutes = parse_or(lookup, "UPDATE_INTERVAL_MINUTES", 5u64)?;
        if minutes == 0 {
            anyhow::bail!("UPDATE_INTERVAL_MINUTES must be at least 1");
        }

        let max_cycles = non_blank(lookup, "MAX_CYCLES")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("Failed to parse MAX_CYCLES")?;

        Ok(Self {
            interval: Duration::from_secs(minutes * 60),
            max_cycles,
        })
    }
}
