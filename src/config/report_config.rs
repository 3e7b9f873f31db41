//! Report output configuration parsing from environment variables.

use super::non_blank;
use std::path::PathBuf;

pub const DEFAULT_REPORT_PATH: &str = "crypto_data.xlsx";

/// Spreadsheet output configuration
#[derive(Debug, Clone)]
pub struct ReportEnvConfig {
    pub output_path: PathBuf,
}

impl Default for ReportEnvConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl ReportEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            output_path: non_blank(lookup, "CRYPTO_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
        }
    }
}
