use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while retrieving market data from the provider
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Market data endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode market data response: {reason}")]
    Decode { reason: String },
}

/// Errors raised when a provider payload does not have the expected shape
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Malformed market entry at index {index}: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the statistics pass
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Cannot analyze an empty market table")]
    EmptyTable,
}

/// Errors raised while persisting the spreadsheet report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to build {sheet} sheet: {reason}")]
    Layout { sheet: String, reason: String },

    #[error("Failed to write report to {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

/// What the scheduler does with a failed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log, sleep, try again next cycle.
    Skip,
    /// Stop the scheduler and surface the error to the caller.
    Abort,
}

/// Failure of a cycle after market data was received.
///
/// Fetch failures are not listed here: they never fail a cycle, they turn
/// it into a "no data" cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl CycleError {
    /// Upstream problems (payload shape, empty result) are skipped.
    /// A report that cannot be written aborts.
    pub fn policy(&self) -> FailurePolicy {
        match self {
            CycleError::Transform(_) | CycleError::Analysis(_) => FailurePolicy::Skip,
            CycleError::Report(_) => FailurePolicy::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_formatting() {
        let error = FetchError::Status {
            status: 429,
            body: "rate limited".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));
    }

    #[test]
    fn test_report_error_formatting() {
        let error = ReportError::Write {
            path: PathBuf::from("out/crypto_data.xlsx"),
            reason: "permission denied".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("crypto_data.xlsx"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_failure_policy_per_kind() {
        let transform = CycleError::from(TransformError::Malformed {
            index: 3,
            source: serde_json::from_str::<u8>("\"x\"").unwrap_err(),
        });
        assert_eq!(transform.policy(), FailurePolicy::Skip);

        let empty = CycleError::from(AnalysisError::EmptyTable);
        assert_eq!(empty.policy(), FailurePolicy::Skip);

        let report = CycleError::from(ReportError::Write {
            path: PathBuf::from("x.xlsx"),
            reason: "locked".to_string(),
        });
        assert_eq!(report.policy(), FailurePolicy::Abort);
    }
}
