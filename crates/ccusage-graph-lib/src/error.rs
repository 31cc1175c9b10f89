use std::time::Duration;
use thiserror::Error;

/// Every way a single invocation can fail. All of them are terminal.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no input received within {}s. Usage: ccusage --json | ccusage-graph", .waited.as_secs())]
    InputTimeout { waited: Duration },

    #[error("error reading input: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing JSON input: {0}")]
    ParseFailure(#[from] serde_json::Error),

    #[error("no usage data found in JSON")]
    NoUsageData,

    #[error("invalid usage entry #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// `origin` names where the bad value came from: a file path or the command line.
    #[error("invalid configuration ({origin}): {reason}")]
    Config { origin: String, reason: String },
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
