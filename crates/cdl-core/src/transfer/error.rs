//! Transfer error type, so callers can tell an operator abort from a failure.

use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The operator requested cancellation.
    #[error("transfer aborted by user")]
    Aborted,
    /// Curl reported an error (connection refused, DNS, reset, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the target file failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// The external agent could not be started.
    #[error("failed to run {agent}: {source}")]
    AgentSpawn {
        agent: String,
        #[source]
        source: std::io::Error,
    },
    /// The external agent exited unsuccessfully.
    #[error("{agent} exited with {status}")]
    AgentFailed { agent: String, status: ExitStatus },
}

impl TransferError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, TransferError::Aborted)
    }
}
