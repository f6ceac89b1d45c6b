//! Cancellation: a shared abort token checked by running transfers.
//!
//! The CLI sets the token when the operator interrupts (Ctrl-C). Transfers
//! poll it and stop; the orchestrator then removes the partial file and the
//! run ends with [`crate::transfer::TransferError::Aborted`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable abort token. All clones observe the same request.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the current transfer stop.
    pub fn request_abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
