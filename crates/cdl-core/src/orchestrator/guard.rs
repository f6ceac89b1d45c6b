//! RAII guard that removes a partially written target when dropped.

use std::path::{Path, PathBuf};

/// Removes `path` on drop unless [`commit`](Self::commit) was called.
///
/// Covers every way out of a transfer (error, abort, panic), so a truncated
/// video never survives to be mistaken for a finished one on the next run.
#[derive(Debug)]
pub struct PartialFileGuard {
    path: PathBuf,
    committed: bool,
}

impl PartialFileGuard {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    /// The transfer completed; keep the file.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if self.committed || !self.path.exists() {
            return;
        }
        tracing::warn!("removing partial file {}", self.path.display());
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("could not remove partial file {}: {}", self.path.display(), e);
        }
    }
}
