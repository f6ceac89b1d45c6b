//! Transfer strategies: moving bytes from a media URL into a target file.
//!
//! Two interchangeable implementations of [`Transfer`]:
//! - [`ExternalAgent`]: shells out to a wget-compatible binary.
//! - [`NativeTransfer`]: streams with libcurl in-process.
//!
//! [`select_transfer`] picks one once per run. Implementations never delete
//! the target themselves; the orchestrator's guard does that on failure.

mod error;
mod external;
mod native;

pub use error::TransferError;
pub use external::ExternalAgent;
pub use native::{NativeTransfer, ProgressFn};

use std::path::Path;

use crate::control::AbortFlag;
use crate::cookies::CookieStore;

/// Downloads one URL into one file.
pub trait Transfer {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Writes the body of `url` to `target`, creating or truncating it.
    /// Stops with [`TransferError::Aborted`] once `abort` is set.
    fn transfer(
        &self,
        url: &str,
        target: &Path,
        cookies: &CookieStore,
        abort: &AbortFlag,
    ) -> Result<(), TransferError>;
}

/// Picks the external agent when one is requested and resolvable, otherwise native streaming.
pub fn select_transfer(agent: Option<&Path>, native: NativeTransfer) -> Box<dyn Transfer> {
    match agent {
        Some(bin) => match ExternalAgent::resolve(bin) {
            Ok(agent) => {
                tracing::info!("using external agent {}", agent.binary().display());
                Box::new(agent)
            }
            Err(e) => {
                tracing::warn!(
                    "external agent {} unavailable ({}); falling back to native streaming",
                    bin.display(),
                    e
                );
                Box::new(native)
            }
        },
        None => Box::new(native),
    }
}
