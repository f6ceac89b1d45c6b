//! Transfer through an external wget-compatible agent.
//!
//! Invoked as `<agent> <url> -O <target> --load-cookies <cookie-file>`. The
//! agent prints its own progress and applies its own retry behavior. The
//! child is polled so an abort request can kill it.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use super::{Transfer, TransferError};
use crate::control::AbortFlag;
use crate::cookies::CookieStore;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ExternalAgent {
    binary: PathBuf,
}

impl ExternalAgent {
    /// Uses `binary` as given, without checking it exists.
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Resolves a name on PATH or an explicit path to an executable.
    pub fn resolve(binary: &Path) -> Result<Self, which::Error> {
        which::which(binary).map(Self::new)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, url: &str, target: &Path, cookies: &CookieStore) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(url)
            .arg("-O")
            .arg(target)
            .arg("--load-cookies")
            .arg(cookies.path());
        cmd
    }

    fn agent_name(&self) -> String {
        self.binary.display().to_string()
    }
}

impl Transfer for ExternalAgent {
    fn name(&self) -> &'static str {
        "external"
    }

    fn transfer(
        &self,
        url: &str,
        target: &Path,
        cookies: &CookieStore,
        abort: &AbortFlag,
    ) -> Result<(), TransferError> {
        if abort.is_aborted() {
            return Err(TransferError::Aborted);
        }
        let mut cmd = self.command(url, target, cookies);
        tracing::info!("executing {:?}", cmd);

        let mut child = cmd.spawn().map_err(|source| TransferError::AgentSpawn {
            agent: self.agent_name(),
            source,
        })?;

        loop {
            let exited = child.try_wait().map_err(|source| TransferError::AgentSpawn {
                agent: self.agent_name(),
                source,
            })?;
            if let Some(status) = exited {
                // Ctrl-C reaches the agent too; it may exit before the flag is observed here.
                if abort.is_aborted() {
                    return Err(TransferError::Aborted);
                }
                if !status.success() {
                    return Err(TransferError::AgentFailed {
                        agent: self.agent_name(),
                        status,
                    });
                }
                tracing::info!("finished {}", target.display());
                return Ok(());
            }
            if abort.is_aborted() {
                tracing::warn!("aborting external agent (pid {})", child.id());
                let _ = child.kill();
                let _ = child.wait();
                return Err(TransferError::Aborted);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}
