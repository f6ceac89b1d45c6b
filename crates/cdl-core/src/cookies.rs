//! Credential store: session cookies exported from a browser.
//!
//! The input is a cookies.txt in Netscape format. Browser extensions often
//! omit the `# Netscape HTTP Cookie File` header that some loaders insist
//! on, so a copy with the header prepended is kept in a temp file when
//! needed. Both libcurl and the external agent read that same file.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// First line of a Netscape-format cookie file.
pub const NETSCAPE_HEADER: &str = "# Netscape HTTP Cookie File";

/// Redirect hops followed for authenticated GETs.
const MAX_REDIRECTS: u32 = 10;

#[derive(Debug)]
pub struct CookieStore {
    source: PathBuf,
    normalized: Option<tempfile::NamedTempFile>,
}

fn has_netscape_header(data: &str) -> bool {
    let first = data.lines().next().unwrap_or("").trim_start();
    first.starts_with(NETSCAPE_HEADER) || first.starts_with("# HTTP Cookie File")
}

impl CookieStore {
    /// Loads a cookie file, failing if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("cookies file not found: {}", path.display());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read cookies file: {}", path.display()))?;

        let normalized = if has_netscape_header(&data) {
            None
        } else {
            let mut tmp = tempfile::Builder::new()
                .prefix("cdl-cookies-")
                .suffix(".txt")
                .tempfile()
                .context("failed to create normalized cookies file")?;
            writeln!(tmp, "{}", NETSCAPE_HEADER)?;
            tmp.write_all(data.as_bytes())?;
            tmp.flush()?;
            tracing::debug!(
                "cookies file {} has no Netscape header; using {}",
                path.display(),
                tmp.path().display()
            );
            Some(tmp)
        };

        Ok(Self {
            source: path.to_path_buf(),
            normalized,
        })
    }

    /// Path of the Netscape-format cookie file to hand to curl or the external agent.
    pub fn path(&self) -> &Path {
        match &self.normalized {
            Some(tmp) => tmp.path(),
            None => &self.source,
        }
    }

    /// The file the operator passed in.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Builds a curl handle for an authenticated GET of `url`: cookies loaded, redirects followed.
    ///
    /// Only connection setup is bounded by `connect_timeout`; the body transfer has no deadline.
    pub fn authenticated_get(
        &self,
        url: &str,
        connect_timeout: Duration,
    ) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.cookie_file(self.path())?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(connect_timeout)?;
        Ok(easy)
    }
}
