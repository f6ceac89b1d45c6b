//! Syllabus page retrieval.
//!
//! Authenticated GET of the course listing page, with an optional local
//! cache file: an existing cache is read instead of touching the network,
//! and a missing one is written after a successful fetch.

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CdlConfig;
use crate::cookies::CookieStore;

/// Canonical syllabus URL for a class.
pub fn syllabus_url(site_root: &str, class_name: &str) -> String {
    format!(
        "{}/{}/lecture/index",
        site_root.trim_end_matches('/'),
        class_name
    )
}

/// Where the page bytes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Network { url: String },
    Cache { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub source: PageSource,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Page markup; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Fetches the syllabus page for `class_name`, honoring `cache_path` (see module docs).
pub fn fetch_syllabus(
    cfg: &CdlConfig,
    class_name: &str,
    cookies: &CookieStore,
    cache_path: Option<&Path>,
) -> Result<FetchedPage> {
    if let Some(path) = cache_path.filter(|p| p.exists()) {
        let body = fs::read(path)
            .with_context(|| format!("failed to read cached page: {}", path.display()))?;
        tracing::info!("using cached page {} ({} bytes)", path.display(), body.len());
        return Ok(FetchedPage {
            source: PageSource::Cache {
                path: path.to_path_buf(),
            },
            body,
        });
    }

    let url = syllabus_url(&cfg.site_root, class_name);
    let body = get_page(&url, cookies, cfg)?;
    tracing::info!("downloaded {} ({} bytes)", url, body.len());

    if let Some(path) = cache_path {
        fs::write(path, &body)
            .with_context(|| format!("failed to write cached page: {}", path.display()))?;
        tracing::debug!("cached page at {}", path.display());
    }

    Ok(FetchedPage {
        source: PageSource::Network { url },
        body,
    })
}

/// Authenticated GET collecting the whole body in memory.
fn get_page(url: &str, cookies: &CookieStore, cfg: &CdlConfig) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut easy = cookies
        .authenticated_get(url, cfg.connect_timeout())
        .with_context(|| format!("invalid request for {}", url))?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(body)
}
