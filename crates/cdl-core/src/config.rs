use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default native streaming chunk size (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1_048_576;

/// Global configuration loaded from `~/.config/cdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdlConfig {
    /// Course site root; the syllabus lives at `<site_root>/<class>/lecture/index`.
    pub site_root: String,
    /// External transfer agent (name on PATH or full path) used when no `--wget-bin` is given.
    #[serde(default)]
    pub external_agent: Option<PathBuf>,
    /// Chunk size in bytes for the native streaming transfer.
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: usize,
    /// Connection-establishment timeout for the syllabus GET and native transfers.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_connect_timeout_secs() -> u64 {
    30
}

impl Default for CdlConfig {
    fn default() -> Self {
        Self {
            site_root: "http://class.coursera.org".to_string(),
            external_agent: None,
            chunk_size_bytes: DEFAULT_CHUNK_SIZE,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl CdlConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
