//! CLI for the cdl course video downloader.

mod run;

use anyhow::{Context, Result};
use cdl_core::config;
use cdl_core::control::AbortFlag;
use clap::Parser;
use std::path::PathBuf;

use run::run_course;

/// Conventional exit status for a run stopped by SIGINT.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Download the videos listed on a class syllabus page.
#[derive(Debug, Parser)]
#[command(name = "cdl")]
#[command(
    about = "cdl: download course videos into a folder per week",
    long_about = "Scrapes the syllabus page of a class for its weeks and videos, then downloads \
                  each video into <CLASS>_<NN>_<Week>/<NN>_<Video>.mp4. \
                  If it finds 0 sections, the cookies file is probably bad: \
                  use -l listing.html and check whether the saved page is the logged-in one."
)]
pub struct Cli {
    /// Name of the class (e.g. "nlp").
    pub class_name: String,

    /// Full path to the cookies.txt file exported from the browser.
    #[arg(short = 'c', long = "cookies-file", value_name = "PATH")]
    pub cookies_file: PathBuf,

    /// wget binary to use for downloading; without it videos are streamed in-process.
    #[arg(short = 'w', long = "wget-bin", value_name = "PATH")]
    pub wget_bin: Option<PathBuf>,

    /// Only download this section number (1-based).
    #[arg(short = 's', long = "section-num", value_name = "N")]
    pub section_num: Option<usize>,

    /// Overwrite video files that already exist.
    #[arg(short = 'o', long)]
    pub overwrite: bool,

    /// For debugging: use, or create, a local cached copy of the syllabus page.
    #[arg(short = 'l', long = "process-local-page", value_name = "PATH")]
    pub local_page: Option<PathBuf>,

    /// For debugging: create empty files instead of downloading videos.
    #[arg(long)]
    pub skip_download: bool,

    /// Directory to create section folders in (default: current directory).
    #[arg(short = 'd', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let abort = AbortFlag::new();
        let trigger = abort.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, stopping current transfer");
                trigger.request_abort();
            }
            // A second Ctrl-C exits without waiting for cleanup.
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(EXIT_INTERRUPTED);
            }
        });

        tokio::task::spawn_blocking(move || run_course(&cli, &cfg, &abort))
            .await
            .context("download task join")?
    }
}
