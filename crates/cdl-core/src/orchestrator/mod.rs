//! Download orchestrator: turns a catalog into files on disk.
//!
//! Walks sections and videos in catalog order and, per video, either skips
//! an existing file, writes an empty placeholder (`skip_download`), or hands
//! the URL to the run's [`Transfer`]. Performs no network I/O itself.

mod guard;

pub use guard::PartialFileGuard;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use url::Url;

use crate::control::AbortFlag;
use crate::cookies::CookieStore;
use crate::layout;
use crate::syllabus::{Catalog, Video};
use crate::transfer::{Transfer, TransferError};

/// Per-run switches.
pub struct RunOptions<'a> {
    /// Re-download videos whose target file already exists.
    pub overwrite: bool,
    /// Create empty placeholder files instead of downloading.
    pub skip_download: bool,
    /// Only process this 1-based section number.
    pub only_section: Option<usize>,
    pub transfer: &'a dyn Transfer,
}

/// Inputs shared by every video of a run.
pub struct RunContext<'a> {
    pub class_name: &'a str,
    /// Root under which section directories are created.
    pub out_dir: &'a Path,
    /// Page the catalog was parsed from; relative media links resolve against it.
    pub base_url: &'a Url,
    pub cookies: &'a CookieStore,
    pub abort: &'a AbortFlag,
}

/// What a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sections: usize,
    pub downloaded: usize,
    pub placeholders: usize,
    pub skipped: usize,
}

/// True if the run stopped because the operator aborted it.
pub fn is_aborted(err: &anyhow::Error) -> bool {
    err.downcast_ref::<TransferError>()
        .map(TransferError::is_aborted)
        .unwrap_or(false)
}

/// Materializes `catalog` under `ctx.out_dir`. Any error ends the run.
pub fn download_catalog(
    catalog: &Catalog,
    ctx: &RunContext<'_>,
    opts: &RunOptions<'_>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if let Some(n) = opts.only_section {
        if n == 0 || n > catalog.section_count() {
            tracing::warn!(
                "section {} requested but the page has {} sections",
                n,
                catalog.section_count()
            );
        }
    }

    for (section_no, section) in catalog.iter_numbered() {
        if opts.only_section.is_some_and(|n| n != section_no) {
            continue;
        }
        let dir = ctx
            .out_dir
            .join(layout::section_dir_name(ctx.class_name, section_no, &section.name));
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create section dir: {}", dir.display()))?;
        summary.sections += 1;
        tracing::info!("section {}: {}", section_no, dir.display());

        for (index, video) in section.videos.iter().enumerate() {
            if ctx.abort.is_aborted() {
                return Err(TransferError::Aborted.into());
            }
            let target = dir.join(layout::video_file_name(index + 1, &video.name));

            if target.exists() && !opts.overwrite {
                tracing::debug!("exists, skipping {}", target.display());
                summary.skipped += 1;
            } else if opts.skip_download {
                fs::File::create(&target).with_context(|| {
                    format!("failed to create placeholder: {}", target.display())
                })?;
                tracing::debug!("placeholder {}", target.display());
                summary.placeholders += 1;
            } else {
                download_video(video, &target, ctx, opts.transfer)?;
                summary.downloaded += 1;
            }
        }
    }

    tracing::info!(
        "run finished: {} sections, {} downloaded, {} placeholders, {} skipped",
        summary.sections,
        summary.downloaded,
        summary.placeholders,
        summary.skipped
    );
    Ok(summary)
}

/// One transfer under a [`PartialFileGuard`]: the target survives only on success.
fn download_video(
    video: &Video,
    target: &Path,
    ctx: &RunContext<'_>,
    transfer: &dyn Transfer,
) -> Result<()> {
    let url = video.resolve_url(ctx.base_url)?;
    let guard = PartialFileGuard::new(target);
    transfer
        .transfer(url.as_str(), target, ctx.cookies, ctx.abort)
        .with_context(|| format!("{} transfer of {} failed", transfer.name(), url))?;
    guard.commit();
    Ok(())
}
