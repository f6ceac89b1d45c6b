//! The download run: fetch → parse → materialize.

use anyhow::{Context, Result};
use cdl_core::config::CdlConfig;
use cdl_core::control::AbortFlag;
use cdl_core::cookies::CookieStore;
use cdl_core::fetch::{fetch_syllabus, syllabus_url, PageSource};
use cdl_core::orchestrator::{download_catalog, RunContext, RunOptions};
use cdl_core::syllabus::{parse_syllabus, Catalog, CatalogStatus};
use cdl_core::transfer::{select_transfer, NativeTransfer};
use std::io::Write;
use url::Url;

use super::Cli;

pub(super) fn run_course(cli: &Cli, cfg: &CdlConfig, abort: &AbortFlag) -> Result<()> {
    let cookies = CookieStore::load(&cli.cookies_file)?;

    let page = fetch_syllabus(cfg, &cli.class_name, &cookies, cli.local_page.as_deref())?;
    match &page.source {
        PageSource::Network { url } => println!("Downloaded {} ({} bytes)", url, page.body.len()),
        PageSource::Cache { path } => {
            println!("Using cached page {} ({} bytes)", path.display(), page.body.len())
        }
    }

    let catalog = parse_syllabus(&page.text())?;
    print_catalog(&catalog);
    match catalog.status() {
        CatalogStatus::NoSections => {
            println!("Found 0 sections and 0 videos on this page");
            println!("Probably bad cookies file (or wrong class name)");
            return Ok(());
        }
        CatalogStatus::Found { sections, videos } => {
            println!("Found {} sections and {} videos on this page", sections, videos)
        }
    }

    let native = NativeTransfer::from_config(cfg).with_progress(|n| {
        print!("\r{} bytes read", n);
        let _ = std::io::stdout().flush();
    });
    let agent = cli.wget_bin.as_deref().or(cfg.external_agent.as_deref());
    let transfer = select_transfer(agent, native);

    let out_dir = match &cli.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let page_url = syllabus_url(&cfg.site_root, &cli.class_name);
    let base_url =
        Url::parse(&page_url).with_context(|| format!("invalid syllabus URL {}", page_url))?;

    let ctx = RunContext {
        class_name: &cli.class_name,
        out_dir: &out_dir,
        base_url: &base_url,
        cookies: &cookies,
        abort,
    };
    let opts = RunOptions {
        overwrite: cli.overwrite,
        skip_download: cli.skip_download,
        only_section: cli.section_num,
        transfer: &*transfer,
    };
    let summary = download_catalog(&catalog, &ctx, &opts)?;

    println!();
    println!(
        "{} downloaded, {} placeholders, {} already present",
        summary.downloaded, summary.placeholders, summary.skipped
    );
    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    for section in catalog.sections() {
        println!("{}", section.name);
        for video in &section.videos {
            println!("   {}   {}", video.name, video.source_url);
        }
    }
}
