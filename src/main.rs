//! Sitemap-Shot main entry point
//!
//! This is the command-line interface for Sitemap-Shot.

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use sitemap_shot::archive::package;
use sitemap_shot::capture::{run_capture, CaptureOptions, ChromeSession, TerminalDecider};
use sitemap_shot::config::{load_config_or_default, Config};
use sitemap_shot::crawler::{build_http_client, generate_sitemap, GenerateOptions};
use sitemap_shot::output::{print_capture_report, print_plan_summary, PlanSummary};
use sitemap_shot::sitemap::{merge_sitemap, read_sitemap_file, write_sitemap_file, HttpSource};
use sitemap_shot::workspace::Workspace;
use sitemap_shot::{select, sort_by_depth, SelectionLimits, SessionConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sitemap-Shot: full-page screenshots of a site, planned from its sitemap
///
/// Sitemap-Shot merges or generates a site's sitemap, selects a bounded set
/// of pages by path depth, captures each one with headless Chromium, and
/// packages the screenshots into a zip archive.
#[derive(Parser, Debug)]
#[command(name = "sitemap-shot")]
#[command(version)]
#[command(about = "Sitemap-driven full-page screenshot capture", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to TOML configuration file
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding dist/ and output/
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    workdir: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the working directories and empty dist/
    Setup,

    /// Build dist/sitemap.xml for a site, ordered by path depth
    Plan {
        /// Site URL
        url: String,

        /// Existing sitemap or sitemap index to merge instead of crawling
        #[arg(short, long, value_name = "SITEMAP_URL")]
        map: Option<String>,
    },

    /// Capture full-page screenshots of the planned URLs
    Capture(CaptureArgs),

    /// Zip dist/ into output/
    Package,

    /// Interactive wizard: setup, plan, capture, package
    Start,
}

#[derive(clap::Args, Debug, Clone)]
struct CaptureArgs {
    /// Sitemap to read; defaults to dist/sitemap.xml
    #[arg(value_name = "SITEMAP_PATH")]
    sitemap: Option<PathBuf>,

    /// Only capture URLs with fewer path segments than this (0 = unlimited)
    #[arg(short, long, default_value_t = 0)]
    depth: usize,

    /// Maximum URLs per sibling group (0 = unlimited)
    #[arg(short, long, default_value_t = 9)]
    repeat: usize,

    /// Maximum screenshots overall (0 = unlimited)
    #[arg(short, long, default_value_t = 100)]
    limit: usize,

    /// Re-encode screenshots at maximum PNG compression
    #[arg(short, long)]
    compress: bool,

    /// Continue after failures without asking
    #[arg(short = 'y', long = "yes")]
    yes: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_shot=info,warn"),
            1 => EnvFilter::new("sitemap_shot=debug,info"),
            2 => EnvFilter::new("sitemap_shot=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Invalid default configuration".to_string(),
        }
    })?;
    let workspace = Workspace::new(&cli.workdir, &config.output);
    let generate = GenerateOptions {
        suppress_transport_warnings: cli.verbose == 0,
    };

    match cli.command {
        Command::Setup => handle_setup(&workspace).await,
        Command::Plan { url, map } => {
            handle_plan(&workspace, &config, &url, map.as_deref(), generate).await
        }
        Command::Capture(args) => handle_capture(&workspace, &config, &args).await,
        Command::Package => handle_package(&workspace),
        Command::Start => handle_start(&workspace, &config, generate).await,
    }
}

async fn handle_setup(workspace: &Workspace) -> anyhow::Result<()> {
    workspace
        .setup()
        .await
        .context("Failed to prepare working directories")?;

    println!("Setup complete: {}", workspace.dist.display());
    Ok(())
}

async fn handle_plan(
    workspace: &Workspace,
    config: &Config,
    url: &str,
    map: Option<&str>,
    generate: GenerateOptions,
) -> anyhow::Result<()> {
    let session =
        SessionConfig::from_url(url).with_context(|| format!("Invalid site URL: {}", url))?;
    session.save(&workspace.dist).await?;
    tracing::info!("Planning {} ({})", session.url, session.domain);

    let mut model = match map {
        Some(location) => {
            let client = build_http_client(&config.generator)?;
            merge_sitemap(&HttpSource::new(client), location)
                .await
                .with_context(|| format!("Failed to merge sitemap {}", location))?
        }
        None => generate_sitemap(url, &config.generator, generate)
            .await
            .with_context(|| format!("Failed to generate a sitemap for {}", url))?,
    };

    tracing::info!("Sorting {} URLs by depth", model.len());
    sort_by_depth(&mut model);

    let path = workspace.sitemap_path();
    write_sitemap_file(&path, &model).await?;

    println!("Sitemap written: {} ({} URLs)", path.display(), model.len());
    Ok(())
}

fn resolve_path(workspace: &Workspace, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.root.join(path)
    }
}

async fn handle_capture(
    workspace: &Workspace,
    config: &Config,
    args: &CaptureArgs,
) -> anyhow::Result<()> {
    let sitemap_path = args
        .sitemap
        .as_deref()
        .map(|p| resolve_path(workspace, p))
        .unwrap_or_else(|| workspace.sitemap_path());

    tracing::info!("Reading {}", sitemap_path.display());
    let records = read_sitemap_file(&sitemap_path)
        .await
        .with_context(|| format!("Failed to read sitemap {}", sitemap_path.display()))?;

    let limits = SelectionLimits::new(args.depth, args.repeat, args.limit);
    let plan = select(&records, limits);
    print_plan_summary(&PlanSummary::new(records.len(), &plan, limits));

    let options = CaptureOptions {
        limit: args.limit,
        auto_continue: args.yes,
        compress: args.compress,
        ..CaptureOptions::from_config(&config.capture)
    };

    tracing::info!("Launching headless browser");
    let session = ChromeSession::launch(&config.capture)
        .await
        .context("Failed to launch the browser")?;

    let report = run_capture(
        session,
        &plan,
        &workspace.screenshots,
        &options,
        &mut TerminalDecider,
    )
    .await?;

    print_capture_report(&report);
    println!(
        "Capture {}: {} screenshots in {}",
        report.state,
        report.artifacts.len(),
        workspace.screenshots.display()
    );
    Ok(())
}

fn handle_package(workspace: &Workspace) -> anyhow::Result<()> {
    let archive = package(&workspace.dist, &workspace.output, Local::now())
        .context("Failed to create the archive")?;

    println!("Archive created: {}", archive.display());
    Ok(())
}

/// Walks through setup, plan, capture and package with prompts
async fn handle_start(
    workspace: &Workspace,
    config: &Config,
    generate: GenerateOptions,
) -> anyhow::Result<()> {
    println!("=== Sitemap-Shot ===\n");

    println!("[1/4] Setup");
    handle_setup(workspace).await?;
    println!();

    println!("[2/4] Sitemap");
    let url: String = Input::new()
        .with_prompt("Site URL")
        .validate_with(|input: &String| -> Result<(), String> {
            SessionConfig::from_url(input.trim())
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    let map: String = Input::new()
        .with_prompt("Existing sitemap URL (empty to crawl the site)")
        .allow_empty(true)
        .interact_text()?;
    let map = Some(map.trim()).filter(|m| !m.is_empty());
    handle_plan(workspace, config, url.trim(), map, generate).await?;
    println!();

    println!("[3/4] Screenshots");
    let depth: usize = Input::new()
        .with_prompt("Depth (0 = unlimited)")
        .default(0)
        .interact_text()?;
    let repeat: usize = Input::new()
        .with_prompt("Per group (0 = unlimited)")
        .default(9)
        .interact_text()?;
    let limit: usize = Input::new()
        .with_prompt("Overall (0 = unlimited)")
        .default(100)
        .interact_text()?;
    let compress = Confirm::new()
        .with_prompt("Compress screenshots?")
        .default(false)
        .interact()?;
    let yes = Confirm::new()
        .with_prompt("Continue automatically after errors?")
        .default(false)
        .interact()?;

    let args = CaptureArgs {
        sitemap: None,
        depth,
        repeat,
        limit,
        compress,
        yes,
    };
    handle_capture(workspace, config, &args).await?;
    println!();

    println!("[4/4] Archive");
    let zip = Confirm::new()
        .with_prompt("Create a zip archive?")
        .default(true)
        .interact()?;
    if zip {
        handle_package(workspace)?;
    }

    println!("All steps completed");
    Ok(())
}
