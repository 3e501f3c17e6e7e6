//! Sequential capture executor
//!
//! Consumes a crawl plan one URL at a time through a single browser page.
//! Every job ends as a saved artifact or a recorded [`CaptureFailure`]; after
//! a failure the run either continues (auto-continue, or the decider says
//! yes) or aborts. Artifacts already written are never removed.

use crate::capture::browser::{BrowserError, BrowserSession};
use crate::capture::compress::recompress_png;
use crate::capture::decision::Decider;
use crate::capture::naming::artifact_file_name;
use crate::capture::state::RunState;
use crate::config::CaptureConfig;
use crate::sitemap::UrlRecord;
use crate::{CaptureFailure, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound on scroll steps per page; infinite-scroll pages never reach
/// the bottom
const MAX_SCROLL_STEPS: u64 = 5_000;

/// Run options for [`run_capture`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Maximum number of artifacts; 0 means unlimited
    pub limit: usize,

    /// Log failures and keep going instead of asking the decider
    pub auto_continue: bool,

    /// Re-encode screenshots at maximum PNG compression
    pub compress: bool,

    pub navigation_timeout: Duration,
    pub settle_delay: Duration,
    pub scroll_step: u64,
    pub scroll_interval: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::from_config(&CaptureConfig::default())
    }
}

impl CaptureOptions {
    /// Options with the config's timings, limit 0, and both flags off
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            limit: 0,
            auto_continue: false,
            compress: false,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            scroll_step: config.scroll_step_px,
            scroll_interval: Duration::from_millis(config.scroll_interval_ms),
        }
    }

    fn within_limit(&self, sequence: usize) -> bool {
        self.limit == 0 || sequence <= self.limit
    }
}

/// Outcome of a capture run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    /// Terminal state of the run
    pub state: RunState,

    /// Written artifacts, in capture order
    pub artifacts: Vec<PathBuf>,

    /// Failed jobs, in the order they failed
    pub failures: Vec<(String, CaptureFailure)>,

    /// Number of jobs started
    pub attempted: usize,
}

impl CaptureReport {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
            artifacts: Vec::new(),
            failures: Vec::new(),
            attempted: 0,
        }
    }
}

/// Captures every planned URL into `artifact_dir`
///
/// The session is closed before this function returns, on every path. A
/// failure to write an artifact is fatal and is returned after the close;
/// per-URL capture failures are recorded in the report instead.
pub async fn run_capture<S, D>(
    mut session: S,
    plan: &[UrlRecord],
    artifact_dir: &Path,
    options: &CaptureOptions,
    decider: &mut D,
) -> Result<CaptureReport>
where
    S: BrowserSession,
    D: Decider + ?Sized,
{
    let outcome = capture_all(&mut session, plan, artifact_dir, options, decider).await;

    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser: {}", e);
    }

    outcome
}

async fn capture_all<S, D>(
    session: &mut S,
    plan: &[UrlRecord],
    artifact_dir: &Path,
    options: &CaptureOptions,
    decider: &mut D,
) -> Result<CaptureReport>
where
    S: BrowserSession,
    D: Decider + ?Sized,
{
    tokio::fs::create_dir_all(artifact_dir).await?;

    let mut report = CaptureReport::new();
    let mut sequence = 1usize;
    let total = if options.limit == 0 {
        plan.len()
    } else {
        plan.len().min(options.limit)
    };

    report.state = RunState::Running;

    for (index, record) in plan.iter().enumerate() {
        if !options.within_limit(sequence) {
            break;
        }

        let url = record.location.as_str();
        report.attempted += 1;
        tracing::info!("Capturing {}/{}: {}", index + 1, total, url);

        match capture_one(session, url, options).await {
            Ok(png) => {
                let file_name = artifact_file_name(sequence, url);
                let path = artifact_dir.join(&file_name);
                tokio::fs::write(&path, png).await?;

                tracing::info!("Saved {}", file_name);
                report.artifacts.push(path);
                sequence += 1;
            }
            Err(failure) => {
                report.failures.push((url.to_string(), failure.clone()));

                if options.auto_continue {
                    tracing::warn!("{} - continuing", failure);
                } else if decider.decide(&failure.to_string()) {
                    tracing::info!("Continuing after failure on {}", url);
                } else {
                    tracing::warn!("Run aborted after failure on {}", url);
                    report.state = RunState::Aborted;
                    return Ok(report);
                }
            }
        }
    }

    report.state = if options.within_limit(sequence) {
        RunState::Completed
    } else {
        tracing::info!("Reached the capture limit of {}", options.limit);
        RunState::LimitReached
    };

    Ok(report)
}

/// Navigates, settles, and screenshots one URL
async fn capture_one<S>(
    session: &mut S,
    url: &str,
    options: &CaptureOptions,
) -> std::result::Result<Vec<u8>, CaptureFailure>
where
    S: BrowserSession,
{
    let response = match tokio::time::timeout(options.navigation_timeout, session.navigate(url))
        .await
    {
        Err(_) => {
            return Err(CaptureFailure::Timeout {
                url: url.to_string(),
                timeout: options.navigation_timeout,
            })
        }
        Ok(Err(e)) => {
            return Err(CaptureFailure::Navigation {
                url: url.to_string(),
                details: navigation_details(e),
            })
        }
        Ok(Ok(response)) => response,
    };

    if let Some(status) = response.status.filter(|_| !response.is_success()) {
        return Err(CaptureFailure::Status {
            url: url.to_string(),
            status,
        });
    }

    settle(session, options)
        .await
        .map_err(|e| browser_failure(url, e))?;
    let png = session
        .capture_full_page()
        .await
        .map_err(|e| browser_failure(url, e))?;

    if options.compress {
        return recompress_png(&png).map_err(|e| CaptureFailure::Browser {
            url: url.to_string(),
            details: format!("PNG compression failed: {}", e),
        });
    }

    Ok(png)
}

fn browser_failure(url: &str, error: BrowserError) -> CaptureFailure {
    CaptureFailure::Browser {
        url: url.to_string(),
        details: error.to_string(),
    }
}

fn navigation_details(error: BrowserError) -> String {
    match error {
        BrowserError::NavigateFailed { details, .. } => details,
        other => other.to_string(),
    }
}

/// Waits, scrolls to the bottom to trigger lazy content, waits, and returns to the top
async fn settle<S>(
    session: &mut S,
    options: &CaptureOptions,
) -> std::result::Result<(), BrowserError>
where
    S: BrowserSession,
{
    tokio::time::sleep(options.settle_delay).await;

    let step = options.scroll_step.max(1);
    let mut scrolled = 0u64;
    for _ in 0..MAX_SCROLL_STEPS {
        let height = session.scroll_height().await?;
        session.scroll_by(step).await?;
        scrolled += step;
        if scrolled >= height {
            break;
        }
        tokio::time::sleep(options.scroll_interval).await;
    }

    tokio::time::sleep(options.settle_delay).await;
    session.scroll_to_top().await
}
