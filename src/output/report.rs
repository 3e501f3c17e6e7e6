//! Plain-text run reports printed at the end of a command

use crate::capture::{CaptureReport, RunState};
use crate::plan::{url_depth, SelectionLimits};
use crate::sitemap::UrlRecord;
use std::collections::BTreeMap;

/// Counts describing a crawl plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    /// URLs in the sitemap before selection
    pub total_urls: usize,

    /// URLs kept by the selector
    pub selected: usize,

    /// Selected URLs per path depth
    pub depth_breakdown: BTreeMap<usize, usize>,

    pub limits: SelectionLimits,
}

impl PlanSummary {
    pub fn new(total_urls: usize, plan: &[UrlRecord], limits: SelectionLimits) -> Self {
        let mut depth_breakdown = BTreeMap::new();
        for record in plan {
            *depth_breakdown
                .entry(url_depth(&record.location))
                .or_insert(0) += 1;
        }

        Self {
            total_urls,
            selected: plan.len(),
            depth_breakdown,
            limits,
        }
    }
}

fn limit_label(value: usize) -> String {
    if value == 0 {
        "unlimited".to_string()
    } else {
        value.to_string()
    }
}

/// Formats a plan summary
pub fn format_plan_summary(summary: &PlanSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Plan ===\n\n");
    out.push_str(&format!("  URLs in sitemap: {}\n", summary.total_urls));
    out.push_str(&format!("  Selected: {}\n", summary.selected));
    out.push_str(&format!(
        "  Depth below: {}\n",
        limit_label(summary.limits.max_depth)
    ));
    out.push_str(&format!(
        "  Per group: {}\n",
        limit_label(summary.limits.repeat_cap)
    ));
    out.push_str(&format!(
        "  Overall: {}\n",
        limit_label(summary.limits.global_limit)
    ));

    if !summary.depth_breakdown.is_empty() {
        out.push_str("\nBy depth:\n");
        for (depth, count) in &summary.depth_breakdown {
            out.push_str(&format!("  {}: {}\n", depth, count));
        }
    }

    out
}

pub fn print_plan_summary(summary: &PlanSummary) {
    println!("{}", format_plan_summary(summary));
}

/// Formats the outcome of a capture run
pub fn format_capture_report(report: &CaptureReport) -> String {
    let mut out = String::new();

    out.push_str("=== Capture Report ===\n\n");
    out.push_str(&format!("  Status: {}\n", report.state));
    out.push_str(&format!("  Attempted: {}\n", report.attempted));
    out.push_str(&format!("  Captured: {}\n", report.artifacts.len()));
    out.push_str(&format!("  Failed: {}\n", report.failures.len()));

    if !report.failures.is_empty() {
        out.push_str("\nFailures:\n");
        for (url, failure) in &report.failures {
            out.push_str(&format!("  - {}: {}\n", url, failure));
        }
    }

    match report.state {
        RunState::LimitReached => {
            out.push_str("\nStopped after reaching the capture limit.\n");
        }
        RunState::Aborted => {
            out.push_str("\nAborted by the operator; captured screenshots were kept.\n");
        }
        _ => {}
    }

    out
}

pub fn print_capture_report(report: &CaptureReport) {
    println!("{}", format_capture_report(report));
}
