//! Console reports for plan and capture runs
//!
//! This module handles:
//! - Summarizing a crawl plan by depth
//! - Summarizing the outcome of a capture run

mod report;

pub use report::{
    format_capture_report, format_plan_summary, print_capture_report, print_plan_summary,
    PlanSummary,
};
