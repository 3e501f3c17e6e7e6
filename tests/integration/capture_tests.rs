//! Capture runs against a scripted browser session

use async_trait::async_trait;
use sitemap_shot::capture::{
    run_capture, BrowserError, BrowserSession, CaptureOptions, NavigationResponse, RunState,
    ScriptedDecider,
};
use sitemap_shot::sitemap::{RecordDefaults, UrlRecord};
use sitemap_shot::{select, sort_by_depth, CaptureFailure, SelectionLimits};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Browser stand-in that serves fixed statuses and a real PNG
#[derive(Clone)]
struct ScriptedBrowser {
    statuses: HashMap<String, u16>,
    png: Vec<u8>,
    visited: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl ScriptedBrowser {
    fn new() -> Self {
        Self {
            statuses: HashMap::new(),
            png: sample_png(),
            visited: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn with_status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserSession for ScriptedBrowser {
    async fn navigate(&mut self, url: &str) -> Result<NavigationResponse, BrowserError> {
        self.visited.lock().unwrap().push(url.to_string());
        let status = self.statuses.get(url).copied().unwrap_or(200);
        Ok(NavigationResponse::with_status(status))
    }

    async fn scroll_height(&mut self) -> Result<u64, BrowserError> {
        Ok(1200)
    }

    async fn scroll_by(&mut self, _dy: u64) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn scroll_to_top(&mut self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn capture_full_page(&mut self) -> Result<Vec<u8>, BrowserError> {
        Ok(self.png.clone())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn sample_png() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(16, 16, image::Rgba([200, 40, 40, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn fast_options() -> CaptureOptions {
    CaptureOptions {
        navigation_timeout: Duration::from_secs(5),
        settle_delay: Duration::ZERO,
        scroll_step: 400,
        scroll_interval: Duration::ZERO,
        ..CaptureOptions::default()
    }
}

fn records(locations: &[&str]) -> Vec<UrlRecord> {
    let defaults = RecordDefaults::now();
    locations
        .iter()
        .map(|l| UrlRecord::with_defaults(*l, &defaults))
        .collect()
}

fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn test_planned_capture_with_auto_continue() {
    let dir = tempfile::tempdir().unwrap();

    let mut sitemap = records(&[
        "https://example.com/blog/post/",
        "https://example.com/missing",
        "https://example.com/",
        "https://example.com/about",
        "https://example.com/blog/post/deep/page",
    ]);
    sort_by_depth(&mut sitemap);
    let plan = select(&sitemap, SelectionLimits::new(3, 9, 100));
    assert_eq!(plan.len(), 4);

    let browser = ScriptedBrowser::new().with_status("https://example.com/missing", 404);
    let probe = browser.clone();
    let options = CaptureOptions {
        auto_continue: true,
        ..fast_options()
    };
    let mut decider = ScriptedDecider::default();

    let report = run_capture(browser, &plan, dir.path(), &options, &mut decider)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.attempted, 4);
    assert_eq!(
        file_names(&report.artifacts),
        vec!["0001_index.png", "0002_about.png", "0003_blog__post.png"]
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].1,
        CaptureFailure::Status {
            url: "https://example.com/missing".to_string(),
            status: 404,
        }
    );

    // Auto-continue never consults the decider
    assert!(decider.prompts().is_empty());
    assert!(probe.closed.load(Ordering::SeqCst));

    for artifact in &report.artifacts {
        let bytes = std::fs::read(artifact).unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }
}

#[tokio::test]
async fn test_abort_keeps_earlier_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let plan = records(&[
        "https://example.com/a",
        "https://example.com/b",
        "https://example.com/c",
    ]);

    let browser = ScriptedBrowser::new().with_status("https://example.com/b", 500);
    let probe = browser.clone();
    let mut decider = ScriptedDecider::new([false]);

    let report = run_capture(browser, &plan, dir.path(), &fast_options(), &mut decider)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Aborted);
    assert_eq!(file_names(&report.artifacts), vec!["0001_a.png"]);
    assert!(dir.path().join("0001_a.png").exists());
    assert_eq!(
        probe.visited(),
        vec!["https://example.com/a", "https://example.com/b"]
    );
    assert_eq!(decider.prompts().len(), 1);
    assert!(decider.prompts()[0].contains("HTTP 500"));
    assert!(probe.closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_limit_stops_before_remaining_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let plan = records(&[
        "https://example.com/",
        "https://example.com/one",
        "https://example.com/two",
    ]);

    let browser = ScriptedBrowser::new();
    let probe = browser.clone();
    let options = CaptureOptions {
        limit: 2,
        compress: true,
        ..fast_options()
    };
    let mut decider = ScriptedDecider::default();

    let report = run_capture(browser, &plan, dir.path(), &options, &mut decider)
        .await
        .unwrap();

    assert_eq!(report.state, RunState::LimitReached);
    assert_eq!(report.attempted, 2);
    assert_eq!(
        file_names(&report.artifacts),
        vec!["0001_index.png", "0002_one.png"]
    );
    assert_eq!(probe.visited().len(), 2);

    let compressed = std::fs::read(&report.artifacts[0]).unwrap();
    let decoded = image::load_from_memory(&compressed).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 16));
}
