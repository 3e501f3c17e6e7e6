//! Robots.txt rules backed by the robotstxt crate

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// The robots.txt rules that apply to one crawl
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    /// Raw robots.txt body; `None` allows everything
    rules: Option<String>,
}

impl RobotsPolicy {
    pub fn from_content(content: &str) -> Self {
        Self {
            rules: Some(content.to_string()),
        }
    }

    /// A policy that allows every URL, used when robots.txt is absent or ignored
    pub fn allow_all() -> Self {
        Self { rules: None }
    }

    /// Checks a full URL against the rules for `agent`
    ///
    /// `agent` is the crawler's product token (e.g. `SitemapShot`), not the
    /// full User-Agent header.
    pub fn is_allowed(&self, url: &str, agent: &str) -> bool {
        match &self.rules {
            Some(rules) if !rules.trim().is_empty() => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(rules, agent, url)
            }
            _ => true,
        }
    }

    /// The `Crawl-delay` that applies to `agent`
    ///
    /// A group naming the agent wins over the `*` group.
    pub fn crawl_delay(&self, agent: &str) -> Option<Duration> {
        let rules = self.rules.as_deref()?;
        let agent = agent.to_lowercase();

        let mut group: Vec<String> = Vec::new();
        let mut in_group_header = false;
        let mut specific = None;
        let mut wildcard = None;

        for line in rules.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim().to_lowercase(), value.trim());

            if key == "user-agent" {
                if !in_group_header {
                    group.clear();
                }
                group.push(value.to_lowercase());
                in_group_header = true;
                continue;
            }
            in_group_header = false;

            if key != "crawl-delay" {
                continue;
            }
            // Negative, non-finite and out-of-range values are skipped
            let Some(delay) = value
                .parse::<f64>()
                .ok()
                .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            else {
                continue;
            };

            if group.iter().any(|ua| ua != "*" && agent.contains(ua.as_str())) {
                specific = Some(delay);
            } else if group.iter().any(|ua| ua == "*") {
                wildcard = Some(delay);
            }
        }

        specific.or(wildcard)
    }
}
