//! Sitemap generation by crawling a mock site

use sitemap_shot::config::GeneratorConfig;
use sitemap_shot::crawler::{generate_sitemap, GenerateOptions};
use sitemap_shot::sort_by_depth;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> GeneratorConfig {
    GeneratorConfig {
        crawler_name: "TestBot".to_string(),
        request_delay_ms: 0,
        ..GeneratorConfig::default()
    }
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_generates_same_site_html_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        &format!(
            r#"<html><body>
                <a href="/about">About</a>
                <a href="/blog/">Blog</a>
                <a href="/blog/?page=2#list">Blog page 2</a>
                <a href="https://elsewhere.example/">External</a>
                <a href="/report.pdf">Report</a>
                <a href="/missing">Missing</a>
                <a href="{}/about#team">Team</a>
            </body></html>"#,
            base
        ),
    )
    .await;
    mount_html(&server, "/about", r#"<a href="/">Home</a>"#).await;
    mount_html(&server, "/blog/", r#"<a href="first-post">First</a>"#).await;
    mount_html(&server, "/blog/first-post", "<p>Hello</p>").await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(vec![0u8; 16]),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut model = generate_sitemap(&base, &test_config(), GenerateOptions::default())
        .await
        .unwrap();
    sort_by_depth(&mut model);

    let locations: Vec<String> = model.iter().map(|r| r.location.clone()).collect();
    assert_eq!(
        locations,
        vec![
            format!("{}/", base),
            format!("{}/about", base),
            format!("{}/blog/", base),
            format!("{}/blog/first-post", base),
        ]
    );
    assert!(model.iter().all(|r| r.priority == "0.5"));
}

#[tokio::test]
async fn test_respects_robots_txt() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
        )
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/",
        r#"<a href="/public">Public</a><a href="/private/page">Private</a>"#,
    )
    .await;
    mount_html(&server, "/public", "public").await;
    Mock::given(method("GET"))
        .and(path("/private/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
        .expect(0)
        .mount(&server)
        .await;

    let model = generate_sitemap(&base, &test_config(), GenerateOptions::default())
        .await
        .unwrap();

    assert_eq!(model.len(), 2);
    assert!(model.iter().all(|r| !r.location.contains("private")));

    // With robots.txt ignored the private page is recorded
    let config = GeneratorConfig {
        respect_robots: false,
        ..test_config()
    };
    let server_ignored = MockServer::start().await;
    let base_ignored = server_ignored.uri();
    mount_html(&server_ignored, "/", r#"<a href="/private/page">Private</a>"#).await;
    mount_html(&server_ignored, "/private/page", "secret").await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .expect(0)
        .mount(&server_ignored)
        .await;

    let model = generate_sitemap(&base_ignored, &config, GenerateOptions::default())
        .await
        .unwrap();
    assert_eq!(model.len(), 2);
}

#[tokio::test]
async fn test_transport_failures_are_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        r#"<a href="/slow">Slow</a><a href="/fine">Fine</a>"#,
    )
    .await;
    mount_html(&server, "/fine", "fine").await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = GeneratorConfig {
        request_timeout_secs: 1,
        ..test_config()
    };
    let options = GenerateOptions {
        suppress_transport_warnings: true,
    };

    let model = generate_sitemap(&base, &config, options).await.unwrap();
    let locations: Vec<&str> = model.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(locations, vec![format!("{}/", base), format!("{}/fine", base)]);
}
