//! Sitemap merging against a mock HTTP server

use sitemap_shot::sitemap::{merge_sitemap, HttpSource};
use sitemap_shot::{FetchError, FormatError, ShotError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn urlset(locations: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for loc in locations {
        xml.push_str(&format!("<url><loc>{}</loc></url>", loc));
    }
    xml.push_str("</urlset>");
    xml
}

fn index(children: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for loc in children {
        xml.push_str(&format!("<sitemap><loc>{}</loc></sitemap>", loc));
    }
    xml.push_str("</sitemapindex>");
    xml
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xml")
                .set_body_string(body),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_index_merges_children_in_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    let first: Vec<String> = (1..=3).map(|i| format!("{}/a/{}", base, i)).collect();
    let second: Vec<String> = (1..=5).map(|i| format!("{}/b/{}", base, i)).collect();

    mount_xml(
        &server,
        "/sitemap_index.xml",
        index(&[format!("{}/s1.xml", base), format!("{}/s2.xml", base)]),
    )
    .await;
    mount_xml(&server, "/s1.xml", urlset(&first)).await;
    mount_xml(&server, "/s2.xml", urlset(&second)).await;

    let source = HttpSource::new(reqwest::Client::new());
    let model = merge_sitemap(&source, &format!("{}/sitemap_index.xml", base))
        .await
        .unwrap();

    let locations: Vec<String> = model.into_iter().map(|r| r.location).collect();
    let expected: Vec<String> = first.into_iter().chain(second).collect();
    assert_eq!(locations.len(), 8);
    assert_eq!(locations, expected);
}

#[tokio::test]
async fn test_flat_sitemap_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    let urls = vec![format!("{}/", base), format!("{}/about", base)];
    mount_xml(&server, "/sitemap.xml", urlset(&urls)).await;

    let source = HttpSource::new(reqwest::Client::new());
    let model = merge_sitemap(&source, &format!("{}/sitemap.xml", base))
        .await
        .unwrap();

    assert_eq!(model.len(), 2);
    assert_eq!(model[1].location, urls[1]);
    assert_eq!(model[1].change_frequency, "weekly");
    assert_eq!(model[1].priority, "0.5");
}

#[tokio::test]
async fn test_failed_child_aborts_merge() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(
        &server,
        "/index.xml",
        index(&[format!("{}/ok.xml", base), format!("{}/missing.xml", base)]),
    )
    .await;
    mount_xml(&server, "/ok.xml", urlset(&[format!("{}/x", base)])).await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpSource::new(reqwest::Client::new());
    let err = merge_sitemap(&source, &format!("{}/index.xml", base))
        .await
        .unwrap_err();

    match err {
        ShotError::Fetch(FetchError::Status { location, status }) => {
            assert_eq!(status, 404);
            assert!(location.ends_with("/missing.xml"));
        }
        other => panic!("expected a fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_nested_index_rejected() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(&server, "/index.xml", index(&[format!("{}/nested.xml", base)])).await;
    mount_xml(&server, "/nested.xml", index(&[format!("{}/deeper.xml", base)])).await;

    let source = HttpSource::new(reqwest::Client::new());
    let err = merge_sitemap(&source, &format!("{}/index.xml", base))
        .await
        .unwrap_err();

    assert!(matches!(err, ShotError::Format(FormatError::NotFlat(_))));
}

#[tokio::test]
async fn test_malformed_top_level_document() {
    let server = MockServer::start().await;
    mount_xml(&server, "/sitemap.xml", "<html><body>Not found</body></html>".to_string()).await;

    let source = HttpSource::new(reqwest::Client::new());
    let err = merge_sitemap(&source, &format!("{}/sitemap.xml", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ShotError::Format(FormatError::UnexpectedRoot(_))
    ));
}
