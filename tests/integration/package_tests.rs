//! Packaging a dist directory into a zip archive

use chrono::{Local, TimeZone};
use sitemap_shot::archive::package;
use sitemap_shot::{PackagingError, SessionConfig, ShotError};
use std::fs::File;
use std::io::Read;

#[tokio::test]
async fn test_package_dist_directory() {
    let root = tempfile::tempdir().unwrap();
    let dist = root.path().join("dist");
    let output = root.path().join("output");

    SessionConfig::from_url("https://www.example.com/")
        .unwrap()
        .save(&dist)
        .await
        .unwrap();
    std::fs::write(dist.join("sitemap.xml"), "<urlset/>").unwrap();
    std::fs::create_dir_all(dist.join("screenshot")).unwrap();
    std::fs::write(dist.join("screenshot/0001_index.png"), b"png-1").unwrap();
    std::fs::write(dist.join("screenshot/0002_about.png"), b"png-2").unwrap();

    let now = Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    let archive_path = package(&dist, &output, now).unwrap();

    assert_eq!(
        archive_path,
        output.join("www.example.com_generated_20240506_070809.zip")
    );

    let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "screenshot/0001_index.png",
            "screenshot/0002_about.png",
            "sitemap.xml",
        ]
    );

    let mut content = String::new();
    archive
        .by_name("screenshot/0002_about.png")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "png-2");
}

#[test]
fn test_package_without_session_fails() {
    let root = tempfile::tempdir().unwrap();
    let dist = root.path().join("dist");
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("sitemap.xml"), "<urlset/>").unwrap();

    let err = package(&dist, &root.path().join("output"), Local::now()).unwrap_err();
    assert!(matches!(
        err,
        ShotError::Packaging(PackagingError::MissingSession(_))
    ));
    assert!(!root.path().join("output").exists());
}
