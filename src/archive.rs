//! Zip packaging of the dist directory
//!
//! The archive holds everything under dist except session metadata, with
//! entry names relative to dist and `/`-separated on every platform.

use crate::session::{SessionConfig, SESSION_FILE_NAME};
use crate::{PackagingError, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive file name: `<domain>_generated_<YYYYMMDD_HHMMSS>.zip`
pub fn archive_file_name(domain: &str, now: &DateTime<Local>) -> String {
    format!("{}_generated_{}.zip", domain, now.format("%Y%m%d_%H%M%S"))
}

/// Packages `dist_dir` into a new zip archive under `output_dir`
///
/// When `output_dir` lies inside `dist_dir` it is left out of the archive.
/// A partially written archive is removed before an error is returned.
///
/// # Errors
///
/// * `PackagingError::MissingSession` - no session metadata in `dist_dir`
/// * `PackagingError::Zip` - the archive could not be written
/// * `ShotError::Io` - a file could not be read or created
pub fn package(dist_dir: &Path, output_dir: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    let session = SessionConfig::load(dist_dir)?;

    std::fs::create_dir_all(output_dir)?;
    let root = std::fs::canonicalize(dist_dir)?;
    let files = collect_files(&root, &std::fs::canonicalize(output_dir)?)?;

    let archive_path = output_dir.join(archive_file_name(&session.domain, &now));
    tracing::info!("Creating {}", archive_path.display());

    let entries = build_archive(&archive_path, &root, &files)?;

    let size = std::fs::metadata(&archive_path)?.len();
    tracing::info!(
        "Archive written: {} ({} files, {} bytes)",
        archive_path.display(),
        entries,
        size
    );

    Ok(archive_path)
}

/// Files under `root` in sorted order, without session metadata or `skip_dir`
fn collect_files(root: &Path, skip_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != skip_dir);

    for entry in walker {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        if entry.file_type().is_file() && entry.file_name() != SESSION_FILE_NAME {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Writes `files` into a zip at `archive_path`, removing it again on failure
fn build_archive(archive_path: &Path, root: &Path, files: &[PathBuf]) -> Result<usize> {
    let result = write_archive(archive_path, root, files);
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(archive_path) {
            tracing::debug!("Could not remove {}: {}", archive_path.display(), e);
        }
    }
    result
}

fn write_archive(archive_path: &Path, root: &Path, files: &[PathBuf]) -> Result<usize> {
    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let mut entries = 0usize;
    for path in files {
        let Some(name) = entry_name(root, path) else {
            continue;
        };

        zip.start_file(name.as_str(), options)
            .map_err(PackagingError::from)?;
        let mut source = File::open(path)?;
        std::io::copy(&mut source, &mut zip)?;
        tracing::debug!("Added {}", name);
        entries += 1;
    }

    let mut writer = zip.finish().map_err(PackagingError::from)?;
    writer.flush()?;
    Ok(entries)
}

fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
