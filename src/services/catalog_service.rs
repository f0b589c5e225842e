use std::fs;
use std::path::Path;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::ImageSource;
use crate::database::image_repo;

pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog storage error: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogReport {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Refreshes the image catalog for the configured source. Runs at every
/// process start; re-running never duplicates rows.
pub async fn populate(pool: &SqlitePool, source: &ImageSource) -> Result<CatalogReport, CatalogError> {
    let report = match source {
        ImageSource::HostedBucket {
            manifest_path,
            base_url,
        } => populate_from_manifest(pool, manifest_path, base_url).await?,
        ImageSource::LocalDisk { dataset_path } => {
            populate_from_directory(pool, dataset_path).await?
        }
    };

    info!(
        "image catalog refreshed: inserted={}, updated={}, skipped={}",
        report.inserted, report.updated, report.skipped
    );
    Ok(report)
}

/// Manifest mode: one relative path per line, gender taken from the first
/// path segment, url built from the configured base. Blank lines and `#`
/// comments are ignored.
pub async fn populate_from_manifest(
    pool: &SqlitePool,
    manifest_path: &Path,
    base_url: &str,
) -> Result<CatalogReport, CatalogError> {
    let contents = fs::read_to_string(manifest_path)?;
    let base = base_url.trim_end_matches('/');

    let mut report = CatalogReport::default();
    for line in contents.lines() {
        let relative_path = line.trim();
        if relative_path.is_empty() || relative_path.starts_with('#') {
            continue;
        }

        let Some((gender, _)) = relative_path.split_once('/') else {
            warn!("manifest line without gender segment, skipping: {relative_path}");
            report.skipped += 1;
            continue;
        };

        let url = format!("{base}/{relative_path}");
        upsert_image(pool, relative_path, gender, Some(&url), &mut report).await?;
    }
    Ok(report)
}

/// Scan mode: register every image file below the male/female directories,
/// keyed by its path relative to the dataset root. No url in this mode;
/// bytes are served from disk.
pub async fn populate_from_directory(
    pool: &SqlitePool,
    dataset_path: &Path,
) -> Result<CatalogReport, CatalogError> {
    let mut report = CatalogReport::default();

    for gender in ["male", "female"] {
        let gender_dir = dataset_path.join(gender);
        if !gender_dir.is_dir() {
            warn!("dataset directory missing, skipping: {}", gender_dir.display());
            continue;
        }

        for entry in WalkDir::new(&gender_dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("dataset walk error, skipping entry: {e}");
                    report.skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() || !has_image_extension(entry.path()) {
                continue;
            }

            let relative = entry.path().strip_prefix(dataset_path).unwrap_or(entry.path());
            let filename = relative.to_string_lossy().replace('\\', "/");
            upsert_image(pool, &filename, gender, None, &mut report).await?;
        }
    }
    Ok(report)
}

/// Insert-if-absent; update only when the stored url changed; skip otherwise.
async fn upsert_image(
    pool: &SqlitePool,
    filename: &str,
    gender: &str,
    url: Option<&str>,
    report: &mut CatalogReport,
) -> sqlx::Result<()> {
    match image_repo::find_by_filename_gender(pool, filename, gender).await? {
        None => {
            image_repo::insert_image(pool, filename, gender, url).await?;
            report.inserted += 1;
        }
        Some(existing) if existing.url.as_deref() != url => {
            image_repo::update_image_url(pool, filename, gender, url).await?;
            report.updated += 1;
        }
        Some(_) => {
            report.skipped += 1;
        }
    }
    Ok(())
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}
