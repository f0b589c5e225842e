use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::dataset::metadata;
use crate::dataset::transfer::{self, FileAction, TransferReport};

/// Splits every `gender/age_group/` directory under `source_dir` into
/// `<target_ethnicity>/` and `other/` subdirectories, using the
/// demographics CSV as the filename -> ethnicity lookup.
pub fn reorganize_by_ethnicity(
    csv_path: &Path,
    source_dir: &Path,
    target_ethnicity: &str,
    action: FileAction,
) -> Result<TransferReport> {
    let ethnicity_map = metadata::load_ethnicity_map(csv_path)?;
    let target = target_ethnicity.to_lowercase();

    // Collect before moving anything; the walk must not see the
    // subdirectories this run creates.
    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(source_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("walk error under {}: {e}", source_dir.display());
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_image_file(entry.path()) {
            continue;
        }

        // Files already inside an ethnicity folder are left alone.
        let parent_name = entry
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|n| n.to_lowercase())
            .unwrap_or_default();
        if parent_name == target || parent_name == "other" {
            continue;
        }

        candidates.push(entry.into_path());
    }

    if candidates.is_empty() {
        info!("no images found to reorganize under {}", source_dir.display());
        return Ok(TransferReport::default());
    }

    info!(
        "reorganizing {} images for ethnicity '{target}'",
        candidates.len()
    );

    let progress = ProgressBar::new(candidates.len() as u64);
    let mut report = TransferReport::default();
    for path in &candidates {
        progress.inc(1);

        let (Some(filename), Some(parent)) =
            (path.file_name().and_then(|n| n.to_str()), path.parent())
        else {
            report.skipped += 1;
            continue;
        };

        let dest_subdir = match ethnicity_map.get(filename) {
            Some(e) if e.to_lowercase() == target => target.as_str(),
            _ => "other",
        };
        let dest_dir = parent.join(dest_subdir);
        fs::create_dir_all(&dest_dir)?;
        let dest = dest_dir.join(filename);

        if dest.exists() {
            report.skipped += 1;
            // A move whose destination is already populated drops the
            // duplicate source copy.
            if action == FileAction::Move {
                if let Err(e) = fs::remove_file(path) {
                    warn!("could not remove duplicate {}: {e}", path.display());
                }
            }
            continue;
        }

        report.record(transfer::transfer_if_needed(path, &dest, action));
    }
    progress.finish_and_clear();

    Ok(report)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        .unwrap_or(false)
}
