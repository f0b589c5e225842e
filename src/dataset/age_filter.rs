use std::fs;
use std::path::Path;

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::info;

use crate::dataset::metadata;
use crate::dataset::transfer::{self, FileAction, TransferReport};

/// Copies/moves gender-sorted images into nested `gender/age_group/`
/// directories for the requested age groups.
pub fn filter_by_age_groups(
    csv_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
    age_groups: &[String],
    action: FileAction,
) -> Result<TransferReport> {
    let records = metadata::load_aging_labels(csv_path, true)?;

    let matching: Vec<_> = records
        .into_iter()
        .filter(|r| age_groups.iter().any(|g| g == &r.age_group))
        .collect();

    if matching.is_empty() {
        info!("no images match the requested age groups: {age_groups:?}");
        return Ok(TransferReport::default());
    }

    info!(
        "found {} images matching age groups {age_groups:?}",
        matching.len()
    );

    let progress = ProgressBar::new(matching.len() as u64);
    let mut report = TransferReport::default();
    for record in &matching {
        progress.inc(1);

        let gender = record.gender.as_str();
        if gender != "male" && gender != "female" {
            report.skipped += 1;
            continue;
        }

        let file = format!("{}.png", transfer::padded_image_id(record.image_number));
        let dest_dir = output_dir.join(gender).join(&record.age_group);
        fs::create_dir_all(&dest_dir)?;

        let source = source_dir.join(gender).join(&file);
        report.record(transfer::transfer_if_needed(&source, &dest_dir.join(&file), action));
    }
    progress.finish_and_clear();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn only_requested_age_groups_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("sorted");
        let output = dir.path().join("by_age");
        fs::create_dir_all(source.join("male")).unwrap();
        fs::write(source.join("male/00001.png"), b"a").unwrap();
        fs::write(source.join("male/00002.png"), b"b").unwrap();

        let mut csv = tempfile::NamedTempFile::new().unwrap();
        csv.write_all(b"image_number,gender,age_group\n1,male,20-29\n2,male,50-59\n")
            .unwrap();

        let groups = vec!["20-29".to_string()];
        let report =
            filter_by_age_groups(csv.path(), &source, &output, &groups, FileAction::Copy).unwrap();

        assert_eq!(report.processed, 1);
        assert!(output.join("male/20-29/00001.png").exists());
        assert!(!output.join("male/50-59/00002.png").exists());
    }

    #[test]
    fn no_matches_yields_an_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut csv = tempfile::NamedTempFile::new().unwrap();
        csv.write_all(b"image_number,gender,age_group\n1,male,20-29\n").unwrap();

        let groups = vec!["60-69".to_string()];
        let report = filter_by_age_groups(
            csv.path(),
            &dir.path().join("src"),
            &dir.path().join("out"),
            &groups,
            FileAction::Copy,
        )
        .unwrap();
        assert_eq!(report, TransferReport::default());
    }
}
