use std::fs;
use std::path::Path;

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::info;

use crate::dataset::metadata;
use crate::dataset::transfer::{self, FileAction, TransferReport};

/// Sorts a flat FFHQ dump into `output_dir/{male,female}/` using the
/// aging-labels CSV. Sources are resolved inside the dump's thousand-block
/// shard directories. Rows with any other gender value are ignored.
pub fn sort_by_gender(
    csv_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
    action: FileAction,
    limit: Option<usize>,
) -> Result<TransferReport> {
    let mut records = metadata::load_aging_labels(csv_path, false)?;
    if let Some(limit) = limit {
        info!("limiting processing to the first {limit} rows of the CSV");
        records.truncate(limit);
    }

    fs::create_dir_all(output_dir.join("male"))?;
    fs::create_dir_all(output_dir.join("female"))?;

    info!("found {} labels, sorting images", records.len());

    let progress = ProgressBar::new(records.len() as u64);
    let mut report = TransferReport::default();
    for record in &records {
        progress.inc(1);

        let gender = record.gender.as_str();
        if gender != "male" && gender != "female" {
            continue;
        }

        let file = format!("{}.png", transfer::padded_image_id(record.image_number));
        let source = source_dir
            .join(transfer::ffhq_shard_dir(record.image_number))
            .join(&file);
        let dest = output_dir.join(gender).join(&file);

        report.record(transfer::transfer_if_needed(&source, &dest, action));
    }
    progress.finish_and_clear();

    Ok(report)
}
