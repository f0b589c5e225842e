use std::fs;
use std::io;
use std::path::Path;

use clap::ValueEnum;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileAction {
    Copy,
    Move,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TransferReport {
    pub processed: usize,
    pub skipped: usize,
}

impl TransferReport {
    pub fn record(&mut self, outcome: TransferOutcome) {
        match outcome {
            TransferOutcome::Transferred => self.processed += 1,
            TransferOutcome::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    Transferred,
    Skipped,
}

/// Move falls back to copy-then-delete when a plain rename crosses a
/// filesystem boundary.
pub fn transfer_file(source: &Path, dest: &Path, action: FileAction) -> io::Result<()> {
    match action {
        FileAction::Copy => {
            fs::copy(source, dest)?;
            Ok(())
        }
        FileAction::Move => match fs::rename(source, dest) {
            Ok(()) => Ok(()),
            Err(_) => {
                fs::copy(source, dest)?;
                fs::remove_file(source)
            }
        },
    }
}

/// Shared skip policy of the dataset tools: existing destination, missing
/// source, and per-file errors all count as skipped and never abort the
/// batch.
pub fn transfer_if_needed(source: &Path, dest: &Path, action: FileAction) -> TransferOutcome {
    if dest.exists() || !source.exists() {
        return TransferOutcome::Skipped;
    }
    match transfer_file(source, dest, action) {
        Ok(()) => TransferOutcome::Transferred,
        Err(e) => {
            warn!("failed to process {}: {e}", source.display());
            TransferOutcome::Skipped
        }
    }
}

/// FFHQ image ids are zero-padded to five digits on disk.
pub fn padded_image_id(id: i64) -> String {
    format!("{id:05}")
}

/// FFHQ dumps shard images into thousand-blocks: 14335.png sits in 14000/.
pub fn ffhq_shard_dir(id: i64) -> String {
    format!("{:05}", id / 1000 * 1000)
}
