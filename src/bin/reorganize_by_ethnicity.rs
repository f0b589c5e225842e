use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use image_labeler::dataset::ethnicity;
use image_labeler::dataset::transfer::FileAction;

/// Reorganize each gender/age_group directory into <ethnicity>/ and other/
/// subdirectories using the demographics CSV.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the demographics CSV (File,Ethnic columns)
    #[arg(long)]
    csv_path: PathBuf,

    /// Directory containing the images to reorganize
    #[arg(long)]
    source_dir: PathBuf,

    /// Ethnicity that gets its own folder (e.g. 'Asian')
    #[arg(long)]
    target_ethnicity: String,

    /// Reorganization is in-place, so the default is move
    #[arg(long, value_enum, default_value = "move")]
    action: FileAction,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let report = ethnicity::reorganize_by_ethnicity(
        &args.csv_path,
        &args.source_dir,
        &args.target_ethnicity,
        args.action,
    )?;

    println!("-------------------------------------------------");
    println!("Demographic reorganization complete!");
    println!("Reorganized images within: {}", args.source_dir.display());
    println!("Successfully processed {} images.", report.processed);
    if report.skipped > 0 {
        println!(
            "Skipped {} images (not in CSV, or already reorganized).",
            report.skipped
        );
    }
    println!("-------------------------------------------------");

    Ok(())
}
