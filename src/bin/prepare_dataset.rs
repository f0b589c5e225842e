use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use image_labeler::dataset::gender_sort;
use image_labeler::dataset::transfer::FileAction;

/// Sort a flat FFHQ image dump into male/female directories using the
/// aging-labels CSV.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the ffhq_aging_labels.csv file
    #[arg(long)]
    csv_path: PathBuf,

    /// Directory containing the FFHQ images (e.g. images1024x1024)
    #[arg(long)]
    source_dir: PathBuf,

    /// Directory where the sorted images will be saved
    #[arg(long)]
    output_dir: PathBuf,

    /// Use move with caution
    #[arg(long, value_enum, default_value = "copy")]
    action: FileAction,

    /// Maximum number of CSV rows to process
    #[arg(long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let report = gender_sort::sort_by_gender(
        &args.csv_path,
        &args.source_dir,
        &args.output_dir,
        args.action,
        args.limit,
    )?;

    println!("-------------------------------------------------");
    println!("Dataset sorting complete!");
    println!("Sorted images are saved in: {}", args.output_dir.display());
    println!("Successfully processed {} images.", report.processed);
    if report.skipped > 0 {
        println!(
            "Skipped {} images (missing source, already present, or copy errors).",
            report.skipped
        );
    }
    println!("-------------------------------------------------");

    Ok(())
}
