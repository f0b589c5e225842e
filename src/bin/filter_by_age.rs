use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use image_labeler::dataset::age_filter;
use image_labeler::dataset::transfer::FileAction;

/// Filter gender-sorted FFHQ images into nested gender/age_group
/// directories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the ffhq_aging_labels.csv file
    #[arg(long)]
    csv_path: PathBuf,

    /// Directory containing male/ and female/ subdirectories
    #[arg(long)]
    source_dir: PathBuf,

    /// Base directory for the gender/age_group tree
    #[arg(long)]
    output_dir: PathBuf,

    /// Comma-separated age groups to keep (e.g. '15-19,20-29')
    #[arg(long, value_delimiter = ',')]
    age_groups: Vec<String>,

    /// Use move with caution
    #[arg(long, value_enum, default_value = "copy")]
    action: FileAction,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let age_groups: Vec<String> = args
        .age_groups
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    let report = age_filter::filter_by_age_groups(
        &args.csv_path,
        &args.source_dir,
        &args.output_dir,
        &age_groups,
        args.action,
    )?;

    println!("-------------------------------------------------");
    println!("Age-based filtering complete!");
    println!("Filtered images are saved in: {}", args.output_dir.display());
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
