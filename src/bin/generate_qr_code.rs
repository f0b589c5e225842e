use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use image::Luma;
use qrcode::QrCode;

use image_labeler::startup;

/// Render a QR code PNG for the survey URL, for printing on handouts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL to encode
    #[arg(long, default_value = "https://image-labeler-app.onrender.com")]
    url: String,

    /// Output PNG path
    #[arg(long, default_value = "app_qr_code.png")]
    output: PathBuf,

    /// Also print the code to the terminal
    #[arg(long)]
    terminal: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let code = QrCode::new(args.url.as_bytes())?;
    let png = code.render::<Luma<u8>>().min_dimensions(360, 360).build();
    png.save(&args.output)?;
    println!("QR code for {} saved as {}", args.url, args.output.display());

    if args.terminal {
        println!("{}", startup::terminal_qr(&args.url)?);
    }

    Ok(())
}
