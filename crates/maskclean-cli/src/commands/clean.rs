use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use maskclean_core::io::image_io::{load_mask, save_mask};
use maskclean_core::MaskCleaner;

use super::params::CleanParamArgs;

#[derive(Args)]
pub struct CleanArgs {
    /// Input mask image (PNG or TIFF; colour images are reduced to luma)
    pub file: PathBuf,

    #[command(flatten)]
    pub params: CleanParamArgs,

    /// Output file path
    #[arg(short, long, default_value = "cleaned.png")]
    pub output: PathBuf,
}

pub fn run(args: &CleanArgs) -> Result<()> {
    let config = args.params.resolve()?;
    let cleaner = MaskCleaner::new(&config)?;

    let frame = load_mask(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    crate::summary::print_clean_summary(&args.file, &args.output, &config);
    println!("Loaded {}x{} mask", frame.width(), frame.height());

    let (cleaned, stats) = cleaner.process_frame_with_stats(&frame)?;
    crate::summary::print_stats(&stats);

    save_mask(&cleaned, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
