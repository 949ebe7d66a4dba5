use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use maskclean_core::io::ser::SerReader;
use maskclean_core::MaskCleaner;

use super::params::CleanParamArgs;

#[derive(Args)]
pub struct ClipArgs {
    /// Input SER clip (8-bit mono)
    pub file: PathBuf,

    #[command(flatten)]
    pub params: CleanParamArgs,

    /// Output SER file (auto-generated if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ClipArgs) -> Result<()> {
    let config = args.params.resolve()?;
    let cleaner = MaskCleaner::new(&config)?;

    let reader = SerReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| clip_output_path(&args.file));

    crate::summary::print_clean_summary(&args.file, &output_path, &config);
    println!(
        "Clip: {}x{}, {} frames",
        reader.header.width,
        reader.header.height,
        reader.frame_count()
    );

    let pb = ProgressBar::new(reader.frame_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Cleaning [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    cleaner.process_clip(&reader, &output_path, |done| {
        pb.set_position(done as u64);
    })?;
    pb.finish();

    println!("Saved to {}", output_path.display());
    Ok(())
}

fn clip_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = source.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_clean.ser"))
}
