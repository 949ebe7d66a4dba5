use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use maskclean_core::consts::SER_HEADER_SIZE;
use maskclean_core::io::ser::SerReader;

use crate::summary::print_clip_info;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = SerReader::open(&args.file)?;
    // `open` has already checked that the frame data fits in the file.
    let data_bytes = reader.header.data_end()? - SER_HEADER_SIZE;
    print_clip_info(&reader.clip_info(&args.file), data_bytes);
    Ok(())
}
