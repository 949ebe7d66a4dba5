use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::cleaner::{clean, CleanStats};
use crate::config::{CleanParams, CleanerConfig};
use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::{MaskCleanError, Result};
use crate::frame::MaskFrame;
use crate::io::ser::{SerHeader, SerReader};
use crate::io::ser_writer::SerWriter;

/// Applies the region cleaner to whole frames.
///
/// Every frame gets its own zeroed destination and visitation bitmap, so
/// frames can be processed in any order or in parallel.
#[derive(Clone, Debug)]
pub struct MaskCleaner {
    params: CleanParams,
}

impl MaskCleaner {
    pub fn new(config: &CleanerConfig) -> Result<Self> {
        Ok(Self::with_params(config.validate()?))
    }

    pub fn with_params(params: CleanParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CleanParams {
        &self.params
    }

    /// Clean one frame into a new frame of the same size and metadata.
    pub fn process_frame(&self, src: &MaskFrame) -> Result<MaskFrame> {
        self.process_frame_with_stats(src).map(|(frame, _)| frame)
    }

    pub fn process_frame_with_stats(&self, src: &MaskFrame) -> Result<(MaskFrame, CleanStats)> {
        let mut dst =
            MaskFrame::zeros(src.width(), src.height()).with_metadata(src.metadata.clone());
        let stats = clean(&src.plane()?, &mut dst.plane_mut()?, &self.params)?;
        debug!(
            frame = src.metadata.frame_index,
            regions = stats.regions,
            kept = stats.kept,
            faded = stats.faded,
            discarded = stats.discarded,
            "Frame cleaned"
        );
        Ok((dst, stats))
    }

    /// Clean a batch of independent frames, preserving order.
    pub fn process_frames(&self, frames: &[MaskFrame]) -> Result<Vec<MaskFrame>> {
        if frames.is_empty() {
            return Err(MaskCleanError::EmptySequence);
        }

        let cleaned = if frames.len() >= PARALLEL_FRAME_THRESHOLD {
            frames
                .par_iter()
                .map(|frame| self.process_frame(frame))
                .collect::<Result<Vec<_>>>()?
        } else {
            frames
                .iter()
                .map(|frame| self.process_frame(frame))
                .collect::<Result<Vec<_>>>()?
        };

        info!(count = cleaned.len(), "Frames cleaned");
        Ok(cleaned)
    }

    /// Clean every frame of a SER clip into a new SER file at `output`.
    ///
    /// The header is carried over unchanged and the timestamp trailer is
    /// copied when the source has one. `on_frame_done` receives the number of
    /// frames finished so far.
    pub fn process_clip<F>(&self, reader: &SerReader, output: &Path, on_frame_done: F) -> Result<()>
    where
        F: Fn(usize),
    {
        let total = reader.frame_count();
        if total == 0 {
            return Err(MaskCleanError::EmptySequence);
        }

        let header = SerHeader {
            frame_count: total as u32,
            ..reader.header.clone()
        };
        let mut writer = SerWriter::create(output, &header)?;
        let mut totals = CleanStats::default();

        for index in 0..total {
            let frame = reader.read_frame(index)?;
            let (cleaned, stats) = self.process_frame_with_stats(&frame)?;
            writer.write_frame(&cleaned)?;
            totals += stats;
            on_frame_done(index + 1);
        }

        if let Some(timestamps) = reader.timestamps() {
            writer.write_timestamps(&timestamps)?;
        }
        writer.finalize()?;

        info!(
            frames = total,
            regions = totals.regions,
            kept = totals.kept,
            faded = totals.faded,
            discarded = totals.discarded,
            output = %output.display(),
            "Clip cleaned"
        );
        Ok(())
    }
}
