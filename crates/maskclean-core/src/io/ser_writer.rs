use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::consts::{SER_HEADER_SIZE, SER_MAGIC};
use crate::error::{MaskCleanError, Result};
use crate::frame::MaskFrame;
use crate::io::ser::SerHeader;

/// Streams 8-bit mono frames into a new SER file.
pub struct SerWriter {
    writer: BufWriter<File>,
    header: SerHeader,
    frames_written: u32,
}

impl SerWriter {
    /// Create the file and write the header. `header.frame_count` must match
    /// the number of frames written before [`SerWriter::finalize`].
    pub fn create(path: &Path, header: &SerHeader) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_header(&mut writer, header)?;
        Ok(Self {
            writer,
            header: header.clone(),
            frames_written: 0,
        })
    }

    pub fn write_frame(&mut self, frame: &MaskFrame) -> Result<()> {
        if frame.width() != self.header.width as usize
            || frame.height() != self.header.height as usize
        {
            return Err(MaskCleanError::InvalidDimensions {
                width: frame.width(),
                height: frame.height(),
            });
        }
        self.writer.write_all(frame.samples())?;
        self.frames_written += 1;
        Ok(())
    }

    /// Write the timestamp trailer (one little-endian u64 per frame).
    pub fn write_timestamps(&mut self, timestamps: &[u64]) -> Result<()> {
        for &ts in timestamps {
            self.writer.write_all(&ts.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Flush the file, checking the frame count promised in the header.
    pub fn finalize(mut self) -> Result<()> {
        if self.frames_written != self.header.frame_count {
            return Err(MaskCleanError::InvalidSer(format!(
                "Header declares {} frames but {} were written",
                self.header.frame_count, self.frames_written
            )));
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn write_header(w: &mut impl Write, header: &SerHeader) -> Result<()> {
    // Siril writes 0 for little-endian samples.
    let endian_flag = i32::from(!header.little_endian);
    let fields = [
        0,
        header.color_id,
        endian_flag,
        header.width as i32,
        header.height as i32,
        header.pixel_depth as i32,
        header.frame_count as i32,
    ];

    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);
    buf.extend_from_slice(SER_MAGIC);
    buf.extend(fields.iter().flat_map(|v| v.to_le_bytes()));
    for text in [&header.observer, &header.instrument, &header.telescope] {
        push_fixed_string(&mut buf, text, 40);
    }
    buf.extend_from_slice(&header.date_time.to_le_bytes());
    buf.extend_from_slice(&header.date_time_utc.to_le_bytes());

    debug_assert_eq!(buf.len(), SER_HEADER_SIZE);
    w.write_all(&buf)?;
    Ok(())
}

fn push_fixed_string(buf: &mut Vec<u8>, s: &str, len: usize) {
    let bytes = &s.as_bytes()[..s.len().min(len)];
    buf.extend_from_slice(bytes);
    buf.resize(buf.len() + len - bytes.len(), 0);
}
