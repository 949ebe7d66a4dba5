use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array2;

use crate::consts::{SER_COLOR_MONO, SER_HEADER_SIZE, SER_MAGIC};
use crate::error::{MaskCleanError, Result};
use crate::frame::{FrameMetadata, MaskFrame};
use crate::plane::Plane;

/// SER file header (178 bytes).
#[derive(Clone, Debug, PartialEq)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
    pub observer: String,
    pub instrument: String,
    pub telescope: String,
    pub date_time: u64,
    pub date_time_utc: u64,
}

impl SerHeader {
    /// Header for an 8-bit mono clip.
    pub fn mono8(width: u32, height: u32, frame_count: u32) -> Self {
        Self {
            color_id: SER_COLOR_MONO,
            little_endian: true,
            width,
            height,
            pixel_depth: 8,
            frame_count,
            observer: String::new(),
            instrument: String::new(),
            telescope: String::new(),
            date_time: 0,
            date_time_utc: 0,
        }
    }

    /// Bytes per frame; masks are always one byte per sample.
    pub fn frame_byte_size(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| {
                MaskCleanError::InvalidSer(format!(
                    "Frame size {}x{} overflows",
                    self.width, self.height
                ))
            })
    }

    /// Offset one past the last frame byte, where the timestamp trailer starts.
    pub fn data_end(&self) -> Result<usize> {
        self.frame_byte_size()?
            .checked_mul(self.frame_count as usize)
            .and_then(|n| n.checked_add(SER_HEADER_SIZE))
            .ok_or_else(|| {
                MaskCleanError::InvalidSer(format!(
                    "Clip size {}x{}x{} overflows",
                    self.width, self.height, self.frame_count
                ))
            })
    }
}

/// Clip-level metadata for display.
#[derive(Clone, Debug)]
pub struct ClipInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub has_timestamps: bool,
    pub observer: Option<String>,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
}

/// Memory-mapped reader for 8-bit mono SER clips.
pub struct SerReader {
    mmap: Mmap,
    pub header: SerHeader,
}

impl SerReader {
    /// Open a SER file and check that it holds 8-bit single-plane frames.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the map is read-only and the file is not modified while open.
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(MaskCleanError::InvalidSer(
                "File too small for SER header".into(),
            ));
        }
        if &mmap[0..SER_MAGIC.len()] != SER_MAGIC {
            return Err(MaskCleanError::InvalidSer(
                "Missing LUCAM-RECORDER magic".into(),
            ));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;
        if header.color_id != SER_COLOR_MONO {
            return Err(MaskCleanError::UnsupportedColorMode(format!(
                "SER color id {} (only mono masks are supported)",
                header.color_id
            )));
        }
        if header.pixel_depth != 8 {
            return Err(MaskCleanError::InvalidSer(format!(
                "{}-bit samples (masks must be 8-bit)",
                header.pixel_depth
            )));
        }
        let data_end = header.data_end()?;
        if mmap.len() < data_end {
            return Err(MaskCleanError::InvalidSer(format!(
                "File truncated: expected at least {} bytes, got {}",
                data_end,
                mmap.len()
            )));
        }

        Ok(Self { mmap, header })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Zero-copy view of one frame.
    pub fn frame_plane(&self, index: usize) -> Result<Plane<'_>> {
        let count = self.frame_count();
        if index >= count {
            return Err(MaskCleanError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let size = self.header.frame_byte_size()?;
        let samples = index
            .checked_mul(size)
            .and_then(|n| n.checked_add(SER_HEADER_SIZE))
            .and_then(|offset| self.mmap.get(offset..offset.checked_add(size)?))
            .ok_or_else(|| {
                MaskCleanError::InvalidSer(format!("Frame {index} lies outside the file"))
            })?;
        Plane::packed(
            samples,
            self.header.width as usize,
            self.header.height as usize,
        )
    }

    /// Copy one frame out of the clip, with its timestamp if present.
    pub fn read_frame(&self, index: usize) -> Result<MaskFrame> {
        let plane = self.frame_plane(index)?;
        let (w, h) = (plane.width(), plane.height());
        let data = Array2::from_shape_fn((h, w), |(row, col)| plane.get(col, row));
        Ok(MaskFrame::new(data).with_metadata(FrameMetadata {
            frame_index: index,
            timestamp_us: self.timestamp(index),
        }))
    }

    /// Per-frame timestamp from the optional trailer.
    pub fn timestamp(&self, index: usize) -> Option<u64> {
        let offset = self
            .header
            .data_end()
            .ok()?
            .checked_add(index.checked_mul(8)?)?;
        let bytes = self.mmap.get(offset..offset.checked_add(8)?)?;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    /// All trailer timestamps, or `None` if the trailer is missing or short.
    pub fn timestamps(&self) -> Option<Vec<u64>> {
        (0..self.frame_count()).map(|i| self.timestamp(i)).collect()
    }

    pub fn clip_info(&self, path: &Path) -> ClipInfo {
        ClipInfo {
            filename: path.to_path_buf(),
            total_frames: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
            has_timestamps: self.frame_count() > 0 && self.timestamps().is_some(),
            observer: non_empty(&self.header.observer),
            telescope: non_empty(&self.header.telescope),
            instrument: non_empty(&self.header.instrument),
        }
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = Cursor::new(&buf[SER_MAGIC.len()..]);

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()?;
    let height = cursor.read_i32::<LittleEndian>()?;
    let pixel_depth = cursor.read_i32::<LittleEndian>()?;
    let frame_count = cursor.read_i32::<LittleEndian>()?;

    if width <= 0 || height <= 0 {
        return Err(MaskCleanError::InvalidDimensions {
            width: width.max(0) as usize,
            height: height.max(0) as usize,
        });
    }
    if frame_count < 0 {
        return Err(MaskCleanError::InvalidSer(format!(
            "Negative frame count {frame_count}"
        )));
    }

    let observer = read_fixed_string(&buf[42..82]);
    let instrument = read_fixed_string(&buf[82..122]);
    let telescope = read_fixed_string(&buf[122..162]);

    let mut cursor = Cursor::new(&buf[162..]);
    let date_time = cursor.read_u64::<LittleEndian>()?;
    let date_time_utc = cursor.read_u64::<LittleEndian>()?;

    Ok(SerHeader {
        color_id,
        // Siril convention: anything but 1 means little-endian.
        little_endian: le_flag != 1,
        width: width as u32,
        height: height as u32,
        pixel_depth: pixel_depth.max(0) as u32,
        frame_count: frame_count as u32,
        observer,
        instrument,
        telescope,
        date_time,
        date_time_utc,
    })
}

fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
