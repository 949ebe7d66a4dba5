#![allow(dead_code)]

use maskclean_core::consts::SER_HEADER_SIZE;
use maskclean_core::frame::MaskFrame;
use maskclean_core::{clean, CleanParams, CleanStats};
use ndarray::Array2;

/// Clean a tightly packed plane and return the destination bytes.
pub fn clean_packed(
    src: &[u8],
    width: usize,
    height: usize,
    params: &CleanParams,
) -> (Vec<u8>, CleanStats) {
    use maskclean_core::plane::{Plane, PlaneMut};

    let mut dst = vec![0u8; src.len()];
    let src_plane = Plane::packed(src, width, height).expect("valid source plane");
    let mut dst_plane = PlaneMut::packed(&mut dst, width, height).expect("valid destination plane");
    let stats = clean(&src_plane, &mut dst_plane, params).expect("clean succeeds");
    (dst, stats)
}

pub fn params(threshold: u8, min_length: usize, fade: usize) -> CleanParams {
    CleanParams::new(threshold, min_length, fade).expect("valid params")
}

/// Build a frame from rows of samples.
pub fn frame_from_rows(rows: &[&[u8]]) -> MaskFrame {
    let h = rows.len();
    let w = rows.first().map_or(0, |r| r.len());
    let data = Array2::from_shape_fn((h, w), |(row, col)| rows[row][col]);
    MaskFrame::new(data)
}

/// Deterministic pseudo-random mask: roughly `density` percent of samples are bright.
pub fn noise_mask(width: usize, height: usize, density: u32, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..width * height)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let r = (state >> 33) as u32;
            if r % 100 < density {
                200 + (r % 56) as u8
            } else {
                (r % 200) as u8
            }
        })
        .collect()
}

/// Build a SER file header with configurable bit depth and color mode.
pub fn build_ser_header_full(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    buf.extend_from_slice(b"LUCAM-RECORDER");
    buf.extend_from_slice(&0i32.to_le_bytes()); // LuID
    buf.extend_from_slice(&color_id.to_le_bytes());
    buf.extend_from_slice(&0i32.to_le_bytes()); // LittleEndian
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    let mut observer = [0u8; 40];
    observer[..4].copy_from_slice(b"Test");
    buf.extend_from_slice(&observer);
    buf.extend_from_slice(&[0u8; 40]); // Instrument
    buf.extend_from_slice(&[0u8; 40]); // Telescope
    buf.extend_from_slice(&0u64.to_le_bytes()); // DateTime
    buf.extend_from_slice(&0u64.to_le_bytes()); // DateTimeUTC

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Build a complete mono 8-bit SER file, optionally with a timestamp trailer.
pub fn build_ser(width: u32, height: u32, frames: &[Vec<u8>], timestamps: Option<&[u64]>) -> Vec<u8> {
    let mut buf = build_ser_header_full(width, height, 8, frames.len(), 0);
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    if let Some(ts) = timestamps {
        for t in ts {
            buf.extend_from_slice(&t.to_le_bytes());
        }
    }
    buf
}

/// Write bytes to a temporary file that lives as long as the handle.
pub fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write data");
    f.flush().expect("flush");
    f
}
