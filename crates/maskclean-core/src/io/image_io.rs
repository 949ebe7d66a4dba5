use std::path::Path;

use image::{GrayImage, ImageFormat};
use ndarray::Array2;

use crate::error::{MaskCleanError, Result};
use crate::frame::MaskFrame;

/// Load an image file as an 8-bit mask. Colour images are reduced to luma.
pub fn load_mask(path: &Path) -> Result<MaskFrame> {
    let img = image::open(path)?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_vec((h as usize, w as usize), gray.into_raw()).map_err(|_| {
        MaskCleanError::InvalidDimensions {
            width: w as usize,
            height: h as usize,
        }
    })?;
    Ok(MaskFrame::new(data))
}

/// Save a mask, choosing PNG or TIFF from the file extension (TIFF otherwise).
pub fn save_mask(frame: &MaskFrame, path: &Path) -> Result<()> {
    let img = GrayImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.samples().to_vec(),
    )
    .ok_or(MaskCleanError::InvalidDimensions {
        width: frame.width(),
        height: frame.height(),
    })?;

    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    let format = if is_png {
        ImageFormat::Png
    } else {
        ImageFormat::Tiff
    };
    img.save_with_format(path, format)?;
    Ok(())
}
