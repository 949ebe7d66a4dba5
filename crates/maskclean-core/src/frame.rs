use ndarray::Array2;

use crate::error::Result;
use crate::plane::{Plane, PlaneMut};

/// A single 8-bit mask plane.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskFrame {
    /// Sample data, row-major, shape = (height, width)
    data: Array2<u8>,
    /// Optional per-frame metadata
    pub metadata: FrameMetadata,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameMetadata {
    pub frame_index: usize,
    pub timestamp_us: Option<u64>,
}

impl MaskFrame {
    pub fn new(data: Array2<u8>) -> Self {
        // Plane views need one contiguous row-major buffer.
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Self {
            data,
            metadata: FrameMetadata::default(),
        }
    }

    /// An all-zero frame of the given size.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::new(Array2::zeros((height, width)))
    }

    pub fn with_metadata(mut self, metadata: FrameMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sample data, shape = (height, width).
    pub fn data(&self) -> &Array2<u8> {
        &self.data
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn plane(&self) -> Result<Plane<'_>> {
        let (w, h) = (self.width(), self.height());
        Plane::packed(self.samples(), w, h)
    }

    pub fn plane_mut(&mut self) -> Result<PlaneMut<'_>> {
        let (w, h) = (self.width(), self.height());
        let samples = self
            .data
            .as_slice_mut()
            .expect("standard layout enforced in constructor");
        PlaneMut::packed(samples, w, h)
    }

    /// Row-major sample bytes.
    pub fn samples(&self) -> &[u8] {
        self.data
            .as_slice()
            .expect("standard layout enforced in constructor")
    }
}
