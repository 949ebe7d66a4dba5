use crate::error::{MaskCleanError, Result};

/// One bit per pixel position, set once a pixel has been claimed by a region.
///
/// Position `y * width + x` lives in bit `pos % 8` of byte `pos / 8`. Bits are
/// only ever set; a fresh bitmap is needed for every pass over a plane.
#[derive(Clone, Debug)]
pub struct VisitationBitmap {
    bits: Vec<u8>,
    width: usize,
}

impl VisitationBitmap {
    /// Allocate a zeroed bitmap covering `width * height` positions.
    pub fn create(width: usize, height: usize) -> Result<Self> {
        let positions = width
            .checked_mul(height)
            .ok_or(MaskCleanError::Allocation { width, height })?;
        let byte_len = positions.div_ceil(8);

        let mut bits = Vec::new();
        bits.try_reserve_exact(byte_len)
            .map_err(|_| MaskCleanError::Allocation { width, height })?;
        bits.resize(byte_len, 0);

        Ok(Self { bits, width })
    }

    #[inline]
    pub fn is_visited(&self, x: usize, y: usize) -> bool {
        let (byte, mask) = self.locate(x, y);
        self.bits[byte] & mask != 0
    }

    #[inline]
    pub fn mark_visited(&mut self, x: usize, y: usize) {
        let (byte, mask) = self.locate(x, y);
        self.bits[byte] |= mask;
    }

    /// Size of the backing storage in bytes.
    pub fn byte_len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    fn locate(&self, x: usize, y: usize) -> (usize, u8) {
        debug_assert!(x < self.width, "x={x} outside width {}", self.width);
        let pos = y * self.width + x;
        (pos / 8, 1u8 << (pos % 8))
    }
}
