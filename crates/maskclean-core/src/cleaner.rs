use std::ops::AddAssign;

use tracing::trace;

use crate::bitmap::VisitationBitmap;
use crate::config::CleanParams;
use crate::error::{MaskCleanError, Result};
use crate::plane::{Plane, PlaneMut};

/// Pixel position within a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// What happens to a discovered region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionFate {
    /// Too small: nothing is written.
    Discard,
    /// Copied through unchanged.
    Copy,
    /// Copied through scaled by `numerator / denominator` (always <= 1).
    Fade { numerator: usize, denominator: usize },
}

/// Counters for one cleaning pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Number of flood fills started.
    pub regions: usize,
    pub kept: usize,
    pub faded: usize,
    pub discarded: usize,
    /// Destination samples assigned (including faded ones that became 0).
    pub pixels_written: usize,
}

impl AddAssign for CleanStats {
    fn add_assign(&mut self, other: Self) {
        self.regions += other.regions;
        self.kept += other.kept;
        self.faded += other.faded;
        self.discarded += other.discarded;
        self.pixels_written += other.pixels_written;
    }
}

/// Decide the fate of a region of `count` pixels.
///
/// `count == min_length + fade` takes the fade branch with a factor of exactly 1.
pub fn classify(count: usize, params: &CleanParams) -> RegionFate {
    if count < params.min_length() {
        return RegionFate::Discard;
    }
    let excess = count - params.min_length();
    if params.fade() == 0 || excess > params.fade() {
        RegionFate::Copy
    } else {
        RegionFate::Fade {
            numerator: excess,
            denominator: params.fade(),
        }
    }
}

/// Remove bright regions smaller than `min_length` from `src`, writing the
/// survivors into `dst`.
///
/// Regions are 8-connected sets of samples `>= threshold`. A region's seed
/// (the first pixel hit by the row-major scan) is not part of its reported
/// pixel list, so it is neither counted nor copied. `dst` must be zeroed by
/// the caller; discarded pixels are never written.
pub fn clean(src: &Plane<'_>, dst: &mut PlaneMut<'_>, params: &CleanParams) -> Result<CleanStats> {
    let (width, height) = (src.width(), src.height());
    if dst.width() != width || dst.height() != height {
        return Err(MaskCleanError::InvalidDimensions {
            width: dst.width(),
            height: dst.height(),
        });
    }

    let mut visited = VisitationBitmap::create(width, height)?;
    let mut stack: Vec<Coordinate> = Vec::new();
    let mut region: Vec<Coordinate> = Vec::new();
    let mut stats = CleanStats::default();

    for y in 0..height {
        for x in 0..width {
            if visited.is_visited(x, y) || !params.is_bright(src.get(x, y)) {
                continue;
            }

            discover_region(
                src,
                &mut visited,
                Coordinate::new(x, y),
                params.threshold(),
                &mut stack,
                &mut region,
            );
            stats.regions += 1;

            let fate = classify(region.len(), params);
            trace!(x, y, count = region.len(), ?fate, "Region classified");
            match fate {
                RegionFate::Discard => stats.discarded += 1,
                RegionFate::Copy => {
                    for p in &region {
                        dst.set(p.x, p.y, src.get(p.x, p.y));
                    }
                    stats.kept += 1;
                    stats.pixels_written += region.len();
                }
                RegionFate::Fade {
                    numerator,
                    denominator,
                } => {
                    for p in &region {
                        let value = src.get(p.x, p.y) as u64 * numerator as u64
                            / denominator as u64;
                        dst.set(p.x, p.y, value as u8);
                    }
                    stats.faded += 1;
                    stats.pixels_written += region.len();
                }
            }
        }
    }

    Ok(stats)
}

/// Flood-fill the bright region around `seed`, leaving its pixels in `region`.
///
/// Uses `stack` as an explicit LIFO frontier. Both buffers are cleared on
/// entry. Every pixel pushed to `region` is marked in `visited`; the seed is
/// marked but never pushed.
pub fn discover_region(
    src: &Plane<'_>,
    visited: &mut VisitationBitmap,
    seed: Coordinate,
    threshold: u8,
    stack: &mut Vec<Coordinate>,
    region: &mut Vec<Coordinate>,
) {
    stack.clear();
    region.clear();

    let (width, height) = (src.width(), src.height());
    visited.mark_visited(seed.x, seed.y);
    stack.push(seed);

    while let Some(current) = stack.pop() {
        // 3x3 neighbourhood, truncated at the plane edges.
        let x_min = current.x.saturating_sub(1);
        let x_max = (current.x + 1).min(width - 1);
        let y_min = current.y.saturating_sub(1);
        let y_max = (current.y + 1).min(height - 1);

        for ny in y_min..=y_max {
            for nx in x_min..=x_max {
                if visited.is_visited(nx, ny) || src.get(nx, ny) < threshold {
                    continue;
                }
                visited.mark_visited(nx, ny);
                let neighbour = Coordinate::new(nx, ny);
                stack.push(neighbour);
                region.push(neighbour);
            }
        }
    }
}
