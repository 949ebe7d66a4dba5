use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FADE, DEFAULT_MIN_LENGTH, DEFAULT_THRESHOLD};
use crate::error::{MaskCleanError, Result};

/// User-facing cleaner settings, as read from a config file or the command line.
///
/// Values are kept signed so that negative input can be reported rather than
/// silently wrapped. Call [`CleanerConfig::validate`] to obtain [`CleanParams`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Minimum region population (pixels) for a region to be kept.
    #[serde(default = "default_length")]
    pub length: i32,
    /// Brightness cutoff; samples `>= thresh` are part of a region.
    #[serde(default = "default_thresh")]
    pub thresh: i32,
    /// Width of the fade band above `length`. 0 disables fading.
    #[serde(default = "default_fade")]
    pub fade: i32,
}

fn default_length() -> i32 {
    DEFAULT_MIN_LENGTH
}
fn default_thresh() -> i32 {
    DEFAULT_THRESHOLD
}
fn default_fade() -> i32 {
    DEFAULT_FADE
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_MIN_LENGTH,
            thresh: DEFAULT_THRESHOLD,
            fade: DEFAULT_FADE,
        }
    }
}

impl CleanerConfig {
    /// Check the settings and convert them into parameters for the cleaner.
    pub fn validate(&self) -> Result<CleanParams> {
        if self.length <= 0 || self.thresh <= 0 {
            return Err(MaskCleanError::InvalidParameter(
                "length and thresh must be greater than zero".into(),
            ));
        }
        if self.fade < 0 {
            return Err(MaskCleanError::InvalidParameter(
                "fade cannot be negative".into(),
            ));
        }
        let threshold = u8::try_from(self.thresh).map_err(|_| {
            MaskCleanError::InvalidParameter(format!(
                "thresh must be at most 255, got {}",
                self.thresh
            ))
        })?;
        CleanParams::new(threshold, self.length as usize, self.fade as usize)
    }
}

/// Checked parameters for one cleaning pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanParams {
    threshold: u8,
    min_length: usize,
    fade: usize,
}

impl CleanParams {
    pub fn new(threshold: u8, min_length: usize, fade: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(MaskCleanError::InvalidParameter(
                "threshold must be greater than zero".into(),
            ));
        }
        if min_length == 0 {
            return Err(MaskCleanError::InvalidParameter(
                "minimum region length must be greater than zero".into(),
            ));
        }
        Ok(Self {
            threshold,
            min_length,
            fade,
        })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn fade(&self) -> usize {
        self.fade
    }

    #[inline]
    pub fn is_bright(&self, value: u8) -> bool {
        value >= self.threshold
    }
}

impl Default for CleanParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD as u8,
            min_length: DEFAULT_MIN_LENGTH as usize,
            fade: DEFAULT_FADE as usize,
        }
    }
}
