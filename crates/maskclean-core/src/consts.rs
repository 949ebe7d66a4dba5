/// Default brightness cutoff; samples at or above it are bright.
pub const DEFAULT_THRESHOLD: i32 = 235;

/// Default minimum region population for a region to survive.
pub const DEFAULT_MIN_LENGTH: i32 = 5;

/// Default fade band width. Zero disables fading.
pub const DEFAULT_FADE: i32 = 0;

/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Size of the fixed SER file header in bytes.
pub const SER_HEADER_SIZE: usize = 178;

/// Magic bytes at the start of every SER file.
pub const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";

/// SER colour ID for single-plane monochrome data.
pub const SER_COLOR_MONO: i32 = 0;
