pub mod bitmap;
pub mod cleaner;
pub mod config;
pub mod consts;
pub mod error;
pub mod filter;
pub mod frame;
pub mod io;
pub mod plane;

pub use cleaner::{clean, CleanStats};
pub use config::{CleanParams, CleanerConfig};
pub use error::{MaskCleanError, Result};
pub use filter::MaskCleaner;
