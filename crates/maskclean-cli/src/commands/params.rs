use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use maskclean_core::CleanerConfig;
use tracing::debug;

/// Cleaner settings shared by `clean` and `clip`.
#[derive(Args)]
pub struct CleanParamArgs {
    /// Cleaner config file (TOML); flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum region size in pixels [default: 5]
    #[arg(long, allow_hyphen_values = true)]
    pub length: Option<i32>,

    /// Brightness threshold, 1-255 [default: 235]
    #[arg(long, allow_hyphen_values = true)]
    pub thresh: Option<i32>,

    /// Fade band width in pixels, 0 disables fading [default: 0]
    #[arg(long, allow_hyphen_values = true)]
    pub fade: Option<i32>,
}

impl CleanParamArgs {
    /// Resolve the config file (or defaults) and apply command-line overrides.
    pub fn resolve(&self) -> Result<CleanerConfig> {
        let mut config = if let Some(ref path) = self.config {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid cleaner config")?
        } else {
            CleanerConfig::default()
        };

        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some(thresh) = self.thresh {
            config.thresh = thresh;
        }
        if let Some(fade) = self.fade {
            config.fade = fade;
        }
        debug!(?config, "Resolved cleaner config");
        Ok(config)
    }
}
