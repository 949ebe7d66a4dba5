pub mod clean;
pub mod clip;
pub mod config;
pub mod info;
pub mod params;
