use std::path::Path;

use console::Style;
use maskclean_core::io::ser::ClipInfo;
use maskclean_core::{CleanStats, CleanerConfig};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_clean_summary(input: &Path, output: &Path, config: &CleanerConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Mask Cleaner"));
    println!();
    println!("  {:<12}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!("  {:<12}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    println!("  {:<12}{}", s.label.apply_to("Threshold"), s.value.apply_to(config.thresh));
    println!("  {:<12}{}", s.label.apply_to("Min length"), s.value.apply_to(config.length));
    if config.fade > 0 {
        println!("  {:<12}{}", s.label.apply_to("Fade"), s.value.apply_to(config.fade));
    } else {
        println!("  {:<12}{}", s.label.apply_to("Fade"), s.disabled.apply_to("off"));
    }
    println!();
}

pub fn print_stats(stats: &CleanStats) {
    let s = Styles::new();
    println!(
        "  {} regions: {} kept, {} faded, {} removed",
        s.value.apply_to(stats.regions),
        s.value.apply_to(stats.kept),
        s.value.apply_to(stats.faded),
        s.value.apply_to(stats.discarded)
    );
}

pub fn print_clip_info(info: &ClipInfo, data_bytes: usize) {
    let s = Styles::new();
    let row = |label: &str, value: String| {
        println!("  {:<12}{}", s.label.apply_to(label), s.value.apply_to(value));
    };

    println!();
    println!("  {}", s.path.apply_to(info.filename.display()));
    println!();
    row("Frames", info.total_frames.to_string());
    row("Size", format!("{}x{}", info.width, info.height));
    row("Data", format!("{:.1} MiB", data_bytes as f64 / (1024.0 * 1024.0)));
    if info.has_timestamps {
        row("Timestamps", "present".into());
    } else {
        println!("  {:<12}{}", s.label.apply_to("Timestamps"), s.disabled.apply_to("none"));
    }
    for (label, value) in [
        ("Observer", &info.observer),
        ("Telescope", &info.telescope),
        ("Instrument", &info.instrument),
    ] {
        if let Some(v) = value {
            row(label, v.clone());
        }
    }
    println!();
}
