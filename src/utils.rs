//! Helpers shared by the conversions and the CLI output.

use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::error::Result;
use crate::validation::prepare_output_path;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `bytes` to `path` through a temporary file in the same directory,
/// so a failed encode never leaves a truncated output behind.
///
/// # Returns
/// * Number of bytes written
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<u64> {
    let path = prepare_output_path(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(&path)?;

    Ok(bytes.len() as u64)
}

/// Create a batch progress bar with consistent styling
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(PROGRESS_BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Format file size in human-readable format
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 KB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Calculate compression ratio as a percentage
///
/// Positive means the output is smaller, negative means it grew.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

/// Print before/after sizes of a conversion
pub fn print_compression_result(original_size: u64, compressed_size: u64) {
    let ratio = calculate_compression_ratio(original_size, compressed_size);

    println!(
        "📊 Original size: {} ({})",
        original_size,
        format_file_size(original_size)
    );
    println!(
        "📈 Output size: {} ({})",
        compressed_size,
        format_file_size(compressed_size)
    );

    if ratio > 0.0 {
        println!("✅ Reduced file size by {:.1}%", ratio);
    } else {
        println!("⚠️  File size increased by {:.1}%", ratio.abs());
    }
}
