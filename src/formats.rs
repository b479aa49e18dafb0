//! Output format handling
//!
//! Maps the formats conversions write to file extensions and names output
//! files after their inputs.

use crate::error::{AssetError, Result};
use std::path::{Path, PathBuf};

/// Formats written by the conversions that rename their output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Baseline or progressive JPEG
    Jpeg,
    /// JPEG XL in the ISOBMFF container
    Jxl,
}

impl OutputFormat {
    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Jxl => "jxl",
        }
    }
}

/// Check whether `path` has one of `extensions` (case-insensitive)
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            extensions.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Name an output file after its input.
///
/// With `format` set, the input stem gets that format's extension
/// (`photo.png` -> `photo.jpg`). Without it the file name is kept as is.
pub fn generate_output_path(
    input_path: &Path,
    output_dir: &Path,
    format: Option<OutputFormat>,
) -> Result<PathBuf> {
    let Some(format) = format else {
        let file_name = input_path
            .file_name()
            .ok_or_else(|| AssetError::UnsupportedFormat("Invalid file name".to_string()))?;
        return Ok(output_dir.join(file_name));
    };

    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| AssetError::UnsupportedFormat("Invalid file name".to_string()))?;

    let output_filename = format!("{}.{}", file_stem.to_string_lossy(), format.extension());
    Ok(output_dir.join(output_filename))
}
