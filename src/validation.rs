use crate::constants::{MAX_EFFORT, MAX_QUALITY, MIN_EFFORT, MIN_QUALITY};
use crate::error::{AssetError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn validate_quality(quality: u8) -> Result<u8> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(AssetError::InvalidQuality(quality));
    }
    Ok(quality)
}

pub fn validate_effort(effort: u8) -> Result<u8> {
    if !(MIN_EFFORT..=MAX_EFFORT).contains(&effort) {
        return Err(AssetError::InvalidEffort(effort));
    }
    Ok(effort)
}

pub fn validate_max_dimension(max_dimension: u32) -> Result<u32> {
    if max_dimension == 0 {
        return Err(AssetError::InvalidDimension(max_dimension));
    }
    Ok(max_dimension)
}

/// Validate that an input path exists and is a regular file
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AssetError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(AssetError::UnsupportedFormat(format!(
            "{} is not a file",
            path.display()
        )));
    }

    Ok(())
}

/// Create the parent directory of an output path if needed
pub fn prepare_output_path(path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|_| AssetError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }

    if path.file_name().is_none() {
        return Err(AssetError::UnsupportedFormat(
            "Invalid output filename".to_string(),
        ));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_validate_quality_bounds() {
        assert_eq!(validate_quality(1).unwrap(), 1);
        assert_eq!(validate_quality(100).unwrap(), 100);
        assert!(matches!(validate_quality(0), Err(AssetError::InvalidQuality(0))));
        assert!(matches!(
            validate_quality(101),
            Err(AssetError::InvalidQuality(101))
        ));
    }

    #[test]
    fn test_validate_effort_bounds() {
        assert_eq!(validate_effort(7).unwrap(), 7);
        assert!(matches!(validate_effort(0), Err(AssetError::InvalidEffort(0))));
        assert!(matches!(validate_effort(10), Err(AssetError::InvalidEffort(10))));
    }

    #[test]
    fn test_validate_max_dimension() {
        assert_eq!(validate_max_dimension(400).unwrap(), 400);
        assert!(matches!(
            validate_max_dimension(0),
            Err(AssetError::InvalidDimension(0))
        ));
    }

    #[test]
    fn test_validate_input_path_not_found() {
        let path = Path::new("nonexistent.jpg");
        let result = validate_input_path(path);
        assert!(matches!(result, Err(AssetError::FileNotFound(_))));
    }

    #[test]
    fn test_validate_input_path_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_input_path(temp_dir.path());
        assert!(matches!(result, Err(AssetError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_input_path_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("test.jpg");
        let mut file = File::create(&test_file).unwrap();
        file.write_all(b"fake image data").unwrap();

        assert!(validate_input_path(&test_file).is_ok());
    }

    #[test]
    fn test_prepare_output_path_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("nested").join("deeper").join("out.jpg");

        let prepared = prepare_output_path(&output).unwrap();
        assert_eq!(prepared, output);
        assert!(temp_dir.path().join("nested").join("deeper").is_dir());
    }
}
