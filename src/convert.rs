use crate::constants::{
    DEFAULT_JXL_EFFORT, DEFAULT_JXL_MAX_SIZE, DEFAULT_JXL_QUALITY, DEFAULT_PROGRESSIVE_MAX_SIZE,
    DEFAULT_PROGRESSIVE_QUALITY, DEFAULT_REDUCE_QUALITY, DEFAULT_RESIZE_MAX_DIMENSION,
    DEFAULT_RESIZE_QUALITY, JPEG_EXTENSIONS, JXL_SOURCE_EXTENSIONS, PNG_EXTENSIONS,
};
use crate::encode::{encode_jpeg, encode_jxl, JpegSettings, JxlSettings};
use crate::error::Result;
use crate::formats::OutputFormat;
use crate::processing::{
    flatten_to_rgb, load_image_with_metadata, resize_keep_aspect_ratio, thumbnail,
};
use crate::utils::write_atomically;
use crate::validation::{validate_effort, validate_max_dimension, validate_quality};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of converting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub original_size: u64,
    pub output_size: u64,
    pub original_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    pub max_dimension: u32,
    pub quality: u8,
}

impl ResizeOptions {
    pub fn new(max_dimension: Option<u32>, quality: Option<u8>) -> Result<Self> {
        Ok(Self {
            max_dimension: validate_max_dimension(
                max_dimension.unwrap_or(DEFAULT_RESIZE_MAX_DIMENSION),
            )?,
            quality: validate_quality(quality.unwrap_or(DEFAULT_RESIZE_QUALITY))?,
        })
    }
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_RESIZE_MAX_DIMENSION,
            quality: DEFAULT_RESIZE_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressiveOptions {
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
}

impl ProgressiveOptions {
    pub fn new(quality: Option<u8>, max_size: Option<u32>) -> Result<Self> {
        let max_size = validate_max_dimension(max_size.unwrap_or(DEFAULT_PROGRESSIVE_MAX_SIZE))?;
        Ok(Self {
            quality: validate_quality(quality.unwrap_or(DEFAULT_PROGRESSIVE_QUALITY))?,
            max_width: max_size,
            max_height: max_size,
        })
    }
}

impl Default for ProgressiveOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_PROGRESSIVE_QUALITY,
            max_width: DEFAULT_PROGRESSIVE_MAX_SIZE,
            max_height: DEFAULT_PROGRESSIVE_MAX_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JxlOptions {
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
    pub effort: u8,
    pub use_container: bool,
}

impl JxlOptions {
    pub fn new(quality: Option<u8>, max_size: Option<u32>, effort: Option<u8>) -> Result<Self> {
        let max_size = validate_max_dimension(max_size.unwrap_or(DEFAULT_JXL_MAX_SIZE))?;
        Ok(Self {
            quality: validate_quality(quality.unwrap_or(DEFAULT_JXL_QUALITY))?,
            max_width: max_size,
            max_height: max_size,
            effort: validate_effort(effort.unwrap_or(DEFAULT_JXL_EFFORT))?,
            use_container: true,
        })
    }
}

impl Default for JxlOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JXL_QUALITY,
            max_width: DEFAULT_JXL_MAX_SIZE,
            max_height: DEFAULT_JXL_MAX_SIZE,
            effort: DEFAULT_JXL_EFFORT,
            use_container: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceOptions {
    pub quality: u8,
}

impl ReduceOptions {
    pub fn new(quality: Option<u8>) -> Result<Self> {
        Ok(Self {
            quality: validate_quality(quality.unwrap_or(DEFAULT_REDUCE_QUALITY))?,
        })
    }
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_REDUCE_QUALITY,
        }
    }
}

/// Scale the longer side to `max_dimension` and save as JPEG.
pub fn resize_image_file(
    input_path: &Path,
    output_path: &Path,
    options: &ResizeOptions,
) -> Result<ConversionReport> {
    let (img, original_size) = load_image_with_metadata(input_path)?;
    let resized = resize_keep_aspect_ratio(&img, options.max_dimension);

    let bytes = encode_jpeg(
        &DynamicImage::ImageRgb8(resized.to_rgb8()),
        JpegSettings {
            quality: options.quality,
            progressive: false,
        },
    )?;
    let output_size = write_atomically(output_path, &bytes)?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        from = ?img.dimensions(),
        to = ?resized.dimensions(),
        "resized image"
    );

    Ok(ConversionReport {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        original_size,
        output_size,
        original_dimensions: img.dimensions(),
        output_dimensions: resized.dimensions(),
    })
}

/// Flatten to RGB, fit the bounding box and save as progressive JPEG.
pub fn convert_to_progressive_jpeg(
    input_path: &Path,
    output_path: &Path,
    options: &ProgressiveOptions,
) -> Result<ConversionReport> {
    let (img, original_size) = load_image_with_metadata(input_path)?;
    let rgb = DynamicImage::ImageRgb8(flatten_to_rgb(&img));
    let fitted = thumbnail(&rgb, options.max_width, options.max_height);

    let bytes = encode_jpeg(
        &fitted,
        JpegSettings {
            quality: options.quality,
            progressive: true,
        },
    )?;
    let output_size = write_atomically(output_path, &bytes)?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        "converted to progressive JPEG"
    );

    Ok(ConversionReport {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        original_size,
        output_size,
        original_dimensions: img.dimensions(),
        output_dimensions: fitted.dimensions(),
    })
}

/// Flatten to RGB, fit the bounding box and save as JPEG XL.
pub fn convert_to_jxl(
    input_path: &Path,
    output_path: &Path,
    options: &JxlOptions,
) -> Result<ConversionReport> {
    let (img, original_size) = load_image_with_metadata(input_path)?;
    let rgb = DynamicImage::ImageRgb8(flatten_to_rgb(&img));
    let fitted = thumbnail(&rgb, options.max_width, options.max_height);

    let bytes = encode_jxl(
        &fitted.to_rgb8(),
        JxlSettings {
            quality: options.quality,
            effort: options.effort,
            use_container: options.use_container,
        },
    )?;
    let output_size = write_atomically(output_path, &bytes)?;

    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        effort = options.effort,
        "converted to JPEG XL"
    );

    Ok(ConversionReport {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        original_size,
        output_size,
        original_dimensions: img.dimensions(),
        output_dimensions: fitted.dimensions(),
    })
}

/// Re-encode at a lower quality, keeping dimensions.
pub fn reduce_image_quality(
    input_path: &Path,
    output_path: &Path,
    options: &ReduceOptions,
) -> Result<ConversionReport> {
    let (img, original_size) = load_image_with_metadata(input_path)?;
    let img = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
        DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
            DynamicImage::ImageRgb8(flatten_to_rgb(&img)).into_luma8().into()
        }
        other => DynamicImage::ImageRgb8(flatten_to_rgb(&other)),
    };

    let bytes = encode_jpeg(
        &img,
        JpegSettings {
            quality: options.quality,
            progressive: false,
        },
    )?;
    let output_size = write_atomically(output_path, &bytes)?;

    info!(
        output = %output_path.display(),
        quality = options.quality,
        "reduced image quality"
    );

    Ok(ConversionReport {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        original_size,
        output_size,
        original_dimensions: img.dimensions(),
        output_dimensions: img.dimensions(),
    })
}

/// One of the single-file conversions with its parameters, so batches can
/// be driven without knowing which one runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Resize(ResizeOptions),
    Progressive(ProgressiveOptions),
    Jxl(JxlOptions),
    Reduce(ReduceOptions),
}

impl Conversion {
    pub fn name(&self) -> &'static str {
        match self {
            Conversion::Resize(_) => "resize",
            Conversion::Progressive(_) => "progressive JPEG",
            Conversion::Jxl(_) => "JPEG XL",
            Conversion::Reduce(_) => "quality reduction",
        }
    }

    /// Extensions picked up when a directory is given as batch input
    pub fn source_extensions(&self) -> &'static [&'static str] {
        match self {
            Conversion::Resize(_) | Conversion::Reduce(_) => JPEG_EXTENSIONS,
            Conversion::Progressive(_) => PNG_EXTENSIONS,
            Conversion::Jxl(_) => JXL_SOURCE_EXTENSIONS,
        }
    }

    /// `None` keeps the input file name
    pub fn output_format(&self) -> Option<OutputFormat> {
        match self {
            Conversion::Resize(_) | Conversion::Reduce(_) => None,
            Conversion::Progressive(_) => Some(OutputFormat::Jpeg),
            Conversion::Jxl(_) => Some(OutputFormat::Jxl),
        }
    }

    pub fn run(&self, input_path: &Path, output_path: &Path) -> Result<ConversionReport> {
        match self {
            Conversion::Resize(options) => resize_image_file(input_path, output_path, options),
            Conversion::Progressive(options) => {
                convert_to_progressive_jpeg(input_path, output_path, options)
            }
            Conversion::Jxl(options) => convert_to_jxl(input_path, output_path, options),
            Conversion::Reduce(options) => reduce_image_quality(input_path, output_path, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetError;
    use image::{ColorType, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;
    use tempfile::TempDir;

    fn write_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
        img.save_with_format(path, ImageFormat::Jpeg).unwrap();
    }

    #[test]
    fn test_options_defaults_match_constants() {
        assert_eq!(ResizeOptions::new(None, None).unwrap(), ResizeOptions::default());
        assert_eq!(
            ProgressiveOptions::new(None, None).unwrap(),
            ProgressiveOptions::default()
        );
        assert_eq!(JxlOptions::new(None, None, None).unwrap(), JxlOptions::default());
        assert_eq!(ReduceOptions::new(None).unwrap().quality, 10);
    }

    #[test]
    fn test_options_reject_invalid_values() {
        assert!(matches!(
            ResizeOptions::new(Some(0), None),
            Err(AssetError::InvalidDimension(0))
        ));
        assert!(matches!(
            ProgressiveOptions::new(Some(0), None),
            Err(AssetError::InvalidQuality(0))
        ));
        assert!(matches!(
            JxlOptions::new(None, None, Some(12)),
            Err(AssetError::InvalidEffort(12))
        ));
        assert!(matches!(
            ReduceOptions::new(Some(101)),
            Err(AssetError::InvalidQuality(101))
        ));
    }

    #[test]
    fn test_resize_image_file_landscape() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("wide.jpg");
        let output = temp_dir.path().join("out").join("wide.jpg");
        write_jpeg(&input, 1200, 800);

        let report = resize_image_file(&input, &output, &ResizeOptions::default()).unwrap();
        assert_eq!(report.original_dimensions, (1200, 800));
        assert_eq!(report.output_dimensions, (400, 267));

        let written = image::open(&output).unwrap();
        assert_eq!(written.dimensions(), (400, 267));
        assert_eq!(report.output_size, fs::metadata(&output).unwrap().len());
    }

    #[test]
    fn test_resize_image_file_corrupt_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.jpg");
        fs::write(&input, b"definitely not a jpeg").unwrap();

        let result = resize_image_file(&input, &temp_dir.path().join("o.jpg"), &ResizeOptions::default());
        assert!(result.is_err());
        assert!(!temp_dir.path().join("o.jpg").exists());
    }

    #[test]
    fn test_progressive_flattens_transparent_png() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("logo.png");
        let output = temp_dir.path().join("logo.jpg");
        RgbaImage::from_pixel(1000, 500, Rgba([0, 0, 0, 0]))
            .save_with_format(&input, ImageFormat::Png)
            .unwrap();

        let report =
            convert_to_progressive_jpeg(&input, &output, &ProgressiveOptions::default()).unwrap();
        assert_eq!(report.output_dimensions, (800, 400));

        let written = image::open(&output).unwrap();
        assert_eq!(written.color(), ColorType::Rgb8);
        let center = written.to_rgb8().get_pixel(400, 200).0;
        assert!(center.iter().all(|&c| c > 240), "expected white, got {:?}", center);
    }

    #[test]
    fn test_progressive_round_trip_keeps_mode_and_size() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.png");
        let first = temp_dir.path().join("first.jpg");
        let second = temp_dir.path().join("second.jpg");
        RgbImage::from_pixel(320, 240, Rgb([120, 60, 30]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();

        let options = ProgressiveOptions::default();
        convert_to_progressive_jpeg(&source, &first, &options).unwrap();
        let report = convert_to_progressive_jpeg(&first, &second, &options).unwrap();

        assert_eq!(report.original_dimensions, report.output_dimensions);
        let a = image::open(&first).unwrap();
        let b = image::open(&second).unwrap();
        assert_eq!(a.color(), b.color());
        assert_eq!(a.dimensions(), b.dimensions());
    }

    #[test]
    fn test_reduce_quality_twice_keeps_dimensions() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("photo.jpg");
        let once = temp_dir.path().join("once.jpg");
        let twice = temp_dir.path().join("twice.jpg");
        write_jpeg(&input, 300, 200);

        let options = ReduceOptions::new(Some(10)).unwrap();
        reduce_image_quality(&input, &once, &options).unwrap();
        let report = reduce_image_quality(&once, &twice, &options).unwrap();

        assert_eq!(report.output_dimensions, (300, 200));
        assert_eq!(image::open(&twice).unwrap().dimensions(), (300, 200));
    }

    #[test]
    fn test_reduce_quality_shrinks_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("photo.jpg");
        let output = temp_dir.path().join("small.jpg");
        write_jpeg(&input, 256, 256);

        let report = reduce_image_quality(&input, &output, &ReduceOptions::default()).unwrap();
        assert!(report.output_size < report.original_size);
    }

    #[test]
    fn test_reduce_quality_composites_gray_alpha_on_white() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("mask.png");
        let output = temp_dir.path().join("mask.jpg");
        image::GrayAlphaImage::from_pixel(32, 32, image::LumaA([0, 0]))
            .save_with_format(&input, ImageFormat::Png)
            .unwrap();

        reduce_image_quality(&input, &output, &ReduceOptions::new(Some(90)).unwrap()).unwrap();

        let written = image::open(&output).unwrap();
        assert_eq!(written.color(), ColorType::L8);
        let center = written.to_luma8().get_pixel(16, 16).0[0];
        assert!(center > 240, "expected white, got {}", center);
    }

    #[cfg(not(feature = "jxl"))]
    #[test]
    fn test_convert_to_jxl_without_encoder() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("photo.jpg");
        let output = temp_dir.path().join("photo.jxl");
        write_jpeg(&input, 16, 16);

        let result = convert_to_jxl(&input, &output, &JxlOptions::default());
        assert!(matches!(result, Err(AssetError::EncoderUnavailable(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_conversion_naming() {
        let progressive = Conversion::Progressive(ProgressiveOptions::default());
        assert_eq!(progressive.source_extensions(), &["png"]);
        assert_eq!(progressive.output_format(), Some(OutputFormat::Jpeg));

        let resize = Conversion::Resize(ResizeOptions::default());
        assert_eq!(resize.output_format(), None);
        assert_eq!(resize.source_extensions(), &["jpg", "jpeg"]);
    }
}
