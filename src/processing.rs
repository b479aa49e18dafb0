use crate::error::{AssetError, Result};
use crate::validation::validate_input_path;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, RgbImage};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Computes the dimensions of an image scaled so its longer side fits
/// `max_dimension`, preserving the aspect ratio.
///
/// Landscape images (`width > height`) are scaled by width, portrait and
/// square images by height. The driving side is clamped with `min`, so images
/// already smaller than `max_dimension` keep their size. The other side is
/// rounded to the nearest pixel and never drops below 1.
///
/// # Example
/// ```
/// use img_assets::fit_to_max_dimension;
///
/// assert_eq!(fit_to_max_dimension(1600, 1200, 400), (400, 300));
/// assert_eq!(fit_to_max_dimension(1000, 1000, 400), (400, 400));
/// assert_eq!(fit_to_max_dimension(300, 200, 400), (300, 200));
/// ```
pub fn fit_to_max_dimension(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    if width > height {
        let new_width = width.min(max_dimension);
        (new_width, scale_side(new_width, height, width))
    } else {
        let new_height = height.min(max_dimension);
        (scale_side(new_height, width, height), new_height)
    }
}

/// Computes the largest size that fits inside `max_width` x `max_height`
/// without upscaling, preserving the aspect ratio.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return (width, height);
    }

    let scale_w = max_width as f64 / width as f64;
    let scale_h = max_height as f64 / height as f64;

    if scale_w <= scale_h {
        (max_width.max(1), scale_side(max_width, height, width))
    } else {
        (scale_side(max_height, width, height), max_height.max(1))
    }
}

// round(driving * other / original), kept in integer math
fn scale_side(driving: u32, other: u32, original: u32) -> u32 {
    let scaled = (driving as u64 * other as u64 * 2 + original as u64) / (original as u64 * 2);
    (scaled as u32).max(1)
}

/// Loads an image file and returns it along with its size in bytes.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    validate_input_path(input_path)?;

    let file_size = fs::metadata(input_path)?.len();
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;

    debug!(
        path = %input_path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );

    Ok((img, file_size))
}

/// Resize to exact dimensions with Lanczos3, skipping the work when the size
/// already matches.
pub fn resize_to(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    img.resize_exact(width, height, FilterType::Lanczos3)
}

/// Scale so the longer side fits `max_dimension`.
pub fn resize_keep_aspect_ratio(img: &DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = fit_to_max_dimension(width, height, max_dimension);
    debug!(width, height, new_width, new_height, "resizing");
    resize_to(img, new_width, new_height)
}

/// Shrink to fit a bounding box, never enlarging.
pub fn thumbnail(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = fit_within(width, height, max_width, max_height);
    resize_to(img, new_width, new_height)
}

/// Normalize any color type to 8-bit RGB.
///
/// Images with an alpha channel (RGBA, LA, and palette images, which decode
/// to one of those) are composited onto a white background.
pub fn flatten_to_rgb(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        image::Rgb([
            blend_over_white(r, a),
            blend_over_white(g, a),
            blend_over_white(b, a),
        ])
    })
}

fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

pub fn ensure_max_dimensions(img: &DynamicImage, limit: u32) -> Result<()> {
    let (width, height) = img.dimensions();
    if width > limit || height > limit {
        return Err(AssetError::DimensionsTooLarge(width, height, limit));
    }
    Ok(())
}
