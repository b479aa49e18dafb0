use crate::constants::MAX_JPEG_DIMENSION;
use crate::error::{AssetError, Result};
use image::{DynamicImage, GenericImageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegSettings {
    pub quality: u8,
    pub progressive: bool,
}

/// Encode an image as JPEG into memory.
///
/// Grayscale input is written as a single-channel JPEG; anything else is
/// expected to be RGB already (see [`crate::processing::flatten_to_rgb`]) and is
/// converted if it is not. Huffman tables are always optimized.
pub fn encode_jpeg(image: &DynamicImage, settings: JpegSettings) -> Result<Vec<u8>> {
    use jpeg_encoder::{ColorType as C, Encoder};

    let (width, height) = image.dimensions();
    if width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        return Err(AssetError::DimensionsTooLarge(width, height, MAX_JPEG_DIMENSION));
    }

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, settings.quality);
    encoder.set_optimized_huffman_tables(true);
    encoder.set_progressive(settings.progressive);

    match image {
        DynamicImage::ImageLuma8(luma) => {
            encoder.encode(luma.as_raw(), width as u16, height as u16, C::Luma)?;
        }
        DynamicImage::ImageRgb8(rgb) => {
            encoder.encode(rgb.as_raw(), width as u16, height as u16, C::Rgb)?;
        }
        other => {
            let rgb = other.to_rgb8();
            encoder.encode(rgb.as_raw(), width as u16, height as u16, C::Rgb)?;
        }
    }

    Ok(buffer)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JxlSettings {
    pub quality: u8,
    pub effort: u8,
    pub use_container: bool,
}

/// Whether this build can write JPEG XL.
pub fn jxl_encoder_available() -> bool {
    cfg!(feature = "jxl")
}

/// Encode an RGB image as JPEG XL into memory.
#[cfg(feature = "jxl")]
pub fn encode_jxl(image: &image::RgbImage, settings: JxlSettings) -> Result<Vec<u8>> {
    use jpegxl_rs::encode::{encoder_builder, EncoderResult, EncoderSpeed};

    let speed = match settings.effort {
        1 => EncoderSpeed::Lightning,
        2 => EncoderSpeed::Thunder,
        3 => EncoderSpeed::Falcon,
        4 => EncoderSpeed::Cheetah,
        5 => EncoderSpeed::Hare,
        6 => EncoderSpeed::Wombat,
        7 => EncoderSpeed::Squirrel,
        8 => EncoderSpeed::Kitten,
        _ => EncoderSpeed::Tortoise,
    };

    let mut encoder = encoder_builder()
        .speed(speed)
        .use_container(settings.use_container)
        .build()
        .map_err(|e| AssetError::Jxl(e.to_string()))?;
    encoder.set_jpeg_quality(settings.quality as f32);

    let result: EncoderResult<u8> = encoder
        .encode::<u8, u8>(image.as_raw(), image.width(), image.height())
        .map_err(|e| AssetError::Jxl(e.to_string()))?;

    Ok(result.data)
}

#[cfg(not(feature = "jxl"))]
pub fn encode_jxl(_image: &image::RgbImage, _settings: JxlSettings) -> Result<Vec<u8>> {
    Err(AssetError::EncoderUnavailable("JPEG XL (build with --features jxl)"))
}
