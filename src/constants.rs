pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const MIN_EFFORT: u8 = 1;
pub const MAX_EFFORT: u8 = 9;

// Blink animation
pub const DEFAULT_OPEN_EYES_PATH: &str = "public/images/image1.jpg";
pub const DEFAULT_CLOSED_EYES_PATH: &str = "public/images/image2.jpg";
pub const DEFAULT_BLINK_OUTPUT_PATH: &str = "public/images/blink.gif";
/// NeuQuant sampling speed used when quantizing frames to a palette (1 best, 30 fastest).
pub const GIF_QUANTIZE_SPEED: i32 = 10;
/// GIF frame and screen sizes are stored as u16.
pub const MAX_GIF_DIMENSION: u32 = u16::MAX as u32;

// Resize
pub const DEFAULT_RESIZE_MAX_DIMENSION: u32 = 400;
pub const DEFAULT_RESIZE_QUALITY: u8 = 50;

// Progressive JPEG
pub const DEFAULT_PROGRESSIVE_QUALITY: u8 = 85;
pub const DEFAULT_PROGRESSIVE_MAX_SIZE: u32 = 800;
pub const SMALL_PROGRESSIVE_QUALITY: u8 = 75;
pub const SMALL_PROGRESSIVE_MAX_SIZE: u32 = 400;
pub const SMALL_OUTPUT_DIR: &str = "small";

// JPEG XL
pub const DEFAULT_JXL_QUALITY: u8 = 85;
pub const DEFAULT_JXL_MAX_SIZE: u32 = 800;
pub const DEFAULT_JXL_EFFORT: u8 = 7;
pub const JXL_OUTPUT_DIR: &str = "jxl";

// Quality reduction
pub const DEFAULT_REDUCE_QUALITY: u8 = 10;
pub const DEFAULT_REDUCE_OUTPUT_DIR: &str = "./reduced_quality_images";

// JPEG encoder limit: width and height are stored as u16.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

// Orchestrator
pub const DEFAULT_SOURCE_DIR: &str = ".";
pub const DEFAULT_IMAGES_DIR: &str = "public/images";

// Static file server
pub const DEFAULT_SERVE_DIR: &str = "dist-minimal";
pub const DEFAULT_SERVE_PORT: u16 = 8000;

pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
pub const PNG_EXTENSIONS: &[&str] = &["png"];
pub const JXL_SOURCE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
