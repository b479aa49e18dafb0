pub mod animation;
pub mod batch;
pub mod cli;
pub mod constants;
pub mod convert;
pub mod encode;
pub mod error;
pub mod formats;
pub mod logger;
pub mod orchestrator;
pub mod processing;
pub mod server;
pub mod utils;
pub mod validation;

pub use animation::{create_blink_gif, Animation, BlinkOptions, BlinkReport, BlinkVariant, EyeState, Frame};
pub use batch::{collect_image_files, run_batch, BatchReport, ItemOutcome};
pub use convert::{
    convert_to_jxl, convert_to_progressive_jpeg, reduce_image_quality, resize_image_file,
    Conversion, ConversionReport, JxlOptions, ProgressiveOptions, ReduceOptions, ResizeOptions,
};
pub use error::{AssetError, Result};
pub use orchestrator::{detect_capabilities, optimize, Capability, OptimizeConfig, OptimizeOutcome};
pub use processing::{fit_to_max_dimension, fit_within, load_image_with_metadata};
pub use server::{serve, ServeConfig};
