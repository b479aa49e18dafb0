//! The blinking-eyes animation.
//!
//! An [`Animation`] is an ordered list of frames, each showing one of two eye
//! states for a number of milliseconds. It is resolved against the two still
//! images only when encoding, so the timing can be inspected and tested
//! without touching any pixels.

use crate::constants::{GIF_QUANTIZE_SPEED, MAX_GIF_DIMENSION};
use crate::error::{AssetError, Result};
use crate::processing::{ensure_max_dimensions, load_image_with_metadata, resize_to};
use crate::utils::write_atomically;
use clap::ValueEnum;
use image::{DynamicImage, GenericImageView};
use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EyeState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub state: EyeState,
    pub duration_ms: u32,
}

impl Frame {
    pub const fn new(state: EyeState, duration_ms: u32) -> Self {
        Self { state, duration_ms }
    }
}

const fn open(duration_ms: u32) -> Frame {
    Frame::new(EyeState::Open, duration_ms)
}

const fn closed(duration_ms: u32) -> Frame {
    Frame::new(EyeState::Closed, duration_ms)
}

/// Starts with a double blink so a restarted loop gives immediate feedback.
const CLICK_FEEDBACK_FIRST: [Frame; 9] = [
    closed(70),
    open(100),
    closed(70),
    open(150),
    open(4000),
    closed(70),
    open(150),
    open(3000),
    open(2000),
];

/// Starts with open eyes and blinks after a pause.
const NATURAL: [Frame; 9] = [
    open(3000),
    closed(70),
    open(150),
    open(2000),
    closed(70),
    open(100),
    closed(70),
    open(150),
    open(4000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BlinkVariant {
    /// Double blink first, then pauses
    #[default]
    ClickFeedbackFirst,
    /// Pause first, then blinks
    Natural,
}

impl BlinkVariant {
    pub fn frames(&self) -> &'static [Frame] {
        match self {
            BlinkVariant::ClickFeedbackFirst => &CLICK_FEEDBACK_FIRST,
            BlinkVariant::Natural => &NATURAL,
        }
    }

    pub fn animation(&self) -> Animation {
        Animation {
            frames: self.frames().to_vec(),
            looping: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<Frame>,
    looping: bool,
}

impl Animation {
    pub fn new(frames: Vec<Frame>, looping: bool) -> Result<Self> {
        if frames.is_empty() {
            return Err(AssetError::EmptyAnimation);
        }
        Ok(Self { frames, looping })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_ms as u64).sum()
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.total_duration_ms())
    }

    /// Encode as GIF using `open_img` and `closed_img` for the two states.
    ///
    /// Both images must have the same dimensions. Each distinct state is
    /// quantized once and reused for every frame showing it.
    pub fn encode_gif(
        &self,
        open_img: &DynamicImage,
        closed_img: &DynamicImage,
        interlaced: bool,
    ) -> Result<Vec<u8>> {
        ensure_max_dimensions(open_img, MAX_GIF_DIMENSION)?;
        let (width, height) = open_img.dimensions();
        if closed_img.dimensions() != (width, height) {
            return Err(AssetError::UnsupportedFormat(format!(
                "frame size mismatch: {}x{} vs {}x{}",
                width,
                height,
                closed_img.width(),
                closed_img.height()
            )));
        }

        let open_frame = quantize(open_img, interlaced);
        let closed_frame = quantize(closed_img, interlaced);

        let mut buffer = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut buffer, width as u16, height as u16, &[])?;
            if self.looping {
                encoder.set_repeat(gif::Repeat::Infinite)?;
            }

            for frame in &self.frames {
                let mut gif_frame = match frame.state {
                    EyeState::Open => open_frame.clone(),
                    EyeState::Closed => closed_frame.clone(),
                };
                gif_frame.delay = delay_centiseconds(frame.duration_ms);
                encoder.write_frame(&gif_frame)?;
            }
        }

        Ok(buffer)
    }
}

fn quantize(img: &DynamicImage, interlaced: bool) -> gif::Frame<'static> {
    let mut rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut frame =
        gif::Frame::from_rgba_speed(width as u16, height as u16, &mut rgba, GIF_QUANTIZE_SPEED);
    if interlaced {
        // the encoder writes the index buffer as given, rows must already be in pass order
        frame.buffer = Cow::Owned(interlace_rows(&frame.buffer, width as usize));
        frame.interlaced = true;
    }
    frame
}

/// Reorder rows into the four GIF interlace passes: every 8th row from 0,
/// every 8th from 4, every 4th from 2, then every odd row.
pub fn interlace_rows(buffer: &[u8], width: usize) -> Vec<u8> {
    if width == 0 {
        return buffer.to_vec();
    }
    let height = buffer.len() / width;
    let passes = [(0, 8), (4, 8), (2, 4), (1, 2)];

    let mut out = Vec::with_capacity(buffer.len());
    for (start, step) in passes {
        for row in (start..height).step_by(step) {
            out.extend_from_slice(&buffer[row * width..(row + 1) * width]);
        }
    }
    out
}

/// GIF delays are in hundredths of a second; round to the nearest one.
pub fn delay_centiseconds(duration_ms: u32) -> u16 {
    (duration_ms.saturating_add(5) / 10).min(u16::MAX as u32) as u16
}

#[derive(Debug, Clone)]
pub struct BlinkOptions {
    pub open_path: PathBuf,
    pub closed_path: PathBuf,
    pub output_path: PathBuf,
    pub variant: BlinkVariant,
    pub interlaced: bool,
}

#[derive(Debug, Clone)]
pub struct BlinkReport {
    pub output_path: PathBuf,
    pub frame_count: usize,
    pub total_duration_ms: u64,
    pub file_size: u64,
}

/// Load both stills, build the animation for `options.variant` and write it.
pub fn create_blink_gif(options: &BlinkOptions) -> Result<BlinkReport> {
    let (open_img, _) = load_image_with_metadata(&options.open_path)?;
    let (mut closed_img, _) = load_image_with_metadata(&options.closed_path)?;

    if closed_img.dimensions() != open_img.dimensions() {
        debug!(
            from = ?closed_img.dimensions(),
            to = ?open_img.dimensions(),
            "resizing closed-eyes frame to match"
        );
        closed_img = resize_to(&closed_img, open_img.width(), open_img.height());
    }

    let animation = options.variant.animation();
    let bytes = animation.encode_gif(&open_img, &closed_img, options.interlaced)?;
    let file_size = write_atomically(&options.output_path, &bytes)?;

    info!(
        path = %options.output_path.display(),
        frames = animation.frame_count(),
        duration_ms = animation.total_duration_ms(),
        "wrote blink animation"
    );

    Ok(BlinkReport {
        output_path: options.output_path.clone(),
        frame_count: animation.frame_count(),
        total_duration_ms: animation.total_duration_ms(),
        file_size,
    })
}
