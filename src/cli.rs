use crate::animation::BlinkVariant;
use crate::constants::{
    DEFAULT_BLINK_OUTPUT_PATH, DEFAULT_CLOSED_EYES_PATH, DEFAULT_IMAGES_DIR,
    DEFAULT_OPEN_EYES_PATH, DEFAULT_REDUCE_OUTPUT_DIR, DEFAULT_SERVE_DIR, DEFAULT_SERVE_PORT,
    DEFAULT_SOURCE_DIR,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-assets",
    about = "Build, resize and re-encode the static image assets of a website",
    long_about = "img-assets bundles the one-off image jobs of a static site: the blinking-eyes \
                  GIF, aspect-preserving resizes, progressive JPEG and JPEG XL re-encoding, \
                  JPEG quality reduction, an orchestrated optimization pass and a static file \
                  server. Every flag defaults to the value the site uses.",
    version,
    after_help = "EXAMPLES:\n  \
    img-assets blink\n  \
    img-assets resize ./originals public/images -m 400\n  \
    img-assets progressive \"./pages/*.png\" public/images/small -q 75 -s 400\n  \
    img-assets optimize\n  \
    img-assets serve -p 8000"
)]
pub struct Args {
    #[arg(long, global = true, help = "Only log errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Log debug details", conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Build the looping blinking-eyes GIF",
        long_about = "Assemble the open-eyes and closed-eyes stills into a timed, infinitely \
                      looping, interlaced GIF."
    )]
    Blink {
        #[arg(long, default_value = DEFAULT_OPEN_EYES_PATH, help = "Open-eyes image")]
        open: PathBuf,

        #[arg(long, default_value = DEFAULT_CLOSED_EYES_PATH, help = "Closed-eyes image")]
        closed: PathBuf,

        #[arg(short, long, default_value = DEFAULT_BLINK_OUTPUT_PATH, help = "Output GIF path")]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = BlinkVariant::ClickFeedbackFirst, help = "Frame sequence")]
        variant: BlinkVariant,

        #[arg(long, help = "Write frames without interlacing")]
        no_interlace: bool,
    },

    #[command(
        about = "Resize JPEGs so the longer side fits a maximum dimension",
        long_about = "Scale each JPEG so its longer side is at most --max-dimension pixels, \
                      preserving the aspect ratio, and save it as JPEG. Images are never enlarged."
    )]
    Resize {
        #[arg(help = "Input file, directory or glob")]
        input: String,

        #[arg(help = "Output directory")]
        output: PathBuf,

        #[arg(short = 'm', long, help = "Maximum width or height in pixels (default: 400)")]
        max_dimension: Option<u32>,

        #[arg(short, long, help = "JPEG quality 1-100 (default: 50)")]
        quality: Option<u8>,

        #[arg(short, long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Re-encode PNGs as progressive JPEG",
        long_about = "Flatten transparency onto white, shrink to fit a square box and save as \
                      progressive JPEG with optimized Huffman tables."
    )]
    Progressive {
        #[arg(help = "Input file, directory or glob")]
        input: String,

        #[arg(help = "Output directory")]
        output: PathBuf,

        #[arg(short, long, help = "JPEG quality 1-100 (default: 85)")]
        quality: Option<u8>,

        #[arg(short = 's', long, help = "Bounding box side in pixels (default: 800)")]
        max_size: Option<u32>,

        #[arg(short, long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Re-encode images as JPEG XL",
        long_about = "Flatten transparency onto white, shrink to fit a square box and save as \
                      JPEG XL in the container format. Needs a build with the `jxl` feature."
    )]
    Jxl {
        #[arg(help = "Input file, directory or glob")]
        input: String,

        #[arg(help = "Output directory")]
        output: PathBuf,

        #[arg(short, long, help = "Quality 1-100 (default: 85)")]
        quality: Option<u8>,

        #[arg(short = 's', long, help = "Bounding box side in pixels (default: 800)")]
        max_size: Option<u32>,

        #[arg(short, long, help = "Encoder effort 1-9 (default: 7)")]
        effort: Option<u8>,

        #[arg(short, long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Lower JPEG quality without resizing",
        long_about = "Re-encode each JPEG at the given quality, keeping its dimensions and \
                      file name."
    )]
    Reduce {
        #[arg(help = "Input file, directory or glob")]
        input: String,

        #[arg(default_value = DEFAULT_REDUCE_OUTPUT_DIR, help = "Output directory")]
        output: PathBuf,

        #[arg(short, long, help = "JPEG quality 1-100 (default: 10)")]
        quality: Option<u8>,

        #[arg(short, long, help = "Process subdirectories recursively")]
        recursive: bool,
    },

    #[command(
        about = "Run resize, progressive and jxl in sequence",
        long_about = "Run each optimization step as a separate process and report every step. \
                      When the JPEG XL encoder is missing, copy each JPEG into jxl/ as a \
                      placeholder instead."
    )]
    Optimize {
        #[arg(long, default_value = DEFAULT_SOURCE_DIR, help = "Directory with the original assets")]
        source: PathBuf,

        #[arg(long, default_value = DEFAULT_IMAGES_DIR, help = "The site's image directory")]
        images: PathBuf,
    },

    #[command(about = "Serve a directory over HTTP")]
    Serve {
        #[arg(default_value = DEFAULT_SERVE_DIR, help = "Directory to serve")]
        root: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_SERVE_PORT, help = "TCP port")]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_blink_defaults() {
        let args = Args::try_parse_from(["img-assets", "blink"]).unwrap();
        match args.command {
            Commands::Blink {
                open,
                closed,
                output,
                variant,
                no_interlace,
            } => {
                assert_eq!(open, PathBuf::from("public/images/image1.jpg"));
                assert_eq!(closed, PathBuf::from("public/images/image2.jpg"));
                assert_eq!(output, PathBuf::from("public/images/blink.gif"));
                assert_eq!(variant, BlinkVariant::ClickFeedbackFirst);
                assert!(!no_interlace);
            }
            _ => panic!("expected blink"),
        }
    }

    #[test]
    fn test_blink_natural_variant() {
        let args = Args::try_parse_from(["img-assets", "blink", "--variant", "natural"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Blink {
                variant: BlinkVariant::Natural,
                ..
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["img-assets", "serve", "--quiet"]).unwrap();
        assert!(args.quiet);
        assert!(matches!(args.command, Commands::Serve { port: 8000, .. }));
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Args::try_parse_from(["img-assets", "--quiet", "-v", "serve"]).is_err());
    }
}
