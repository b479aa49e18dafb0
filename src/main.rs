use anyhow::Context;
use clap::Parser;
use img_assets::batch::print_batch_summary;
use img_assets::cli::{Args, Commands};
use img_assets::logger::init_logging;
use img_assets::utils::{format_file_size, print_compression_result};
use img_assets::{
    create_blink_gif, optimize, run_batch, BlinkOptions, Conversion, JxlOptions, OptimizeConfig,
    OptimizeOutcome, ProgressiveOptions, ReduceOptions, ResizeOptions, ServeConfig,
};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.quiet, args.verbose);

    match args.command {
        Commands::Blink {
            open,
            closed,
            output,
            variant,
            no_interlace,
        } => {
            let report = create_blink_gif(&BlinkOptions {
                open_path: open,
                closed_path: closed,
                output_path: output,
                variant,
                interlaced: !no_interlace,
            })
            .context("failed to build blink animation")?;

            println!("✅ Blink GIF created: {}", report.output_path.display());
            println!("   Frames: {}", report.frame_count);
            println!(
                "   Total duration per loop: {}ms (~{:.1}s)",
                report.total_duration_ms,
                report.total_duration_ms as f64 / 1000.0
            );
            println!("   File size: {}", format_file_size(report.file_size));
            println!("   Interlaced: {}", if no_interlace { "No" } else { "Yes" });
        }
        Commands::Resize {
            input,
            output,
            max_dimension,
            quality,
            recursive,
        } => {
            let options = ResizeOptions::new(max_dimension, quality)?;
            convert(Conversion::Resize(options), &input, &output, recursive)?;
        }
        Commands::Progressive {
            input,
            output,
            quality,
            max_size,
            recursive,
        } => {
            let options = ProgressiveOptions::new(quality, max_size)?;
            convert(Conversion::Progressive(options), &input, &output, recursive)?;
        }
        Commands::Jxl {
            input,
            output,
            quality,
            max_size,
            effort,
            recursive,
        } => {
            let options = JxlOptions::new(quality, max_size, effort)?;
            convert(Conversion::Jxl(options), &input, &output, recursive)?;
        }
        Commands::Reduce {
            input,
            output,
            quality,
            recursive,
        } => {
            let options = ReduceOptions::new(quality)?;
            convert(Conversion::Reduce(options), &input, &output, recursive)?;
        }
        Commands::Optimize { source, images } => {
            run_optimize(source, images)?;
        }
        Commands::Serve { root, port } => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
            runtime.block_on(img_assets::serve(ServeConfig { root, port }))?;
        }
    }

    Ok(())
}

/// A single file gets a detailed report and fails the command on error;
/// anything else is a batch that reports failures and still succeeds.
fn convert(conversion: Conversion, input: &str, output: &Path, recursive: bool) -> anyhow::Result<()> {
    let input_path = Path::new(input);

    if input_path.is_file() {
        let output_path = img_assets::formats::generate_output_path(
            input_path,
            output,
            conversion.output_format(),
        )?;
        println!("🗜️  {}: {}", conversion.name(), input_path.display());
        let report = conversion
            .run(input_path, &output_path)
            .with_context(|| format!("failed to process {}", input_path.display()))?;
        println!("📁 Output: {}", report.output_path.display());
        println!(
            "📏 {}x{} -> {}x{}",
            report.original_dimensions.0,
            report.original_dimensions.1,
            report.output_dimensions.0,
            report.output_dimensions.1
        );
        print_compression_result(report.original_size, report.output_size);
        return Ok(());
    }

    println!("🚀 Starting {} batch...", conversion.name());
    let report = run_batch(&conversion, input, output, recursive)
        .with_context(|| format!("batch over {} failed", input))?;

    if report.items.is_empty() {
        println!("⚠️  No matching image files found in {}", input);
        return Ok(());
    }

    print_batch_summary(&report);
    Ok(())
}

fn run_optimize(source: PathBuf, images: PathBuf) -> anyhow::Result<()> {
    let program = std::env::current_exe().context("cannot locate own executable")?;
    let config = OptimizeConfig {
        source_dir: source,
        images_dir: images,
    };

    match optimize(&program, &config)? {
        OptimizeOutcome::Ran(outcomes) => {
            for outcome in &outcomes {
                if outcome.success {
                    println!("✅ Successfully ran {}", outcome.name);
                } else {
                    println!("❌ Error running {}: {}", outcome.name, outcome.stderr.trim());
                }
            }
        }
        OptimizeOutcome::Placeholders { missing, created } => {
            println!("⚠️  {} not available in this build", missing);
            for path in &created {
                println!("📋 Created placeholder: {}", path.display());
            }
            println!("Using existing JPEG images as JPEG XL placeholders.");
        }
    }

    Ok(())
}
