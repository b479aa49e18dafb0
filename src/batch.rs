use crate::convert::{Conversion, ConversionReport};
use crate::error::{AssetError, Result};
use crate::formats::{generate_output_path, has_extension};
use crate::utils::create_progress_bar;
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Outcome of one batch item
#[derive(Debug)]
pub struct ItemOutcome {
    pub input_path: PathBuf,
    pub result: Result<ConversionReport>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<ItemOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &AssetError)> {
        self.items.iter().filter_map(|item| match &item.result {
            Err(e) => Some((item.input_path.as_path(), e)),
            Ok(_) => None,
        })
    }

    pub fn total_original_size(&self) -> u64 {
        self.reports().map(|r| r.original_size).sum()
    }

    pub fn total_output_size(&self) -> u64 {
        self.reports().map(|r| r.output_size).sum()
    }

    fn reports(&self) -> impl Iterator<Item = &ConversionReport> {
        self.items.iter().filter_map(|item| item.result.as_ref().ok())
    }
}

/// Run `conversion` over every matching file in `input`, one at a time.
///
/// `input` may be a single file, a directory or a glob pattern. A failing
/// item is logged and recorded in the report; it never stops the batch.
/// Only problems with the batch itself (unreadable input, output directory
/// that cannot be created) return an error.
pub fn run_batch(
    conversion: &Conversion,
    input: &str,
    output_dir: &Path,
    recursive: bool,
) -> Result<BatchReport> {
    info!(
        conversion = conversion.name(),
        input,
        output = %output_dir.display(),
        "starting batch"
    );

    let start_time = Instant::now();
    let files = collect_image_files(input, conversion.source_extensions(), recursive)?;

    if files.is_empty() {
        warn!(input, "no matching image files found");
        return Ok(BatchReport::default());
    }

    fs::create_dir_all(output_dir)
        .map_err(|_| AssetError::DirectoryCreationFailed(output_dir.to_path_buf()))?;

    let progress = create_progress_bar(files.len() as u64);
    let mut items = Vec::with_capacity(files.len());

    for input_path in files {
        progress.set_message(
            input_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        let result = generate_output_path(&input_path, output_dir, conversion.output_format())
            .and_then(|output_path| conversion.run(&input_path, &output_path));

        if let Err(e) = &result {
            error!(path = %input_path.display(), "failed to process: {}", e);
        }

        progress.inc(1);
        items.push(ItemOutcome { input_path, result });
    }

    progress.finish_and_clear();

    Ok(BatchReport {
        items,
        elapsed: start_time.elapsed(),
    })
}

/// Collect the files of `input` whose extension is in `extensions`, sorted.
///
/// A single file is returned as is when it exists, whatever its extension.
/// A path that is neither a file, a directory nor a glob pattern is an error.
pub fn collect_image_files(
    input: &str,
    extensions: &[&str],
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        image_files.push(input_path.to_path_buf());
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path)
        } else {
            WalkDir::new(input_path).max_depth(1)
        };

        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_file() && has_extension(path, extensions) {
                image_files.push(path.to_path_buf());
            }
        }
    } else if !is_glob_pattern(input) {
        return Err(AssetError::FileNotFound(input_path.to_path_buf()));
    } else {
        for entry in glob(input)?.flatten() {
            if entry.is_file() && has_extension(&entry, extensions) {
                image_files.push(entry);
            }
        }
    }

    image_files.sort();
    Ok(image_files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Print the batch summary in the CLI's style
pub fn print_batch_summary(report: &BatchReport) {
    let total_before = report.total_original_size();
    let total_after = report.total_output_size();
    let ratio = crate::utils::calculate_compression_ratio(total_before, total_after);

    println!("\n📊 Batch Summary:");
    println!("  📁 Files processed: {}", report.succeeded());
    println!("  📊 Total original size: {} bytes", total_before);
    println!("  📊 Total output size: {} bytes", total_after);
    println!("  🎯 Overall compression ratio: {:.1}%", ratio);
    println!("  ⏱️  Total time: {:?}", report.elapsed);

    if report.failed() > 0 {
        println!("  ⚠️  Failed files: {}", report.failed());
        for (path, e) in report.failures() {
            println!("    ❌ {}: {}", path.display(), e);
        }
    }
}
