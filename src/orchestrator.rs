//! Runs the re-encoders in a fixed order, or falls back to placeholder copies
//! when the JPEG XL encoder is not part of this build.

use crate::constants::{
    DEFAULT_JXL_EFFORT, DEFAULT_JXL_MAX_SIZE, DEFAULT_JXL_QUALITY, DEFAULT_PROGRESSIVE_MAX_SIZE,
    DEFAULT_PROGRESSIVE_QUALITY, DEFAULT_RESIZE_MAX_DIMENSION, JPEG_EXTENSIONS, JXL_OUTPUT_DIR,
    SMALL_OUTPUT_DIR, SMALL_PROGRESSIVE_MAX_SIZE, SMALL_PROGRESSIVE_QUALITY,
};
use crate::encode::jxl_encoder_available;
use crate::error::{AssetError, Result};
use crate::formats::{generate_output_path, has_extension, OutputFormat};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Available,
    Unavailable { missing: &'static str },
}

/// Check for the optional encoders the full pipeline needs.
pub fn detect_capabilities() -> Capability {
    if jxl_encoder_available() {
        Capability::Available
    } else {
        Capability::Unavailable {
            missing: "JPEG XL encoder",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizeConfig {
    /// Where the original assets live (the `resize` and `progressive` input)
    pub source_dir: PathBuf,
    /// The site's image directory, output of the first steps and input of `jxl`
    pub images_dir: PathBuf,
}

impl OptimizeConfig {
    pub fn jxl_dir(&self) -> PathBuf {
        self.images_dir.join(JXL_OUTPUT_DIR)
    }
}

/// A subcommand invocation run as its own process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

#[derive(Debug)]
pub struct StepOutcome {
    pub name: String,
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stderr: String,
}

#[derive(Debug)]
pub enum OptimizeOutcome {
    Ran(Vec<StepOutcome>),
    Placeholders {
        missing: &'static str,
        created: Vec<PathBuf>,
    },
}

fn args<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    items.into_iter().map(Into::into).collect()
}

/// The fixed step sequence, each re-invoking `program` with a subcommand.
pub fn plan_steps(program: &Path, config: &OptimizeConfig) -> Vec<Step> {
    let source = config.source_dir.as_os_str().to_owned();
    let images = config.images_dir.as_os_str().to_owned();
    let small = config.images_dir.join(SMALL_OUTPUT_DIR).into_os_string();
    let jxl = config.jxl_dir().into_os_string();

    vec![
        Step {
            name: "resize".to_string(),
            program: program.to_path_buf(),
            args: args([
                OsString::from("resize"),
                source.clone(),
                images.clone(),
                "--max-dimension".into(),
                DEFAULT_RESIZE_MAX_DIMENSION.to_string().into(),
            ]),
        },
        Step {
            name: "progressive".to_string(),
            program: program.to_path_buf(),
            args: args([
                OsString::from("progressive"),
                source.clone(),
                images.clone(),
                "--quality".into(),
                DEFAULT_PROGRESSIVE_QUALITY.to_string().into(),
                "--max-size".into(),
                DEFAULT_PROGRESSIVE_MAX_SIZE.to_string().into(),
            ]),
        },
        Step {
            name: "progressive (small)".to_string(),
            program: program.to_path_buf(),
            args: args([
                OsString::from("progressive"),
                source,
                small,
                "--quality".into(),
                SMALL_PROGRESSIVE_QUALITY.to_string().into(),
                "--max-size".into(),
                SMALL_PROGRESSIVE_MAX_SIZE.to_string().into(),
            ]),
        },
        Step {
            name: "jxl".to_string(),
            program: program.to_path_buf(),
            args: args([
                OsString::from("jxl"),
                images,
                jxl,
                "--quality".into(),
                DEFAULT_JXL_QUALITY.to_string().into(),
                "--max-size".into(),
                DEFAULT_JXL_MAX_SIZE.to_string().into(),
                "--effort".into(),
                DEFAULT_JXL_EFFORT.to_string().into(),
            ]),
        },
    ]
}

/// Run each step to completion before starting the next. A failing or
/// unspawnable step is recorded and the remaining steps still run.
pub fn run_steps(steps: &[Step]) -> Vec<StepOutcome> {
    steps
        .iter()
        .map(|step| {
            info!(step = %step.name, "running");
            let outcome = match Command::new(&step.program).args(&step.args).output() {
                Ok(output) => StepOutcome {
                    name: step.name.clone(),
                    success: output.status.success(),
                    exit_code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                },
                Err(e) => StepOutcome {
                    name: step.name.clone(),
                    success: false,
                    exit_code: None,
                    stderr: e.to_string(),
                },
            };

            if outcome.success {
                info!(step = %outcome.name, "step succeeded");
            } else {
                error!(
                    step = %outcome.name,
                    code = ?outcome.exit_code,
                    "step failed: {}",
                    outcome.stderr.trim()
                );
            }
            outcome
        })
        .collect()
}

/// Copy every JPEG in `images_dir` to `jxl_dir/<stem>.jxl` unchanged.
pub fn create_placeholders(images_dir: &Path, jxl_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(jxl_dir)
        .map_err(|_| AssetError::DirectoryCreationFailed(jxl_dir.to_path_buf()))?;

    let mut sources = Vec::new();
    for entry in fs::read_dir(images_dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, JPEG_EXTENSIONS) {
            sources.push(path);
        }
    }
    sources.sort();

    let mut created = Vec::with_capacity(sources.len());
    for source in sources {
        let target = generate_output_path(&source, jxl_dir, Some(OutputFormat::Jxl))?;
        fs::copy(&source, &target)?;
        info!(placeholder = %target.display(), "created placeholder");
        created.push(target);
    }

    Ok(created)
}

/// Detect capabilities, then run the pipeline or the fallback.
///
/// `program` is the executable the steps re-invoke, normally
/// `std::env::current_exe()`.
pub fn optimize(program: &Path, config: &OptimizeConfig) -> Result<OptimizeOutcome> {
    match detect_capabilities() {
        Capability::Available => {
            info!("all encoders available, running optimization steps");
            let steps = plan_steps(program, config);
            Ok(OptimizeOutcome::Ran(run_steps(&steps)))
        }
        Capability::Unavailable { missing } => {
            warn!(missing, "encoder not available, creating placeholder copies");
            let created = create_placeholders(&config.images_dir, &config.jxl_dir())?;
            Ok(OptimizeOutcome::Placeholders { missing, created })
        }
    }
}
