//! Command-line interface for batch evaluation against a reference image

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::analysis::scoring::{EvaluationConfig, ImageSet, ScoreReport};
use crate::io::configuration::{DEFAULT_PATCH_SIZE, SCORE_PRECISION};
use crate::io::error::{Result, invalid_source_data};
use crate::io::image::load_binary_image;
use crate::io::matrix::export_distance_matrix_csv;
use crate::io::progress::ProgressManager;
use crate::spatial::pyramid::TieBreak;

/// Tie handling choice exposed on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TieRule {
    /// Half-ones blocks become background
    Zero,
    /// Half-ones blocks become foreground
    One,
}

impl From<TieRule> for TieBreak {
    fn from(rule: TieRule) -> Self {
        match rule {
            TieRule::Zero => Self::Zero,
            TieRule::One => Self::One,
        }
    }
}

#[derive(Parser)]
#[command(name = "texscore")]
#[command(
    author,
    version,
    about = "Score binary texture images against a reference using multipoint histograms"
)]
/// Command-line arguments for the evaluation tool
pub struct Cli {
    /// Reference PNG every candidate is compared against
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Candidate PNG files or directories of them
    #[arg(value_name = "IMAGES", required = true)]
    pub images: Vec<PathBuf>,

    /// Patch side length for pattern extraction
    #[arg(short, long, default_value_t = DEFAULT_PATCH_SIZE)]
    pub patch_size: usize,

    /// Downsampling factors, one histogram level per factor
    #[arg(short, long, value_delimiter = ',', default_value = "1")]
    pub factors: Vec<usize>,

    /// Tie handling when a downsampling block is half ones
    #[arg(short, long, value_enum, default_value = "zero")]
    pub ties: TieRule,

    /// Write the distance matrix (reference last) to a CSV file
    #[arg(short, long)]
    pub matrix: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates loading, scoring, and reporting for a batch of images
pub struct BatchEvaluator {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl BatchEvaluator {
    /// Create a new evaluator from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load every image, compute scores, and print the report
    ///
    /// # Errors
    ///
    /// Returns an error if file collection, image loading, evaluation, or
    /// matrix export fails
    pub fn run(&mut self) -> Result<()> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Err(invalid_source_data(&"no candidate PNG images found"));
        }

        let reference = load_binary_image(&self.cli.reference)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut images = Vec::with_capacity(files.len());
        let mut labels = Vec::with_capacity(files.len());
        for file in &files {
            let label = display_name(file);
            if let Some(ref pm) = self.progress_manager {
                pm.start_image(&label);
            }
            images.push(load_binary_image(file)?);
            labels.push(label);
            if let Some(ref pm) = self.progress_manager {
                pm.complete_image();
            }
        }

        let config = EvaluationConfig {
            patch_size: self.cli.patch_size,
            resolution_factors: self.cli.factors.clone(),
            tie_break: self.cli.ties.into(),
        };

        let set = ImageSet::new(images, config)?;
        let report = set.evaluate(&reference)?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        self.print_report(&report, &labels);

        if let Some(matrix_path) = &self.cli.matrix {
            let mut matrix_labels = labels;
            matrix_labels.push("reference".to_string());
            export_distance_matrix_csv(&report.distances, &matrix_labels, matrix_path)?;
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for target in &self.cli.images {
            if target.is_file() {
                if target.extension().and_then(|s| s.to_str()) == Some("png") {
                    files.push(target.clone());
                } else {
                    return Err(invalid_source_data(&format!(
                        "'{}' is not a PNG image",
                        target.display()
                    )));
                }
            } else if target.is_dir() {
                let mut dir_files = Vec::new();
                for entry in std::fs::read_dir(target)? {
                    let path = entry?.path();
                    if path.extension().and_then(|s| s.to_str()) == Some("png") {
                        dir_files.push(path);
                    }
                }
                dir_files.sort();
                files.extend(dir_files);
            } else {
                return Err(invalid_source_data(&format!(
                    "'{}' is not a PNG file or directory",
                    target.display()
                )));
            }
        }

        Ok(files)
    }

    // Allow print for the user-facing score table
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn print_report(&self, report: &ScoreReport, labels: &[String]) {
        let width = labels
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("image".len());

        println!("inconsistency: {:.prec$}", report.inconsistency, prec = SCORE_PRECISION);
        println!("diversity:     {:.prec$}", report.diversity, prec = SCORE_PRECISION);
        println!();
        println!("{:<width$}  distance-to-reference", "image");

        let reference_column = report.distances.ncols().saturating_sub(1);
        for (index, label) in labels.iter().enumerate() {
            let distance = report
                .distances
                .get([index, reference_column])
                .copied()
                .unwrap_or(0.0);
            println!("{label:<width$}  {distance:.prec$}", prec = SCORE_PRECISION);
        }

        if !self.cli.quiet {
            for level in &report.skipped_levels {
                eprintln!(
                    "Skipped resolution factor {} ({}x{} is below the patch size)",
                    level.factor, level.dimensions.0, level.dimensions.1
                );
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
