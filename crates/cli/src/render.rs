//! Terminal output for the form and its results.

use artifacts::{ArtifactLoadError, ModelInfo};
use colored::Colorize;
use pipeline::{GenreOptions, InputError, PredictionError, PredictionReport, FEATURE_NAMES};
use std::io::{self, Write};

pub fn title<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "📚 Amazon Bestseller Predictor".bold().blue())?;
    writeln!(out, "Predict whether a book will become an Amazon bestseller")?;
    writeln!(out)
}

pub fn load_failure<W: Write>(out: &mut W, error: &ArtifactLoadError) -> io::Result<()> {
    writeln!(
        out,
        "{} Failed to load models. Please ensure all artifact files are present.",
        "✗".red()
    )?;
    writeln!(out, "{} {}", "ℹ".yellow(), error)
}

pub fn input_error<W: Write>(out: &mut W, error: &InputError) -> io::Result<()> {
    writeln!(out, "{} {}", "✗".red(), error)
}

/// Verdict, probabilities, or the failure with its hint.
pub fn prediction<W: Write>(
    out: &mut W,
    result: &Result<PredictionReport, PredictionError>,
) -> io::Result<()> {
    match result {
        Ok(report) => {
            writeln!(out, "{}", "Prediction Complete!".bold().green())?;
            if report.verdict.is_bestseller() {
                writeln!(out, "{} {}", "✓".green(), report.verdict_message().bold())?;
            } else {
                writeln!(out, "{} {}", "✗".red(), report.verdict_message().bold())?;
            }

            if let Some(p) = &report.probabilities {
                writeln!(out, "  Bestseller Probability:     {}", p.bestseller_percent().cyan())?;
                writeln!(out, "  Not Bestseller Probability: {}", p.not_bestseller_percent().cyan())?;
            }
        }
        Err(e) => {
            writeln!(out, "{} {}", "✗".red(), e)?;
            writeln!(out, "{} {}", "ℹ".yellow(), e.hint())?;
        }
    }
    writeln!(out)
}

/// The model information panel, with the feature layout the model expects.
pub fn model_info<W: Write>(out: &mut W, info: &ModelInfo, options: &GenreOptions) -> io::Result<()> {
    writeln!(out, "{}", "Model Information".bold().blue())?;
    writeln!(out, "{}Model Type: {}", "• ".green(), info.model_type)?;
    writeln!(
        out,
        "{}Main Genre Encoder: {} ({} genres)",
        "• ".green(),
        info.main_encoder_type,
        options.main.len()
    )?;
    writeln!(
        out,
        "{}Sub Genre Encoder: {} ({} genres)",
        "• ".green(),
        info.sub_encoder_type,
        options.sub.len()
    )?;
    writeln!(out, "{}Feature order: {}", "• ".cyan(), FEATURE_NAMES.join(", "))?;
    writeln!(out)
}
