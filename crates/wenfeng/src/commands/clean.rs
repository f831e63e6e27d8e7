//! Clean command: preprocess a raw sample and rate it.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use wenfeng_core::preprocess::{PreprocessReport, QualityReport};
use wenfeng_core::{PreprocessOptions, TextPreprocessor};

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Raw sample to clean.
    pub file: Utf8PathBuf,

    /// Write the cleaned text here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Drop chapter headings instead of reformatting them.
    #[arg(long)]
    pub drop_titles: bool,
}

#[derive(Serialize)]
struct CleanOutput {
    preprocess: PreprocessReport,
    quality: QualityReport,
}

/// Clean a sample, assess the result, and write it out.
#[instrument(name = "cmd_clean", skip_all, fields(file = %args.file))]
pub fn cmd_clean(
    args: CleanArgs,
    global_json: bool,
    config_options: &PreprocessOptions,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let mut options = *config_options;
    if args.drop_titles {
        options.keep_titles = false;
    }
    debug!(file = %args.file, ?options, "executing clean command");

    let raw = super::read_input_file(&args.file, max_input)?;
    let preprocess = TextPreprocessor.preprocess(&raw, &options);
    let quality = TextPreprocessor.assess_quality(&preprocess.text);

    if let Some(ref path) = args.output {
        std::fs::write(path.as_std_path(), &preprocess.text)
            .with_context(|| format!("failed to write {path}"))?;
    }

    if global_json {
        let output = CleanOutput {
            preprocess,
            quality,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match args.output {
        Some(ref path) => {
            println!("{} {} -> {}", "Cleaned".green(), args.file.bold(), path.cyan());
            for line in summary_lines(&preprocess, &quality) {
                println!("{line}");
            }
        }
        None => {
            print!("{}", preprocess.text);
            for line in summary_lines(&preprocess, &quality) {
                eprintln!("{line}");
            }
        }
    }
    Ok(())
}

fn summary_lines(preprocess: &PreprocessReport, quality: &QualityReport) -> Vec<String> {
    let mut lines = vec![format!(
        "  {} {} -> {} characters ({:.1}% removed)",
        "Length:".cyan(),
        preprocess.original_length,
        preprocess.processed_length,
        preprocess.reduction_rate,
    )];
    lines.extend(preprocess.steps.iter().map(|step| format!("    - {step}")));
    lines.push(format!(
        "  {} {}/100 ({})",
        "Quality:".cyan(),
        quality.score,
        quality.level.as_str()
    ));
    lines.extend(
        quality
            .suggestions
            .iter()
            .map(|suggestion| format!("    - {}", suggestion.dimmed())),
    );
    lines
}
