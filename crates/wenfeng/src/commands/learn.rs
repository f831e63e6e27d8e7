//! Learn command: build a style profile from a sample.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument, warn};

use wenfeng_core::confidence::ConfidenceModel;
use wenfeng_core::config::Config;
use wenfeng_core::learn::StyleLearner;
use wenfeng_core::profiler::StyleProfiler;
use wenfeng_core::tokenize::Backend;
use wenfeng_core::{StyleProfile, TextPreprocessor};

use super::confidence::print_confidence;

/// Samples scoring below this get a warning before learning.
const LOW_QUALITY_SCORE: u32 = 60;

/// Arguments for the `learn` subcommand.
#[derive(Args, Debug)]
pub struct LearnArgs {
    /// Sample text to learn from.
    pub file: Utf8PathBuf,

    /// Style name stored in the profile (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,

    /// Write the profile JSON here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Reference profile for the uniqueness score (repeatable; overrides config).
    #[arg(long = "reference", value_name = "PROFILE")]
    pub references: Vec<Utf8PathBuf>,

    /// Skip sample cleanup.
    #[arg(long)]
    pub raw: bool,

    /// Word segmentation backend (overrides config).
    #[arg(long, value_enum)]
    pub tokenizer: Option<Backend>,
}

/// Learn a style profile and write it out.
#[instrument(name = "cmd_learn", skip_all, fields(file = %args.file))]
pub fn cmd_learn(
    args: LearnArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let backend = args.tokenizer.or(config.tokenizer).unwrap_or_default();
    let clean = config.clean_input && !args.raw;
    let name = args
        .name
        .clone()
        .or_else(|| args.file.file_stem().map(str::to_string))
        .unwrap_or_else(|| "untitled".to_string());
    debug!(file = %args.file, %name, tokenizer = %backend, clean, "executing learn command");

    let raw = super::read_input_file(&args.file, max_input)?;
    let sample = super::prepare_sample(raw, clean, &config.preprocess);
    if clean {
        let quality = TextPreprocessor.assess_quality(&sample);
        if quality.score < LOW_QUALITY_SCORE {
            warn!(score = quality.score, suggestions = ?quality.suggestions, "low sample quality");
        }
    }

    let references = super::load_references(
        &args.references,
        config.references.as_deref(),
        max_input,
    )?;

    let spinner = spinner(global_json, &format!("Learning {name}"))?;
    let learner = StyleLearner::new(
        StyleProfiler::with_backend(backend),
        ConfidenceModel::default(),
    );
    let profile = learner
        .learn(&name, &sample, &references)
        .with_context(|| format!("failed to learn style from {}", args.file));
    spinner.finish_and_clear();
    let profile = profile?;

    match args.output {
        Some(ref path) => {
            profile
                .save(path)
                .with_context(|| format!("failed to write profile {path}"))?;
            if global_json {
                println!("{}", profile.to_json()?);
            } else {
                println!("{} {} -> {}", "Learned".green(), name.bold(), path.cyan());
                print_summary(&profile);
            }
        }
        None => {
            println!("{}", profile.to_json()?);
        }
    }

    Ok(())
}

fn spinner(hidden: bool, message: &str) -> anyhow::Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

fn print_summary(profile: &StyleProfile) {
    println!(
        "  {} {} characters, richness {:.3}, {} tokens",
        "Sample:".cyan(),
        profile.sample_word_count,
        profile.vocabulary.vocabulary_richness,
        profile.vocabulary.total_tokens,
    );
    println!(
        "  {} avg sentence {:.1}, std {:.1}",
        "Syntax:".cyan(),
        profile.syntax.avg_sentence_length,
        profile.syntax.std_deviation,
    );
    println!(
        "  {} {} ({:.2})",
        "Tone:".cyan(),
        profile.sentiment.emotional_tone.as_str(),
        profile.sentiment.sentiment_score,
    );
    if let Some(ref report) = profile.confidence {
        println!();
        print_confidence(report);
    }
}
