//! Confidence command: re-grade a saved profile.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wenfeng_core::config::Config;
use wenfeng_core::learn::StyleLearner;
use wenfeng_core::{ConfidenceLevel, ConfidenceReport, StyleProfile};

/// Arguments for the `confidence` subcommand.
#[derive(Args, Debug)]
pub struct ConfidenceArgs {
    /// Saved style profile.
    pub profile: Utf8PathBuf,

    /// Reference profile for the uniqueness score (repeatable; overrides config).
    #[arg(long = "reference", value_name = "PROFILE")]
    pub references: Vec<Utf8PathBuf>,

    /// Store the new grade back into the profile file.
    #[arg(long)]
    pub update: bool,
}

/// Recalculate a profile's confidence from its recorded statistics.
#[instrument(name = "cmd_confidence", skip_all, fields(profile = %args.profile))]
pub fn cmd_confidence(
    args: ConfidenceArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(profile = %args.profile, references = args.references.len(), "executing confidence command");

    let json = super::read_input_file(&args.profile, max_input)?;
    let profile: StyleProfile = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse profile {}", args.profile))?;
    let references = super::load_references(
        &args.references,
        config.references.as_deref(),
        max_input,
    )?;

    let regraded = StyleLearner::default().regrade(&profile, &references);
    if args.update {
        regraded
            .save(&args.profile)
            .with_context(|| format!("failed to write profile {}", args.profile))?;
    }

    let Some(report) = regraded.confidence else {
        anyhow::bail!("no confidence computed for {}", args.profile);
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", regraded.style_name.bold());
        print_confidence(&report);
    }
    Ok(())
}

/// Print a confidence report as an indented block.
pub(crate) fn print_confidence(report: &ConfidenceReport) {
    let overall = format!("{:.1}%", report.overall * 100.0);
    let overall = match report.level {
        ConfidenceLevel::Excellent | ConfidenceLevel::Good => overall.green().to_string(),
        ConfidenceLevel::Fair => overall.yellow().to_string(),
        ConfidenceLevel::Low => overall.red().to_string(),
    };
    println!(
        "  {} {} ({})",
        "Confidence:".cyan(),
        overall,
        report.level
    );

    let rows = [
        ("Sample size", report.breakdown.sample_size, &report.details.sample_size),
        ("Consistency", report.breakdown.consistency, &report.details.consistency),
        ("Uniqueness", report.breakdown.uniqueness, &report.details.uniqueness),
        ("Completeness", report.breakdown.completeness, &report.details.completeness),
    ];
    for (label, score, note) in rows {
        println!("    {:<13}{:.2}  {}", label.dimmed(), score, note.dimmed());
    }
}
