//! Check command: score a text against a style profile.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wenfeng_core::config::Config;
use wenfeng_core::consistency::{ConsistencyConfig, ConsistencyLevel, ConsistencyModel};
use wenfeng_core::profiler::StyleProfiler;
use wenfeng_core::tokenize::Backend;
use wenfeng_core::ConsistencyResult;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Text to check.
    pub file: Utf8PathBuf,

    /// Target style profile (full or partial JSON).
    #[arg(short, long, value_name = "PROFILE")]
    pub profile: Utf8PathBuf,

    /// Minimum acceptable consistency score (0-100).
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Skip text cleanup.
    #[arg(long)]
    pub raw: bool,

    /// Word segmentation backend (overrides config).
    #[arg(long, value_enum)]
    pub tokenizer: Option<Backend>,
}

/// Score a file against a profile and enforce the minimum score.
#[instrument(name = "cmd_check", skip_all, fields(file = %args.file, profile = %args.profile))]
pub fn cmd_check(
    args: CheckArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let backend = args.tokenizer.or(config.tokenizer).unwrap_or_default();
    let clean = config.clean_input && !args.raw;
    debug!(file = %args.file, profile = %args.profile, tokenizer = %backend, clean, "executing check command");

    let raw = super::read_input_file(&args.file, max_input)?;
    let text = super::prepare_sample(raw, clean, &config.preprocess);
    let target = super::load_target(&args.profile, max_input)?;

    let model = ConsistencyModel::new(
        StyleProfiler::with_backend(backend),
        ConsistencyConfig::default(),
    );
    let result = model
        .check(&text, &target)
        .with_context(|| format!("failed to check {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} {} {}",
            args.file.bold(),
            "vs".dimmed(),
            target.style_name.as_deref().unwrap_or(args.profile.as_str())
        );
        print_result(&result);
    }

    let min_score = args.min_score.or(config.min_consistency);
    if let Some(min) = min_score
        && result.overall < min
    {
        bail!(
            "{} consistency {:.1} is below minimum {:.1}. Revise toward the target style.",
            args.file,
            result.overall,
            min,
        );
    }

    Ok(())
}

fn print_result(result: &ConsistencyResult) {
    let overall = format!("{:.1}%", result.overall);
    let overall = match result.overall_level {
        ConsistencyLevel::High | ConsistencyLevel::Substantial => overall.green().to_string(),
        ConsistencyLevel::Partial => overall.yellow().to_string(),
        ConsistencyLevel::Low | ConsistencyLevel::VeryLow => overall.red().to_string(),
    };
    println!(
        "\n  {} {} ({})",
        "Consistency:".cyan(),
        overall,
        result.overall_level.as_str()
    );

    for (name, dimension) in result.dimensions.named() {
        println!(
            "    {} {:<11}{} ({})",
            dimension.marker(),
            name,
            dimension.percentage,
            dimension.level.as_str()
        );
    }

    if !result.summary.suggestions.is_empty() {
        println!("\n  {}", "Suggestions:".cyan());
        for suggestion in &result.summary.suggestions {
            println!("    - {suggestion}");
        }
    }
}
