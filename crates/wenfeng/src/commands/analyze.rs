//! Analyze command: vocabulary, syntax and sentiment of one text.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wenfeng_core::profiler::{StyleProfiler, generate_report};
use wenfeng_core::tokenize::Backend;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Word segmentation backend (overrides config).
    #[arg(long, value_enum)]
    pub tokenizer: Option<Backend>,
}

/// Analyze a file and print the style report.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config_tokenizer: Option<Backend>,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let backend = args.tokenizer.or(config_tokenizer).unwrap_or_default();
    debug!(file = %args.file, tokenizer = %backend, "executing analyze command");

    let content = super::read_input_file(&args.file, max_input)?;
    let analysis = StyleProfiler::with_backend(backend)
        .analyze(&content)
        .with_context(|| format!("failed to analyze {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}", args.file.bold());
    println!();
    print!("{}", generate_report(&analysis));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_sample(tmp: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(tmp.path().join("sample.txt")).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn analyze_text_and_json_succeed() {
        let tmp = TempDir::new().unwrap();
        let file = write_sample(&tmp, "今天天气很好。我们去公园散步吧！");

        let args = AnalyzeArgs {
            file: file.clone(),
            tokenizer: Some(Backend::Char),
        };
        assert!(cmd_analyze(args, false, None, None).is_ok());

        let args = AnalyzeArgs {
            file,
            tokenizer: None,
        };
        assert!(cmd_analyze(args, true, Some(Backend::Whitespace), None).is_ok());
    }

    #[test]
    fn analyze_rejects_blank_file() {
        let tmp = TempDir::new().unwrap();
        let file = write_sample(&tmp, "  \n ");
        let args = AnalyzeArgs {
            file,
            tokenizer: None,
        };
        let err = cmd_analyze(args, false, None, None).unwrap_err();
        assert!(err.to_string().contains("failed to analyze"));
    }
}
