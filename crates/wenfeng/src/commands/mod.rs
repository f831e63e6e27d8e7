//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use wenfeng_core::{PreprocessOptions, TargetProfile, TextPreprocessor};

pub mod analyze;
pub mod check;
pub mod clean;
pub mod confidence;
pub mod info;
pub mod learn;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Load comparison profiles, preferring paths given on the command line over
/// the configured `references`.
pub fn load_references(
    cli_paths: &[Utf8PathBuf],
    config_paths: Option<&[Utf8PathBuf]>,
    max_bytes: Option<usize>,
) -> anyhow::Result<Vec<TargetProfile>> {
    let paths = if cli_paths.is_empty() {
        config_paths.unwrap_or_default()
    } else {
        cli_paths
    };
    paths
        .iter()
        .map(|path| load_target(path, max_bytes))
        .collect()
}

/// Read a (possibly partial) profile used as a comparison target.
pub fn load_target(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<TargetProfile> {
    let json = read_input_file(path, max_bytes)?;
    TargetProfile::from_json(&json).with_context(|| format!("failed to parse profile {path}"))
}

/// Run the preprocessor over `text` unless cleaning is off.
pub fn prepare_sample(text: String, clean: bool, options: &PreprocessOptions) -> String {
    if !clean {
        return text;
    }
    let report = TextPreprocessor.preprocess(&text, options);
    tracing::debug!(
        reduction = report.reduction,
        steps = ?report.steps,
        "sample cleaned"
    );
    report.text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn read_input_file_enforces_limit() {
        let tmp = TempDir::new().unwrap();
        let path = utf8(tmp.path().join("sample.txt"));
        fs::write(&path, "春眠不觉晓，处处闻啼鸟。").unwrap();

        assert!(read_input_file(&path, None).is_ok());
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn cli_references_replace_config_references() {
        let tmp = TempDir::new().unwrap();
        let cli = utf8(tmp.path().join("cli.json"));
        fs::write(&cli, r#"{"style_name": "cli"}"#).unwrap();
        let configured = vec![utf8(tmp.path().join("missing.json"))];

        let loaded = load_references(&[cli], Some(&configured), None).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].style_name.as_deref(), Some("cli"));

        assert!(load_references(&[], Some(&configured), None).is_err());
        assert!(load_references(&[], None, None).unwrap().is_empty());
    }

    #[test]
    fn prepare_sample_respects_switch() {
        let raw = "第一段。\n\n12\n\n第二段。".to_string();
        let options = PreprocessOptions::default();
        assert_eq!(prepare_sample(raw.clone(), false, &options), raw);
        assert_eq!(prepare_sample(raw, true, &options), "第一段。\n\n第二段。");
    }
}
