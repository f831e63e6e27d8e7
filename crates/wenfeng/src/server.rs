//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes style profiling over the MCP protocol, making it
//! available to AI assistants via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library the
//! CLI commands use; each `#[tool]` method delegates to `wenfeng_core`.
//!
//! Profiles cross the protocol as raw JSON and are read through
//! [`TargetProfile::from_value`], so partial or hand-written profiles work.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use wenfeng_core::confidence::{ConfidenceModel, SampleStats};
use wenfeng_core::consistency::{ConsistencyConfig, ConsistencyModel};
use wenfeng_core::learn::StyleLearner;
use wenfeng_core::preprocess::{PreprocessReport, QualityReport};
use wenfeng_core::profiler::{StyleProfiler, generate_report};
use wenfeng_core::tokenize::Backend;
use wenfeng_core::{PreprocessOptions, TargetProfile, TextPreprocessor};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_text_format")]
    pub format: String,
}

fn default_text_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Output format: "json" (full analysis) or "markdown" (report).
    #[serde(default = "default_json_format")]
    pub format: String,
    /// Word segmentation backend; defaults to the server setting.
    pub tokenizer: Option<Backend>,
}

fn default_json_format() -> String {
    "json".to_string()
}

/// Parameters for the `learn_style` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct LearnStyleParams {
    /// Name stored in the profile.
    pub name: String,
    /// Sample text to learn from.
    pub text: String,
    /// Reference profiles for the uniqueness score.
    #[serde(default)]
    pub references: Vec<serde_json::Value>,
    /// Skip sample cleanup.
    #[serde(default)]
    pub raw: bool,
}

/// Parameters for the `check_consistency` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckConsistencyParams {
    /// The text to score.
    pub text: String,
    /// Target style profile; missing fields use defaults.
    pub target: serde_json::Value,
    /// Skip text cleanup.
    #[serde(default)]
    pub raw: bool,
}

/// Parameters for the `calculate_confidence` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CalculateConfidenceParams {
    /// Statistics of the sample the profile was learned from.
    pub sample: SampleStats,
    /// The learned profile.
    pub profile: serde_json::Value,
    /// Reference profiles for the uniqueness score.
    #[serde(default)]
    pub references: Vec<serde_json::Value>,
}

/// Parameters for the `clean_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CleanTextParams {
    /// The raw text to clean.
    pub text: String,
    /// Cleanup steps; defaults to the server setting.
    pub options: Option<PreprocessOptions>,
}

#[derive(Serialize)]
struct CleanTextOutput {
    preprocess: PreprocessReport,
    quality: QualityReport,
}

/// Server-wide defaults taken from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerSettings {
    /// Maximum accepted text size in bytes.
    pub max_input: Option<usize>,
    /// Default segmentation backend.
    pub tokenizer: Backend,
    /// Clean samples before learning or checking.
    pub clean_input: bool,
    /// Steps used when cleaning.
    pub preprocess: PreprocessOptions,
}

/// MCP server exposing style profiling to AI assistants.
#[derive(Clone)]
pub struct StyleServer {
    settings: ServerSettings,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for StyleServer {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleServer {
    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.settings.max_input {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    fn prepare(&self, text: String, raw: bool) -> String {
        if raw || !self.settings.clean_input {
            return text;
        }
        TextPreprocessor
            .preprocess(&text, &self.settings.preprocess)
            .text
    }
}

#[tool_router]
impl StyleServer {
    /// Create a server with default settings.
    pub fn new() -> Self {
        Self::with_settings(ServerSettings {
            max_input: Some(wenfeng_core::DEFAULT_MAX_INPUT_BYTES),
            clean_input: true,
            ..ServerSettings::default()
        })
    }

    /// Create a server with explicit settings.
    pub fn with_settings(settings: ServerSettings) -> Self {
        Self {
            settings,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "tokenizer": self.settings.tokenizer.as_str(),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Analyze vocabulary, syntax and sentiment.
    #[tool(
        description = "Analyze the style of a Chinese text: vocabulary richness and top words, sentence length statistics and punctuation, and sentiment. Returns JSON or a markdown report."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_text", format = %params.format, "executing MCP tool");
        self.check_size(&params.text)?;

        let backend = params.tokenizer.unwrap_or(self.settings.tokenizer);
        let analysis = StyleProfiler::with_backend(backend)
            .analyze(&params.text)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let text = if params.format == "markdown" {
            generate_report(&analysis)
        } else {
            to_json(&analysis)?
        };

        tracing::info!(
            tool = "analyze_text",
            tokens = analysis.vocabulary.total_tokens,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Learn a style profile from a sample.
    #[tool(
        description = "Learn a style profile from a sample text. Returns the profile JSON with a confidence grade; pass it to check_consistency as the target."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", name = %params.name))]
    fn learn_style(
        &self,
        Parameters(params): Parameters<LearnStyleParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "learn_style", references = params.references.len(), "executing MCP tool");
        self.check_size(&params.text)?;

        let references = targets(params.references)?;
        let sample = self.prepare(params.text, params.raw);
        let learner = StyleLearner::new(
            StyleProfiler::with_backend(self.settings.tokenizer),
            ConfidenceModel::default(),
        );
        let profile = learner
            .learn(&params.name, &sample, &references)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let json = to_json(&profile)?;
        tracing::info!(tool = "learn_style", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Score a text against a target style.
    #[tool(
        description = "Score how consistent a text is with a target style profile. Returns an overall score (0-100), per-dimension scores for vocabulary, syntax, sentiment and rhythm, and revision suggestions."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_consistency(
        &self,
        Parameters(params): Parameters<CheckConsistencyParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "check_consistency", raw = params.raw, "executing MCP tool");
        self.check_size(&params.text)?;

        let target = target(params.target)?;
        let text = self.prepare(params.text, params.raw);
        let model = ConsistencyModel::new(
            StyleProfiler::with_backend(self.settings.tokenizer),
            ConsistencyConfig::default(),
        );
        let result = model
            .check(&text, &target)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let json = to_json(&result)?;
        tracing::info!(
            tool = "check_consistency",
            overall = result.overall,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Grade how far a learned profile can be trusted.
    #[tool(
        description = "Calculate the confidence of a style profile from its sample statistics: sample size, feature stability, distinctiveness against reference profiles, and data completeness."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn calculate_confidence(
        &self,
        Parameters(params): Parameters<CalculateConfidenceParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "calculate_confidence",
            word_count = params.sample.word_count,
            "executing MCP tool"
        );

        let profile = target(params.profile)?;
        let references = targets(params.references)?;
        let report = ConfidenceModel::default().calculate(&params.sample, &profile, &references);

        let json = to_json(&report)?;
        tracing::info!(
            tool = "calculate_confidence",
            overall = report.overall,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Clean a raw sample and rate its quality.
    #[tool(
        description = "Clean a raw Chinese sample (tables of contents, page numbers, chapter headings, half-width punctuation, extra whitespace) and rate its suitability for style learning."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn clean_text(
        &self,
        Parameters(params): Parameters<CleanTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "clean_text", "executing MCP tool");
        self.check_size(&params.text)?;

        let options = params.options.unwrap_or(self.settings.preprocess);
        let preprocess = TextPreprocessor.preprocess(&params.text, &options);
        let quality = TextPreprocessor.assess_quality(&preprocess.text);

        tracing::info!(tool = "clean_text", score = quality.score, "MCP tool completed");
        let json = to_json(&CleanTextOutput {
            preprocess,
            quality,
        })?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

fn target(value: serde_json::Value) -> Result<TargetProfile, McpError> {
    TargetProfile::from_value(value)
        .map_err(|e| McpError::invalid_params(format!("invalid profile: {e}"), None))
}

fn targets(values: Vec<serde_json::Value>) -> Result<Vec<TargetProfile>, McpError> {
    values.into_iter().map(target).collect()
}

#[tool_handler]
impl ServerHandler for StyleServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Learn a style profile from a sample with learn_style, then score drafts with check_consistency.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
