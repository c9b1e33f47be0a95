use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::analysis::GeminiClient;
use crate::config::{AnalyzerConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, parse_temperature};
use crate::logging::{DEFAULT_LOG_LEVEL, default_log_path, init_logging};
use crate::tui::run_dashboard;

#[derive(Parser, Debug)]
#[command(name = "sentiment-scope")]
#[command(version)]
#[command(about = "Interactive terminal dashboard for LLM-backed sentiment analysis", long_about = None)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for classification
    #[arg(long, env = "SENTIMENT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the generateContent API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Sampling temperature (0.0-2.0)
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, value_parser = parse_temperature)]
    pub temperature: f32,

    /// Log filter directive, overridden by RUST_LOG
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Log file path [default: <cache dir>/sentiment-scope/sentiment-scope.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::new(self.api_key.clone())
            .with_model(&self.model)
            .with_base_url(&self.base_url)
            .with_temperature(self.temperature)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let _guard = init_logging(&cli.log_level, &log_path)?;

    let config = cli.analyzer_config();
    if !config.has_credential() {
        tracing::warn!("no API key configured; analyses will fail until GEMINI_API_KEY is set");
    }
    tracing::info!(model = %config.model, base_url = %config.base_url, "starting dashboard");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let analyzer = Arc::new(GeminiClient::new(config));
    let result = run_dashboard(analyzer, runtime.handle().clone());

    if let Err(e) = &result {
        tracing::error!(error = %e, "dashboard exited with error");
    }
    result
}
