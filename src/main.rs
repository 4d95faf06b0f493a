use anyhow::Context;
use channel_insights::utils::error::ErrorSeverity;
use channel_insights::utils::{logger, validation::Validate};
use channel_insights::{AnalysisEngine, CliConfig, InsightError, Video};
use clap::Parser;
use serde_json::{Map, Value};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting channel-insights");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let videos: Vec<Video> = read_json(&cli.input)
        .with_context(|| format!("failed to read videos from {}", cli.input))?;
    let channel_stats: Option<Map<String, Value>> = match &cli.channel_stats {
        Some(path) => Some(
            read_json(path).with_context(|| format!("failed to read channel stats from {}", path))?,
        ),
        None => None,
    };

    tracing::info!(
        "📊 Analysing {} videos with services {:?}",
        videos.len(),
        cli.services
    );

    let engine = AnalysisEngine::from_config(&config);
    if !engine.has_provider() {
        tracing::warn!("⚠️ No API key configured, results come from the local fallback");
    }

    let result = engine.analyse(videos, channel_stats, &cli.services).await;
    let rendered = serde_json::to_string_pretty(&result)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| format!("failed to write {}", path))?;
            tracing::info!("📁 Output saved to: {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> channel_insights::Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn exit_with(e: &InsightError) -> ! {
    tracing::error!(
        "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
