mod cli;

use analyzer::{AnalysisContext, Analyzer, AnalyzerConfig};
use anyhow::Context;
use cli::{Args, USAGE};
use llm_interface::OpenAiProvider;
use psyche_core::{AnalysisResult, AppConfig, ErrorReporter};
use reddit_client::RedditCommentClient;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "psyche=info,analyzer=info,reddit_client=info,llm_interface=info";

#[derive(Serialize)]
struct Report<'a> {
    username: &'a str,
    interests: &'a [String],
    summary: &'a str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            ErrorReporter::new().report_error(&e);
            eprintln!("Error: {e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let mut config = AppConfig::load(args.config_path.as_deref())?;
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    config.validate()?;

    let source = RedditCommentClient::new(
        &config.reddit_base_url,
        config.user_agent.clone(),
        config.http_timeout(),
    )?;
    let provider = OpenAiProvider::new(
        config.openai_api_key.clone().unwrap_or_default(),
        &config.openai_base_url,
        config.http_timeout(),
    )?;
    let analyzer = Analyzer::new(source, provider, AnalyzerConfig::from(&config));

    let (ctx, cancel) = AnalysisContext::cancellable(config.analysis_timeout());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling analysis");
            cancel.cancel();
        }
    });

    tracing::info!(
        username = %args.username,
        timeout_secs = config.timeout_secs,
        "Analyzing Reddit user"
    );

    let result = analyzer.analyze(&ctx, &args.username).await.map_err(|e| {
        ErrorReporter::new().report_error(&e);
        e
    });
    let result = result.context("Analysis failed")?;

    if args.json {
        print_json(&args.username, &result)?;
    } else {
        print_text(&args.username, &result);
    }
    Ok(())
}

fn print_text(username: &str, result: &AnalysisResult) {
    println!("Reddit user: u/{username}");
    println!("\nPersonality summary:");
    println!("{}", result.summary);
    println!("\nInferred interests:");
    for interest in &result.interests {
        println!("- {interest}");
    }
}

fn report<'a>(username: &'a str, result: &'a AnalysisResult) -> Report<'a> {
    Report {
        username,
        interests: &result.interests,
        summary: &result.summary,
    }
}

fn print_json(username: &str, result: &AnalysisResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&report(username, result))?);
    Ok(())
}
