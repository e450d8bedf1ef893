//! DreamForge Engine - Main entry point.
//!
//! Reads one dream description from the arguments (or stdin), runs it through
//! the pipeline against the headless world and prints the result as JSON.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dreamforge_engine::app::{build_llm, build_world, App};
use dreamforge_engine::infrastructure::{
    catalog::load_catalog, config::EngineConfig, status::TracingStatusSink,
};

const USAGE: &str = "usage: dreamforge-engine [--attributes-only] [DREAM TEXT...]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root, then the working directory.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dreamforge_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut attributes_only = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--attributes-only" => attributes_only = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => words.push(arg),
        }
    }

    let dream_text = if words.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read dream text from stdin")?;
        buffer
    } else {
        words.join(" ")
    };
    let dream_text = dream_text.trim();
    if dream_text.is_empty() {
        anyhow::bail!("no dream text given\n{USAGE}");
    }

    tracing::info!("Starting DreamForge Engine");

    let config = EngineConfig::from_env();
    let catalog = load_catalog(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;

    let app = App::new(
        &config,
        build_llm(&config),
        build_world(&config),
        catalog,
        Arc::new(TracingStatusSink),
    );

    let output = if attributes_only {
        let attributes = app.use_cases.extraction.execute(dream_text).await;
        serde_json::to_string_pretty(&attributes)?
    } else {
        let scene = app.use_cases.dream.execute(dream_text).await?;
        serde_json::to_string_pretty(&scene)?
    };
    println!("{output}");

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
