use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use lumen_config::{LumenConfig, VisionConfig};
use lumen_core::{AnalysisPrompt, VisionProvider};
use lumen_gateway::GatewayState;
use lumen_pipeline::AnalysisPipeline;
use lumen_session::HistoryStore;
use lumen_vision::{MockVision, OpenAiVision, ProviderRegistry};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Lumen — AI image analysis service")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the analysis server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check whether a running server is healthy
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Status { port } => status(port.unwrap_or(config.server.port)).await,
    }
}

fn load(path: Option<&Path>) -> Result<LumenConfig> {
    match path {
        Some(p) => lumen_config::load_config(p),
        None => match lumen_config::default_config_path().filter(|p| p.exists()) {
            Some(p) => lumen_config::load_config(&p),
            None => Ok(LumenConfig::from_env()),
        },
    }
}

async fn serve(config: LumenConfig) -> Result<()> {
    logging::init_logger(
        &config.logging.level,
        config.logging.dir.as_deref().map(Path::new),
    );
    info!(config = %lumen_config::redacted(&config), "starting lumen");

    let provider = build_provider(&config.vision)?;

    let history = HistoryStore::new();
    let mut pipeline = AnalysisPipeline::new(provider, history.clone())
        .with_max_tokens(config.vision.max_tokens);
    if let Some(prompt) = &config.vision.prompt {
        pipeline = pipeline.with_prompt(AnalysisPrompt::custom(prompt.clone()));
    }

    let state = GatewayState {
        pipeline: Arc::new(pipeline),
        history,
    };

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .context("Invalid bind address")?;
    lumen_gateway::start_server(addr, state).await
}

fn build_provider(config: &VisionConfig) -> Result<Arc<dyn VisionProvider>> {
    if config.provider == "openai" && config.api_key.is_empty() {
        bail!("vision.apiKey is empty; set OPENAI_API_KEY or configure vision.apiKey");
    }

    let mut openai = OpenAiVision::new(config.api_key.clone(), config.model.clone())
        .with_timeout(Duration::from_secs(config.timeout_secs));
    if let Some(url) = &config.base_url {
        openai = openai.with_base_url(url.clone());
    }

    let mut registry = ProviderRegistry::new();
    registry.register("openai", Arc::new(openai));
    registry.register(
        "mock",
        Arc::new(MockVision::replying(
            "Canned analysis produced by the offline mock provider.",
        )),
    );

    registry
        .get(&config.provider)
        .with_context(|| format!("Unknown vision provider: {}", config.provider))
}

async fn status(port: u16) -> Result<()> {
    let client = reqwest::Client::new();
    match client
        .get(format!("http://localhost:{port}/api/health"))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            println!("lumen: running on port {port}");
        }
        Ok(resp) => {
            println!("lumen: unhealthy ({})", resp.status());
        }
        Err(_) => {
            println!("lumen: not reachable on port {port}");
        }
    }
    Ok(())
}
