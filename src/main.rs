mod main_runtime;

use anyhow::Context;
use clap::Parser;
use cytoclass::api::{self, AppState};
use cytoclass::cli::{Cli, Commands, PredictArgs};
use cytoclass::config::AppConfig;
use cytoclass::predictor::DiagnosisService;
use main_runtime::{init_logging, init_logging_simple};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The process has no purpose without a model: any startup failure is fatal.
    if let Err(e) = run(cli).await {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    match cli.command {
        None => serve(config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Some(Commands::Predict(args)) => {
            init_logging_simple();
            predict_once(&config, &args)
        }
    }
}

fn load_model(config: &AppConfig) -> anyhow::Result<DiagnosisService> {
    DiagnosisService::load(&config.model.path)
        .with_context(|| format!("failed to load model {}", config.model.path.display()))
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let _log_guard = init_logging(&config.logging);
    let addr = config.server.socket_addr()?;

    info!("Loading model from {}", config.model.path.display());
    let service = load_model(&config)?;
    let model = service.info();
    info!(
        kernel = model.kernel.as_deref().unwrap_or("unknown"),
        n_support = model.n_support.unwrap_or(0),
        version = model.version.as_deref().unwrap_or("unversioned"),
        "Model loaded"
    );

    api::serve(AppState::new(service), addr)
        .await
        .with_context(|| format!("form server on {addr} failed"))
}

fn predict_once(config: &AppConfig, args: &PredictArgs) -> anyhow::Result<()> {
    let service = load_model(config)?;
    let diagnosis = service
        .predict_cancer(&args.to_features())
        .context("prediction failed")?;
    println!("{diagnosis}");
    Ok(())
}
