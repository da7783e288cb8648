//! `ctr` entrypoint: train a click model, serve it, score a CSV, or smoke-check a server.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ctr_serve::{
    client::{sample_record, PredictClient},
    config::ServiceConfig,
    dataset::Dataset,
    logging::StructuredLogger,
    predictor::Predictor,
    server::{run_server, AppState},
    training,
};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "ctr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ad click-through-rate training and serving", long_about = None)]
struct Args {
    /// JSON config file (default: $CTR_CONFIG_PATH or config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model path override
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Decision threshold override (probability strictly above is a click)
    #[arg(long, global = true)]
    threshold: Option<f32>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit the model on the labeled CSV and write model + vocabulary
    Train {
        /// Training CSV path override
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Boosting rounds override
        #[arg(long)]
        iterations: Option<usize>,
        /// Maximum tree depth override
        #[arg(long)]
        max_depth: Option<u32>,
    },
    /// Serve POST /predict and the HTML form
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print one probability per CSV row using the saved model
    Score {
        /// CSV path override (defaults to the training dataset)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Post the reference record to a running endpoint
    Smoke {
        #[arg(long, default_value = "http://127.0.0.1:5000/predict")]
        url: String,
    },
}

fn load_config(args: &Args) -> Result<ServiceConfig> {
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("CTR_CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.json"));
    let mut config = ServiceConfig::load(&config_path);
    if let Some(m) = &args.model {
        config.model.model_path = m.clone();
    }
    if let Some(t) = args.threshold {
        config.decision.threshold = t;
    }
    if args.verbose {
        config.log.level = "debug".to_string();
    }
    config.validate().context("configuration rejected")?;
    Ok(config)
}

fn run_train(
    mut config: ServiceConfig,
    input: Option<PathBuf>,
    iterations: Option<usize>,
    max_depth: Option<u32>,
) -> Result<()> {
    if let Some(p) = input {
        config.training.dataset_path = p;
    }
    if let Some(n) = iterations {
        config.training.iterations = n;
    }
    if let Some(d) = max_depth {
        config.training.max_depth = d;
    }
    let report = training::train(&config).context("training failed")?;
    info!(
        rows = report.rows,
        accuracy = report.accuracy,
        model = %report.model_path.display(),
        "Model trained and saved successfully."
    );
    Ok(())
}

fn run_serve(mut config: ServiceConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }
    let predictor = match Predictor::load(&config.model, config.decision.clone()) {
        Ok(p) => p,
        Err(e) => {
            error!(model = %config.model.model_path.display(), error = %e, "cannot load model; refusing to start");
            return Err(e).context("model load failed");
        }
    };
    let state = AppState::new(predictor, config.model.model_path.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(run_server(&config.server, state))
}

fn run_score(config: ServiceConfig, input: Option<PathBuf>) -> Result<()> {
    let path = input.unwrap_or_else(|| config.training.dataset_path.clone());
    let predictor =
        Predictor::load(&config.model, config.decision.clone()).context("model load failed")?;
    let dataset = Dataset::from_csv(&path, &config.training.label_column)
        .with_context(|| format!("cannot read {}", path.display()))?;

    for scored in predictor.score(&dataset)? {
        println!("{}\t{:.6}\t{}", scored.row, scored.probability, scored.label.as_flag());
    }
    Ok(())
}

fn run_smoke(url: &str) -> Result<()> {
    let client = PredictClient::new(url)?;
    let (text, parsed) = client
        .predict(&sample_record())
        .with_context(|| format!("request to {} failed", client.url()))?;
    println!("Response Text: {}", text);
    println!("Response JSON: {:?}", parsed);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    StructuredLogger::init(config.log.json, &config.log.level);

    match args.command {
        Command::Train {
            input,
            iterations,
            max_depth,
        } => run_train(config, input, iterations, max_depth),
        Command::Serve { host, port } => run_serve(config, host, port),
        Command::Score { input } => run_score(config, input),
        Command::Smoke { url } => run_smoke(&url),
    }
}
