use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use spamsift_model::{facade, ArtifactLocation, ArtifactProvider, OnnxArtifactLoader};
use spamsift_web::cli::{Cli, Commands};
use spamsift_web::config::ServeConfig;
use spamsift_web::server::run_server;
use spamsift_web::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            address,
            model_url,
            model_path,
            config,
            verbose,
        } => {
            init_logging(verbose);

            let config = ServeConfig::load(config.as_deref(), model_url, model_path)?;
            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  spamsift - Spam Email Predictor");
            println!("  --------------------------------");
            println!("  Model URL:   {}", config.model_url);
            println!("  Cache path:  {}", config.model_path.display());
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            let state = AppState::new(config);
            run_server(state, addr).await?;
        }

        Commands::Classify {
            text,
            model_url,
            model_path,
            verbose,
        } => {
            init_logging(verbose);

            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let mut location = ArtifactLocation::default();
            if let Some(url) = model_url {
                location = location.with_url(url);
            }
            if let Some(path) = model_path {
                location = location.with_cache_path(path);
            }

            let provider = ArtifactProvider::new(location, Arc::new(OnnxArtifactLoader::new()));
            let artifact = provider.get().await?;
            let prediction = facade::classify(&text, artifact.model.as_ref())?;

            println!(
                "{} (confidence: {:.2}%)",
                prediction.label,
                prediction.confidence * 100.0
            );
            println!(
                "Ham: {:.2}% | Spam: {:.2}%",
                prediction.probabilities.ham * 100.0,
                prediction.probabilities.spam * 100.0
            );
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "spamsift_web=debug,spamsift_model=debug,tower_http=debug"
    } else {
        "spamsift_web=info,spamsift_model=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
