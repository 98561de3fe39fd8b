use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use wander_api::{AppState, RestApi};
use wander_core::{Catalog, Recommender};
use wander_index::ModelStore;

/// A travel destination recommendation server
#[derive(Parser, Debug)]
#[command(name = "wander")]
#[command(about = "A travel destination recommendation service", long_about = None)]
struct Args {
    /// Path to the destinations CSV table
    #[arg(long, default_value = "dataset/Destinations.csv")]
    destinations: PathBuf,

    /// Path to the users CSV table
    #[arg(long, default_value = "dataset/Users.csv")]
    users: PathBuf,

    /// Directory holding the offline similarity artifacts
    #[arg(long, default_value = "./models")]
    model_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Seed for the popularity-score backfill (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting wander v{}", env!("CARGO_PKG_VERSION"));
    info!("Destinations table: {:?}", args.destinations);
    info!("Users table: {:?}", args.users);
    info!("Model directory: {:?}", args.model_dir);

    let catalog = Arc::new(Catalog::load(&args.destinations, &args.users, args.seed)?);
    info!(
        "Catalog loaded: {} destinations, {} users",
        catalog.destinations().len(),
        catalog.users().len()
    );

    // The offline artifacts are optional: without them the server scores
    // queries exactly the same, it just loses the model tie-break.
    let mut recommender = Recommender::new(catalog.clone());
    match ModelStore::new(&args.model_dir).load() {
        Ok(Some(model)) => {
            info!("Similarity model loaded for {} destinations", model.len());
            recommender = recommender.with_similarity_hint(Arc::new(model));
        }
        Ok(None) => {
            warn!(
                "No similarity model under {:?}; run wander-reindex to build one",
                args.model_dir
            );
        }
        Err(e) => {
            warn!("Ignoring unreadable similarity model: {:#}", e);
        }
    }

    info!("HTTP API: http://localhost:{}/", args.http_port);
    RestApi::start(
        AppState {
            catalog,
            recommender,
        },
        args.http_port,
    )
    .await?;

    info!("Shutting down...");
    Ok(())
}
