use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use wander_core::Catalog;
use wander_index::{build_model, ModelStore};

/// Offline builder for the hybrid similarity artifacts
#[derive(Parser, Debug)]
#[command(name = "wander-reindex")]
#[command(about = "Build and persist the wander similarity model", long_about = None)]
struct Args {
    /// Path to the destinations CSV table
    #[arg(long, default_value = "dataset/Destinations.csv")]
    destinations: PathBuf,

    /// Path to the users CSV table
    #[arg(long, default_value = "dataset/Users.csv")]
    users: PathBuf,

    /// Directory to write the artifacts into
    #[arg(long, default_value = "./models")]
    model_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Seed for the popularity-score backfill (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
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

    info!("Starting wander-reindex v{}", env!("CARGO_PKG_VERSION"));
    let catalog = Catalog::load(&args.destinations, &args.users, args.seed)?;
    info!(
        "Catalog loaded: {} destinations, {} users",
        catalog.destinations().len(),
        catalog.users().len()
    );
    info!(
        "Category vocabulary: {} labels",
        catalog.category_labels().len()
    );

    let model = build_model(&catalog);
    ModelStore::new(&args.model_dir).save(&model)?;
    info!("Artifacts written to {:?}", args.model_dir);
    Ok(())
}
