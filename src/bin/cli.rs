//! dejaq CLI
//!
//! Uploads a local file to an Amazon Q Business index, or registers a seed
//! URL with one of its existing web crawler data sources.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dejaq::{
    client::QBusinessClient,
    config::{QConfig, DEFAULT_CONFIG_FILE, DEFAULT_TEMPLATE_FILE},
    error::{AppError, Result},
    service::QService,
    session::Session,
    utils,
};

/// dejaq - Amazon Q Business upload utility
#[derive(Parser, Debug)]
#[command(
    name = "dejaq",
    version,
    about = "Upload a URL or file to an Amazon Q Business index"
)]
struct Cli {
    /// URL or file path to upload
    source: String,

    /// Name of the existing web crawler data source (required for URL sources)
    #[arg(long)]
    crawler: Option<String>,

    /// Path to the configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// AWS profile to use
    #[arg(long, default_value = "default")]
    profile: String,

    /// AWS region override
    #[arg(long)]
    region: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let template_path = cli.config.with_file_name(DEFAULT_TEMPLATE_FILE);
    let config = QConfig::load(&cli.config, &template_path)?;

    log::info!("Loaded configuration from {}", cli.config.display());

    // Classify the source and fail usage errors before touching AWS.
    let crawler = if utils::is_url(&cli.source) {
        let name = cli
            .crawler
            .clone()
            .ok_or_else(|| AppError::usage("a URL source requires --crawler NAME"))?;
        Some(name)
    } else {
        None
    };

    let session = Session::connect(&config, &cli.profile, cli.region.clone()).await?;
    let service = QService::new(QBusinessClient::new(session.qbusiness_client(), &config));

    match crawler {
        Some(name) => {
            service.add_url_to_crawler(&cli.source, &name).await?;
            log::info!(
                "Successfully added URL '{}' to web crawler '{}'",
                cli.source,
                name
            );
        }
        None => {
            service.upload_document(Path::new(&cli.source)).await?;
            log::info!("Successfully uploaded: {}", cli.source);
        }
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
