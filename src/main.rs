mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use sb_core::Config;
use sb_store::{list_images, ImageStore};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting snapbridge");
    tracing::info!(
        "Uploads will be stored in {}",
        config.storage.upload_dir.display()
    );

    sb_server::start(config).await?;
    Ok(())
}

fn list_stored(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(config_path);
    let store = ImageStore::new(&config.storage.upload_dir);
    for key in list_images(&store)? {
        println!("{key}");
    }
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let Some(path) = config_path else {
        println!("No config file given; defaults are valid");
        return Ok(());
    };

    let content = std::fs::read_to_string(path)?;
    let config = Config::from_json(&content)?;
    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid");
    } else {
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "snapbridge=trace,sb_server=trace,sb_store=trace,sb_core=debug,tower_http=debug"
                .to_string()
        } else {
            "snapbridge=info,sb_server=info,sb_store=info,sb_core=info,tower_http=info"
                .to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::List => list_stored(cli.config.as_deref()),
        Commands::Validate => validate_config(cli.config.as_deref()),
        Commands::Version => {
            println!("snapbridge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
