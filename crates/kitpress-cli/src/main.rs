use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use kitpress_core::Config;
use kitpress_pipeline::{KitImporter, ManifestStore, Publisher};
use tracing::info;

#[derive(Parser)]
#[command(name = "kitpress")]
#[command(about = "Campaign kit import, validation, and publishing")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a campaign kit archive and validate it
    Import {
        /// Path to the .zip archive to import
        archive: PathBuf,
    },
    /// List the latest imported kit per slug
    List,
    /// Show the manifest of one kit
    Status {
        /// Kit id as printed at import time
        id: String,
    },
    /// Publish an imported kit into the live tree
    Publish {
        /// Kit id as printed at import time
        id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load_with_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Import { archive } => {
            let filename = archive
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .unwrap_or_default();
            if !filename.to_lowercase().ends_with(".zip") {
                eyre::bail!("only .zip archives are accepted: {}", archive.display());
            }

            let bytes = fs::read(&archive)
                .wrap_err_with(|| format!("reading {}", archive.display()))?;
            let importer = KitImporter::new(config);
            let manifest = importer.import(&bytes, &filename)?;

            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Commands::List => {
            let store = ManifestStore::new(config.storage.kits_root.clone());
            let kits = store.list();
            let total = kits.len();
            let listing = serde_json::json!({ "kits": kits, "total": total });

            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Commands::Status { id } => {
            let store = ManifestStore::new(config.storage.kits_root.clone());
            match store.get(&id) {
                Some(manifest) => println!("{}", serde_json::to_string_pretty(&manifest)?),
                None => eyre::bail!("kit not found: {id}"),
            }
        }
        Commands::Publish { id } => {
            let publisher = Publisher::new(config);
            let manifest = publisher.publish(&id)?;

            info!(slug = %manifest.slug, "publish complete");
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
    }

    Ok(())
}
