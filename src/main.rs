//! `linkup`: investment network server and dataset preparation

use anyhow::Context;
use clap::{Parser, Subcommand};
use linkup::logging::init_logging;
use linkup::{load_network, save_network, AppState, DatasetBuilder, HttpServer, ServerConfig};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "linkup", version, about = "LinkUp investment network service")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the network API
    Serve {
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on
        #[arg(long, env = "LINKUP_PORT")]
        port: Option<u16>,

        /// Bind address
        #[arg(long)]
        address: Option<String>,

        /// Network document to serve
        #[arg(long, env = "LINKUP_DATA")]
        data: Option<PathBuf>,

        /// Network document served for `dataset=full`
        #[arg(long)]
        full_data: Option<PathBuf>,

        /// Serve static files from this directory instead of the embedded pages
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Build a network document from CSV exports
    Prepare {
        /// investments.csv
        #[arg(long)]
        investments: PathBuf,

        /// funding_rounds.csv
        #[arg(long)]
        funding_rounds: PathBuf,

        /// objects.csv, for entity names and attributes
        #[arg(long)]
        objects: Option<PathBuf>,

        /// Investments to sample
        #[arg(long, default_value_t = 400)]
        sample_size: usize,

        /// Sampling seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Keep only the best-connected nodes
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Output network document
        #[arg(long, short, default_value = "network_data.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Serve {
            config,
            port,
            address,
            data,
            full_data,
            static_dir,
        } => {
            let mut config = match config {
                Some(path) => ServerConfig::from_file(&path)?,
                None => ServerConfig::default(),
            };
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(address) = address {
                config.address = address;
            }
            if let Some(data) = data {
                config.data_path = data;
            }
            if let Some(full_data) = full_data {
                config.full_data_path = full_data;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir;
            }
            config.validate()?;
            serve(config).await
        }
        Commands::Prepare {
            investments,
            funding_rounds,
            objects,
            sample_size,
            seed,
            max_nodes,
            output,
        } => {
            let store = DatasetBuilder::new()
                .sample_size(sample_size)
                .seed(seed)
                .max_nodes(max_nodes)
                .build_from_files(&investments, &funding_rounds, objects.as_deref())
                .context("Failed to build network from CSV")?;
            save_network(&store, &output).with_context(|| format!("Failed to write {}", output.display()))?;

            let stats = store.statistics();
            println!("[OK] Network data prepared: {}", output.display());
            println!("  - Nodes: {}", stats.total_nodes);
            println!("  - Edges: {}", stats.total_edges);
            println!("  - Companies: {}", stats.companies);
            println!("  - Investors: {}", stats.investors);
            let conflicts = store.role_conflicts();
            if !conflicts.is_empty() {
                println!(
                    "  - Role conflicts (kept as company): {} ({})",
                    conflicts.len(),
                    conflicts.join(", ")
                );
            }
            println!(
                "  - Funding Types: {}",
                stats.funding_types.keys().cloned().collect::<Vec<_>>().join(", ")
            );
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let data_path = config.data_path.clone();
    // The server still starts without data; data endpoints then report 400
    let network = match tokio::task::spawn_blocking(move || load_network(&data_path)).await? {
        Ok(store) => {
            info!(
                nodes = store.node_count(),
                edges = store.edge_count(),
                "Network data loaded successfully"
            );
            Some(store)
        }
        Err(e) => {
            error!(path = %config.data_path.display(), error = %e, "Failed to load network data");
            None
        }
    };

    let state = AppState::new(network, &config);
    HttpServer::new(state, config.bind_addr(), config.static_dir.clone())
        .start()
        .await
        .with_context(|| format!("Server on {} failed", config.bind_addr()))
}
