//! LinkUp CLI: command-line client for the LinkUp network API
//!
//! Uses the linkup-sdk RemoteClient to talk to a running server.

mod smoke;

use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use linkup_sdk::{Dataset, NetworkClient, NetworkFilter, PathwayRequest, RemoteClient, SdkEdge, SdkNode};
use serde::Serialize;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "linkup-cli", version, about = "LinkUp investment network CLI")]
struct Cli {
    /// Server HTTP URL
    #[arg(long, default_value = "http://localhost:5000", global = true, env = "LINKUP_URL")]
    url: String,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct FilterArgs {
    /// company or investor
    #[arg(long)]
    node_type: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    sector: Option<String>,
    /// Funding round type, e.g. angel or series-a
    #[arg(long)]
    funding_type: Option<String>,
    /// 2024, 2023, 2022, last-12-months or last-6-months
    #[arg(long)]
    time_period: Option<String>,
    /// Substring matched against id, name and label
    #[arg(long)]
    search: Option<String>,
}

impl From<FilterArgs> for NetworkFilter {
    fn from(args: FilterArgs) -> Self {
        NetworkFilter {
            node_type: args.node_type,
            region: args.region,
            sector: args.sector,
            funding_type: args.funding_type,
            time_period: args.time_period,
            search: args.search,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Health,
    /// Network summary statistics
    Stats,
    /// Values available for filtering
    Filters,
    /// List the network (GET /api/network)
    Network {
        /// Read the full dataset instead of the sample
        #[arg(long)]
        full: bool,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Filter the network (POST /api/network/filter)
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Search nodes
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show a node and its neighbourhood
    Node {
        /// Node id, e.g. c:26569
        id: String,
    },
    /// Centrality ranking
    Centrality {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Community detection
    Communities {
        /// components, label_propagation or attributes
        #[arg(long)]
        method: Option<String>,
    },
    /// Investment pathways between two nodes
    Pathways {
        source: String,
        target: String,
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Network report
    Report,
    /// Write the export document to a file (or stdout)
    Export {
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
    /// Run the end-to-end check suite against the server
    Smoke(smoke::SmokeArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = RemoteClient::new(&cli.url);
    let format = cli.format;

    let result = match cli.command {
        Commands::Health => run_health(&client, format).await,
        Commands::Stats => run_stats(&client, format).await,
        Commands::Filters => run_filters(&client, format).await,
        Commands::Network { full, filter } => {
            let dataset = if full { Dataset::Full } else { Dataset::Sample };
            run_network(&client, dataset, filter.into(), format).await
        }
        Commands::Filter { filter } => run_filter(&client, filter.into(), format).await,
        Commands::Search { query, limit } => run_search(&client, &query, limit, format).await,
        Commands::Node { id } => run_node(&client, &id, format).await,
        Commands::Centrality { limit } => run_centrality(&client, limit, format).await,
        Commands::Communities { method } => run_communities(&client, method.as_deref(), format).await,
        Commands::Pathways { source, target, max_depth } => {
            let request = PathwayRequest { source_id: source, target_id: target, max_depth };
            run_pathways(&client, &request, format).await
        }
        Commands::Report => run_report(&client, format).await,
        Commands::Export { output } => run_export(&client, output.as_deref()).await,
        Commands::Smoke(args) => smoke::run(&client, &args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(a) if a >= 1_000_000.0 => format!("{:.1}M", a / 1_000_000.0),
        Some(a) if a >= 1_000.0 => format!("{:.0}k", a / 1_000.0),
        Some(a) => format!("{:.0}", a),
        None => "-".to_string(),
    }
}

fn node_table(nodes: &[SdkNode]) -> Table {
    let mut table = new_table(["id", "type", "name", "industry", "region"]);
    for node in nodes {
        table.add_row(vec![
            node.id.clone(),
            node.kind.clone(),
            node.display_name().to_string(),
            opt(&node.industry),
            opt(&node.region),
        ]);
    }
    table
}

fn edge_table(edges: &[SdkEdge]) -> Table {
    let mut table = new_table(["source", "target", "round", "raised", "date"]);
    for edge in edges {
        table.add_row(vec![
            edge.source.clone(),
            edge.target.clone(),
            opt(&edge.funding_round_type),
            format_amount(edge.raised_amount),
            opt(&edge.date),
        ]);
    }
    table
}

async fn run_health(client: &RemoteClient, format: OutputFormat) -> CliResult {
    let health = client.health().await?;
    match format {
        OutputFormat::Json => print_json(&health)?,
        OutputFormat::Table => println!("{}", health.message),
    }
    Ok(())
}

async fn run_stats(client: &RemoteClient, format: OutputFormat) -> CliResult {
    let stats = client.network_stats().await?;
    match format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Table => {
            println!("Nodes:      {}", stats.total_nodes);
            println!("Edges:      {}", stats.total_edges);
            println!("Companies:  {}", stats.companies);
            println!("Investors:  {}", stats.investors);
            println!("Date range: {} to {}", opt(&stats.date_range.min), opt(&stats.date_range.max));

            let mut table = new_table(["funding type", "edges"]);
            for (round, count) in &stats.funding_types {
                table.add_row(vec![round.clone(), count.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

async fn run_filters(client: &RemoteClient, format: OutputFormat) -> CliResult {
    let options = client.filter_options().await?;
    match format {
        OutputFormat::Json => print_json(&options)?,
        OutputFormat::Table => {
            println!("Funding types: {}", options.funding_types.join(", "));
            println!("Node types:    {}", options.node_types.join(", "));
            println!("Date range:    {} to {}", opt(&options.date_range.min), opt(&options.date_range.max));
        }
    }
    Ok(())
}

async fn run_network(client: &RemoteClient, dataset: Dataset, filter: NetworkFilter, format: OutputFormat) -> CliResult {
    let network = client.network(dataset, &filter).await?;
    match format {
        OutputFormat::Json => print_json(&network)?,
        OutputFormat::Table => {
            println!("{}", node_table(&network.nodes));
            println!("{}", edge_table(&network.edges));
            println!("{} node(s), {} edge(s)", network.nodes.len(), network.edges.len());
        }
    }
    Ok(())
}

async fn run_filter(client: &RemoteClient, filter: NetworkFilter, format: OutputFormat) -> CliResult {
    let result = client.filter_network(&filter).await?;
    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!("{}", edge_table(&result.edges));
            println!("{} node(s), {} edge(s)", result.stats.total_nodes, result.stats.total_edges);
        }
    }
    Ok(())
}

async fn run_search(client: &RemoteClient, query: &str, limit: Option<usize>, format: OutputFormat) -> CliResult {
    let results = client.search(query, limit).await?;
    match format {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Table => {
            if results.is_empty() {
                println!("(no results)");
                return Ok(());
            }
            println!("{}", node_table(&results));
            println!("{} result(s)", results.len());
        }
    }
    Ok(())
}

async fn run_node(client: &RemoteClient, id: &str, format: OutputFormat) -> CliResult {
    let details = client.node(id).await?;
    match format {
        OutputFormat::Json => print_json(&details)?,
        OutputFormat::Table => {
            println!("{} ({}) {}", details.node.id, details.node.kind, details.node.display_name());
            println!("{}", node_table(&details.connected_nodes));
            println!("{}", edge_table(&details.connected_edges));
        }
    }
    Ok(())
}

async fn run_centrality(client: &RemoteClient, limit: Option<usize>, format: OutputFormat) -> CliResult {
    let report = client.centrality(limit).await?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            let mut table = new_table(["id", "type", "name", "degree", "closeness", "betweenness", "pagerank"]);
            for node in &report.top_nodes {
                table.add_row(vec![
                    node.id.clone(),
                    node.kind.clone(),
                    opt(&node.name),
                    node.degree.to_string(),
                    format!("{:.4}", node.closeness),
                    format!("{:.4}", node.betweenness),
                    format!("{:.4}", node.pagerank),
                ]);
            }
            println!("{}", table);
            println!(
                "avg degree {:.2}, max degree {}, density {:.4}",
                report.stats.avg_degree, report.stats.max_degree, report.stats.density
            );
        }
    }
    Ok(())
}

async fn run_communities(client: &RemoteClient, method: Option<&str>, format: OutputFormat) -> CliResult {
    let report = client.communities(method).await?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            let mut table = new_table(["name", "nodes", "internal edges", "color"]);
            for community in &report.communities {
                table.add_row(vec![
                    community.name.clone(),
                    community.node_count.to_string(),
                    community.internal_edges.to_string(),
                    community.color.clone(),
                ]);
            }
            println!("{}", table);
            println!(
                "{} communities ({}), largest {}, avg size {:.2}, modularity {:.4}",
                report.community_count,
                report.method,
                report.stats.largest_community,
                report.stats.avg_community_size,
                report.stats.modularity
            );
        }
    }
    Ok(())
}

async fn run_pathways(client: &RemoteClient, request: &PathwayRequest, format: OutputFormat) -> CliResult {
    let report = client.pathways(request).await?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            if report.paths.is_empty() {
                println!("(no path between {} and {})", request.source_id, request.target_id);
                return Ok(());
            }
            let mut table = new_table(["#", "length", "path"]);
            for (i, path) in report.paths.iter().enumerate() {
                table.add_row(vec![(i + 1).to_string(), path.len().to_string(), path.join(" -> ")]);
            }
            println!("{}", table);
            println!(
                "{} path(s), avg length {:.2}{}",
                report.stats.path_count,
                report.stats.avg_path_length,
                if report.truncated { " (truncated)" } else { "" }
            );
        }
    }
    Ok(())
}

async fn run_report(client: &RemoteClient, format: OutputFormat) -> CliResult {
    let report = client.report().await?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            println!(
                "{} nodes, {} edges, {} components (largest {}, {} isolated)",
                report.summary.total_nodes,
                report.summary.total_edges,
                report.components.count,
                report.components.largest,
                report.components.isolated_nodes
            );

            let mut investors = new_table(["investor", "name", "investments", "type"]);
            for investor in &report.top_investors {
                investors.add_row(vec![
                    investor.id.clone(),
                    investor.name.clone(),
                    investor.activity.to_string(),
                    opt(&investor.investor_type),
                ]);
            }
            println!("{}", investors);

            let mut companies = new_table(["company", "name", "investments", "industry"]);
            for company in &report.active_companies {
                companies.add_row(vec![
                    company.id.clone(),
                    company.name.clone(),
                    company.degree.to_string(),
                    opt(&company.industry),
                ]);
            }
            println!("{}", companies);

            let buckets = report.amount_distribution;
            println!(
                "amounts: no data {}, <1M {}, <10M {}, >=10M {}",
                buckets.no_data, buckets.small, buckets.medium, buckets.large
            );
        }
    }
    Ok(())
}

async fn run_export(client: &RemoteClient, output: Option<&std::path::Path>) -> CliResult {
    let document = client.export().await?;
    let text = serde_json::to_string_pretty(&document)?;
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("Export written to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
