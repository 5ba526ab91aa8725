//! End-to-end check suite against a running server
//!
//! Every check runs even when an earlier one fails; the command exits
//! non-zero if any check failed.

use clap::Args;
use linkup_sdk::{Dataset, NetworkClient, NetworkFilter, PathwayRequest, RemoteClient};

type CheckResult = Result<Vec<String>, Box<dyn std::error::Error>>;

#[derive(Args, Debug, Default)]
pub struct SmokeArgs {
    /// Expected total node count
    #[arg(long)]
    pub expect_nodes: Option<usize>,
    /// Expected total edge count
    #[arg(long)]
    pub expect_edges: Option<usize>,
    #[arg(long)]
    pub expect_companies: Option<usize>,
    #[arg(long)]
    pub expect_investors: Option<usize>,
    /// Funding types that must be offered as filters and yield edges (repeatable)
    #[arg(long = "expect-funding-type")]
    pub expect_funding_types: Vec<String>,
    /// Node to search for and inspect; defaults to the first node of the network
    #[arg(long)]
    pub node: Option<String>,
}

#[derive(Default)]
struct Tally {
    passed: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, index: usize, title: &str, outcome: CheckResult) {
        println!("\n[{}] {}", index, title);
        match outcome {
            Ok(lines) => {
                for line in lines {
                    println!("  {}", line);
                }
                println!("  [PASSED]");
                self.passed += 1;
            }
            Err(e) => {
                println!("  [FAILED] {}", e);
                self.failed += 1;
            }
        }
    }
}

fn ensure(condition: bool, message: impl Into<String>) -> Result<(), Box<dyn std::error::Error>> {
    if condition {
        Ok(())
    } else {
        Err(message.into().into())
    }
}

fn expect_count(what: &str, actual: usize, expected: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    match expected {
        Some(expected) => ensure(actual == expected, format!("{}: expected {}, got {}", what, expected, actual)),
        None => Ok(()),
    }
}

pub async fn run(client: &RemoteClient, args: &SmokeArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("[TEST SUITE] LinkUp API against {}", client.base_url());
    println!("{}", "=".repeat(60));

    let mut tally = Tally::default();
    let checks: [(&str, CheckResult); 11] = [
        ("Health Check", check_health(client).await),
        ("Network Statistics", check_stats(client, args).await),
        ("Available Filters", check_filters(client, args).await),
        ("Network Data", check_network(client, args).await),
        ("Filter by Funding Type", check_filter(client, args).await),
        ("Search Nodes", check_search(client, args).await),
        ("Node Details", check_node(client, args).await),
        ("Centrality Analysis", check_centrality(client).await),
        ("Community Detection", check_communities(client).await),
        ("Pathway Tracing", check_pathways(client).await),
        ("Static Files - Network Explorer Page", check_static(client).await),
    ];
    for (i, (title, outcome)) in checks.into_iter().enumerate() {
        tally.record(i + 1, title, outcome);
    }

    println!("\n{}", "=".repeat(60));
    println!("[SUMMARY] {} passed, {} failed", tally.passed, tally.failed);

    if tally.failed > 0 {
        return Err(format!("{} check(s) failed", tally.failed).into());
    }
    Ok(())
}

async fn check_health(client: &RemoteClient) -> CheckResult {
    let health = client.health().await?;
    ensure(health.success, "health reported failure")?;
    Ok(vec![format!("Message: {}", health.message)])
}

async fn check_stats(client: &RemoteClient, args: &SmokeArgs) -> CheckResult {
    let stats = client.network_stats().await?;
    ensure(
        stats.total_nodes == stats.companies + stats.investors,
        "total_nodes != companies + investors",
    )?;
    expect_count("total_nodes", stats.total_nodes, args.expect_nodes)?;
    expect_count("total_edges", stats.total_edges, args.expect_edges)?;
    expect_count("companies", stats.companies, args.expect_companies)?;
    expect_count("investors", stats.investors, args.expect_investors)?;

    Ok(vec![
        format!("Total Nodes: {}", stats.total_nodes),
        format!("Total Edges: {}", stats.total_edges),
        format!("Companies: {}", stats.companies),
        format!("Investors: {}", stats.investors),
        format!("Funding Types: {:?}", stats.funding_types.keys().collect::<Vec<_>>()),
        format!(
            "Date Range: {} to {}",
            stats.date_range.min.as_deref().unwrap_or("-"),
            stats.date_range.max.as_deref().unwrap_or("-")
        ),
    ])
}

async fn check_filters(client: &RemoteClient, args: &SmokeArgs) -> CheckResult {
    let options = client.filter_options().await?;
    for funding_type in &args.expect_funding_types {
        ensure(
            options.funding_types.contains(funding_type),
            format!("funding type '{}' not offered", funding_type),
        )?;
    }
    Ok(vec![
        format!("Funding Types: {:?}", options.funding_types),
        format!("Node Types: {:?}", options.node_types),
    ])
}

async fn check_network(client: &RemoteClient, args: &SmokeArgs) -> CheckResult {
    let network = client.network(Dataset::Sample, &NetworkFilter::default()).await?;
    expect_count("nodes", network.nodes.len(), args.expect_nodes)?;
    expect_count("edges", network.edges.len(), args.expect_edges)?;
    Ok(vec![
        format!("Nodes: {}", network.nodes.len()),
        format!("Edges: {}", network.edges.len()),
    ])
}

async fn check_filter(client: &RemoteClient, args: &SmokeArgs) -> CheckResult {
    let funding_types = if args.expect_funding_types.is_empty() {
        client.filter_options().await?.funding_types.into_iter().take(1).collect()
    } else {
        args.expect_funding_types.clone()
    };

    let mut lines = Vec::new();
    for funding_type in funding_types {
        let filter = NetworkFilter {
            funding_type: Some(funding_type.clone()),
            ..Default::default()
        };
        let result = client.filter_network(&filter).await?;
        ensure(result.stats.total_edges > 0, format!("no '{}' edges", funding_type))?;
        let needle = funding_type.to_lowercase();
        ensure(
            result.edges.iter().all(|e| {
                e.funding_round_type
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            }),
            format!("filter '{}' returned other round types", funding_type),
        )?;
        lines.push(format!(
            "{}: {} node(s), {} edge(s)",
            funding_type, result.stats.total_nodes, result.stats.total_edges
        ));
    }
    Ok(lines)
}

async fn probe_node(client: &RemoteClient, args: &SmokeArgs) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(node) = &args.node {
        return Ok(node.clone());
    }
    let network = client.network(Dataset::Sample, &NetworkFilter::default()).await?;
    network
        .nodes
        .first()
        .map(|n| n.id.clone())
        .ok_or_else(|| "network has no nodes".into())
}

async fn check_search(client: &RemoteClient, args: &SmokeArgs) -> CheckResult {
    let id = probe_node(client, args).await?;
    let results = client.search(&id, Some(10_000)).await?;
    ensure(results.iter().any(|n| n.id == id), format!("'{}' not found by search", id))?;
    Ok(vec![format!("Results Found: {}", results.len())])
}

async fn check_node(client: &RemoteClient, args: &SmokeArgs) -> CheckResult {
    let id = probe_node(client, args).await?;
    let details = client.node(&id).await?;
    ensure(details.node.id == id, "returned a different node")?;
    Ok(vec![
        format!("Node ID: {}", details.node.id),
        format!("Node Type: {}", details.node.kind),
        format!("Connected Nodes: {}", details.connected_nodes.len()),
        format!("Connected Edges: {}", details.connected_edges.len()),
    ])
}

async fn check_centrality(client: &RemoteClient) -> CheckResult {
    let report = client.centrality(None).await?;
    let stats = report.stats;
    ensure(
        stats.avg_degree >= 0.0 && stats.density >= 0.0,
        "negative centrality stats",
    )?;
    Ok(vec![
        format!("Top nodes: {}", report.top_nodes.len()),
        format!("Avg degree: {:.2}, max degree: {}", stats.avg_degree, stats.max_degree),
    ])
}

async fn check_communities(client: &RemoteClient) -> CheckResult {
    let report = client.communities(None).await?;
    ensure(report.community_count == report.communities.len(), "communityCount mismatch")?;
    ensure(report.stats.avg_community_size >= 0.0, "negative average community size")?;
    Ok(vec![
        format!("Communities: {}", report.community_count),
        format!("Largest: {}", report.stats.largest_community),
    ])
}

async fn check_pathways(client: &RemoteClient) -> CheckResult {
    let network = client.network(Dataset::Sample, &NetworkFilter::default()).await?;
    let (source, target) = match network.nodes.as_slice() {
        [first, second, ..] => (first.id.clone(), second.id.clone()),
        _ => return Ok(vec!["[SKIPPED] Not enough nodes".to_string()]),
    };

    let request = PathwayRequest {
        source_id: source,
        target_id: target,
        max_depth: None,
    };
    let report = client.pathways(&request).await?;
    ensure(report.stats.path_count == report.paths.len(), "pathCount mismatch")?;
    Ok(vec![
        format!("{} -> {}", request.source_id, request.target_id),
        format!("Paths found: {}", report.paths.len()),
    ])
}

async fn check_static(client: &RemoteClient) -> CheckResult {
    let (status, content_type) = client.fetch_page("/pages/network_explorer.html").await?;
    ensure(status == 200, format!("status {}", status))?;
    Ok(vec![
        format!("Status: {}", status),
        format!("Content-Type: {}", content_type.unwrap_or_default()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_count() {
        assert!(expect_count("nodes", 740, Some(740)).is_ok());
        assert!(expect_count("nodes", 740, None).is_ok());

        let err = expect_count("nodes", 12, Some(740)).unwrap_err();
        assert_eq!(err.to_string(), "nodes: expected 740, got 12");
    }

    #[test]
    fn test_tally_counts_outcomes() {
        let mut tally = Tally::default();
        tally.record(1, "ok", Ok(vec!["fine".to_string()]));
        tally.record(2, "bad", Err("broken".into()));
        assert_eq!(tally.passed, 1);
        assert_eq!(tally.failed, 1);
    }
}
