use linkup::analysis::{
    build_report, compute_centrality, detect_communities, find_pathways, shortest_path, CommunityMethod,
    NetworkFilter, PathwayLimits, PathwayRequest,
};
use linkup::graph::{FundingRound, GraphStore, NodeKind};
use std::collections::HashSet;

/// A small deterministic network: 12 companies, 6 investors, two clusters
/// joined by a single co-investment, plus an isolated company.
fn network() -> GraphStore {
    let mut store = GraphStore::new();
    for i in 1..=12 {
        store.add_node(&format!("c:{}", i), NodeKind::Company, format!("Company {}", i));
    }
    for i in 1..=6 {
        store.add_node(&format!("f:{}", i), NodeKind::Investor, format!("Fund {}", i));
    }

    let rounds = ["angel", "series-a", "series-b", "venture"];
    let links = [
        (1, 1), (1, 2), (1, 3), (2, 2), (2, 3), (2, 4), (3, 1), (3, 4), (3, 5),
        (4, 6), (4, 7), (5, 7), (5, 8), (5, 9), (6, 9), (6, 10), (6, 6),
        (3, 6),
    ];
    for (i, (investor, company)) in links.iter().enumerate() {
        store
            .add_edge_by_key(
                &format!("f:{}", investor),
                &format!("c:{}", company),
                FundingRound::of_type(rounds[i % rounds.len()]).with_raised_amount((i as f64) * 750_000.0),
            )
            .unwrap();
    }
    store
}

#[test]
fn test_filter_results_are_subsets() {
    let store = network();
    let all_edges: HashSet<String> = store.edges().iter().map(|e| e.key.clone()).collect();

    for funding_type in ["angel", "series", "venture", "missing"] {
        let filter = NetworkFilter {
            funding_type: Some(funding_type.to_string()),
            ..Default::default()
        };
        let result = filter.apply(&store);
        let node_keys: HashSet<&str> = result.nodes.iter().map(|n| n.id.as_str()).collect();

        for edge in &result.edges {
            assert!(all_edges.contains(&edge.key()));
            assert!(node_keys.contains(edge.source.as_str()));
            assert!(node_keys.contains(edge.target.as_str()));
            assert!(edge.round.funding_round_type.as_deref().unwrap().contains(funding_type));
        }
        assert!(result.nodes.len() <= store.node_count());
    }
}

#[test]
fn test_centrality_stats_are_consistent() {
    let store = network();
    let report = compute_centrality(&store, 5);

    assert_eq!(report.centrality.len(), store.node_count());
    assert_eq!(report.top_nodes.len(), 5);
    assert!(report.stats.avg_degree >= 0.0);
    assert!(report.stats.density >= 0.0 && report.stats.density <= 1.0);

    let max_degree = store.nodes().iter().map(|n| store.degree(n.id)).max().unwrap();
    assert_eq!(report.stats.max_degree, max_degree);

    for scores in report.centrality.values() {
        assert!(scores.closeness >= 0.0 && scores.closeness <= 1.0);
        assert!(scores.betweenness >= 0.0);
        assert!(scores.pagerank >= 0.0);
    }

    // The isolated company lies on no path
    assert_eq!(report.centrality["c:11"].betweenness, 0.0);
    assert_eq!(report.centrality["c:11"].degree, 0);
}

#[test]
fn test_partitions_cover_every_node_once() {
    let store = network();
    for method in [CommunityMethod::Components, CommunityMethod::LabelPropagation] {
        let report = detect_communities(&store, method);

        let mut seen = HashSet::new();
        for community in &report.communities {
            assert_eq!(community.nodes.len(), community.node_count);
            for key in &community.nodes {
                assert!(seen.insert(key.clone()), "{} listed twice by {}", key, method);
            }
        }
        assert_eq!(seen.len(), store.node_count());
        assert_eq!(report.community_count, report.communities.len());
        assert!(report.stats.avg_community_size > 0.0);
        assert!(report.stats.modularity <= 1.0);
    }

    let components = detect_communities(&store, CommunityMethod::Components);
    // One connected body plus the isolated c:11 and c:12
    assert_eq!(components.community_count, 3);
    assert!(components.stats.modularity >= 0.0);
}

#[test]
fn test_pathway_stats_match_paths() {
    let store = network();
    let request = PathwayRequest::new("c:1", "c:9");
    let report = find_pathways(&store, &request, PathwayLimits::default()).unwrap();

    assert!(!report.paths.is_empty());
    assert_eq!(report.stats.path_count, report.paths.len());

    let mean = report.paths.iter().map(Vec::len).sum::<usize>() as f64 / report.paths.len() as f64;
    assert!((report.stats.avg_path_length - mean).abs() < 1e-9);

    for window in report.paths.windows(2) {
        assert!(window[0].len() <= window[1].len());
    }
    for path in &report.paths {
        assert_eq!(path.first().map(String::as_str), Some("c:1"));
        assert_eq!(path.last().map(String::as_str), Some("c:9"));
        assert!(path.len() - 1 <= 5);
        let unique: HashSet<&String> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
    }

    let shortest = shortest_path(&store, "c:1", "c:9").unwrap().unwrap();
    assert_eq!(report.shortest_path_length, Some(shortest.len()));
    assert_eq!(report.paths[0].len(), shortest.len());
}

#[test]
fn test_disconnected_pathway_is_empty() {
    let store = network();
    let report = find_pathways(&store, &PathwayRequest::new("c:1", "c:11"), PathwayLimits::default()).unwrap();
    assert!(report.paths.is_empty());
    assert_eq!(report.shortest_path_length, None);
    assert_eq!(report.stats.avg_path_length, 0.0);
}

#[test]
fn test_report_totals() {
    let store = network();
    let report = build_report(&store);

    assert_eq!(report.summary.total_nodes, report.summary.companies + report.summary.investors);
    let buckets = report.amount_distribution;
    assert_eq!(buckets.no_data + buckets.small + buckets.medium + buckets.large, store.edge_count());

    let by_degree: usize = report.degree_distribution.values().sum();
    assert_eq!(by_degree, store.node_count());
    assert_eq!(report.components.isolated_nodes, 2);
    assert!(report.top_investors.len() <= 10);
    assert!(report.active_companies.iter().all(|c| c.degree >= 3));
}
