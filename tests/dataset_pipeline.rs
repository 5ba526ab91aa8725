use linkup::analysis::NetworkFilter;
use linkup::dataset::{load_network, save_network, DatasetBuilder};
use linkup::graph::NodeKind;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INVESTMENTS: &str = "\
id,funding_round_id,funded_object_id,investor_object_id,created_at
1,10.0,c:1,f:1,2008-03-01 00:00:00
2,11,c:1,f:2,2009-01-10 00:00:00
3,12,c:2,f:2,2010-07-01 00:00:00
4,13,c:3,f:3,2011-01-01 00:00:00
5,99,c:4,f:1,2012-01-01 00:00:00
";

const FUNDING_ROUNDS: &str = "\
funding_round_id,object_id,funding_round_type,raised_amount_usd,funded_at,pre_money_valuation_usd,post_money_valuation_usd
10,c:1,series-a,5000000,2008-03-01,0,
11,c:1,angel,250000,2009-01-10,,
12,c:2,angel,,2010-07-01,,
13,c:3,venture,not-a-number,,,
";

const OBJECTS: &str = "\
id,name,category_code,region,country_code
c:1,Acme,web,SF Bay,USA
c:2,Globex,biotech,Boston,USA
f:1,Sequoia Capital,,SF Bay,USA
f:2,Ron Conway,,SF Bay,USA
";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("investments.csv"), INVESTMENTS).unwrap();
    fs::write(dir.join("funding_rounds.csv"), FUNDING_ROUNDS).unwrap();
    fs::write(dir.join("objects.csv"), OBJECTS).unwrap();
}

#[test]
fn test_prepare_save_and_reload() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    let store = DatasetBuilder::new()
        .sample_size(400)
        .build_from_files(
            dir.path().join("investments.csv"),
            dir.path().join("funding_rounds.csv"),
            Some(&dir.path().join("objects.csv")),
        )
        .unwrap();

    // Every row is sampled when the sample size exceeds the input
    let stats = store.statistics();
    assert_eq!(stats.total_edges, 5);
    assert_eq!(stats.companies, 4);
    assert_eq!(stats.investors, 3);
    assert_eq!(stats.total_nodes, stats.companies + stats.investors);

    let acme = store.node_by_key("c:1").unwrap();
    assert_eq!(acme.name, "Acme");
    assert_eq!(acme.industry.as_deref(), Some("web"));
    assert_eq!(acme.region.as_deref(), Some("SF Bay"));

    let sequoia = store.node_by_key("f:1").unwrap();
    assert_eq!(sequoia.kind, NodeKind::Investor);
    assert_eq!(sequoia.get_property("investor_type").unwrap().as_string(), Some("vc"));
    let conway = store.node_by_key("f:2").unwrap();
    assert_eq!(conway.get_property("investor_type").unwrap().as_string(), Some("investor"));
    assert_eq!(store.node_by_key("f:3").unwrap().name, "Investor f:3");

    // Round 99 is missing from funding_rounds.csv
    assert_eq!(stats.funding_types.get("unknown"), Some(&1));
    assert_eq!(stats.funding_types.get("angel"), Some(&2));

    let path = dir.path().join("network.json");
    save_network(&store, &path).unwrap();
    let reloaded = load_network(&path).unwrap();

    assert_eq!(reloaded.statistics(), stats);
    assert_eq!(reloaded.node_by_key("c:1").unwrap().name, "Acme");

    let everything = NetworkFilter::default().apply(&reloaded);
    assert_eq!(everything.nodes.len(), 7);
    assert_eq!(everything.edges.len(), 5);
}

#[test]
fn test_sampling_is_reproducible() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let build = |seed| {
        DatasetBuilder::new()
            .sample_size(3)
            .seed(seed)
            .build_from_files(
                dir.path().join("investments.csv"),
                dir.path().join("funding_rounds.csv"),
                None,
            )
            .unwrap()
    };

    let first = build(42);
    let second = build(42);
    assert_eq!(first.edge_count(), 3);

    let keys = |s: &linkup::GraphStore| s.edges().iter().map(|e| e.key.clone()).collect::<Vec<_>>();
    assert_eq!(keys(&first), keys(&second));
}

#[test]
fn test_max_nodes_prunes_low_degree_nodes() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    let store = DatasetBuilder::new()
        .max_nodes(Some(3))
        .build_from_files(
            dir.path().join("investments.csv"),
            dir.path().join("funding_rounds.csv"),
            None,
        )
        .unwrap();

    assert_eq!(store.node_count(), 3);
    for edge in store.edges() {
        assert!(store.has_node(edge.source));
        assert!(store.has_node(edge.target));
    }
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    assert!(load_network(dir.path().join("absent.json")).is_err());
}
