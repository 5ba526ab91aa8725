//! Sampled network construction from CSV rows

use super::csv::{normalize_id, read_rows, FundingRoundRow, InvestmentRow, ObjectRow};
use super::{DatasetError, DatasetResult};
use crate::graph::{parse_round_date, FundingRound, GraphStore, Node, NodeKind, UNKNOWN_ROUND_TYPE};
use indexmap::IndexSet;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use std::path::Path;
use tracing::{debug, info};

/// Builds an investment network from a random sample of investments
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    sample_size: usize,
    seed: u64,
    max_nodes: Option<usize>,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self {
            sample_size: 400,
            seed: 42,
            max_nodes: None,
        }
    }
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of investment rows to sample
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// RNG seed for sampling
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep only the `max_nodes` best-connected nodes
    pub fn max_nodes(mut self, max_nodes: Option<usize>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Read the CSV files and build the network
    pub fn build_from_files(
        &self,
        investments: impl AsRef<Path>,
        funding_rounds: impl AsRef<Path>,
        objects: Option<&Path>,
    ) -> DatasetResult<GraphStore> {
        let investments: Vec<InvestmentRow> = read_rows(investments)?;
        let rounds: Vec<FundingRoundRow> = read_rows(funding_rounds)?;
        let objects: Vec<ObjectRow> = match objects {
            Some(path) => read_rows(path)?,
            None => Vec::new(),
        };
        info!(
            investments = investments.len(),
            funding_rounds = rounds.len(),
            objects = objects.len(),
            "Read CSV inputs"
        );
        self.build(&investments, &rounds, &objects)
    }

    /// Sample investments and build the network.
    ///
    /// Companies are created first (in sample order), then investors, then
    /// one edge per sampled investment.
    pub fn build(
        &self,
        investments: &[InvestmentRow],
        rounds: &[FundingRoundRow],
        objects: &[ObjectRow],
    ) -> DatasetResult<GraphStore> {
        if investments.is_empty() {
            return Err(DatasetError::InvalidData("no investment rows to sample".to_string()));
        }

        let sample = self.sample(investments);
        debug!(sampled = sample.len(), seed = self.seed, "Sampled investments");

        let rounds_by_id: FxHashMap<String, &FundingRoundRow> = rounds
            .iter()
            .map(|r| (normalize_id(&r.funding_round_id), r))
            .collect();
        let objects_by_id: FxHashMap<String, &ObjectRow> =
            objects.iter().map(|o| (normalize_id(&o.id), o)).collect();

        let companies: IndexSet<String> = sample.iter().map(|r| normalize_id(&r.funded_object_id)).collect();
        let investors: IndexSet<String> = sample.iter().map(|r| normalize_id(&r.investor_object_id)).collect();

        let mut store = GraphStore::with_capacity(companies.len() + investors.len(), sample.len());
        for key in &companies {
            add_entity(&mut store, key, NodeKind::Company, objects_by_id.get(key).copied());
        }
        for key in &investors {
            add_entity(&mut store, key, NodeKind::Investor, objects_by_id.get(key).copied());
        }

        for row in &sample {
            let round = row
                .funding_round_id
                .as_deref()
                .map(normalize_id)
                .and_then(|id| rounds_by_id.get(&id).copied())
                .map(round_from_row)
                .unwrap_or_default();
            store.add_edge_by_key(
                &normalize_id(&row.investor_object_id),
                &normalize_id(&row.funded_object_id),
                round,
            )?;
        }

        let store = match self.max_nodes {
            Some(max) if store.node_count() > max => prune_by_degree(&store, max),
            _ => store,
        };

        let stats = store.statistics();
        info!(
            nodes = stats.total_nodes,
            edges = stats.total_edges,
            companies = stats.companies,
            investors = stats.investors,
            role_conflicts = store.role_conflicts().len(),
            "Built investment network"
        );
        Ok(store)
    }

    /// Sample without replacement, in sample order
    fn sample<'a>(&self, investments: &'a [InvestmentRow]) -> Vec<&'a InvestmentRow> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let amount = self.sample_size.min(investments.len());
        rand::seq::index::sample(&mut rng, investments.len(), amount)
            .into_iter()
            .map(|i| &investments[i])
            .collect()
    }
}

fn add_entity(store: &mut GraphStore, key: &str, kind: NodeKind, object: Option<&ObjectRow>) {
    let known_name = object.and_then(|o| o.name.clone()).filter(|n| !n.trim().is_empty());
    let name = known_name
        .clone()
        .unwrap_or_else(|| Node::default_name(kind, key));

    let id = store.add_node(key, kind, name.clone());
    let Some(node) = store.get_node_mut(id) else {
        return;
    };
    if node.kind != kind {
        return;
    }

    if known_name.is_some() {
        node.label = name.clone();
    }
    if let Some(object) = object {
        node.industry = object.category_code.clone();
        node.region = object.region.clone();
        if let Some(country) = &object.country_code {
            node.set_property("country_code", country.as_str());
        }
    }
    if kind == NodeKind::Investor {
        let lower = name.to_lowercase();
        let investor_type = if lower.contains("fund") || lower.contains("capital") {
            "vc"
        } else {
            "investor"
        };
        node.set_property("investor_type", investor_type);
    }
}

fn round_from_row(row: &FundingRoundRow) -> FundingRound {
    FundingRound {
        round_type: row
            .funding_round_type
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ROUND_TYPE.to_string()),
        raised_amount: row.raised_amount_usd,
        date: row.funded_at.as_deref().and_then(parse_round_date),
        pre_money_valuation: row.pre_money_valuation_usd,
        post_money_valuation: row.post_money_valuation_usd,
    }
}

/// Keep the `max_nodes` highest-degree nodes and the edges between them.
///
/// Ties in degree keep the earlier node. Surviving nodes stay in their
/// original order.
pub fn prune_by_degree(store: &GraphStore, max_nodes: usize) -> GraphStore {
    let mut ranked: Vec<&Node> = store.nodes().iter().collect();
    ranked.sort_by_key(|n| std::cmp::Reverse(store.degree(n.id)));
    let mut keep = vec![false; store.node_count()];
    for node in ranked.into_iter().take(max_nodes) {
        keep[node.id.as_u64() as usize] = true;
    }

    let mut pruned = GraphStore::new();
    for node in store.nodes().iter().filter(|n| keep[n.id.as_u64() as usize]) {
        pruned.insert_node(node.clone());
    }
    for edge in store.edges() {
        if !(keep[edge.source.as_u64() as usize] && keep[edge.target.as_u64() as usize]) {
            continue;
        }
        let (Some(source), Some(target)) = (store.get_node(edge.source), store.get_node(edge.target)) else {
            continue;
        };
        if let Ok(id) = pruned.add_edge_by_key(&source.key, &target.key, edge.round.clone()) {
            if let Some(new_edge) = pruned.get_edge_mut(id) {
                new_edge.key = edge.key.clone();
            }
        }
    }

    for key in store.role_conflicts() {
        if pruned.node_id(key).is_some() {
            pruned.record_role_conflict(key);
        }
    }

    debug!(
        before = store.node_count(),
        after = pruned.node_count(),
        edges = pruned.edge_count(),
        "Pruned network by degree"
    );
    pruned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investment(round: &str, company: &str, investor: &str) -> InvestmentRow {
        InvestmentRow {
            funding_round_id: Some(round.to_string()),
            funded_object_id: company.to_string(),
            investor_object_id: investor.to_string(),
            created_at: None,
        }
    }

    fn round(id: &str, kind: &str, amount: Option<f64>, date: &str) -> FundingRoundRow {
        FundingRoundRow {
            funding_round_id: id.to_string(),
            funding_round_type: Some(kind.to_string()),
            raised_amount_usd: amount,
            funded_at: Some(date.to_string()),
            pre_money_valuation_usd: None,
            post_money_valuation_usd: None,
        }
    }

    fn fixture() -> (Vec<InvestmentRow>, Vec<FundingRoundRow>) {
        let investments = vec![
            investment("1", "c:1", "f:1"),
            investment("2", "c:2", "f:1"),
            investment("3", "c:1", "p:7"),
            investment("9", "c:3", "f:2"),
            investment("4.0", "c:2", "f:2"),
        ];
        let rounds = vec![
            round("1", "series-a", Some(2_000_000.0), "2008-01-10"),
            round("2", "angel", Some(250_000.0), "2007-05-01"),
            round("3", "angel", None, "2009-11-30"),
            round("4", "series-b", Some(20_000_000.0), "2010-02-02"),
        ];
        (investments, rounds)
    }

    #[test]
    fn test_build_full_sample() {
        let (investments, rounds) = fixture();
        let store = DatasetBuilder::new().build(&investments, &rounds, &[]).unwrap();
        let stats = store.statistics();

        assert_eq!(stats.total_edges, 5);
        assert_eq!(stats.companies, 3);
        assert_eq!(stats.investors, 3);
        assert_eq!(stats.total_nodes, stats.companies + stats.investors);

        // Companies first, then investors
        let kinds: Vec<NodeKind> = store.nodes().iter().map(|n| n.kind).collect();
        let first_investor = kinds.iter().position(|k| *k == NodeKind::Investor).unwrap();
        assert!(kinds[first_investor..].iter().all(|k| *k == NodeKind::Investor));

        // Round 9 has no funding row; 4.0 resolves to round 4
        assert_eq!(stats.funding_types["unknown"], 1);
        assert_eq!(stats.funding_types["series-b"], 1);
        assert_eq!(stats.funding_types["angel"], 2);

        for edge in store.edges() {
            assert!(store.get_node(edge.source).unwrap().is_investor());
            assert!(store.get_node(edge.target).unwrap().is_company());
        }
    }

    #[test]
    fn test_dual_role_entity_is_reported() {
        let (mut investments, rounds) = fixture();
        // c:2 is funded and also invests in c:3
        investments.push(investment("4", "c:3", "c:2"));
        let store = DatasetBuilder::new().build(&investments, &rounds, &[]).unwrap();

        assert_eq!(store.role_conflicts(), ["c:2".to_string()]);
        let dual = store.node_id("c:2").unwrap();
        assert!(store.get_node(dual).unwrap().is_company());
        assert_eq!(store.statistics().investors, 3);

        let pruned = prune_by_degree(&store, 3);
        let kept = pruned.node_id("c:2").is_some();
        assert_eq!(pruned.role_conflicts().is_empty(), !kept);
    }

    #[test]
    fn test_sampling_is_seeded() {
        let (investments, rounds) = fixture();
        let a = DatasetBuilder::new().sample_size(3).build(&investments, &rounds, &[]).unwrap();
        let b = DatasetBuilder::new().sample_size(3).build(&investments, &rounds, &[]).unwrap();

        assert_eq!(a.edge_count(), 3);
        let keys_a: Vec<&str> = a.edges().iter().map(|e| e.key.as_str()).collect();
        let keys_b: Vec<&str> = b.edges().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys_a, keys_b);
    }

    #[test]
    fn test_names_from_objects() {
        let (investments, rounds) = fixture();
        let objects = vec![
            ObjectRow {
                id: "c:1".to_string(),
                name: Some("Acme".to_string()),
                category_code: Some("web".to_string()),
                region: Some("SF Bay".to_string()),
                country_code: Some("USA".to_string()),
            },
            ObjectRow {
                id: "f:1".to_string(),
                name: Some("Blue Capital".to_string()),
                category_code: None,
                region: None,
                country_code: None,
            },
        ];
        let store = DatasetBuilder::new().build(&investments, &rounds, &objects).unwrap();

        let acme = store.node_by_key("c:1").unwrap();
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.label, "Acme");
        assert_eq!(acme.industry.as_deref(), Some("web"));
        assert_eq!(acme.get_property("country_code").unwrap().as_string(), Some("USA"));

        let fund = store.node_by_key("f:1").unwrap();
        assert_eq!(fund.get_property("investor_type").unwrap().as_string(), Some("vc"));
        let person = store.node_by_key("p:7").unwrap();
        assert_eq!(person.name, "Investor p:7");
        assert_eq!(person.get_property("investor_type").unwrap().as_string(), Some("investor"));
    }

    #[test]
    fn test_empty_investments_is_error() {
        let err = DatasetBuilder::new().build(&[], &[], &[]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidData(_)));
    }

    #[test]
    fn test_prune_by_degree() {
        let mut store = GraphStore::new();
        for key in ["c:1", "c:2", "c:3"] {
            store.add_node(key, NodeKind::Company, key);
        }
        for key in ["f:1", "f:2"] {
            store.add_node(key, NodeKind::Investor, key);
        }
        store.add_edge_by_key("f:1", "c:1", FundingRound::of_type("angel")).unwrap();
        store.add_edge_by_key("f:1", "c:2", FundingRound::of_type("angel")).unwrap();
        store.add_edge_by_key("f:1", "c:3", FundingRound::of_type("seed")).unwrap();
        store.add_edge_by_key("f:2", "c:1", FundingRound::of_type("series-a")).unwrap();

        // Degrees: f:1 = 3, c:1 = 2, then c:2, c:3, f:2 tie at 1
        let pruned = prune_by_degree(&store, 3);
        let keys: Vec<&str> = pruned.nodes().iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["c:1", "c:2", "f:1"]);

        let edges: Vec<&str> = pruned.edges().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(edges, vec!["f:1-c:1", "f:1-c:2"]);
        assert_eq!(pruned.statistics().total_nodes, 3);
    }
}
