//! Summary reports over the investment network

use super::build_view;
use crate::graph::{GraphStore, NetworkStats, NodeKind};
use indexmap::IndexMap;
use linkup_graph_algorithms::weakly_connected_components;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Companies with at least this many investments are listed as active
pub const ACTIVE_COMPANY_MIN_DEGREE: usize = 3;
const TOP_INVESTORS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyActivity {
    pub id: String,
    pub name: String,
    /// Investments received
    pub degree: usize,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorActivity {
    pub id: String,
    pub name: String,
    /// Investments made
    pub activity: usize,
    pub investor_type: Option<String>,
}

/// Edge counts by raised amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBuckets {
    /// Missing or zero
    pub no_data: usize,
    /// Below 1M
    pub small: usize,
    /// Below 10M
    pub medium: usize,
    pub large: usize,
}

impl AmountBuckets {
    pub fn record(&mut self, amount: Option<f64>) {
        match amount.unwrap_or(0.0) {
            a if a == 0.0 => self.no_data += 1,
            a if a < 1_000_000.0 => self.small += 1,
            a if a < 10_000_000.0 => self.medium += 1,
            _ => self.large += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub count: usize,
    pub largest: usize,
    pub isolated_nodes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub summary: NetworkStats,
    pub active_companies: Vec<CompanyActivity>,
    pub top_investors: Vec<InvestorActivity>,
    pub funding_type_distribution: IndexMap<String, usize>,
    pub amount_distribution: AmountBuckets,
    /// degree -> number of nodes with that degree
    pub degree_distribution: BTreeMap<usize, usize>,
    pub components: ComponentSummary,
}

/// Build the network report
pub fn build_report(store: &GraphStore) -> NetworkReport {
    let summary = store.statistics();

    let mut received = vec![0usize; store.node_count()];
    let mut made = vec![0usize; store.node_count()];
    let mut amounts = AmountBuckets::default();
    for edge in store.edges() {
        received[edge.target.as_u64() as usize] += 1;
        made[edge.source.as_u64() as usize] += 1;
        amounts.record(edge.round.raised_amount);
    }

    let active_companies = store
        .nodes_of_kind(NodeKind::Company)
        .filter(|n| received[n.id.as_u64() as usize] >= ACTIVE_COMPANY_MIN_DEGREE)
        .map(|n| CompanyActivity {
            id: n.key.clone(),
            name: n.name.clone(),
            degree: received[n.id.as_u64() as usize],
            industry: n.industry.clone(),
        })
        .collect();

    let mut investors: Vec<_> = store
        .nodes_of_kind(NodeKind::Investor)
        .filter(|n| made[n.id.as_u64() as usize] > 0)
        .collect();
    // Stable: equal activity keeps node order
    investors.sort_by_key(|n| std::cmp::Reverse(made[n.id.as_u64() as usize]));
    let top_investors = investors
        .into_iter()
        .take(TOP_INVESTORS)
        .map(|n| InvestorActivity {
            id: n.key.clone(),
            name: n.name.clone(),
            activity: made[n.id.as_u64() as usize],
            investor_type: n
                .get_property("investor_type")
                .and_then(|v| v.as_string())
                .map(str::to_string),
        })
        .collect();

    let mut degree_distribution = BTreeMap::new();
    for node in store.nodes() {
        *degree_distribution.entry(store.degree(node.id)).or_insert(0) += 1;
    }

    let partition = weakly_connected_components(&build_view(store));
    let components = ComponentSummary {
        count: partition.communities.len(),
        largest: partition.communities.values().map(Vec::len).max().unwrap_or(0),
        isolated_nodes: partition.communities.values().filter(|c| c.len() == 1).count(),
    };

    NetworkReport {
        funding_type_distribution: summary.funding_types.clone(),
        summary,
        active_companies,
        top_investors,
        amount_distribution: amounts,
        degree_distribution,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::sample_store;

    #[test]
    fn test_active_companies() {
        let store = sample_store();
        let report = build_report(&store);
        assert_eq!(report.active_companies.len(), 1);
        assert_eq!(report.active_companies[0].id, "c:1");
        assert_eq!(report.active_companies[0].degree, 3);
    }

    #[test]
    fn test_top_investors() {
        let store = sample_store();
        let report = build_report(&store);
        let ids: Vec<(&str, usize)> = report
            .top_investors
            .iter()
            .map(|i| (i.id.as_str(), i.activity))
            .collect();
        assert_eq!(ids, vec![("f:1", 3), ("f:2", 2), ("f:3", 2)]);
    }

    #[test]
    fn test_amount_buckets() {
        let store = sample_store();
        let report = build_report(&store);
        assert_eq!(
            report.amount_distribution,
            AmountBuckets {
                no_data: 4,
                small: 1,
                medium: 1,
                large: 1
            }
        );
        let total = report.amount_distribution.no_data
            + report.amount_distribution.small
            + report.amount_distribution.medium
            + report.amount_distribution.large;
        assert_eq!(total, store.edge_count());
    }

    #[test]
    fn test_distributions_and_components() {
        let store = sample_store();
        let report = build_report(&store);

        assert_eq!(report.funding_type_distribution["angel"], 3);
        assert_eq!(report.degree_distribution[&0], 1);
        assert_eq!(report.degree_distribution[&3], 2);
        assert_eq!(report.degree_distribution.values().sum::<usize>(), 8);
        assert_eq!(
            report.components,
            ComponentSummary {
                count: 2,
                largest: 7,
                isolated_nodes: 1
            }
        );
    }
}
