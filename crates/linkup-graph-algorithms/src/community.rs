//! Community detection algorithms
//!
//! Weakly connected components and label propagation.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// A node partition: component/label id -> members, and the reverse map.
///
/// Member lists are in ascending index order.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Map of Community ID -> List of NodeIds
    pub communities: HashMap<usize, Vec<NodeId>>,
    /// Map of NodeId -> Community ID
    pub node_community: HashMap<NodeId, usize>,
}

impl Partition {
    fn from_labels(view: &GraphView, labels: &[usize]) -> Self {
        let mut communities: HashMap<usize, Vec<NodeId>> = HashMap::new();
        let mut node_community = HashMap::with_capacity(view.node_count);

        for (idx, &label) in labels.iter().enumerate() {
            let node_id = view.index_to_node[idx];
            communities.entry(label).or_default().push(node_id);
            node_community.insert(node_id, label);
        }

        Partition {
            communities,
            node_community,
        }
    }

    /// Community member lists, largest first; ties by community id.
    pub fn sorted_by_size(&self) -> Vec<&Vec<NodeId>> {
        let mut groups: Vec<(usize, &Vec<NodeId>)> =
            self.communities.iter().map(|(&id, members)| (id, members)).collect();
        groups.sort_by(|(a_id, a), (b_id, b)| b.len().cmp(&a.len()).then(a_id.cmp(b_id)));
        groups.into_iter().map(|(_, members)| members).collect()
    }
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]); // Path compression
        }
        self.parent[i]
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Weakly Connected Components (WCC)
///
/// Finds all disjoint subgraphs in the graph.
/// Ignores edge direction. Component ids are the smallest member index.
pub fn weakly_connected_components(view: &GraphView) -> Partition {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    for u_idx in 0..n {
        for &v_idx in view.successors(u_idx) {
            uf.union(u_idx, v_idx);
        }
    }

    let mut first_member: HashMap<usize, usize> = HashMap::new();
    let labels: Vec<usize> = (0..n)
        .map(|i| {
            let root = uf.find(i);
            *first_member.entry(root).or_insert(i)
        })
        .collect();

    Partition::from_labels(view, &labels)
}

/// Label propagation.
///
/// Nodes are visited in index order and adopt the most frequent label among
/// their successors. Views built with [`GraphView::undirected`] list every
/// neighbour there exactly once. On a tie a node keeps its current
/// label when it is among the winners, otherwise it takes the largest one,
/// so the result is deterministic. Stops when a sweep changes nothing or
/// after `max_iterations` sweeps.
pub fn label_propagation(view: &GraphView, max_iterations: usize) -> Partition {
    let n = view.node_count;
    let mut labels: Vec<usize> = (0..n).collect();
    let mut counts: HashMap<usize, usize> = HashMap::new();

    for _ in 0..max_iterations {
        let mut changed = false;

        for idx in 0..n {
            counts.clear();
            for &nb in view.successors(idx) {
                *counts.entry(labels[nb]).or_insert(0) += 1;
            }

            let best = counts
                .iter()
                .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then(la.cmp(lb)))
                .map(|(&label, &count)| (label, count));

            if let Some((label, count)) = best {
                let current = counts.get(&labels[idx]).copied().unwrap_or(0);
                if current < count && label != labels[idx] {
                    labels[idx] = label;
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    Partition::from_labels(view, &labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::undirected;
    use crate::common::GraphView;

    #[test]
    fn test_wcc() {
        // Nodes: 1, 2, 3, 4, 5, 6
        // Edges: 1->2, 3->4->5, 6 (isolated)
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3, 4, 5, 6],
            vec![vec![1], vec![], vec![3], vec![4], vec![], vec![]],
            vec![vec![], vec![0], vec![], vec![2], vec![3], vec![]],
        );

        let result = weakly_connected_components(&view);

        assert_eq!(result.communities.len(), 3);

        let c1 = result.node_component(1);
        let c2 = result.node_component(2);
        assert_eq!(c1, c2);

        let c3 = result.node_component(3);
        assert_eq!(c3, result.node_component(4));
        assert_eq!(c3, result.node_component(5));
        assert_ne!(c1, c3);

        let sizes: Vec<usize> = result.sorted_by_size().iter().map(|m| m.len()).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
    }

    #[test]
    fn test_label_propagation_two_cliques() {
        // Two triangles joined by a single bridge 3-4
        let view = undirected(
            6,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        );
        let result = label_propagation(&view, 20);

        assert_eq!(result.node_community(1), result.node_community(2));
        assert_eq!(result.node_community(4), result.node_community(6));
        assert_ne!(result.node_community(1), result.node_community(6));
    }

    #[test]
    fn test_label_propagation_isolated_nodes_keep_own_label() {
        let view = undirected(3, &[]);
        let result = label_propagation(&view, 5);
        assert_eq!(result.communities.len(), 3);
    }

    #[test]
    fn test_label_propagation_counts_successors_only() {
        // 1->2, 1->3, 4->1: node 1 sees labels of 2 and 3, never of 4
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 3, 4],
            vec![vec![1, 2], vec![], vec![], vec![0]],
            vec![vec![3], vec![0], vec![0], vec![]],
        );
        let result = label_propagation(&view, 10);

        assert_eq!(result.node_community(1), result.node_community(3));
        assert_eq!(result.node_community(4), result.node_community(3));
        assert_ne!(result.node_community(1), result.node_community(2));
        assert_eq!(result.communities.len(), 2);
    }

    impl Partition {
        fn node_component(&self, id: NodeId) -> usize {
            self.node_community[&id]
        }
    }
}
