//! Shortest-path centrality measures
//!
//! Both measures treat the view as unweighted and follow `successors`, so a
//! symmetric view gives the undirected variants.

use super::common::{GraphView, NodeId};
use rayon::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Betweenness configuration
#[derive(Debug, Clone, Copy)]
pub struct BetweennessConfig {
    /// Halve pair dependencies, as each unordered pair is visited twice
    pub undirected: bool,
    /// Scale into [0, 1] by the number of possible pairs
    pub normalized: bool,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            undirected: true,
            normalized: true,
        }
    }
}

/// Closeness centrality (Wasserman-Faust).
///
/// For a node reaching `r` other nodes at total distance `s`, the score is
/// `(r / s) * (r / (n - 1))`, which stays comparable across disconnected
/// components. Isolated nodes score 0.
pub fn closeness_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    if n == 0 {
        return HashMap::new();
    }

    let scores: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|source| {
            let dist = bfs_distances(view, source);
            let mut reached = 0usize;
            let mut total = 0usize;
            for d in dist.iter().flatten() {
                if *d > 0 {
                    reached += 1;
                    total += d;
                }
            }
            if total == 0 || n < 2 {
                0.0
            } else {
                let r = reached as f64;
                (r / total as f64) * (r / (n - 1) as f64)
            }
        })
        .collect();

    view.index_to_node.iter().copied().zip(scores).collect()
}

/// Betweenness centrality (Brandes, unweighted).
pub fn betweenness_centrality(view: &GraphView, config: BetweennessConfig) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    if n == 0 {
        return HashMap::new();
    }

    let mut totals = (0..n)
        .into_par_iter()
        .map(|source| single_source_dependencies(view, source))
        .reduce(
            || vec![0.0; n],
            |mut acc, part| {
                for (a, p) in acc.iter_mut().zip(part) {
                    *a += p;
                }
                acc
            },
        );

    if config.undirected {
        totals.iter_mut().for_each(|v| *v /= 2.0);
    }

    if config.normalized {
        let pairs = if n < 3 {
            0.0
        } else if config.undirected {
            ((n - 1) * (n - 2)) as f64 / 2.0
        } else {
            ((n - 1) * (n - 2)) as f64
        };
        for v in totals.iter_mut() {
            *v = if pairs > 0.0 { *v / pairs } else { 0.0 };
        }
    }

    view.index_to_node.iter().copied().zip(totals).collect()
}

fn bfs_distances(view: &GraphView, source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.node_count];
    let mut queue = VecDeque::new();
    dist[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next_dist = dist[current].map(|d| d + 1);
        for &next in view.successors(current) {
            if dist[next].is_none() {
                dist[next] = next_dist;
                queue.push_back(next);
            }
        }
    }

    dist
}

/// One Brandes pass: dependency of `source` on every node.
fn single_source_dependencies(view: &GraphView, source: usize) -> Vec<f64> {
    let n = view.node_count;
    let mut stack = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut queue = VecDeque::new();

    sigma[source] = 1.0;
    dist[source] = 0;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in view.successors(v) {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0f64; n];
    while let Some(w) = stack.pop() {
        for &v in &preds[w] {
            delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
        }
    }
    delta[source] = 0.0;
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_support::undirected;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_path_graph_betweenness() {
        // 1 - 2 - 3
        let view = undirected(3, &[(0, 1), (1, 2)]);
        let raw = betweenness_centrality(
            &view,
            BetweennessConfig { undirected: true, normalized: false },
        );
        assert!(approx(raw[&1], 0.0));
        assert!(approx(raw[&2], 1.0));
        assert!(approx(raw[&3], 0.0));

        let normalized = betweenness_centrality(&view, BetweennessConfig::default());
        assert!(approx(normalized[&2], 1.0));
    }

    #[test]
    fn test_star_betweenness() {
        // Center 1 with leaves 2..5: center lies on all C(4,2) = 6 leaf pairs
        let view = undirected(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let raw = betweenness_centrality(
            &view,
            BetweennessConfig { undirected: true, normalized: false },
        );
        assert!(approx(raw[&1], 6.0));
        assert!(approx(raw[&2], 0.0));
    }

    #[test]
    fn test_square_splits_shortest_paths() {
        // 1-2-3-4-1: two shortest paths between opposite corners
        let view = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let raw = betweenness_centrality(
            &view,
            BetweennessConfig { undirected: true, normalized: false },
        );
        for id in 1..=4 {
            assert!(approx(raw[&id], 0.5));
        }
    }

    #[test]
    fn test_closeness_disconnected() {
        // 1 - 2 - 3, 4 isolated
        let view = undirected(4, &[(0, 1), (1, 2)]);
        let scores = closeness_centrality(&view);

        // Node 2 reaches 2 nodes at total distance 2 -> (2/2) * (2/3)
        assert!(approx(scores[&2], 2.0 / 3.0));
        // Node 1 reaches 2 nodes at total distance 3 -> (2/3) * (2/3)
        assert!(approx(scores[&1], 4.0 / 9.0));
        assert!(approx(scores[&4], 0.0));
    }

    #[test]
    fn test_small_graphs_are_zero() {
        let view = undirected(2, &[(0, 1)]);
        let scores = betweenness_centrality(&view, BetweennessConfig::default());
        assert!(scores.values().all(|v| *v == 0.0));
    }
}
