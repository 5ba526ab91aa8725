//! PageRank over the investment view
//!
//! Scores form a probability distribution: they sum to one whatever the
//! network size, so a score can be compared between the sample and the
//! full dataset. Nodes with no outgoing adjacency (isolated companies or
//! investors) hand their score back to the teleport pool every round.

use super::common::{GraphView, NodeId};
use rayon::prelude::*;
use std::collections::HashMap;

/// PageRank configuration
#[derive(Debug, Clone, Copy)]
pub struct PageRankConfig {
    /// Probability of following an edge rather than teleporting
    pub damping_factor: f64,
    /// Maximum number of rounds
    pub iterations: usize,
    /// Stop once the summed absolute change drops below this
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 50,
            tolerance: 1e-9,
        }
    }
}

/// Stationary PageRank of every node in the view, summing to one.
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    if n == 0 {
        return HashMap::new();
    }

    let uniform = 1.0 / n as f64;
    let d = config.damping_factor;
    let mut scores = vec![uniform; n];
    let mut next_scores = vec![0.0; n];

    for _ in 0..config.iterations {
        let dangling: f64 = (0..n)
            .filter(|&i| view.out_degree(i) == 0)
            .map(|i| scores[i])
            .sum();
        let teleport = ((1.0 - d) + d * dangling) * uniform;

        next_scores.par_iter_mut().enumerate().for_each(|(i, next)| {
            let incoming: f64 = view
                .predecessors(i)
                .iter()
                .map(|&src| scores[src] / view.out_degree(src).max(1) as f64)
                .sum();
            *next = teleport + d * incoming;
        });

        let total_diff: f64 = scores
            .iter()
            .zip(&next_scores)
            .map(|(old, new)| (new - old).abs())
            .sum();
        std::mem::swap(&mut scores, &mut next_scores);

        if total_diff < config.tolerance {
            break;
        }
    }

    // Float drift over many rounds
    let total: f64 = scores.iter().sum();
    scores
        .into_iter()
        .enumerate()
        .map(|(idx, score)| (view.index_to_node[idx], score / total))
        .collect()
}
