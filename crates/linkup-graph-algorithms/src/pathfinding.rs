//! Pathfinding algorithms
//!
//! BFS shortest path and bounded simple-path enumeration.

use super::common::{GraphView, NodeId};
use std::collections::{HashMap, VecDeque};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

/// Breadth-First Search (Unweighted Shortest Path)
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut queue = VecDeque::new();
    let mut visited = HashMap::new(); // index -> parent_index

    queue.push_back(source_idx);
    visited.insert(source_idx, None);

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            let mut path = Vec::new();
            let mut curr = Some(target_idx);
            while let Some(idx) = curr {
                path.push(view.index_to_node[idx]);
                curr = visited.get(&idx).copied().flatten();
            }
            path.reverse();
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next_idx in view.successors(current_idx) {
            if !visited.contains_key(&next_idx) {
                visited.insert(next_idx, Some(current_idx));
                queue.push_back(next_idx);
            }
        }
    }

    None
}

/// Limits for simple-path enumeration
#[derive(Debug, Clone, Copy)]
pub struct SimplePathConfig {
    /// Maximum number of hops (edges) in a path
    pub max_hops: usize,
    /// Stop after this many paths have been found
    pub max_paths: usize,
}

impl Default for SimplePathConfig {
    fn default() -> Self {
        Self {
            max_hops: 5,
            max_paths: 1000,
        }
    }
}

/// Result of simple-path enumeration
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimplePaths {
    /// Paths in discovery order, each including source and target
    pub paths: Vec<Vec<NodeId>>,
    /// True when at least one path beyond `max_paths` exists
    pub truncated: bool,
}

/// Hop distance from every node to `target`, following edges backwards.
/// Unreachable nodes get `usize::MAX`.
fn distances_to(view: &GraphView, target_idx: usize) -> Vec<usize> {
    let mut dist = vec![usize::MAX; view.node_count];
    let mut queue = VecDeque::new();
    dist[target_idx] = 0;
    queue.push_back(target_idx);

    while let Some(current) = queue.pop_front() {
        for &prev in view.predecessors(current) {
            if dist[prev] == usize::MAX {
                dist[prev] = dist[current] + 1;
                queue.push_back(prev);
            }
        }
    }
    dist
}

/// Enumerate simple paths from `source` to `target` (depth-first, neighbours
/// in adjacency order). A path from a node to itself is the single-node path.
///
/// The search only steps onto nodes that can still reach `target` within
/// the remaining hop budget, so an unreachable target costs one BFS.
///
/// Returns `None` when either endpoint is not in the view.
pub fn all_simple_paths(
    view: &GraphView,
    source: NodeId,
    target: NodeId,
    config: SimplePathConfig,
) -> Option<SimplePaths> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let mut result = SimplePaths::default();
    if source_idx == target_idx {
        if config.max_paths == 0 {
            result.truncated = true;
        } else {
            result.paths.push(vec![source]);
        }
        return Some(result);
    }

    let dist = distances_to(view, target_idx);
    if dist[source_idx] > config.max_hops {
        return Some(result);
    }

    let mut on_path = vec![false; view.node_count];
    let mut path = vec![source_idx];
    on_path[source_idx] = true;

    // Each frame holds the node and the position of the next neighbour to try.
    let mut stack: Vec<(usize, usize)> = vec![(source_idx, 0)];

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        let neighbors = view.successors(node);
        let hops = path.len() - 1;

        if frame.1 >= neighbors.len() || hops >= config.max_hops {
            stack.pop();
            path.pop();
            on_path[node] = false;
            continue;
        }

        let next = neighbors[frame.1];
        frame.1 += 1;

        if on_path[next] || dist[next] > config.max_hops - hops - 1 {
            continue;
        }

        if next == target_idx {
            if result.paths.len() == config.max_paths {
                result.truncated = true;
                break;
            }
            let mut found: Vec<NodeId> = path.iter().map(|&i| view.index_to_node[i]).collect();
            found.push(target);
            result.paths.push(found);
            continue;
        }

        on_path[next] = true;
        path.push(next);
        stack.push((next, 0));
    }

    Some(result)
}
