//! Investment pathway tracing between two nodes

use super::{build_view, AnalysisError, AnalysisResult};
use crate::graph::{GraphStore, NodeId};
use linkup_graph_algorithms::{all_simple_paths, bfs, SimplePathConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pathway query as sent by clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    /// Maximum hops per path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl PathwayRequest {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        PathwayRequest {
            source_id: Some(source_id.into()),
            target_id: Some(target_id.into()),
            max_depth: None,
        }
    }

    /// Both endpoints, or an error when either is missing or blank
    pub fn endpoints(&self) -> AnalysisResult<(&str, &str)> {
        let source = self.source_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let target = self.target_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match (source, target) {
            (Some(s), Some(t)) => Ok((s, t)),
            _ => Err(AnalysisError::MissingParameter("sourceId and targetId required".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStats {
    pub path_count: usize,
    /// Mean number of nodes per path
    pub avg_path_length: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayReport {
    /// Paths as node keys, shortest first
    pub paths: Vec<Vec<String>>,
    pub all_paths: Vec<Vec<String>>,
    /// Node count of the shortest path, if any
    pub shortest_path_length: Option<usize>,
    /// Enumeration stopped at the path limit
    pub truncated: bool,
    pub stats: PathStats,
}

/// Depth and result limits applied to pathway requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathwayLimits {
    /// Hop limit when the request gives none
    pub default_depth: usize,
    /// Largest hop limit a request may ask for
    pub depth_limit: usize,
    /// Stop enumeration after this many paths
    pub max_paths: usize,
}

impl Default for PathwayLimits {
    fn default() -> Self {
        Self {
            default_depth: 5,
            depth_limit: 10,
            max_paths: 1000,
        }
    }
}

impl PathwayLimits {
    /// Hop limit for `request`; asking beyond `depth_limit` is an error
    pub fn depth_for(&self, request: &PathwayRequest) -> AnalysisResult<usize> {
        match request.max_depth {
            None => Ok(self.default_depth),
            Some(depth) if depth <= self.depth_limit => Ok(depth),
            Some(depth) => Err(AnalysisError::InvalidParameter(format!(
                "maxDepth {} exceeds the limit of {}",
                depth, self.depth_limit
            ))),
        }
    }
}

fn resolve(store: &GraphStore, key: &str) -> AnalysisResult<NodeId> {
    store
        .node_id(key)
        .ok_or_else(|| AnalysisError::NodeNotFound(key.to_string()))
}

fn keys(store: &GraphStore, path: &[u64]) -> Vec<String> {
    path.iter()
        .filter_map(|&id| store.get_node(NodeId::new(id)))
        .map(|n| n.key.clone())
        .collect()
}

/// Shortest path between two keys over the undirected graph
pub fn shortest_path(store: &GraphStore, source: &str, target: &str) -> AnalysisResult<Option<Vec<String>>> {
    let source = resolve(store, source)?;
    let target = resolve(store, target)?;
    let view = build_view(store);
    Ok(bfs(&view, source.as_u64(), target.as_u64()).map(|r| keys(store, &r.path)))
}

/// Enumerate simple paths between the request endpoints within `limits`
pub fn find_pathways(store: &GraphStore, request: &PathwayRequest, limits: PathwayLimits) -> AnalysisResult<PathwayReport> {
    let (source_key, target_key) = request.endpoints()?;
    let max_hops = limits.depth_for(request)?;
    let source = resolve(store, source_key)?;
    let target = resolve(store, target_key)?;

    let view = build_view(store);
    let config = SimplePathConfig {
        max_hops,
        max_paths: limits.max_paths,
    };
    let found = all_simple_paths(&view, source.as_u64(), target.as_u64(), config).unwrap_or_default();

    let mut paths: Vec<Vec<String>> = found.paths.iter().map(|p| keys(store, p)).collect();
    paths.sort_by_key(Vec::len);

    let shortest_path_length = if found.truncated {
        bfs(&view, source.as_u64(), target.as_u64()).map(|r| r.path.len())
    } else {
        paths.first().map(Vec::len)
    };

    let path_count = paths.len();
    let avg_path_length = if path_count > 0 {
        paths.iter().map(Vec::len).sum::<usize>() as f64 / path_count as f64
    } else {
        0.0
    };

    debug!(
        source = source_key,
        target = target_key,
        paths = path_count,
        truncated = found.truncated,
        "Traced pathways"
    );
    Ok(PathwayReport {
        all_paths: paths.clone(),
        paths,
        shortest_path_length,
        truncated: found.truncated,
        stats: PathStats {
            path_count,
            avg_path_length,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::sample_store;
    use crate::graph::{FundingRound, NodeKind};

    fn limits(max_paths: usize) -> PathwayLimits {
        PathwayLimits {
            max_paths,
            ..PathwayLimits::default()
        }
    }

    #[test]
    fn test_single_path_along_chain() {
        let store = sample_store();
        let report = find_pathways(&store, &PathwayRequest::new("c:2", "c:3"), PathwayLimits::default()).unwrap();

        assert_eq!(report.paths, vec![vec!["c:2", "f:1", "c:1", "f:2", "c:3"]]);
        assert_eq!(report.shortest_path_length, Some(5));
        assert_eq!(report.stats.path_count, 1);
        assert!((report.stats.avg_path_length - 5.0).abs() < 1e-9);
        assert_eq!(report.all_paths, report.paths);
        assert!(!report.truncated);
    }

    #[test]
    fn test_depth_limit() {
        let store = sample_store();
        // c:2 to c:4 needs 6 hops
        let report = find_pathways(&store, &PathwayRequest::new("c:2", "c:4"), PathwayLimits::default()).unwrap();
        assert!(report.paths.is_empty());
        assert_eq!(report.shortest_path_length, None);
        assert_eq!(report.stats, PathStats::default());

        let mut request = PathwayRequest::new("c:2", "c:4");
        request.max_depth = Some(6);
        let report = find_pathways(&store, &request, PathwayLimits::default()).unwrap();
        assert_eq!(report.stats.path_count, 1);
        assert_eq!(report.shortest_path_length, Some(7));
    }

    #[test]
    fn test_multiple_paths_sorted() {
        let mut store = sample_store();
        store.add_node("f:9", NodeKind::Investor, "Shortcut");
        store.add_edge_by_key("f:9", "c:2", FundingRound::default()).unwrap();
        store.add_edge_by_key("f:9", "c:3", FundingRound::default()).unwrap();

        let report = find_pathways(&store, &PathwayRequest::new("c:2", "c:3"), PathwayLimits::default()).unwrap();
        assert_eq!(report.stats.path_count, 2);
        assert_eq!(report.paths[0], vec!["c:2", "f:9", "c:3"]);
        assert_eq!(report.shortest_path_length, Some(3));
        assert!((report.stats.avg_path_length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_uses_bfs_for_shortest() {
        let mut store = sample_store();
        store.add_node("f:9", NodeKind::Investor, "Shortcut");
        store.add_edge_by_key("f:9", "c:2", FundingRound::default()).unwrap();
        store.add_edge_by_key("f:9", "c:3", FundingRound::default()).unwrap();

        let report = find_pathways(&store, &PathwayRequest::new("c:2", "c:3"), limits(1)).unwrap();
        assert!(report.truncated);
        assert_eq!(report.stats.path_count, 1);
        assert_eq!(report.shortest_path_length, Some(3));
    }

    #[test]
    fn test_same_source_and_target() {
        let store = sample_store();
        let report = find_pathways(&store, &PathwayRequest::new("c:1", "c:1"), PathwayLimits::default()).unwrap();
        assert_eq!(report.paths, vec![vec!["c:1"]]);
        assert_eq!(report.shortest_path_length, Some(1));
    }

    #[test]
    fn test_missing_and_unknown_endpoints() {
        let store = sample_store();
        let request = PathwayRequest {
            source_id: Some("c:1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            find_pathways(&store, &request, PathwayLimits::default()),
            Err(AnalysisError::MissingParameter(_))
        ));

        let err = find_pathways(&store, &PathwayRequest::new("c:1", "c:404"), PathwayLimits::default()).unwrap_err();
        assert_eq!(err, AnalysisError::NodeNotFound("c:404".to_string()));
    }

    #[test]
    fn test_depth_beyond_limit_is_rejected() {
        let store = sample_store();
        let mut request = PathwayRequest::new("c:2", "c:4");
        request.max_depth = Some(10_000);

        let err = find_pathways(&store, &request, PathwayLimits::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(ref msg) if msg.contains("10000")));

        request.max_depth = Some(10);
        let report = find_pathways(&store, &request, PathwayLimits::default()).unwrap();
        assert_eq!(report.shortest_path_length, Some(7));
    }

    #[test]
    fn test_shortest_path() {
        let store = sample_store();
        let path = shortest_path(&store, "c:2", "c:4").unwrap().unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(shortest_path(&store, "c:1", "c:9").unwrap(), None);
    }
}
