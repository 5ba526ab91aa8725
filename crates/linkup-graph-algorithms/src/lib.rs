pub mod common;
pub mod pagerank;
pub mod centrality;
pub mod community;
pub mod pathfinding;

pub use common::{GraphView, NodeId};
pub use pagerank::{page_rank, PageRankConfig};
pub use centrality::{betweenness_centrality, closeness_centrality, BetweennessConfig};
pub use community::{label_propagation, weakly_connected_components, Partition};
pub use pathfinding::{all_simple_paths, bfs, PathResult, SimplePathConfig, SimplePaths};
