// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest routes over map graphs with the
//! [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm).
//!
//! Node positions live in a normalized map-fraction space, where both coordinates
//! of every point on the map are in the `[0, 1]` range. Every edge costs exactly
//! the straight-line distance between its endpoints, and route distances are
//! converted to real-world units with the [Model::metric_scale] factor.
//!
//! The routing graph is provided through the [Model] trait; [Graph] is a simple
//! in-memory implementation.
//!
//! # Example
//!
//! ```
//! use route_planner::{Graph, Node};
//!
//! let mut g = Graph::with_metric_scale(1000.0);
//! g.set_node(Node { id: 1, x: 0.0, y: 0.0 });
//! g.set_node(Node { id: 2, x: 1.0, y: 0.0 });
//! g.set_node(Node { id: 3, x: 1.0, y: 1.0 });
//! g.add_way([1, 2, 3]);
//!
//! let route = route_planner::find_route(&mut g, 0.0, 0.0, 100.0, 100.0)
//!     .expect("failed to find route");
//!
//! assert_eq!(route.nodes.len(), 3);
//! assert_eq!(route.distance, 2000.0);
//! ```

mod astar;
mod distance;
mod graph;
mod kd;
pub mod loader;
mod model;

pub use astar::{
    find_route, PlanError, RevisitPolicy, RoutePlanner, SearchOptions, SearchState,
    DEFAULT_STEP_LIMIT,
};
pub use distance::euclidean_distance;
pub use graph::Graph;
pub use kd::KDTree;
pub use model::Model;

/// Represents a vertex of a [Model].
///
/// Nodes with `id == 0` are disallowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,

    /// Horizontal position, as a fraction of the map extent.
    pub x: f32,

    /// Vertical position, as a fraction of the map extent.
    pub y: f32,
}

/// Result of a successful route search.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Snapshots of all nodes on the route, from the start to the end node.
    pub nodes: Vec<Node>,

    /// Total length of the route, in real-world units.
    pub distance: f32,
}
