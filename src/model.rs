// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{euclidean_distance, Node};

/// Provider of the routing graph consumed by [RoutePlanner](crate::RoutePlanner).
///
/// Implementations own all [Nodes](Node) and their adjacency. The planner only ever
/// refers to nodes by their ids and keeps all per-search state on its own side,
/// so the same model can be searched any number of times.
pub trait Model {
    /// Retrieves a [Node] with the provided id.
    fn get_node(&self, id: i64) -> Option<Node>;

    /// Returns the number of nodes in the model.
    fn len(&self) -> usize;

    /// Returns `true` if the model has no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the [Node] closest to the given position in the normalized map-fraction space.
    ///
    /// Returns `None` only if the model is empty. Positions outside of the `[0, 1]` range
    /// are valid and resolve to the node closest to the out-of-extent point.
    fn find_closest_node(&self, x: f32, y: f32) -> Option<Node>;

    /// Makes sure that the adjacency of a node is populated, so that
    /// [neighbors](Model::neighbors) returns all nodes adjacent to it.
    ///
    /// Must be idempotent - calling this function multiple times must not
    /// duplicate any adjacency entries.
    fn find_neighbors(&mut self, id: i64);

    /// Returns ids of nodes adjacent to a node with a given id, as discovered
    /// by the last call to [find_neighbors](Model::find_neighbors).
    ///
    /// Referenced ids might not exist in the model; users must silently ignore them.
    fn neighbors(&self, id: i64) -> &[i64];

    /// Distance between two nodes in the normalized map-fraction space.
    fn distance(&self, a: &Node, b: &Node) -> f32 {
        euclidean_distance(a.x, a.y, b.x, b.y)
    }

    /// Conversion factor from map-fraction distances to real-world units (e.g. meters).
    fn metric_scale(&self) -> f32;
}
