// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::{HashMap, HashSet};

use crate::kd::is_closer;
use crate::{euclidean_distance, KDTree, Model, Node};

/// In-memory [Model]: a set of [Nodes](Node) with undirected adjacency between them.
///
/// Adjacency comes from two sources: explicit edges added with [Graph::set_edge],
/// and ways (ordered sequences of nodes, like roads) added with [Graph::add_way].
/// Consecutive nodes of a way are linked lazily, the first time
/// [find_neighbors](Model::find_neighbors) is called for a node.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: BTreeMap<i64, (Node, Vec<i64>)>,
    ways: Vec<Vec<i64>>,
    node_ways: HashMap<i64, Vec<usize>>,
    discovered: HashSet<i64>,
    metric_scale: f32,
    index: Option<KDTree>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::with_metric_scale(1.0)
    }
}

impl Graph {
    /// Creates an empty graph with a metric scale of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the provided metric scale.
    pub fn with_metric_scale(metric_scale: f32) -> Self {
        Self {
            nodes: BTreeMap::default(),
            ways: Vec::default(),
            node_ways: HashMap::default(),
            discovered: HashSet::default(),
            metric_scale,
            index: None,
        }
    }

    /// Sets the conversion factor from map-fraction distances to real-world units.
    pub fn set_metric_scale(&mut self, metric_scale: f32) {
        self.metric_scale = metric_scale;
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().map(|(node, _)| node)
    }

    /// Creates or updates a [Node] with `node.id`.
    ///
    /// Adjacency of the node is preserved. Any [KDTree] index is dropped,
    /// see [Graph::build_index].
    pub fn set_node(&mut self, node: Node) {
        assert_ne!(node.id, 0);
        self.index = None;

        match self.nodes.entry(node.id) {
            Entry::Vacant(e) => {
                e.insert((node, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                debug_assert_eq!(e.get().0.id, node.id);
                e.get_mut().0 = node;
            }
        }
    }

    /// Deletes a [Node] with a given `id`, together with its own adjacency list.
    ///
    /// Adjacency entries of other nodes pointing to the deleted node are preserved,
    /// as removing them would require a walk over all nodes in the graph.
    pub fn delete_node(&mut self, id: i64) {
        self.index = None;
        self.nodes.remove(&id);
        self.discovered.remove(&id);
    }

    /// Returns `true` if `b` is in the (already discovered) adjacency of `a`.
    pub fn has_edge(&self, a: i64, b: i64) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Links two existing nodes with an undirected edge. Duplicate edges are ignored.
    pub fn set_edge(&mut self, a: i64, b: i64) {
        assert_ne!(a, 0);
        assert_ne!(b, 0);

        if a != b && self.nodes.contains_key(&a) && self.nodes.contains_key(&b) {
            self.link(a, b);
            self.link(b, a);
        }
    }

    /// Removes an undirected edge between two nodes.
    ///
    /// Note that edges coming from [ways](Graph::add_way) will be re-created
    /// if their nodes were not yet [discovered](Model::find_neighbors).
    pub fn delete_edge(&mut self, a: i64, b: i64) {
        self.unlink(a, b);
        self.unlink(b, a);
    }

    /// Adds a way - an ordered sequence of node ids, consecutive pairs of which
    /// are adjacent. Ids of nodes not (yet) in the graph are allowed.
    pub fn add_way<I: IntoIterator<Item = i64>>(&mut self, nodes: I) {
        let way_idx = self.ways.len();
        let way = nodes.into_iter().collect::<Vec<_>>();

        for &id in &way {
            let ways = self.node_ways.entry(id).or_default();
            if ways.last() != Some(&way_idx) {
                ways.push(way_idx);
            }

            // Force re-discovery to pick up the new way
            self.discovered.remove(&id);
        }

        self.ways.push(way);
    }

    /// Builds a [KDTree] over all nodes, speeding up
    /// [find_closest_node](Model::find_closest_node) on large graphs.
    ///
    /// The index is dropped whenever a node is added, moved or removed.
    pub fn build_index(&mut self) {
        self.index = KDTree::from_iter(self.iter().copied());
    }

    fn link(&mut self, from: i64, to: i64) {
        if let Some((_, adjacent)) = self.nodes.get_mut(&from) {
            if !adjacent.contains(&to) {
                adjacent.push(to);
            }
        }
    }

    fn unlink(&mut self, from: i64, to: i64) {
        if let Some((_, adjacent)) = self.nodes.get_mut(&from) {
            if let Some(idx) = adjacent.iter().position(|&id| id == to) {
                adjacent.swap_remove(idx);
            }
        }
    }

    fn way_neighbors(&self, id: i64) -> Vec<i64> {
        let mut found = Vec::default();

        for &way_idx in self.node_ways.get(&id).map(Vec::as_slice).unwrap_or_default() {
            let way = &self.ways[way_idx];
            for (i, _) in way.iter().enumerate().filter(|&(_, &n)| n == id) {
                if i > 0 {
                    found.push(way[i - 1]);
                }
                if let Some(&next) = way.get(i + 1) {
                    found.push(next);
                }
            }
        }

        found
    }
}

impl Model for Graph {
    fn get_node(&self, id: i64) -> Option<Node> {
        self.nodes.get(&id).map(|&(node, _)| node)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Uses the [KDTree] index, if [built](Graph::build_index). Otherwise,
    /// the distance to every [Node] in the graph is computed.
    fn find_closest_node(&self, x: f32, y: f32) -> Option<Node> {
        if let Some(ref index) = self.index {
            return Some(index.find_nearest_node(x, y));
        }

        self.nodes
            .values()
            .map(|&(nd, _)| (euclidean_distance(x, y, nd.x, nd.y), nd))
            .reduce(|best, candidate| {
                if is_closer(candidate.1, candidate.0, best.1, best.0) {
                    candidate
                } else {
                    best
                }
            })
            .map(|(_, nd)| nd)
    }

    fn find_neighbors(&mut self, id: i64) {
        if !self.nodes.contains_key(&id) || !self.discovered.insert(id) {
            return;
        }

        for other in self.way_neighbors(id) {
            if other != id {
                self.link(id, other);
            }
        }
    }

    fn neighbors(&self, id: i64) -> &[i64] {
        self.nodes
            .get(&id)
            .map(|(_, adjacent)| adjacent.as_slice())
            .unwrap_or_default()
    }

    fn metric_scale(&self) -> f32 {
        self.metric_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, x: f32, y: f32) -> Node {
        Node { id, x, y }
    }

    #[test]
    fn test_set_edge_is_undirected_and_deduplicated() {
        let mut g = Graph::new();
        g.set_node(node(1, 0.0, 0.0));
        g.set_node(node(2, 0.5, 0.0));

        g.set_edge(1, 2);
        g.set_edge(2, 1);
        g.set_edge(1, 3); // 3 does not exist

        assert_eq!(g.neighbors(1), &[2]);
        assert_eq!(g.neighbors(2), &[1]);

        g.delete_edge(2, 1);
        assert!(g.neighbors(1).is_empty());
        assert!(g.neighbors(2).is_empty());
    }

    #[test]
    fn test_find_neighbors_from_ways() {
        //  1──2──3
        //     │
        //     4
        let mut g = Graph::new();
        g.set_node(node(1, 0.0, 0.5));
        g.set_node(node(2, 0.5, 0.5));
        g.set_node(node(3, 1.0, 0.5));
        g.set_node(node(4, 0.5, 1.0));
        g.add_way([1, 2, 3]);
        g.add_way([2, 4, 99]);

        // Nothing is linked before discovery
        assert!(g.neighbors(2).is_empty());

        g.find_neighbors(2);
        let mut adjacent = g.neighbors(2).to_vec();
        adjacent.sort();
        assert_eq!(adjacent, vec![1, 3, 4]);

        // Discovery only links the discovered node
        assert!(g.neighbors(1).is_empty());

        // 99 is referenced, but doesn't exist
        g.find_neighbors(4);
        let mut adjacent = g.neighbors(4).to_vec();
        adjacent.sort();
        assert_eq!(adjacent, vec![2, 99]);
        assert_eq!(g.get_node(99), None);
    }

    #[test]
    fn test_find_neighbors_is_idempotent() {
        let mut g = Graph::new();
        g.set_node(node(1, 0.0, 0.0));
        g.set_node(node(2, 0.1, 0.0));
        g.set_node(node(3, 0.2, 0.0));
        g.add_way([1, 2, 3, 2]);
        g.set_edge(2, 3);

        g.find_neighbors(2);
        let first = g.neighbors(2).to_vec();
        g.find_neighbors(2);
        g.find_neighbors(2);

        assert_eq!(g.neighbors(2), first.as_slice());
        assert_eq!(first.len(), 2);

        // Adding a way forces re-discovery, still without duplicates
        g.add_way([3, 2, 1]);
        g.find_neighbors(2);
        assert_eq!(g.neighbors(2), first.as_slice());
    }

    #[test]
    fn test_find_closest_node() {
        let mut g = Graph::new();
        assert_eq!(g.find_closest_node(0.5, 0.5), None);

        g.set_node(node(1, 0.1, 0.1));
        g.set_node(node(2, 0.9, 0.1));
        g.set_node(node(3, 0.5, 0.8));

        assert_eq!(g.find_closest_node(0.2, 0.0).map(|n| n.id), Some(1));
        assert_eq!(g.find_closest_node(0.4, 0.7).map(|n| n.id), Some(3));
        // Out-of-extent points are fine
        assert_eq!(g.find_closest_node(1.5, -0.5).map(|n| n.id), Some(2));

        g.build_index();
        assert_eq!(g.find_closest_node(0.2, 0.0).map(|n| n.id), Some(1));
        assert_eq!(g.find_closest_node(0.4, 0.7).map(|n| n.id), Some(3));
        assert_eq!(g.find_closest_node(1.5, -0.5).map(|n| n.id), Some(2));

        // Mutations drop the index
        g.delete_node(3);
        assert_eq!(g.find_closest_node(0.4, 0.7).map(|n| n.id), Some(1));
    }

    #[test]
    fn test_find_closest_node_tie_does_not_depend_on_index() {
        let mut g = Graph::new();
        g.set_node(node(2, 0.75, 0.5));
        g.set_node(node(1, 0.25, 0.5));

        let linear = g.find_closest_node(0.5, 0.5).map(|n| n.id);
        g.build_index();
        let indexed = g.find_closest_node(0.5, 0.5).map(|n| n.id);

        assert_eq!(linear, Some(1));
        assert_eq!(indexed, Some(1));
    }
}
