// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{euclidean_distance, Node};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// which can be used to speed up nearest-neighbor search for large datasets. Resolving
/// query coordinates with a linear scan over all nodes quickly dominates the time
/// spent on route finding when answering many queries over the same [Graph](crate::Graph).
///
/// Distances are euclidean, in the normalized map-fraction space.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: Node,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the closest [Node] to the given position.
    pub fn find_nearest_node(&self, x: f32, y: f32) -> Node {
        self.find_nearest_node_impl(x, y, false).0
    }

    fn find_nearest_node_impl(&self, x: f32, y: f32, y_divides: bool) -> (Node, f32) {
        // Start by assuming that pivot is the closest
        let mut best = self.pivot;
        let mut best_dist = euclidean_distance(x, y, best.x, best.y);

        let first_left = if y_divides { y < best.y } else { x < best.x };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_node_impl(x, y, !y_divides);
            if is_closer(alt, alt_dist, best, best_dist) {
                best = alt;
                best_dist = alt_dist;
            }
        }

        if let Some(ref branch) = second {
            // A closer (or equally close, but with a lower id) node is possible in the
            // second branch if and only if the splitting axis is not further away
            // than the current best candidate.
            let (axis_x, axis_y) = if y_divides {
                (x, self.pivot.y)
            } else {
                (self.pivot.x, y)
            };
            let dist_to_axis = euclidean_distance(x, y, axis_x, axis_y);

            if dist_to_axis <= best_dist {
                let (alt, alt_dist) = branch.find_nearest_node_impl(x, y, !y_divides);
                if is_closer(alt, alt_dist, best, best_dist) {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        return (best, best_dist);
    }

    /// Builds a k-d tree from an iterable of [Nodes](Node).
    /// Returns `None` if there are no nodes.
    pub fn from_iter<I: IntoIterator<Item = Node>>(nodes: I) -> Option<Self> {
        let mut nodes = nodes.into_iter().collect::<Vec<_>>();
        Self::build(nodes.as_mut_slice())
    }

    /// Builds a k-d tree from a mutable slice of [Nodes](Node). Nodes will be reordered
    /// in the slice to facilitate building the tree.
    pub fn build(nodes: &mut [Node]) -> Option<Self> {
        Self::build_impl(nodes, false)
    }

    fn build_impl(nodes: &mut [Node], y_divides: bool) -> Option<Self> {
        match nodes.len() {
            0 => None,
            1 => Some(Self {
                pivot: nodes[0],
                left: None,
                right: None,
            }),
            _ => {
                if y_divides {
                    nodes.sort_by(|a, b| a.y.total_cmp(&b.y));
                } else {
                    nodes.sort_by(|a, b| a.x.total_cmp(&b.x));
                }
                let median = nodes.len() / 2;
                let pivot = nodes[median];
                let (left, right_and_pivot) = nodes.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    left: Self::build_impl(left, !y_divides).map(Box::new),
                    right: Self::build_impl(right, !y_divides).map(Box::new),
                })
            }
        }
    }
}

/// Orders nearest-node candidates by distance, and equally distant ones by id,
/// so that the result doesn't depend on the shape of the tree.
#[inline]
pub(crate) fn is_closer(a: Node, a_dist: f32, b: Node, b_dist: f32) -> bool {
    a_dist.total_cmp(&b_dist).then(a.id.cmp(&b.id)).is_lt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn kd_tree() {
        let tree = KDTree::build(&mut [
            Node { id: 1, x: 0.01, y: 0.01 },
            Node { id: 2, x: 0.01, y: 0.05 },
            Node { id: 3, x: 0.03, y: 0.09 },
            Node { id: 4, x: 0.04, y: 0.03 },
            Node { id: 5, x: 0.04, y: 0.07 },
            Node { id: 6, x: 0.07, y: 0.03 },
            Node { id: 7, x: 0.07, y: 0.01 },
            Node { id: 8, x: 0.08, y: 0.05 },
            Node { id: 9, x: 0.08, y: 0.09 },
        ])
        .expect("k-d tree from non-empty slice must not be empty");

        assert_eq!(tree.find_nearest_node(0.02, 0.02).id, 1);
        assert_eq!(tree.find_nearest_node(0.05, 0.03).id, 4);
        assert_eq!(tree.find_nearest_node(0.05, 0.08).id, 5);
        assert_eq!(tree.find_nearest_node(0.09, 0.06).id, 8);
    }

    #[test]
    fn kd_tree_empty() {
        assert!(KDTree::from_iter(std::iter::empty()).is_none());
    }

    #[test]
    fn kd_tree_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(42);
        let nodes = (1..=200)
            .map(|id| Node {
                id,
                x: rng.random::<f32>(),
                y: rng.random::<f32>(),
            })
            .collect::<Vec<_>>();
        let tree = KDTree::from_iter(nodes.iter().copied()).unwrap();

        for _ in 0..100 {
            let x = rng.random_range(-0.2..1.2);
            let y = rng.random_range(-0.2..1.2);

            let expected = nodes
                .iter()
                .copied()
                .reduce(|best, n| {
                    let best_dist = euclidean_distance(x, y, best.x, best.y);
                    let n_dist = euclidean_distance(x, y, n.x, n.y);
                    if is_closer(n, n_dist, best, best_dist) {
                        n
                    } else {
                        best
                    }
                })
                .unwrap();

            assert_eq!(tree.find_nearest_node(x, y).id, expected.id);
        }
    }

    #[test]
    fn kd_tree_ties_go_to_lowest_id() {
        // Equally distant from (0.5, 0.5), regardless of which one ends up as the pivot
        let nodes = [
            Node { id: 2, x: 0.75, y: 0.5 },
            Node { id: 1, x: 0.25, y: 0.5 },
            Node { id: 3, x: 0.5, y: 0.25 },
            Node { id: 4, x: 0.5, y: 0.75 },
        ];

        let tree = KDTree::from_iter(nodes).unwrap();
        assert_eq!(tree.find_nearest_node(0.5, 0.5).id, 1);

        let tree = KDTree::from_iter(nodes.into_iter().rev()).unwrap();
        assert_eq!(tree.find_nearest_node(0.5, 0.5).id, 1);

        let tree = KDTree::from_iter(nodes[..2].iter().copied()).unwrap();
        assert_eq!(tree.find_nearest_node(0.5, 0.5).id, 1);
    }
}
