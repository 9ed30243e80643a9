// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Model, Node};

/// Estimates the remaining cost from `node` to `goal` as the straight-line distance
/// between them. As every edge costs exactly the distance between its endpoints,
/// the estimate is admissible and consistent.
#[inline]
pub(super) fn heuristic<M: Model + ?Sized>(model: &M, node: &Node, goal: &Node) -> f32 {
    model.distance(node, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graph;

    #[test]
    fn test_heuristic() {
        let g = Graph::new();
        let goal = Node { id: 1, x: 0.75, y: 1.0 };
        let node = Node { id: 2, x: 0.0, y: 0.0 };

        assert_eq!(heuristic(&g, &node, &goal), 1.25);
        assert_eq!(heuristic(&g, &goal, &goal), 0.0);
    }
}
