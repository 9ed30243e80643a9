// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::scratch::ScratchMap;
use crate::{Model, Node, PlanError, Route};

/// Follows parents from `goal` back to the start node, returning the [Route]
/// in start-to-goal order with its distance converted to real-world units.
///
/// The walk is bounded by the number of nodes in the model; a parent chain which
/// is longer than that (a cycle), or which ends on any node other than `start_id`,
/// results in [PlanError::BrokenParentChain].
pub(super) fn reconstruct_path<M: Model + ?Sized>(
    model: &M,
    scratch: &ScratchMap,
    start_id: i64,
    goal: Node,
) -> Result<Route, PlanError> {
    let max_hops = model.len();
    let mut path = vec![goal];
    let mut distance: f32 = 0.0;
    let mut current = goal;

    while let Some(parent_id) = scratch.get(&current.id).and_then(|s| s.parent) {
        if path.len() >= max_hops {
            return Err(PlanError::BrokenParentChain(goal.id));
        }

        let parent = model
            .get_node(parent_id)
            .ok_or(PlanError::InvalidReference(parent_id))?;

        distance += model.distance(&current, &parent);
        path.push(parent);
        current = parent;
    }

    if current.id != start_id {
        return Err(PlanError::BrokenParentChain(goal.id));
    }

    path.reverse();
    return Ok(Route {
        nodes: path,
        distance: distance * model.metric_scale(),
    });
}

#[cfg(test)]
mod tests {
    use super::super::scratch::Scratch;
    use super::*;
    use crate::Graph;

    fn graph(metric_scale: f32) -> Graph {
        let mut g = Graph::with_metric_scale(metric_scale);
        g.set_node(Node { id: 1, x: 0.0, y: 0.0 });
        g.set_node(Node { id: 2, x: 0.75, y: 0.0 });
        g.set_node(Node { id: 3, x: 0.75, y: 0.75 });
        g
    }

    fn with_parents(parents: &[(i64, i64)]) -> ScratchMap {
        parents
            .iter()
            .map(|&(id, parent)| {
                (
                    id,
                    Scratch {
                        visited: true,
                        parent: Some(parent),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_reconstruct_path_scales_distance() {
        let g = graph(2.0);
        let scratch = with_parents(&[(3, 2), (2, 1)]);
        let goal = g.get_node(3).unwrap();

        let route = reconstruct_path(&g, &scratch, 1, goal).unwrap();

        assert_eq!(
            route.nodes.iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        // 1.5 in map-fraction units
        assert_eq!(route.distance, 3.0);
    }

    #[test]
    fn test_reconstruct_path_of_start() {
        let g = graph(2.0);
        let start = g.get_node(1).unwrap();

        let route = reconstruct_path(&g, &ScratchMap::default(), 1, start).unwrap();

        assert_eq!(route.nodes, vec![start]);
        assert_eq!(route.distance, 0.0);
    }

    #[test]
    fn test_reconstruct_path_with_cycle() {
        let g = graph(1.0);
        let scratch = with_parents(&[(3, 2), (2, 3)]);
        let goal = g.get_node(3).unwrap();

        assert_eq!(
            reconstruct_path(&g, &scratch, 1, goal),
            Err(PlanError::BrokenParentChain(3)),
        );
    }

    #[test]
    fn test_reconstruct_path_not_ending_at_start() {
        let g = graph(1.0);
        let scratch = with_parents(&[(3, 2)]);
        let goal = g.get_node(3).unwrap();

        assert_eq!(
            reconstruct_path(&g, &scratch, 1, goal),
            Err(PlanError::BrokenParentChain(3)),
        );
    }

    #[test]
    fn test_reconstruct_path_with_missing_parent() {
        let g = graph(1.0);
        let scratch = with_parents(&[(3, 42)]);
        let goal = g.get_node(3).unwrap();

        assert_eq!(
            reconstruct_path(&g, &scratch, 1, goal),
            Err(PlanError::InvalidReference(42)),
        );
    }
}
