// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::heuristic::heuristic;
use super::open_list::{OpenList, QueueItem};
use super::options::{RevisitPolicy, SearchOptions};
use super::reconstruct::reconstruct_path;
use super::scratch::{Scratch, ScratchMap};
use crate::{Model, Node, PlanError, Route};

/// Stage of a [RoutePlanner].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Start and end nodes are resolved, the search has not started yet.
    Initialized,

    /// The search is in progress.
    Running,

    /// A route was found.
    GoalFound,

    /// The open list ran out without reaching the end node.
    Exhausted,

    /// The search was stopped by the step limit or an inconsistent model.
    Aborted,
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find a route between two points of a [Model].
///
/// A planner answers a single query. All search state (parents, costs, the open list)
/// is owned by the planner and dropped with it; the model is only asked for nodes
/// and their neighbors.
#[derive(Debug)]
pub struct RoutePlanner<'a, M: Model + ?Sized> {
    model: &'a mut M,
    options: SearchOptions,
    start: Node,
    end: Node,
    open_list: OpenList,
    scratch: ScratchMap,
    state: SearchState,
    steps: usize,
    outcome: Option<Result<Route, PlanError>>,
}

impl<'a, M: Model + ?Sized> RoutePlanner<'a, M> {
    /// Creates a planner between the nodes closest to the provided points.
    ///
    /// Coordinates are expected in the `0..=100` range (percent of the map extent)
    /// and are scaled down to map fractions. Out-of-range values are not rejected -
    /// they resolve to the node closest to a point outside of the map.
    pub fn new(
        model: &'a mut M,
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
        options: SearchOptions,
    ) -> Result<Self, PlanError> {
        let start = model
            .find_closest_node(start_x / 100.0, start_y / 100.0)
            .ok_or(PlanError::EmptyModel)?;
        let end = model
            .find_closest_node(end_x / 100.0, end_y / 100.0)
            .ok_or(PlanError::EmptyModel)?;

        log::debug!(
            "({}, {}) resolved to node {}, ({}, {}) resolved to node {}",
            start_x,
            start_y,
            start.id,
            end_x,
            end_y,
            end.id,
        );

        Ok(Self::with_nodes(model, start, end, options))
    }

    /// Creates a planner between two nodes with the provided ids.
    pub fn from_ids(
        model: &'a mut M,
        start_id: i64,
        end_id: i64,
        options: SearchOptions,
    ) -> Result<Self, PlanError> {
        let start = model
            .get_node(start_id)
            .ok_or(PlanError::InvalidReference(start_id))?;
        let end = model
            .get_node(end_id)
            .ok_or(PlanError::InvalidReference(end_id))?;
        Ok(Self::with_nodes(model, start, end, options))
    }

    fn with_nodes(model: &'a mut M, start: Node, end: Node, options: SearchOptions) -> Self {
        Self {
            model,
            options,
            start,
            end,
            open_list: OpenList::default(),
            scratch: ScratchMap::default(),
            state: SearchState::Initialized,
            steps: 0,
            outcome: None,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The resolved start node.
    pub fn start_node(&self) -> Node {
        self.start
    }

    /// The resolved end node.
    pub fn end_node(&self) -> Node {
        self.end
    }

    /// Number of node expansions performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Real-world distance of the found route, or 0 if no route was found (yet).
    pub fn distance(&self) -> f32 {
        match self.outcome {
            Some(Ok(ref route)) => route.distance,
            _ => 0.0,
        }
    }

    /// Runs the search to completion and returns the found [Route].
    ///
    /// The search only runs once - subsequent calls return the same outcome.
    pub fn search(&mut self) -> Result<Route, PlanError> {
        if let Some(ref outcome) = self.outcome {
            return outcome.clone();
        }

        let outcome = self.run();
        self.state = match outcome {
            Ok(_) => SearchState::GoalFound,
            Err(PlanError::Unreachable { .. }) => SearchState::Exhausted,
            Err(_) => SearchState::Aborted,
        };

        match outcome {
            Ok(ref route) => log::debug!(
                "route {} -> {}: {} nodes, distance {}, {} steps",
                self.start.id,
                self.end.id,
                route.nodes.len(),
                route.distance,
                self.steps,
            ),
            Err(ref e) => log::debug!(
                "route {} -> {}: {} after {} steps",
                self.start.id,
                self.end.id,
                e,
                self.steps,
            ),
        }

        self.outcome = Some(outcome.clone());
        outcome
    }

    fn run(&mut self) -> Result<Route, PlanError> {
        self.state = SearchState::Running;

        if self.start.id == self.end.id {
            return Ok(Route {
                nodes: vec![self.start],
                distance: 0.0,
            });
        }

        self.scratch.insert(
            self.start.id,
            Scratch {
                visited: true,
                expanded: false,
                parent: None,
                g: 0.0,
                h: heuristic(&*self.model, &self.start, &self.end),
            },
        );
        self.expand(self.start)?;

        while let Some(item) = self.open_list.pop_best() {
            if item.node.id == self.end.id {
                return reconstruct_path(&*self.model, &self.scratch, self.start.id, item.node);
            }

            // With RevisitPolicy::Relax the open list might contain outdated entries
            let record = self.scratch.get(&item.node.id).copied().unwrap_or_default();
            if record.expanded || item.cost > record.g {
                continue;
            }

            self.expand(item.node)?;
        }

        debug_assert!(self.open_list.is_empty());
        Err(PlanError::Unreachable {
            from: self.start.id,
            to: self.end.id,
        })
    }

    /// Pushes neighbors of `current` onto the open list, as allowed by the [RevisitPolicy].
    fn expand(&mut self, current: Node) -> Result<(), PlanError> {
        self.steps += 1;
        if self.steps > self.options.step_limit {
            log::warn!(
                "route {} -> {}: step limit of {} exceeded",
                self.start.id,
                self.end.id,
                self.options.step_limit,
            );
            return Err(PlanError::StepLimitExceeded);
        }

        let (current_g, current_h) = {
            let record = self.scratch.entry(current.id).or_default();
            record.expanded = true;
            (record.g, record.h)
        };

        log::trace!(
            "expanding node {} (g = {}, h = {}, open list size = {})",
            current.id,
            current_g,
            current_h,
            self.open_list.len(),
        );

        self.model.find_neighbors(current.id);
        let model = &*self.model;

        for &neighbor_id in model.neighbors(current.id) {
            // Check if the referred node exists
            let Some(neighbor) = model.get_node(neighbor_id) else {
                continue;
            };

            let g = current_g + model.distance(&current, &neighbor);
            let record = self.scratch.entry(neighbor_id).or_default();

            let skip = match self.options.policy {
                RevisitPolicy::SingleEnqueue => record.visited,
                RevisitPolicy::Relax => record.expanded || (record.visited && g >= record.g),
            };
            if skip {
                continue;
            }

            let h = heuristic(model, &neighbor, &self.end);
            *record = Scratch {
                visited: true,
                expanded: false,
                parent: Some(current.id),
                g,
                h,
            };
            self.open_list.push(QueueItem {
                node: neighbor,
                cost: g,
                score: g + h,
            });
        }

        Ok(())
    }
}

/// Finds a route between the nodes closest to two points of a [Model],
/// using [SearchOptions::default].
///
/// Coordinates are expected in the `0..=100` range, see [RoutePlanner::new].
pub fn find_route<M: Model + ?Sized>(
    model: &mut M,
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
) -> Result<Route, PlanError> {
    RoutePlanner::new(
        model,
        start_x,
        start_y,
        end_x,
        end_y,
        SearchOptions::default(),
    )?
    .search()
}
