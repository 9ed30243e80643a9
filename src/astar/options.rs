// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::error::DEFAULT_STEP_LIMIT;

/// What happens when a node which is already on the open list is reached again
/// through a different node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RevisitPolicy {
    /// Every node is pushed onto the open list at most once, and keeps the parent
    /// through which it was first discovered. Fast and deterministic, but the returned
    /// route is not guaranteed to be the shortest one.
    #[default]
    SingleEnqueue,

    /// A discovered, but not yet expanded node is pushed again whenever a strictly cheaper
    /// way to it is found; outdated open list entries are skipped. Expanded nodes are
    /// never reopened. Always returns the shortest route.
    Relax,
}

/// Additional controls for [RoutePlanner](crate::RoutePlanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// How to treat nodes reached more than once, see [RevisitPolicy].
    pub policy: RevisitPolicy,

    /// Limits how many nodes may be expanded during the search before returning
    /// [PlanError::StepLimitExceeded](crate::PlanError::StepLimitExceeded).
    /// Concluding that no route exists requires expanding all nodes accessible from the start,
    /// which is usually very time-consuming on large graphs. The recommended value is
    /// [DEFAULT_STEP_LIMIT].
    pub step_limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            policy: RevisitPolicy::default(),
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}
