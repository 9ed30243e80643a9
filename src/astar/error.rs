// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed node expansions in [RoutePlanner::search](crate::RoutePlanner::search)
/// before [PlanError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur when planning a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The [Model](crate::Model) has no nodes, so the query coordinates can't be resolved.
    #[error("model has no nodes")]
    EmptyModel,

    /// A referenced node doesn't exist in the [Model](crate::Model).
    #[error("invalid node: {0}")]
    InvalidReference(i64),

    /// All nodes reachable from the start were expanded without reaching the end.
    #[error("node {to} is unreachable from node {from}")]
    Unreachable { from: i64, to: i64 },

    /// Route search has exceeded its limit of steps.
    /// Either the nodes are really far apart, or no route exists.
    ///
    /// Concluding that no route exists requires traversing the whole reachable graph,
    /// which can result in a denial-of-service. The step limit protects
    /// against resource exhaustion.
    #[error("step limit exceeded")]
    StepLimitExceeded,

    /// Following parents from the given node did not lead back to the start node
    /// within as many hops as there are nodes in the model.
    #[error("parent chain of node {0} does not lead back to the start node")]
    BrokenParentChain(i64),
}
