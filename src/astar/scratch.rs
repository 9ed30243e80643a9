// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Per-node bookkeeping of a single search run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct Scratch {
    /// Set when the node is first pushed onto the open list.
    pub visited: bool,

    /// Set when the node's neighbors were pushed onto the open list.
    pub expanded: bool,

    pub parent: Option<i64>,

    /// Cost from the start node along the parent chain.
    pub g: f32,

    /// Estimated cost to the end node.
    pub h: f32,
}

/// Scratch records of all nodes touched by a search run, keyed by node id.
/// Nodes without a record are implicitly [Scratch::default].
pub(super) type ScratchMap = HashMap<i64, Scratch>;
