// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Node;

/// An entry of the [OpenList]: a snapshot of a node together with
/// the cost (g-value) and score (f-value) it was pushed with.
#[derive(Debug, Clone, Copy)]
pub(super) struct QueueItem {
    pub node: Node,
    pub cost: f32,
    pub score: f32,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        // Ties go to the lower node id, so that equal scores pop in the same order
        // regardless of insertion order.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.node.id.cmp(&self.node.id))
            .then_with(|| other.cost.total_cmp(&self.cost))
    }
}

/// Frontier of the A* search: nodes which were discovered, but not yet expanded.
#[derive(Debug, Default)]
pub(super) struct OpenList(BinaryHeap<QueueItem>);

impl OpenList {
    pub(super) fn push(&mut self, item: QueueItem) {
        self.0.push(item);
    }

    /// Removes and returns the entry with the lowest score.
    pub(super) fn pop_best(&mut self) -> Option<QueueItem> {
        self.0.pop()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.0.len()
    }
}
