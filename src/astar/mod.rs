// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod heuristic;
mod open_list;
mod options;
mod planner;
mod reconstruct;
mod scratch;

pub use error::{PlanError, DEFAULT_STEP_LIMIT};
pub use options::{RevisitPolicy, SearchOptions};
pub use planner::{find_route, RoutePlanner, SearchState};
