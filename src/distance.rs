// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Calculates the straight-line distance between two positions
/// in the normalized map-fraction space.
///
/// The computation is done in `f64` and rounded back, so that the result is
/// symmetric and does not drift for nearly-identical points.
pub fn euclidean_distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 as f64 - x1 as f64;
    let dy = y2 as f64 - y1 as f64;
    dx.hypot(dy) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(0.0, 0.0, 0.75, 1.0), 1.25);
        assert_eq!(euclidean_distance(0.75, 1.0, 0.0, 0.0), 1.25);
        assert_eq!(euclidean_distance(0.25, 0.75, 0.25, 0.75), 0.0);
    }
}
