//! Flight distance of the monitoring drone over an estate.
//!
//! The drone starts on the first plot, sweeps every 10×10 m plot of the
//! estate once, climbs over each tree it meets and lands at the end. Only
//! the total distance is produced; the route itself is never materialized.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Tree, PLOT_SIZE_METERS};

/// Meters above the tallest point the drone flies at, plus the final descent.
pub const FLIGHT_OVERHEAD_METERS: i64 = 2;

/// Result of planning a drone route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DronePlan {
    pub distance: i64,
}

/// Horizontal distance for sweeping a `length` × `width` estate.
///
/// The last plot on each axis needs no extra move since the drone is
/// already above it.
pub fn sweep_distance(length: i32, width: i32) -> i64 {
    (i64::from(length) - 1) * PLOT_SIZE_METERS + (i64::from(width) - 1) * PLOT_SIZE_METERS
}

/// Vertical distance spent clearing trees: the tallest tree of each occupied
/// plot, summed over all occupied plots.
pub fn vertical_distance(trees: &[Tree]) -> i64 {
    let mut tallest: HashMap<(i32, i32), i32> = HashMap::with_capacity(trees.len());
    for tree in trees {
        let entry = tallest.entry((tree.x, tree.y)).or_insert(tree.height);
        if tree.height > *entry {
            *entry = tree.height;
        }
    }
    tallest.values().map(|&h| i64::from(h)).sum()
}

/// Total travel distance for the drone over an estate and its trees.
///
/// An estate without trees still pays the sweep and the fixed overhead.
pub fn compute_drone_plan(length: i32, width: i32, trees: &[Tree]) -> DronePlan {
    DronePlan {
        distance: sweep_distance(length, width) + vertical_distance(trees) + FLIGHT_OVERHEAD_METERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EstateId, TreeId};
    use chrono::Utc;

    fn tree(x: i32, y: i32, height: i32) -> Tree {
        Tree {
            id: TreeId::generate(),
            estate_id: EstateId::generate(),
            x,
            y,
            height,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_estate_pays_sweep_and_overhead() {
        let plan = compute_drone_plan(5, 20, &[]);
        assert_eq!(plan.distance, 232); // (5-1)*10 + (20-1)*10 + 2
    }

    #[test]
    fn test_single_plot_single_tree() {
        let plan = compute_drone_plan(1, 1, &[tree(1, 1, 5)]);
        assert_eq!(plan.distance, 7);
    }

    #[test]
    fn test_heights_add_per_plot() {
        let trees = vec![tree(2, 1, 5), tree(3, 1, 3), tree(4, 1, 4)];
        let plan = compute_drone_plan(5, 1, &trees);
        assert_eq!(plan.distance, 40 + 12 + 2);
    }

    #[test]
    fn test_shared_plot_counts_tallest_only() {
        let trees = vec![tree(2, 2, 5), tree(2, 2, 9)];
        assert_eq!(vertical_distance(&trees), 9);
    }

    #[test]
    fn test_largest_estate_does_not_overflow() {
        let plan = compute_drone_plan(50_000, 50_000, &[tree(50_000, 50_000, 30)]);
        assert_eq!(plan.distance, 499_990 * 2 + 30 + 2);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let trees = vec![tree(1, 1, 10), tree(3, 7, 20)];
        assert_eq!(
            compute_drone_plan(10, 10, &trees),
            compute_drone_plan(10, 10, &trees)
        );
    }
}
