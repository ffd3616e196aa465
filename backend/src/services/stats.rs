//! Height statistics for the trees of one estate.

use serde::{Deserialize, Serialize};

/// Summary of tree heights on an estate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateStats {
    pub count: usize,
    pub min: i32,
    pub max: i32,
    pub median: i32,
}

/// Compute count, min, max and median over heights sorted in ascending order.
///
/// The input is expected to be sorted already; storage returns heights
/// ordered, so no sorting happens here. An empty slice yields all zeros.
/// For an even count the median is the floor of the mean of the two middle
/// heights, e.g. `[1, 2, 3, 4]` gives `2`.
pub fn compute_stats(sorted_heights: &[i32]) -> EstateStats {
    let count = sorted_heights.len();
    if count == 0 {
        return EstateStats::default();
    }

    let median = if count % 2 == 0 {
        (sorted_heights[count / 2 - 1] + sorted_heights[count / 2]) / 2
    } else {
        sorted_heights[count / 2]
    };

    EstateStats {
        count,
        min: sorted_heights[0],
        max: sorted_heights[count - 1],
        median,
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
