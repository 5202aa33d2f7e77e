//! Roundabout/rotary/mini-roundabout classification (§4.E step 6).
//!
//! Grounded against `examples/original_source/src/guidance/roundabout_handler.cpp`'s ring-radius
//! and exit-count thresholds (5 m mini-roundabout radius, 15 m rotary radius, 4-exit/60-degree
//! well-distinct-exit rule).

use std::f64::consts::PI;

const MINI_ROUNDABOUT_RADIUS_M: f64 = 5.0;
const ROTARY_RADIUS_M: f64 = 15.0;
const WELL_DISTINCT_EXIT_GAP_DEGREES: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundaboutType {
    None,
    RoundaboutIntersection,
    Rotary,
    Roundabout,
}

/// `exit_bearings` are the geographic bearings of each exit off the ring, used to test the
/// "well-distinct exits" condition (pairwise gap > 60 degrees).
pub fn classify_ring(
    ring_length_m: f64,
    exit_bearings: &[f64],
    has_unique_consistent_name: bool,
    tagged_circular: bool,
) -> RoundaboutType {
    if ring_length_m <= 0.0 {
        return RoundaboutType::None;
    }
    let radius = ring_length_m / (2.0 * PI);

    let well_distinct = exit_bearings.len() <= 1 || pairwise_min_gap(exit_bearings) > WELL_DISTINCT_EXIT_GAP_DEGREES;

    if (exit_bearings.len() <= 1 || (exit_bearings.len() <= 4 && well_distinct)) && radius < MINI_ROUNDABOUT_RADIUS_M {
        return RoundaboutType::RoundaboutIntersection;
    }

    if (has_unique_consistent_name && radius > ROTARY_RADIUS_M) || tagged_circular {
        return RoundaboutType::Rotary;
    }

    RoundaboutType::Roundabout
}

fn pairwise_min_gap(bearings: &[f64]) -> f64 {
    let mut sorted = bearings.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut min_gap = f64::INFINITY;
    for w in sorted.windows(2) {
        min_gap = min_gap.min(w[1] - w[0]);
    }
    if sorted.len() > 1 {
        let wraparound = sorted[0] + 360.0 - sorted.last().unwrap();
        min_gap = min_gap.min(wraparound);
    }
    min_gap
}
