//! Explicit post-processing configuration.
//!
//! The original implementation kept the collapse-distance threshold as a thread-local so callers
//! could tweak it per request without plumbing it through every function signature. Per the
//! REDESIGN FLAGS in SPEC_FULL.md §9, we instead thread a plain configuration struct explicitly;
//! a process-wide `Default` is kept for ergonomics.

/// Tunables shared by the intersection analyzer and the step post-processor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuidanceConfig {
    /// Maximum distance, in meters, over which two turns may be collapsed into one (staggered
    /// intersections, U-turns, sliproads, name oscillation).
    pub max_collapse_distance: f64,
    /// Maximum length, in meters, of a link road that can still be considered a sliproad.
    pub max_sliproad_threshold: f64,
    /// Minimum number of intermediate intersections an `EndOfRoad` step must have passed to keep
    /// that classification; otherwise it is demoted to `Continue`/`Turn`.
    pub min_end_of_road_intersections: usize,
    /// Any `NewName` step shorter than this (in meters) is folded into its predecessor.
    pub short_name_cutoff: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        GuidanceConfig {
            max_collapse_distance: 30.0,
            max_sliproad_threshold: 60.0,
            min_end_of_road_intersections: 2,
            short_name_cutoff: 105.0,
        }
    }
}
