//! Intersection analysis (§4.E): classifies the roads connected to an intersection node and
//! assigns each an initial `TurnType`/`DirectionModifier`.
//!
//! Grounded against `examples/original_source/src/extractor/intersection/intersection_analysis.cpp`
//! for the `IntersectionView`/`IntersectionViewData` (here: `ConnectedRoad`) shape, and the
//! `src/guidance/*_handler.cpp` family for the individual pipeline steps. Split into submodules the
//! way the original splits "classify roundabout" / "classify sliproad" / "classify motorway" into
//! separate translation units.

mod analyzer;
pub mod coordinate_extractor;
mod roundabout;
mod sliproad;

pub use analyzer::{analyze_intersection, IntersectionInput, OutgoingRoad};
pub use roundabout::RoundaboutType;

use crate::ids::{EdgeID, LaneDescriptionID};
use crate::turn::TurnInstruction;

/// One road connected to an intersection, in the perceived-angle-sorted order described in
/// SPEC_FULL.md §3 (`Intersection / IntersectionView`).
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectedRoad {
    pub edge_id: EdgeID,
    /// Perceived angle in `[0, 360)`, measured clockwise from the reversed incoming edge.
    pub angle: f64,
    /// Geographic bearing, independent of the intersection's perceived angle.
    pub bearing: f64,
    pub entry_allowed: bool,
    pub instruction: TurnInstruction,
    pub lane_data_id: Option<LaneDescriptionID>,
    pub segment_length: f64,
    pub is_valid: bool,
}

impl ConnectedRoad {
    pub fn uturn(bearing: f64) -> Self {
        ConnectedRoad {
            edge_id: EdgeID::SPECIAL_EDGEID,
            angle: 0.0,
            bearing,
            entry_allowed: false,
            instruction: TurnInstruction::NO_TURN,
            lane_data_id: None,
            segment_length: 0.0,
            is_valid: false,
        }
    }
}

/// The ordered view of roads leaving one intersection. Index 0 is always the U-turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntersectionView {
    pub roads: Vec<ConnectedRoad>,
}

impl IntersectionView {
    pub fn new(roads: Vec<ConnectedRoad>) -> Self {
        IntersectionView { roads }
    }

    /// Testable Property: index 0 is always the U-turn road.
    pub fn check_uturn_first(&self) -> bool {
        self.roads.first().map(|r| r.angle == 0.0).unwrap_or(true)
    }

    pub fn entry_allowed_count(&self) -> usize {
        self.roads.iter().filter(|r| r.entry_allowed).count()
    }
}
