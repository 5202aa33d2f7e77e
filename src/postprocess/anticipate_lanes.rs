//! G.7 Anticipate Lane Changes.
//!
//! Grounded against
//! `examples/original_source/include/engine/guidance/lane_processing.hpp`'s `anticipateLaneChange`:
//! when two maneuvers close together each demand a lane change, narrow the earlier maneuver's
//! recommendation to lanes valid for both, so the driver changes lanes once instead of twice.

use crate::facade::DataFacade;
use crate::lane::{LaneGroup, TurnLaneDescription};
use crate::step_assembler::RouteStep;
use crate::turn::WaypointType;

const ANTICIPATION_THRESHOLD_M: f64 = 200.0;

pub fn anticipate_lane_changes<F: DataFacade>(steps: &mut [RouteStep], facade: &F) {
    for i in 0..steps.len().saturating_sub(1) {
        if steps[i].maneuver.waypoint_type != WaypointType::None || steps[i + 1].maneuver.waypoint_type != WaypointType::None {
            continue;
        }
        if steps[i + 1].distance > ANTICIPATION_THRESHOLD_M {
            continue;
        }

        let Some(earlier_id) = steps[i].intersections.last().and_then(|x| x.lanes) else { continue };
        let Some(later_id) = steps[i + 1].intersections.last().and_then(|x| x.lanes) else { continue };

        let earlier = facade.turn_description(earlier_id);
        let later = facade.turn_description(later_id);
        if earlier.is_empty() || later.is_empty() {
            continue;
        }

        let narrowed = intersect_lane_descriptions(&earlier, &later);
        if narrowed.0.len() < earlier.0.len() && !narrowed.0.is_empty() {
            if let Some(intersection) = steps[i].intersections.last_mut() {
                intersection.anticipated_lanes = Some(narrowed);
            }
        }
    }
}

/// Keeps only the lane groups of `earlier` whose tag set shares at least one tag with some group
/// of `later` -- the lanes that remain valid choices under both upcoming maneuvers.
fn intersect_lane_descriptions(earlier: &TurnLaneDescription, later: &TurnLaneDescription) -> TurnLaneDescription {
    let later_tags: std::collections::HashSet<_> = later.0.iter().flat_map(|g| g.0.iter().copied()).collect();
    let kept: Vec<LaneGroup> = earlier
        .0
        .iter()
        .filter(|group| group.0.iter().any(|tag| later_tags.contains(tag)))
        .cloned()
        .collect();
    TurnLaneDescription(kept)
}
