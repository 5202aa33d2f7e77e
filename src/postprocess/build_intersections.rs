//! G.8 Build Intersections & Suppress Short Names.
//!
//! Grounded against
//! `examples/original_source/src/engine/guidance/post_processing.cpp`'s suppress-short-name and
//! intersection-merging passes.

use crate::step_assembler::RouteStep;
use crate::turn::{DirectionModifier, TurnType, WaypointType};
use crate::GuidanceConfig;

fn fold_forward(steps: &mut Vec<RouteStep>, idx: usize) {
    let next = steps.remove(idx + 1);
    let curr = &mut steps[idx];
    curr.geometry_end = next.geometry_end;
    curr.duration += next.duration;
    curr.distance += next.distance;
    curr.weight += next.weight;
    curr.maneuver.bearing_after = next.maneuver.bearing_after;
    curr.intersections.extend(next.intersections);
}

pub fn build_intersections_and_suppress_short_names(steps: &mut Vec<RouteStep>, config: &GuidanceConfig) {
    // Collapse consecutive Suppressed steps into their predecessor.
    let mut i = 0;
    while i + 1 < steps.len() {
        let next_is_waypoint = steps[i + 1].maneuver.waypoint_type != WaypointType::None;
        if !next_is_waypoint && steps[i + 1].maneuver.instruction.turn_type == TurnType::Suppressed {
            fold_forward(steps, i);
            continue;
        }
        i += 1;
    }

    // Demote EndOfRoad steps whose predecessor passed no intermediate intersections.
    for i in 1..steps.len() {
        if steps[i].maneuver.instruction.turn_type != TurnType::EndOfRoad {
            continue;
        }
        if steps[i - 1].intersections.len() < config.min_end_of_road_intersections {
            steps[i].maneuver.instruction.turn_type = if steps[i].maneuver.instruction.direction_modifier == DirectionModifier::Straight {
                TurnType::Continue
            } else {
                TurnType::Turn
            };
        }
    }

    // Fold short NewName steps into their predecessor.
    let mut i = 1;
    while i < steps.len() {
        let is_waypoint = steps[i].maneuver.waypoint_type != WaypointType::None;
        if !is_waypoint
            && steps[i].maneuver.instruction.turn_type == TurnType::NewName
            && steps[i].distance < config.short_name_cutoff
            && steps[i - 1].mode == steps[i].mode
        {
            fold_forward(steps, i - 1);
            continue;
        }
        i += 1;
    }
}
