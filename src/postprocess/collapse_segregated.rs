//! G.2 Collapse Segregated Turns.
//!
//! Grounded against
//! `examples/original_source/src/engine/guidance/collapse_turns.cpp`'s segregated-island merge.

use crate::coordinate::{is_near_uturn_angle, turn_angle};
use crate::postprocess::combine::classify_combined_turn;
use crate::step_assembler::RouteStep;
use crate::turn::{DirectionModifier, TurnType, WaypointType};

/// Merges a segregated step into its successor when the successor is itself segregated, or is a
/// valid turn reached directly from the segregated island, then drops any step left a bare
/// `NoTurn` continuation.
pub fn collapse_segregated_turns(steps: &mut Vec<RouteStep>) {
    let mut i = 0;
    while i + 1 < steps.len() {
        let curr_is_waypoint = steps[i].maneuver.waypoint_type != WaypointType::None;
        let next_is_waypoint = steps[i + 1].maneuver.waypoint_type != WaypointType::None;
        if curr_is_waypoint || next_is_waypoint || !steps[i].is_segregated {
            i += 1;
            continue;
        }

        let next_is_mergeable = steps[i + 1].is_segregated || steps[i + 1].maneuver.instruction.turn_type != TurnType::NoTurn;
        if !next_is_mergeable {
            i += 1;
            continue;
        }

        let next = steps.remove(i + 1);
        let curr = &mut steps[i];

        curr.geometry_end = next.geometry_end;
        curr.duration += next.duration;
        curr.distance += next.distance;
        curr.weight += next.weight;

        let angle = turn_angle(curr.maneuver.bearing_before, next.maneuver.bearing_after);
        let combined_modifier = DirectionModifier::from_turn_angle(angle);

        let same_name = !curr.name.is_empty() && curr.name == next.name;
        let near_reversed = is_near_uturn_angle(angle, 35.0);

        curr.maneuver.instruction.turn_type = if near_reversed {
            TurnType::Continue
        } else if curr.maneuver.instruction.turn_type == TurnType::EndOfRoad {
            TurnType::EndOfRoad
        } else {
            classify_combined_turn(
                if same_name { curr.name.as_str() } else { "" },
                curr.maneuver.instruction.turn_type,
                next.maneuver.instruction.turn_type,
                combined_modifier,
                next.name.as_str(),
            )
        };
        curr.maneuver.instruction.direction_modifier = if near_reversed {
            DirectionModifier::UTurn
        } else {
            combined_modifier
        };
        curr.maneuver.bearing_after = next.maneuver.bearing_after;

        i += 1;
    }

    steps.retain(|s| {
        s.maneuver.waypoint_type != WaypointType::None || s.maneuver.instruction.turn_type != TurnType::NoTurn
    });
}
