//! G.1 Maneuver Overrides.
//!
//! Grounded against `examples/original_source/include/engine/guidance/post_processing.hpp`'s
//! override-application pass; matching logic itself lives in `maneuver_override::ManeuverOverride`.

use crate::maneuver_override::ManeuverOverride;
use crate::step_assembler::RouteStep;

/// Applies operator-supplied instruction overrides: for each override whose via-node sequence
/// matches the path this leg took, rewrite the step whose maneuver location coincides with the
/// override's turn coordinate.
pub fn apply_maneuver_overrides(steps: &mut [RouteStep], overrides: &[ManeuverOverride], path_node_sequence: &[crate::ids::NodeID]) {
    for over in overrides {
        if !over.matches_path(path_node_sequence) {
            continue;
        }
        for step in steps.iter_mut() {
            if step.maneuver.location != over.turn_coordinate {
                continue;
            }
            if let Some(new_type) = over.new_type {
                step.maneuver.instruction.turn_type = new_type;
            }
            if let Some(new_modifier) = over.new_modifier {
                step.maneuver.instruction.direction_modifier = new_modifier;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::ids::NodeID;
    use crate::turn::{DirectionModifier, TurnInstruction, TurnType, WaypointType};

    fn step_at(loc: Coordinate) -> RouteStep {
        RouteStep {
            from_id: crate::ids::NameID::SPECIAL_NAMEID,
            name_id: crate::ids::NameID::SPECIAL_NAMEID,
            is_segregated: false,
            name: String::new(),
            name_ref: String::new(),
            pronunciation: String::new(),
            destinations: String::new(),
            exits: String::new(),
            rotary_name: String::new(),
            rotary_pronunciation: String::new(),
            duration: 10.0,
            distance: 10.0,
            weight: 10.0,
            mode: crate::travel_mode::TravelMode::Driving,
            maneuver: crate::step_assembler::StepManeuver {
                location: loc,
                bearing_before: 0.0,
                bearing_after: 90.0,
                instruction: TurnInstruction::new(TurnType::Turn, DirectionModifier::Right),
                waypoint_type: WaypointType::None,
                exit: 0,
            },
            geometry_begin: 0,
            geometry_end: 1,
            intersections: vec![],
            is_left_hand_driving: false,
        }
    }

    #[test]
    fn override_rewrites_matching_step() {
        let loc = Coordinate::from_degrees(1.0, 1.0);
        let mut steps = vec![step_at(loc)];
        let overrides = vec![ManeuverOverride {
            node_sequence: vec![NodeID(1), NodeID(2)],
            turn_coordinate: loc,
            new_type: Some(TurnType::Continue),
            new_modifier: None,
        }];
        apply_maneuver_overrides(&mut steps, &overrides, &[NodeID(1), NodeID(2), NodeID(3)]);
        assert_eq!(steps[0].maneuver.instruction.turn_type, TurnType::Continue);
        assert_eq!(steps[0].maneuver.instruction.direction_modifier, DirectionModifier::Right);
    }
}
