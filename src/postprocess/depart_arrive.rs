//! G.9 Assign Relative Depart/Arrive Locations.
//!
//! Grounded against
//! `examples/original_source/src/engine/guidance/post_processing.cpp`'s depart/arrive modifier
//! assignment, which looks at the angle between the raw input location and the snapped source
//! (or target) to tell the rider which way to walk to reach the road.

use crate::coordinate::{turn_angle, Coordinate};
use crate::step_assembler::RouteStep;
use crate::turn::{DirectionModifier, WaypointType};

const MIN_SEGMENT_M: f64 = 5.0;
const MAX_SEGMENT_M: f64 = 300.0;

/// `input_location` is the raw (unsnapped) coordinate the traveler requested; `snapped` is where
/// routing actually begins/ends; `next` is the next/previous geometry location along the leg.
fn relative_modifier(input_location: Coordinate, snapped: Coordinate, next: Coordinate) -> DirectionModifier {
    let leg1 = input_location.haversine_distance(&snapped);
    let leg2 = snapped.haversine_distance(&next);
    if leg1 < MIN_SEGMENT_M || leg1 > MAX_SEGMENT_M || leg2 < MIN_SEGMENT_M || leg2 > MAX_SEGMENT_M {
        return DirectionModifier::UTurn;
    }
    let bearing_in = input_location.bearing_to(&snapped);
    let bearing_out = snapped.bearing_to(&next);
    DirectionModifier::from_turn_angle(turn_angle(bearing_in, bearing_out))
}

pub fn assign_depart_arrive_locations(
    steps: &mut [RouteStep],
    depart_input_location: Coordinate,
    arrive_input_location: Coordinate,
) {
    if steps.len() < 2 {
        return;
    }

    let depart_snapped = steps[0].maneuver.location;
    let depart_next = steps[1].maneuver.location;
    steps[0].maneuver.instruction.direction_modifier = relative_modifier(depart_input_location, depart_snapped, depart_next);

    let n = steps.len();
    let arrive_snapped = steps[n - 1].maneuver.location;
    let arrive_prev = steps[n - 2].maneuver.location;
    steps[n - 1].maneuver.instruction.direction_modifier = relative_modifier(arrive_input_location, arrive_snapped, arrive_prev);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::NameID;
    use crate::step_assembler::StepManeuver;
    use crate::turn::{TurnInstruction, TurnType};

    fn step(loc: Coordinate, waypoint: WaypointType) -> RouteStep {
        RouteStep {
            from_id: NameID::SPECIAL_NAMEID,
            name_id: NameID::SPECIAL_NAMEID,
            is_segregated: false,
            name: String::new(),
            name_ref: String::new(),
            pronunciation: String::new(),
            destinations: String::new(),
            exits: String::new(),
            rotary_name: String::new(),
            rotary_pronunciation: String::new(),
            duration: 1.0,
            distance: 1.0,
            weight: 1.0,
            mode: crate::travel_mode::TravelMode::Driving,
            maneuver: StepManeuver {
                location: loc,
                bearing_before: 0.0,
                bearing_after: 0.0,
                instruction: TurnInstruction::new(TurnType::NoTurn, DirectionModifier::Straight),
                waypoint_type: waypoint,
                exit: 0,
            },
            geometry_begin: 0,
            geometry_end: 1,
            intersections: vec![],
            is_left_hand_driving: false,
        }
    }

    #[test]
    fn tiny_offset_yields_uturn_modifier() {
        let mut steps = vec![
            step(Coordinate::from_degrees(0.0, 0.0), WaypointType::Depart),
            step(Coordinate::from_degrees(0.0, 0.002), WaypointType::Arrive),
        ];
        let input = Coordinate::from_degrees(0.00001, 0.00001);
        assign_depart_arrive_locations(&mut steps, input, input);
        assert_eq!(steps[0].maneuver.instruction.direction_modifier, DirectionModifier::UTurn);
    }
}
