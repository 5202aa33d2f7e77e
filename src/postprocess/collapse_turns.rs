//! G.5 Collapse Turn Instructions.
//!
//! Grounded against `examples/original_source/src/engine/guidance/collapse_turns.cpp`'s
//! sliproad/staggered/u-turn/name-oscillation/traffic-light merge rules. Roundabout steps are
//! left untouched here; §G.3 owns them entirely.

use crate::coordinate::{is_near_uturn_angle, turn_angle};
use crate::postprocess::combine::classify_combined_turn;
use crate::step_assembler::RouteStep;
use crate::turn::{DirectionModifier, TurnType, WaypointType};
use crate::GuidanceConfig;

fn is_waypoint(step: &RouteStep) -> bool {
    step.maneuver.waypoint_type != WaypointType::None
}

fn is_roundabout(step: &RouteStep) -> bool {
    step.maneuver.instruction.turn_type.is_roundabout_type()
}

fn fold_next_into(steps: &mut Vec<RouteStep>, idx: usize, new_type: TurnType, new_modifier: DirectionModifier) {
    let next = steps.remove(idx + 1);
    let curr = &mut steps[idx];
    curr.geometry_end = next.geometry_end;
    curr.duration += next.duration;
    curr.distance += next.distance;
    curr.weight += next.weight;
    curr.maneuver.bearing_after = next.maneuver.bearing_after;
    curr.maneuver.instruction.turn_type = new_type;
    curr.maneuver.instruction.direction_modifier = new_modifier;
}

pub fn collapse_turn_instructions(steps: &mut Vec<RouteStep>, config: &GuidanceConfig) {
    let mut i = 0;
    while i + 1 < steps.len() {
        if is_waypoint(&steps[i]) || is_waypoint(&steps[i + 1]) || is_roundabout(&steps[i]) || is_roundabout(&steps[i + 1]) {
            i += 1;
            continue;
        }
        if steps[i].mode != steps[i + 1].mode {
            i += 1;
            continue;
        }

        let prev_name = if i > 0 { steps[i - 1].name.clone() } else { String::new() };
        let curr = &steps[i];
        let next = &steps[i + 1];

        // Sliproad fold: the link itself is unnamed, so the merged step takes on the road it
        // rejoins rather than keeping the sliproad's (empty) identity.
        if curr.maneuver.instruction.turn_type == TurnType::Sliproad {
            let same_name = !prev_name.is_empty() && prev_name == next.name;
            let new_type = if same_name { TurnType::Continue } else { TurnType::Turn };
            let modifier = next.maneuver.instruction.direction_modifier;
            let next_name_id = next.name_id;
            let next_name = next.name.clone();
            let next_name_ref = next.name_ref.clone();
            let next_pronunciation = next.pronunciation.clone();
            let next_destinations = next.destinations.clone();
            let next_exits = next.exits.clone();
            fold_next_into(steps, i, new_type, modifier);
            let curr = &mut steps[i];
            curr.name_id = next_name_id;
            curr.name = next_name;
            curr.name_ref = next_name_ref;
            curr.pronunciation = next_pronunciation;
            curr.destinations = next_destinations;
            curr.exits = next_exits;
            continue;
        }

        // Staggered intersection: opposite-handed turns separated by a very short link.
        let curr_right_ish = (45.0..=135.0).contains(&curr.maneuver.instruction.direction_modifier.idealized_angle());
        let next_left_ish = (225.0..=315.0).contains(&next.maneuver.instruction.direction_modifier.idealized_angle());
        if (curr_right_ish && next_left_ish || !curr_right_ish && !next_left_ish)
            && curr.maneuver.instruction.direction_modifier.is_right_side() != next.maneuver.instruction.direction_modifier.is_right_side()
            && curr.distance < config.max_collapse_distance.min(3.0).max(3.0)
            && curr.distance <= 3.0
        {
            let same_name = !prev_name.is_empty() && prev_name == next.name;
            let new_type = if same_name { TurnType::Suppressed } else { TurnType::NewName };
            fold_next_into(steps, i, new_type, DirectionModifier::Straight);
            continue;
        }

        // U-turn fold: prev/next share a name and curr+next's turns reverse the incoming bearing.
        if i > 0 {
            let angle = turn_angle(steps[i].maneuver.bearing_before, steps[i + 1].maneuver.bearing_after);
            let reversed = is_near_uturn_angle(angle, 35.0);
            let names_match = !prev_name.is_empty() && prev_name == steps[i + 1].name;
            let eligible = matches!(
                steps[i].maneuver.instruction.turn_type,
                TurnType::Turn | TurnType::Continue | TurnType::EndOfRoad
            );
            if reversed && names_match && eligible {
                fold_next_into(steps, i, TurnType::Continue, DirectionModifier::UTurn);
                continue;
            }
        }

        // Name oscillation: prev == next name, middle is a slight/new-name blip.
        if i > 0 {
            let names_match = !prev_name.is_empty() && prev_name == steps[i + 1].name;
            let middle_is_blip = matches!(steps[i].maneuver.instruction.turn_type, TurnType::NewName)
                || matches!(
                    steps[i].maneuver.instruction.direction_modifier,
                    DirectionModifier::SlightLeft | DirectionModifier::SlightRight
                );
            if names_match && middle_is_blip {
                steps[i].maneuver.instruction.turn_type = TurnType::Suppressed;
                i += 1;
                continue;
            }
        }

        // Traffic lights: a Suppressed node-split point (two roads, one entry-allowed) folds
        // unconditionally into the preceding step.
        if steps[i + 1].maneuver.instruction.turn_type == TurnType::Suppressed && steps[i + 1].intersections.len() == 1 {
            let intersection = &steps[i + 1].intersections[0];
            if intersection.bearings.len() == 2 && intersection.entry.iter().filter(|e| **e).count() == 1 {
                let modifier = steps[i].maneuver.instruction.direction_modifier;
                let turn_type = steps[i].maneuver.instruction.turn_type;
                fold_next_into(steps, i, turn_type, modifier);
                continue;
            }
        }

        // Generic name-change/choiceless micro-patterns: fall back to the combined-turn
        // classification strategy and merge curr into next.
        if steps[i].maneuver.instruction.turn_type == TurnType::Suppressed
            || steps[i + 1].maneuver.instruction.turn_type == TurnType::NewName
        {
            let angle = turn_angle(steps[i].maneuver.bearing_before, steps[i + 1].maneuver.bearing_after);
            let combined_modifier = DirectionModifier::from_turn_angle(angle);
            let new_type = classify_combined_turn(
                &prev_name,
                steps[i].maneuver.instruction.turn_type,
                steps[i + 1].maneuver.instruction.turn_type,
                combined_modifier,
                &steps[i + 1].name.clone(),
            );
            fold_next_into(steps, i, new_type, combined_modifier);
            continue;
        }

        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::ids::NameID;
    use crate::step_assembler::StepManeuver;
    use crate::turn::TurnInstruction;

    fn step(name: &str, turn_type: TurnType, modifier: DirectionModifier, distance: f64, bearing_before: f64, bearing_after: f64) -> RouteStep {
        RouteStep {
            from_id: NameID::SPECIAL_NAMEID,
            name_id: NameID::SPECIAL_NAMEID,
            is_segregated: false,
            name: name.to_string(),
            name_ref: String::new(),
            pronunciation: String::new(),
            destinations: String::new(),
            exits: String::new(),
            rotary_name: String::new(),
            rotary_pronunciation: String::new(),
            duration: 2.0,
            distance,
            weight: 2.0,
            mode: crate::travel_mode::TravelMode::Driving,
            maneuver: StepManeuver {
                location: Coordinate::from_degrees(0.0, 0.0),
                bearing_before,
                bearing_after,
                instruction: TurnInstruction::new(turn_type, modifier),
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
    fn uturn_fold_collapses_three_steps_to_one() {
        let mut steps = vec![
            step("Main St", TurnType::Continue, DirectionModifier::Straight, 50.0, 0.0, 0.0),
            step("Side St", TurnType::Turn, DirectionModifier::Left, 10.0, 0.0, 270.0),
            step("Main St", TurnType::Turn, DirectionModifier::Left, 50.0, 270.0, 180.0),
        ];
        collapse_turn_instructions(&mut steps, &GuidanceConfig::default());
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].maneuver.instruction.turn_type, TurnType::Continue);
        assert_eq!(steps[1].maneuver.instruction.direction_modifier, DirectionModifier::UTurn);
    }

    #[test]
    fn sliproad_fold_uses_next_name() {
        let mut steps = vec![
            step("Highway", TurnType::Continue, DirectionModifier::Straight, 200.0, 0.0, 0.0),
            step("", TurnType::Sliproad, DirectionModifier::SlightRight, 15.0, 0.0, 20.0),
            step("Exit Road", TurnType::Turn, DirectionModifier::Right, 50.0, 20.0, 90.0),
        ];
        collapse_turn_instructions(&mut steps, &GuidanceConfig::default());
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].maneuver.instruction.turn_type, TurnType::Turn);
    }
}
