//! G.3 Roundabout Handling.
//!
//! Grounded against
//! `examples/original_source/src/engine/guidance/collapse_turns.cpp`'s roundabout-run handler.

use crate::coordinate::turn_angle;
use crate::step_assembler::RouteStep;
use crate::turn::{DirectionModifier, TurnType};

fn is_stay_on(t: TurnType) -> bool {
    t == TurnType::StayOnRoundabout
}

fn is_enter(t: TurnType) -> bool {
    t.is_enter_roundabout()
}

fn is_exit(t: TurnType) -> bool {
    t.is_exit_roundabout()
}

/// Collapses each contiguous roundabout run (enter .. stays .. exit) down to an entry step
/// (carrying the exit count and rotary name) plus a preserved exit step.
pub fn handle_roundabouts(steps: &mut Vec<RouteStep>) {
    let mut i = 0;
    while i < steps.len() {
        if !is_enter(steps[i].maneuver.instruction.turn_type) {
            i += 1;
            continue;
        }

        let enter_idx = i;
        let mut j = i + 1;
        let mut exit_count = 0u32;
        while j < steps.len() && is_stay_on(steps[j].maneuver.instruction.turn_type) {
            exit_count += 1;
            j += 1;
        }
        let exit_idx = if j < steps.len() && is_exit(steps[j].maneuver.instruction.turn_type) {
            exit_count += 1;
            Some(j)
        } else {
            None
        };

        steps[enter_idx].maneuver.exit = exit_count;
        let rotary_name = steps[enter_idx].name.clone();
        steps[enter_idx].rotary_name = rotary_name;
        steps[enter_idx].rotary_pronunciation = steps[enter_idx].pronunciation.clone();

        if steps[enter_idx].maneuver.instruction.turn_type == TurnType::EnterRoundaboutIntersection {
            if let Some(exit) = exit_idx {
                let angle = turn_angle(steps[enter_idx].maneuver.bearing_before, steps[exit].maneuver.bearing_after);
                steps[enter_idx].maneuver.instruction.direction_modifier = DirectionModifier::from_turn_angle(angle);
            }
        }

        // Fold the stay-on run into the enter step's geometry/metrics; the exit step itself
        // survives as a distinct step.
        if j > enter_idx + 1 {
            let fold_end = exit_idx.unwrap_or(j);
            let (mut duration, mut distance, mut weight) = (0.0, 0.0, 0.0);
            let mut last_geometry_end = steps[enter_idx].geometry_end;
            for step in &steps[enter_idx + 1..fold_end] {
                duration += step.duration;
                distance += step.distance;
                weight += step.weight;
                last_geometry_end = step.geometry_end;
            }
            steps[enter_idx].duration += duration;
            steps[enter_idx].distance += distance;
            steps[enter_idx].weight += weight;
            steps[enter_idx].geometry_end = last_geometry_end;
            steps.drain(enter_idx + 1..fold_end);
        }

        i = enter_idx + 1 + if exit_idx.is_some() { 1 } else { 0 };
    }
}
