//! Route assembly (§4.H): sums leg/step metrics into the aggregate `Route`/`RouteLeg` types. No
//! additional logic beyond summation and the leg summary.

use std::collections::HashMap;

use crate::route::{Route, RouteLeg};
use crate::step_assembler::RouteStep;

/// Builds one leg's aggregate fields from its (already post-processed) step vector.
pub fn assemble_leg(steps: Vec<RouteStep>) -> RouteLeg {
    let distance = steps.iter().map(|s| s.distance).sum();
    let duration = steps.iter().map(|s| s.duration).sum();
    let weight = steps.iter().map(|s| s.weight).sum();
    let summary = summarize_names(&steps);

    RouteLeg {
        distance,
        duration,
        weight,
        summary,
        steps,
    }
}

/// The two street names with the greatest cumulative travel duration on this leg, in descending
/// order of duration, joined with `", "`. Unnamed steps don't contribute a name.
fn summarize_names(steps: &[RouteStep]) -> String {
    let mut duration_by_name: HashMap<&str, f64> = HashMap::new();
    for step in steps {
        if step.name.is_empty() {
            continue;
        }
        *duration_by_name.entry(step.name.as_str()).or_insert(0.0) += step.duration;
    }

    let mut ranked: Vec<(&str, f64)> = duration_by_name.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    ranked.into_iter().take(2).map(|(name, _)| name).collect::<Vec<_>>().join(", ")
}

/// Sums legs into the route total.
pub fn assemble_route(legs: Vec<RouteLeg>) -> Route {
    let distance = legs.iter().map(|l| l.distance).sum();
    let duration = legs.iter().map(|l| l.duration).sum();
    let weight = legs.iter().map(|l| l.weight).sum();

    Route {
        distance,
        duration,
        weight,
        legs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::ids::NameID;
    use crate::step_assembler::StepManeuver;
    use crate::turn::{DirectionModifier, TurnInstruction, TurnType, WaypointType};

    fn named_step(name: &str, duration: f64, distance: f64) -> RouteStep {
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
            duration,
            distance,
            weight: duration,
            mode: crate::travel_mode::TravelMode::Driving,
            maneuver: StepManeuver {
                location: Coordinate::from_degrees(0.0, 0.0),
                bearing_before: 0.0,
                bearing_after: 0.0,
                instruction: TurnInstruction::new(TurnType::Turn, DirectionModifier::Straight),
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
    fn summary_picks_top_two_by_duration() {
        let steps = vec![
            named_step("Main St", 100.0, 500.0),
            named_step("Oak Ave", 50.0, 200.0),
            named_step("Side St", 10.0, 20.0),
        ];
        let leg = assemble_leg(steps);
        assert_eq!(leg.summary, "Main St, Oak Ave");
        assert_eq!(leg.distance, 720.0);
        assert_eq!(leg.duration, 160.0);
    }

    #[test]
    fn route_sums_across_legs() {
        let leg_a = assemble_leg(vec![named_step("Main St", 100.0, 500.0)]);
        let leg_b = assemble_leg(vec![named_step("Oak Ave", 50.0, 200.0)]);
        let route = assemble_route(vec![leg_a, leg_b]);
        assert_eq!(route.distance, 700.0);
        assert_eq!(route.duration, 150.0);
    }
}
