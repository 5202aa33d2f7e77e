//! G.4 Trim Short Segments.
//!
//! Grounded against `examples/original_source/src/engine/guidance/post_processing.cpp`'s
//! `trimShortSegments` (leading/trailing near-zero-length segment removal).

use crate::leg_geometry::LegGeometry;
use crate::step_assembler::RouteStep;
use crate::turn::WaypointType;

const SHORT_SEGMENT_THRESHOLD_M: f64 = 1.0;

/// Drops a spurious near-zero-length leading or trailing segment, re-indexing every step's
/// `geometry_begin`/`geometry_end` and promoting the new first/last step to Depart/Arrive.
pub fn trim_short_segments(steps: &mut [RouteStep], geometry: &mut LegGeometry) {
    trim_leading(steps, geometry);
    trim_trailing(steps, geometry);
}

fn trim_leading(steps: &mut [RouteStep], geometry: &mut LegGeometry) {
    if geometry.locations.len() < 2 {
        return;
    }
    let coincide = geometry.locations[0] == geometry.locations[1];
    let short = geometry.segment_distances.first().copied().unwrap_or(0.0) <= SHORT_SEGMENT_THRESHOLD_M;
    if !coincide && !short {
        return;
    }

    geometry.locations.remove(0);
    geometry.annotations.remove(0);
    geometry.osm_node_ids.remove(0);
    if !geometry.segment_distances.is_empty() {
        geometry.segment_distances.remove(0);
    }
    for offset in geometry.segment_offsets.iter_mut() {
        *offset = offset.saturating_sub(1);
    }

    for step in steps.iter_mut() {
        step.geometry_begin = step.geometry_begin.saturating_sub(1);
        step.geometry_end = step.geometry_end.saturating_sub(1);
    }

    if let Some(first) = steps.first_mut() {
        first.maneuver.waypoint_type = WaypointType::Depart;
        if geometry.locations.len() >= 2 {
            first.maneuver.bearing_after = geometry.locations[0].bearing_to(&geometry.locations[1]);
        }
    }
}

fn trim_trailing(steps: &mut [RouteStep], geometry: &mut LegGeometry) {
    if geometry.locations.len() < 2 {
        return;
    }
    let n = geometry.locations.len();
    let coincide = geometry.locations[n - 1] == geometry.locations[n - 2];
    let short = geometry.segment_distances.last().copied().unwrap_or(0.0) <= SHORT_SEGMENT_THRESHOLD_M;
    if !coincide && !short {
        return;
    }

    geometry.locations.pop();
    geometry.annotations.pop();
    geometry.osm_node_ids.pop();
    geometry.segment_distances.pop();
    geometry.segment_offsets.pop();

    let new_len = geometry.locations.len();
    for step in steps.iter_mut() {
        step.geometry_begin = step.geometry_begin.min(new_len);
        step.geometry_end = step.geometry_end.min(new_len);
    }

    if let Some(last) = steps.last_mut() {
        last.maneuver.waypoint_type = WaypointType::Arrive;
        if geometry.locations.len() >= 2 {
            let m = geometry.locations.len();
            last.maneuver.bearing_before = geometry.locations[m - 2].bearing_to(&geometry.locations[m - 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::ids::NameID;
    use crate::leg_geometry::Annotation;
    use crate::step_assembler::StepManeuver;
    use crate::turn::{DirectionModifier, TurnInstruction, TurnType};

    fn step(begin: usize, end: usize, waypoint: WaypointType) -> RouteStep {
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
                location: Coordinate::from_degrees(0.0, 0.0),
                bearing_before: 0.0,
                bearing_after: 0.0,
                instruction: TurnInstruction::new(TurnType::NoTurn, DirectionModifier::Straight),
                waypoint_type: waypoint,
                exit: 0,
            },
            geometry_begin: begin,
            geometry_end: end,
            intersections: vec![],
            is_left_hand_driving: false,
        }
    }

    #[test]
    fn coincident_leading_points_are_dropped() {
        let mut geometry = LegGeometry {
            locations: vec![
                Coordinate::from_degrees(0.0, 0.0),
                Coordinate::from_degrees(0.0, 0.0),
                Coordinate::from_degrees(0.0, 0.002),
            ],
            segment_offsets: vec![0, 1, 2],
            segment_distances: vec![0.0, 222.0],
            osm_node_ids: vec![1, 2, 3],
            annotations: vec![
                Annotation { distance: 0.0, duration: 0.0, weight: 0.0, datasource: 0 },
                Annotation { distance: 222.0, duration: 20.0, weight: 20.0, datasource: 0 },
            ],
        };
        let mut steps = vec![step(0, 1, WaypointType::Depart), step(1, 2, WaypointType::Arrive)];
        trim_short_segments(&mut steps, &mut geometry);
        assert_eq!(geometry.locations.len(), 2);
        assert_eq!(steps[0].maneuver.waypoint_type, WaypointType::Depart);
    }
}
