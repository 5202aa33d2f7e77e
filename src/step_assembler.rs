//! Step assembly (§4.D): turns a leg's unpacked path data into `RouteStep`s bracketed by synthetic
//! Depart/Arrive steps.
//!
//! Grounded against `examples/original_source/include/engine/guidance/route_step.hpp` and
//! `step_maneuver.hpp` for field shape, and `assemble_steps.cpp` for emission order.

use crate::coordinate::Coordinate;
use crate::facade::DataFacade;
use crate::ids::{EntryClassID, LaneDescriptionID, NameID};
use crate::lane::TurnLaneDescription;
use crate::leg_geometry::LegGeometry;
use crate::path_data::PathData;
use crate::phantom::PhantomNode;
use crate::travel_mode::TravelMode;
use crate::turn::{TurnInstruction, TurnType, WaypointType};

/// One intermediate intersection along a step: the set of roads the traveler passed, and which
/// ones were the entry/exit of this step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IntermediateIntersection {
    pub location: Coordinate,
    pub bearings: Vec<u16>,
    pub entry: Vec<bool>,
    /// Index into `bearings`/`entry` of the road the step arrived on, or `NO_INDEX`.
    pub intersection_in: usize,
    /// Index into `bearings`/`entry` of the road the step continues on, or `NO_INDEX`.
    pub intersection_out: usize,
    pub lanes: Option<LaneDescriptionID>,
    /// Narrowed lane recommendation computed by §G.7's anticipate-lane-changes pass, when this
    /// intersection's natural lane set was restricted to avoid forcing a second lane change
    /// shortly afterwards. `None` until that pass runs (or if no narrowing applied).
    pub anticipated_lanes: Option<TurnLaneDescription>,
}

impl IntermediateIntersection {
    pub const NO_INDEX: usize = usize::MAX;
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StepManeuver {
    pub location: Coordinate,
    pub bearing_before: f64,
    pub bearing_after: f64,
    pub instruction: TurnInstruction,
    pub waypoint_type: WaypointType,
    pub exit: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RouteStep {
    pub from_id: NameID,
    pub name_id: NameID,
    pub is_segregated: bool,
    pub name: String,
    pub name_ref: String,
    pub pronunciation: String,
    pub destinations: String,
    pub exits: String,
    pub rotary_name: String,
    pub rotary_pronunciation: String,
    pub duration: f64,
    pub distance: f64,
    pub weight: f64,
    pub mode: TravelMode,
    pub maneuver: StepManeuver,
    pub geometry_begin: usize,
    pub geometry_end: usize,
    pub intersections: Vec<IntermediateIntersection>,
    pub is_left_hand_driving: bool,
}

impl RouteStep {
    /// Testable Property 2 (partial): first/last-step shape described in §4.D's post-conditions.
    pub fn is_trivial_waypoint_step(&self) -> bool {
        self.intersections.len() == 1
            && self.intersections[0].bearings.len() == 1
            && self.intersections[0].entry == vec![true]
            && self.maneuver.exit == 0
    }
}

struct PendingStep {
    name_id: NameID,
    travel_mode: TravelMode,
    is_left_hand_driving: bool,
    is_segregated: bool,
    segment_index: usize,
    accumulated_duration: f64,
    accumulated_weight: f64,
    maneuver_location: Coordinate,
    bearing_before: f64,
    bearing_after: f64,
    instruction: TurnInstruction,
    waypoint_type: WaypointType,
    geometry_begin: usize,
}

/// The name-derived text fields a step freezes from its `name_id`, or all-empty for the special
/// "no name" sentinel (used by the synthetic Depart/Arrive steps and the single-edge fallback).
struct NameFields {
    name: String,
    name_ref: String,
    pronunciation: String,
    destinations: String,
    exits: String,
}

fn resolve_names<F: DataFacade>(facade: &F, name_id: NameID) -> NameFields {
    if !name_id.is_valid() {
        return NameFields {
            name: String::new(),
            name_ref: String::new(),
            pronunciation: String::new(),
            destinations: String::new(),
            exits: String::new(),
        };
    }
    NameFields {
        name: facade.name_for_id(name_id).to_string(),
        name_ref: facade.ref_for_id(name_id).to_string(),
        pronunciation: facade.pronunciation_for_id(name_id).to_string(),
        destinations: facade.destinations_for_id(name_id).to_string(),
        exits: facade.exits_for_id(name_id).to_string(),
    }
}

fn single_bearing_intersection(location: Coordinate, bearing: f64, lanes: Option<LaneDescriptionID>) -> IntermediateIntersection {
    IntermediateIntersection {
        location,
        bearings: vec![bearing.round() as u16 % 360],
        entry: vec![true],
        intersection_in: IntermediateIntersection::NO_INDEX,
        intersection_out: 0,
        lanes,
        anticipated_lanes: None,
    }
}

/// Emits the full sequence of `RouteStep`s for one leg, per §4.D's emission order.
pub fn assemble_steps<F: DataFacade>(
    path_data: &[PathData],
    leg_geometry: &LegGeometry,
    source: &PhantomNode,
    target: &PhantomNode,
    reversed_source: bool,
    reversed_target: bool,
    facade: &F,
) -> Vec<RouteStep> {
    let weight_multiplier = facade.weight_multiplier();
    let mut steps = Vec::new();

    let source_node_id = if reversed_source {
        source.reverse_segment_id.id
    } else {
        source.forward_segment_id.id
    };
    let target_node_id = if reversed_target {
        target.reverse_segment_id.id
    } else {
        target.forward_segment_id.id
    };

    let depart_bearing = if leg_geometry.locations.len() >= 2 {
        leg_geometry.locations[0].bearing_to(&leg_geometry.locations[1])
    } else {
        0.0
    };

    if path_data.is_empty() {
        let source_duration = if reversed_source { source.reverse.duration } else { source.forward.duration };
        let target_duration = if reversed_target { target.reverse.duration } else { target.forward.duration };
        let duration = (target_duration - source_duration).max(0.0);

        let source_weight = if reversed_source { source.reverse.weight } else { source.forward.weight };
        let target_weight = if reversed_target { target.reverse.weight } else { target.forward.weight };
        let weight = (target_weight - source_weight).max(0.0);

        let distance = leg_geometry.segment_distances.first().copied().unwrap_or(0.0);

        let name_id = facade.name_index(source_node_id);
        let names = resolve_names(facade, name_id);

        steps.push(RouteStep {
            from_id: name_id,
            name_id,
            is_segregated: facade.is_segregated(source_node_id),
            name: names.name,
            name_ref: names.name_ref,
            pronunciation: names.pronunciation,
            destinations: names.destinations,
            exits: names.exits,
            rotary_name: String::new(),
            rotary_pronunciation: String::new(),
            duration,
            distance,
            weight,
            mode: facade.travel_mode(source_node_id),
            maneuver: StepManeuver {
                location: leg_geometry.locations[0],
                bearing_before: 0.0,
                bearing_after: depart_bearing,
                instruction: TurnInstruction::NO_TURN,
                waypoint_type: WaypointType::Depart,
                exit: 0,
            },
            geometry_begin: 0,
            geometry_end: leg_geometry.locations.len() - 1,
            intersections: vec![single_bearing_intersection(leg_geometry.locations[0], depart_bearing, None)],
            is_left_hand_driving: facade.is_left_hand_driving(source_node_id),
        });
    } else {
        let mut pending = PendingStep {
            name_id: facade.name_index(source_node_id),
            travel_mode: facade.travel_mode(source_node_id),
            is_left_hand_driving: facade.is_left_hand_driving(source_node_id),
            is_segregated: facade.is_segregated(source_node_id),
            segment_index: 0,
            accumulated_duration: 0.0,
            accumulated_weight: 0.0,
            maneuver_location: leg_geometry.locations[0],
            bearing_before: 0.0,
            bearing_after: depart_bearing,
            instruction: TurnInstruction::NO_TURN,
            waypoint_type: WaypointType::Depart,
            geometry_begin: 0,
        };

        for point in path_data {
            pending.accumulated_duration += point.duration_until_turn / 10.0;
            pending.accumulated_weight += point.weight_until_turn / weight_multiplier;

            if point.turn_instruction.turn_type != TurnType::NoTurn {
                let distance = leg_geometry
                    .segment_distances
                    .get(pending.segment_index)
                    .copied()
                    .unwrap_or(0.0);
                // Segment boundaries in locations/segment_offsets line up 1:1 with turns in
                // path_data, so the segment just closed ends where the next one begins.
                let boundary = leg_geometry
                    .segment_offsets
                    .get(pending.segment_index + 1)
                    .copied()
                    .unwrap_or(leg_geometry.locations.len());
                let via_coordinate = leg_geometry.locations[boundary.min(leg_geometry.locations.len() - 1)];
                let names = resolve_names(facade, pending.name_id);

                steps.push(RouteStep {
                    from_id: pending.name_id,
                    name_id: pending.name_id,
                    is_segregated: pending.is_segregated,
                    name: names.name,
                    name_ref: names.name_ref,
                    pronunciation: names.pronunciation,
                    destinations: names.destinations,
                    exits: names.exits,
                    rotary_name: String::new(),
                    rotary_pronunciation: String::new(),
                    duration: pending.accumulated_duration,
                    distance,
                    weight: pending.accumulated_weight,
                    mode: pending.travel_mode,
                    maneuver: StepManeuver {
                        location: pending.maneuver_location,
                        bearing_before: pending.bearing_before,
                        bearing_after: pending.bearing_after,
                        instruction: pending.instruction,
                        waypoint_type: pending.waypoint_type,
                        exit: 0,
                    },
                    geometry_begin: pending.geometry_begin,
                    geometry_end: boundary,
                    intersections: vec![single_bearing_intersection(
                        pending.maneuver_location,
                        pending.bearing_after,
                        point.lane_data,
                    )],
                    is_left_hand_driving: pending.is_left_hand_driving,
                });

                pending = PendingStep {
                    name_id: point.name_id,
                    travel_mode: point.travel_mode,
                    is_left_hand_driving: point.is_left_hand_driving,
                    is_segregated: point.is_segregated,
                    segment_index: pending.segment_index + 1,
                    accumulated_duration: 0.0,
                    accumulated_weight: 0.0,
                    maneuver_location: via_coordinate,
                    bearing_before: point.pre_turn_bearing,
                    bearing_after: point.post_turn_bearing,
                    instruction: point.turn_instruction,
                    waypoint_type: WaypointType::None,
                    geometry_begin: boundary,
                };
            }
        }

        let last_distance = leg_geometry
            .segment_distances
            .get(pending.segment_index)
            .copied()
            .unwrap_or(0.0);
        let final_name_id = facade.name_index(target_node_id);
        let names = resolve_names(facade, final_name_id);

        steps.push(RouteStep {
            from_id: final_name_id,
            name_id: final_name_id,
            is_segregated: facade.is_segregated(target_node_id),
            name: names.name,
            name_ref: names.name_ref,
            pronunciation: names.pronunciation,
            destinations: names.destinations,
            exits: names.exits,
            rotary_name: String::new(),
            rotary_pronunciation: String::new(),
            duration: pending.accumulated_duration,
            distance: last_distance,
            weight: pending.accumulated_weight,
            mode: facade.travel_mode(target_node_id),
            maneuver: StepManeuver {
                location: pending.maneuver_location,
                bearing_before: pending.bearing_before,
                bearing_after: pending.bearing_after,
                instruction: pending.instruction,
                waypoint_type: pending.waypoint_type,
                exit: 0,
            },
            geometry_begin: pending.geometry_begin,
            geometry_end: leg_geometry.locations.len() - 1,
            intersections: vec![single_bearing_intersection(pending.maneuver_location, pending.bearing_after, None)],
            is_left_hand_driving: facade.is_left_hand_driving(target_node_id),
        });
    }

    let arrive_bearing_before = {
        let n = leg_geometry.locations.len();
        if n >= 2 {
            leg_geometry.locations[n - 2].bearing_to(&leg_geometry.locations[n - 1])
        } else {
            0.0
        }
    };

    steps.push(RouteStep {
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
        duration: 0.0,
        distance: 0.0,
        weight: 0.0,
        mode: TravelMode::Driving,
        maneuver: StepManeuver {
            location: *leg_geometry.locations.last().unwrap(),
            bearing_before: arrive_bearing_before,
            bearing_after: 0.0,
            instruction: TurnInstruction::NO_TURN,
            waypoint_type: WaypointType::Arrive,
            exit: 0,
        },
        geometry_begin: leg_geometry.locations.len() - 1,
        geometry_end: leg_geometry.locations.len(),
        intersections: vec![single_bearing_intersection(*leg_geometry.locations.last().unwrap(), arrive_bearing_before, None)],
        is_left_hand_driving: false,
    });

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ComponentID, EdgeID, NodeID, SegmentID};
    use crate::phantom::{DirectionalPhantomData, PhantomFlags};
    use crate::road_class::ClassData;
    use crate::turn::DirectionModifier;

    struct TestEdge;
    impl crate::facade::EdgeData for TestEdge {
        fn is_shortcut(&self) -> bool {
            false
        }
        fn middle_node(&self) -> NodeID {
            NodeID::SPECIAL_NODEID
        }
        fn is_forward(&self) -> bool {
            true
        }
        fn is_backward(&self) -> bool {
            true
        }
        fn weight(&self) -> f64 {
            1.0
        }
    }

    struct TestFacade;
    impl DataFacade for TestFacade {
        type EdgeData = TestEdge;

        fn num_nodes(&self) -> u32 {
            0
        }
        fn num_edges(&self) -> u32 {
            0
        }
        fn out_degree(&self, _node: NodeID) -> u32 {
            0
        }
        fn edges_from(&self, _node: NodeID) -> Vec<EdgeID> {
            vec![]
        }
        fn target(&self, _edge: EdgeID) -> NodeID {
            NodeID::SPECIAL_NODEID
        }
        fn edge_data(&self, _edge: EdgeID) -> &Self::EdgeData {
            &TestEdge
        }
        fn find_smallest_edge(&self, _u: NodeID, _v: NodeID, _pred: &dyn Fn(&Self::EdgeData) -> bool) -> Option<EdgeID> {
            None
        }
        fn coord_of(&self, _node: NodeID) -> Coordinate {
            Coordinate::from_degrees(0.0, 0.0)
        }
        fn osm_id_of(&self, _node: NodeID) -> u64 {
            0
        }
        fn geometry_index(&self, _node: NodeID) -> crate::facade::GeometryIndex {
            crate::facade::GeometryIndex { id: 0, forward: true }
        }
        fn uncompressed_forward_geometry(&self, _id: u32) -> &[NodeID] {
            &[]
        }
        fn uncompressed_reverse_geometry(&self, _id: u32) -> &[NodeID] {
            &[]
        }
        fn forward_durations(&self, _id: u32) -> &[u32] {
            &[]
        }
        fn reverse_durations(&self, _id: u32) -> &[u32] {
            &[]
        }
        fn forward_weights(&self, _id: u32) -> &[u32] {
            &[]
        }
        fn reverse_weights(&self, _id: u32) -> &[u32] {
            &[]
        }
        fn forward_datasources(&self, _id: u32) -> &[u8] {
            &[]
        }
        fn reverse_datasources(&self, _id: u32) -> &[u8] {
            &[]
        }
        fn name_for_id(&self, _id: NameID) -> &str {
            "Main St"
        }
        fn ref_for_id(&self, _id: NameID) -> &str {
            ""
        }
        fn pronunciation_for_id(&self, _id: NameID) -> &str {
            ""
        }
        fn destinations_for_id(&self, _id: NameID) -> &str {
            ""
        }
        fn exits_for_id(&self, _id: NameID) -> &str {
            ""
        }
        fn name_index(&self, _node: NodeID) -> NameID {
            NameID(0)
        }
        fn class_data(&self, _node: NodeID) -> ClassData {
            ClassData::new(Default::default())
        }
        fn is_segregated(&self, _node: NodeID) -> bool {
            false
        }
        fn is_left_hand_driving(&self, _node: NodeID) -> bool {
            false
        }
        fn travel_mode(&self, _node: NodeID) -> TravelMode {
            TravelMode::Driving
        }
        fn bearing_class(&self, _node: NodeID) -> crate::bearing_entry::BearingClass {
            Default::default()
        }
        fn entry_class(&self, _id: EntryClassID) -> crate::bearing_entry::EntryClass {
            Default::default()
        }
        fn turn_description(&self, _id: LaneDescriptionID) -> TurnLaneDescription {
            Default::default()
        }
        fn weight_name(&self) -> &str {
            "duration"
        }
        fn weight_multiplier(&self) -> f64 {
            1.0
        }
        fn timestamp(&self) -> &str {
            ""
        }
        fn checksum(&self) -> u32 {
            0
        }
        fn datasource_name(&self, _id: u8) -> &str {
            ""
        }
        fn overrides_starting_at(&self, _node: NodeID) -> Vec<crate::maneuver_override::ManeuverOverride> {
            vec![]
        }
    }

    fn phantom(loc: Coordinate) -> PhantomNode {
        PhantomNode {
            forward_segment_id: SegmentID { id: NodeID(0), enabled: true },
            reverse_segment_id: SegmentID::invalid(),
            forward: DirectionalPhantomData { weight: 0.0, duration: 0.0, distance: 0.0 },
            reverse: DirectionalPhantomData { weight: 0.0, duration: 0.0, distance: 0.0 },
            fwd_segment_position: 0,
            flags: PhantomFlags::new(true, true, false, false, 0),
            location: loc,
            input_location: loc,
            component: ComponentID { id: 0, is_tiny: false },
        }
    }

    fn sample_geometry() -> LegGeometry {
        LegGeometry {
            locations: vec![
                Coordinate::from_degrees(0.0, 0.0),
                Coordinate::from_degrees(0.0, 0.002),
            ],
            segment_offsets: vec![0, 1],
            segment_distances: vec![222.0],
            osm_node_ids: vec![1, 2],
            annotations: vec![crate::leg_geometry::Annotation {
                distance: 222.0,
                duration: 20.0,
                weight: 20.0,
                datasource: 0,
            }],
        }
    }

    #[test]
    fn empty_path_data_produces_depart_then_arrive() {
        let geometry = sample_geometry();
        let source = phantom(geometry.locations[0]);
        let mut target = phantom(geometry.locations[1]);
        target.forward.duration = 20.0;
        target.forward.weight = 20.0;

        let steps = assemble_steps(&[], &geometry, &source, &target, false, false, &TestFacade);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].maneuver.waypoint_type, WaypointType::Depart);
        assert_eq!(steps[1].maneuver.waypoint_type, WaypointType::Arrive);
        assert!(steps[0].is_trivial_waypoint_step());
        assert!(steps[1].is_trivial_waypoint_step());
        assert_eq!(steps[1].distance, 0.0);
        assert_eq!(steps[1].duration, 0.0);
    }

    #[test]
    fn turn_instruction_freezes_a_step() {
        let geometry = LegGeometry {
            locations: vec![
                Coordinate::from_degrees(0.0, 0.0),
                Coordinate::from_degrees(0.0, 0.001),
                Coordinate::from_degrees(0.0, 0.002),
            ],
            segment_offsets: vec![0, 1, 2],
            segment_distances: vec![111.0, 111.0],
            osm_node_ids: vec![1, 2, 3],
            annotations: vec![
                crate::leg_geometry::Annotation { distance: 111.0, duration: 10.0, weight: 10.0, datasource: 0 },
                crate::leg_geometry::Annotation { distance: 111.0, duration: 10.0, weight: 10.0, datasource: 0 },
            ],
        };
        let source = phantom(geometry.locations[0]);
        let target = phantom(*geometry.locations.last().unwrap());

        let point = PathData {
            turn_via_node: NodeID(1),
            name_id: NameID(7),
            duration_until_turn: 120.0,
            weight_until_turn: 120.0,
            weight_of_turn: 20.0,
            duration_of_turn: 20.0,
            turn_instruction: TurnInstruction::new(TurnType::Turn, DirectionModifier::Right),
            lane_data: None,
            travel_mode: TravelMode::Driving,
            entry_class_id: EntryClassID(0),
            datasource_id: 0,
            classes: ClassData::new(Default::default()),
            is_left_hand_driving: false,
            is_segregated: false,
            pre_turn_bearing: 0.0,
            post_turn_bearing: 90.0,
        };

        let steps = assemble_steps(&[point], &geometry, &source, &target, false, false, &TestFacade);

        // Depart, one frozen turn step, Arrive.
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].maneuver.instruction.turn_type, TurnType::Turn);
        assert_eq!(steps[0].name, "Main St", "Depart's name resolves through the facade");
    }
}
