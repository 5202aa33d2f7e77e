//! Leg geometry assembly (§4.C): per-leg polyline plus per-coordinate annotations.
//!
//! Grounded file-for-file against
//! `examples/original_source/include/engine/guidance/assemble_geometry.hpp`, including the
//! asymmetric annotation correction on empty-path-data legs noted as intentional-but-undocumented
//! in SPEC_FULL.md / Open Question 3.

use crate::coordinate::Coordinate;
use crate::facade::DataFacade;
use crate::path_data::PathData;
use crate::phantom::PhantomNode;
use crate::turn::TurnType;

/// Per-coordinate-interval metadata: one entry per `[locations[i], locations[i+1])` pair.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Annotation {
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    pub datasource: u8,
}

/// `locations  0---1---2-...-n-1---n`
/// `turns      s       x      y    t`
/// `segment    |   0   |  1   | 2  | sentinel`
/// `offsets        0      2    n-1     n`
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct LegGeometry {
    pub locations: Vec<Coordinate>,
    /// `segment_offsets[i]..segment_offsets[i+1]` indexes `locations` for segment `i`.
    pub segment_offsets: Vec<usize>,
    pub segment_distances: Vec<f64>,
    pub osm_node_ids: Vec<u64>,
    pub annotations: Vec<Annotation>,
}

impl LegGeometry {
    pub fn num_segments(&self) -> usize {
        self.segment_offsets.len().saturating_sub(1)
    }

    pub fn front_index(&self, segment: usize) -> usize {
        self.segment_offsets[segment]
    }

    pub fn back_index(&self, segment: usize) -> usize {
        self.segment_offsets[segment + 1]
    }

    /// Testable Property 1: the shape invariants that must hold for any `LegGeometry`.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.segment_offsets.len() != self.segment_distances.len() + 1 {
            return Err(format!(
                "segment_offsets len {} != segment_distances len {} + 1",
                self.segment_offsets.len(),
                self.segment_distances.len()
            ));
        }
        if self.locations.len() <= self.segment_distances.len() {
            return Err(format!(
                "locations len {} must exceed segment_distances len {}",
                self.locations.len(),
                self.segment_distances.len()
            ));
        }
        if self.annotations.len() + 1 != self.locations.len() {
            return Err(format!(
                "annotations len {} != locations len {} - 1",
                self.annotations.len(),
                self.locations.len()
            ));
        }
        for seg in 0..self.num_segments() {
            let (lo, hi) = (self.front_index(seg), self.back_index(seg));
            let summed: f64 = self.annotations[lo..hi].iter().map(|a| a.distance).sum();
            if (summed - self.segment_distances[seg]).abs() > 0.01 {
                return Err(format!(
                    "segment {} distance {} does not match summed annotation distance {}",
                    seg, self.segment_distances[seg], summed
                ));
            }
        }
        Ok(())
    }
}

/// Assembles the `LegGeometry` for one leg from the leg's unpacked path data and its endpoints.
pub fn assemble_geometry<F: DataFacade>(
    facade: &F,
    path_data: &[PathData],
    source: &PhantomNode,
    target: &PhantomNode,
    reversed_source: bool,
    reversed_target: bool,
) -> LegGeometry {
    let mut geometry = LegGeometry::default();

    geometry.segment_offsets.push(0);
    geometry.locations.push(source.location);

    let source_segment_start = source.fwd_segment_position + if reversed_source { 1 } else { 0 };
    let source_node_id = if reversed_source {
        source.reverse_segment_id.id
    } else {
        source.forward_segment_id.id
    };
    let source_geometry_id = facade.geometry_index(source_node_id).id;
    let source_geometry = facade.uncompressed_forward_geometry(source_geometry_id);
    geometry
        .osm_node_ids
        .push(facade.osm_id_of(source_geometry[source_segment_start]));

    let mut cumulative_distance = 0.0;
    let mut current_distance;
    let mut prev_coordinate = *geometry.locations.first().unwrap();

    for point in path_data {
        let coordinate = facade.coord_of(point.turn_via_node);
        current_distance = prev_coordinate.haversine_distance(&coordinate);
        cumulative_distance += current_distance;

        // All changes to this check must be matched with the step assembler (§4.D).
        if point.turn_instruction.turn_type != TurnType::NoTurn {
            geometry.segment_distances.push(cumulative_distance);
            geometry.segment_offsets.push(geometry.locations.len());
            cumulative_distance = 0.0;
        }

        prev_coordinate = coordinate;
        let osm_node_id = facade.osm_id_of(point.turn_via_node);

        if Some(&osm_node_id) != geometry.osm_node_ids.last()
            || point.turn_instruction.turn_type != TurnType::NoTurn
        {
            geometry.annotations.push(Annotation {
                distance: current_distance,
                duration: point.segment_only_duration(),
                weight: point.segment_only_weight(facade.weight_multiplier()),
                datasource: point.datasource_id,
            });
            geometry.locations.push(coordinate);
            geometry.osm_node_ids.push(osm_node_id);
        }
    }

    let current_distance = prev_coordinate.haversine_distance(&target.location);
    cumulative_distance += current_distance;
    geometry.segment_distances.push(cumulative_distance);

    let target_node_id = if reversed_target {
        target.reverse_segment_id.id
    } else {
        target.forward_segment_id.id
    };
    let target_geometry_id = facade.geometry_index(target_node_id).id;
    let forward_datasources = facade.forward_datasources(target_geometry_id);

    if geometry.annotations.is_empty() {
        // Source and target are on the same edge-based node: there is no unpacked path data to
        // derive an annotation from, so we fall back to the phantom nodes' own per-direction
        // offsets. Note this intentionally skips the duration_of_turn/weight_of_turn correction
        // applied above -- there is no "turn" within a single edge to correct for.
        let source_duration = if reversed_source { source.reverse.duration } else { source.forward.duration };
        let target_duration = if reversed_target { target.reverse.duration } else { target.forward.duration };
        let duration = (target_duration - source_duration).max(0.0);

        let source_weight = if reversed_source { source.reverse.weight } else { source.forward.weight };
        let target_weight = if reversed_target { target.reverse.weight } else { target.forward.weight };
        let weight = (target_weight - source_weight).max(0.0);

        geometry.annotations.push(Annotation {
            distance: current_distance,
            duration,
            weight,
            datasource: forward_datasources
                .get(target.fwd_segment_position)
                .copied()
                .unwrap_or(0),
        });
    } else {
        let duration = if reversed_target { target.reverse.duration } else { target.forward.duration };
        let weight = if reversed_target { target.reverse.weight } else { target.forward.weight };
        geometry.annotations.push(Annotation {
            distance: current_distance,
            duration,
            weight,
            datasource: forward_datasources
                .get(target.fwd_segment_position)
                .copied()
                .unwrap_or(0),
        });
    }

    geometry.segment_offsets.push(geometry.locations.len());
    geometry.locations.push(target.location);

    let target_segment_end = target.fwd_segment_position + if reversed_target { 0 } else { 1 };
    let target_geometry = facade.uncompressed_forward_geometry(target_geometry_id);
    geometry
        .osm_node_ids
        .push(facade.osm_id_of(target_geometry[target_segment_end]));

    debug_assert!(geometry.check_invariants().is_ok());
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::{DataFacade, EdgeData, GeometryIndex};
    use crate::ids::{EdgeID, EntryClassID, LaneDescriptionID, NameID};
    use crate::phantom::{DirectionalPhantomData, PhantomFlags};
    use crate::road_class::ClassData;
    use crate::travel_mode::TravelMode;
    use crate::turn::DirectionModifier;

    struct TestEdge;
    impl EdgeData for TestEdge {
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

    /// A single straight street: nodes 0, 1, 2 at (0,0), (0,0.001), (0,0.002).
    struct TestFacade {
        coords: Vec<Coordinate>,
        geometry: Vec<NodeID>,
        datasources: Vec<u8>,
    }

    impl TestFacade {
        fn new() -> Self {
            let coords = vec![
                Coordinate::from_degrees(0.0, 0.0),
                Coordinate::from_degrees(0.0, 0.001),
                Coordinate::from_degrees(0.0, 0.002),
            ];
            TestFacade {
                coords,
                geometry: vec![NodeID(0), NodeID(1), NodeID(2)],
                datasources: vec![0, 0],
            }
        }
    }

    impl DataFacade for TestFacade {
        type EdgeData = TestEdge;

        fn num_nodes(&self) -> u32 {
            3
        }
        fn num_edges(&self) -> u32 {
            2
        }
        fn out_degree(&self, _node: NodeID) -> u32 {
            1
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
        fn find_smallest_edge(
            &self,
            _u: NodeID,
            _v: NodeID,
            _pred: &dyn Fn(&Self::EdgeData) -> bool,
        ) -> Option<EdgeID> {
            None
        }
        fn coord_of(&self, node: NodeID) -> Coordinate {
            self.coords[node.0 as usize]
        }
        fn osm_id_of(&self, node: NodeID) -> u64 {
            node.0 as u64
        }
        fn geometry_index(&self, _node: NodeID) -> GeometryIndex {
            GeometryIndex { id: 0, forward: true }
        }
        fn uncompressed_forward_geometry(&self, _id: u32) -> &[NodeID] {
            &self.geometry
        }
        fn uncompressed_reverse_geometry(&self, _id: u32) -> &[NodeID] {
            &self.geometry
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
            &self.datasources
        }
        fn reverse_datasources(&self, _id: u32) -> &[u8] {
            &self.datasources
        }
        fn name_for_id(&self, _id: NameID) -> &str {
            ""
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
            NameID::SPECIAL_NAMEID
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
        fn turn_description(&self, _id: LaneDescriptionID) -> crate::lane::TurnLaneDescription {
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

    fn phantom_at(node_pos: usize, coords: &TestFacade) -> PhantomNode {
        PhantomNode {
            forward_segment_id: crate::ids::SegmentID { id: NodeID(0), enabled: true },
            reverse_segment_id: crate::ids::SegmentID::invalid(),
            forward: DirectionalPhantomData { weight: 0.0, duration: 0.0, distance: 0.0 },
            reverse: DirectionalPhantomData { weight: 0.0, duration: 0.0, distance: 0.0 },
            fwd_segment_position: node_pos,
            flags: PhantomFlags::new(true, true, false, false, 0),
            location: coords.coords[node_pos],
            input_location: coords.coords[node_pos],
            component: crate::ids::ComponentID { id: 0, is_tiny: false },
        }
    }

    #[test]
    fn single_edge_leg_with_no_unpacked_points_uses_phantom_fallback() {
        let facade = TestFacade::new();
        let source = phantom_at(0, &facade);
        let mut target = phantom_at(2, &facade);
        target.forward.duration = 20.0;
        target.forward.weight = 20.0;

        let geometry = assemble_geometry(&facade, &[], &source, &target, false, false);

        assert_eq!(geometry.locations.len(), 2);
        assert_eq!(geometry.annotations.len(), 1);
        assert_eq!(geometry.annotations[0].duration, 20.0);
        geometry.check_invariants().unwrap();
    }

    #[test]
    fn leg_with_one_turn_splits_into_two_segments() {
        let facade = TestFacade::new();
        let source = phantom_at(0, &facade);
        let target = phantom_at(2, &facade);

        let turn_point = PathData {
            turn_via_node: NodeID(1),
            name_id: NameID::SPECIAL_NAMEID,
            duration_until_turn: 50.0,
            weight_until_turn: 50.0,
            weight_of_turn: 20.0,
            duration_of_turn: 20.0,
            turn_instruction: crate::turn::TurnInstruction::new(TurnType::Turn, DirectionModifier::Right),
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

        let geometry = assemble_geometry(&facade, &[turn_point], &source, &target, false, false);

        assert_eq!(geometry.num_segments(), 2);
        geometry.check_invariants().unwrap();
    }
}
