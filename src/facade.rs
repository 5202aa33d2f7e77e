//! The read-only `DataFacade` capability set (§6.1).
//!
//! Represented as a plain trait rather than the source's template-parameterized facade (see
//! SPEC_FULL.md / REDESIGN FLAGS): callers can monomorphize over a concrete facade for speed, or
//! box a `dyn DataFacade<EdgeData = ConcreteEdgeData>` for a dynamic-dispatch server that serves
//! multiple profiles behind one interface. All data is immutable for the lifetime of a request;
//! the implementor is responsible for snapshot consistency (e.g. memory-mapped versioning).

use crate::bearing_entry::{BearingClass, EntryClass};
use crate::coordinate::Coordinate;
use crate::ids::{EntryClassID, LaneDescriptionID, NameID, NodeID};
use crate::lane::TurnLaneDescription;
use crate::maneuver_override::ManeuverOverride;
use crate::road_class::ClassData;
use crate::travel_mode::TravelMode;

/// The minimal shape an edge's payload must have for the edge unpacker (§4.B) to work: either an
/// original edge, or a contraction-hierarchy shortcut standing in for a two-hop detour through
/// `middle_node()`.
pub trait EdgeData {
    fn is_shortcut(&self) -> bool;
    /// Valid only when `is_shortcut()` -- the via-node the shortcut was contracted through.
    fn middle_node(&self) -> NodeID;
    fn is_forward(&self) -> bool;
    fn is_backward(&self) -> bool;
    fn weight(&self) -> f64;
}

/// Points at a position within one of the compressed-geometry arrays the facade owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryIndex {
    pub id: u32,
    pub forward: bool,
}

pub trait DataFacade {
    type EdgeData: EdgeData;

    fn num_nodes(&self) -> u32;
    fn num_edges(&self) -> u32;
    fn out_degree(&self, node: NodeID) -> u32;
    fn edges_from(&self, node: NodeID) -> Vec<crate::ids::EdgeID>;
    fn target(&self, edge: crate::ids::EdgeID) -> NodeID;
    fn edge_data(&self, edge: crate::ids::EdgeID) -> &Self::EdgeData;

    /// Finds the smallest-weight edge `u -> v` satisfying `pred`, or `None`.
    fn find_smallest_edge(
        &self,
        u: NodeID,
        v: NodeID,
        pred: &dyn Fn(&Self::EdgeData) -> bool,
    ) -> Option<crate::ids::EdgeID>;

    fn coord_of(&self, node: NodeID) -> Coordinate;
    fn osm_id_of(&self, node: NodeID) -> u64;

    fn geometry_index(&self, node: NodeID) -> GeometryIndex;
    fn uncompressed_forward_geometry(&self, id: u32) -> &[NodeID];
    fn uncompressed_reverse_geometry(&self, id: u32) -> &[NodeID];
    fn forward_durations(&self, id: u32) -> &[u32];
    fn reverse_durations(&self, id: u32) -> &[u32];
    fn forward_weights(&self, id: u32) -> &[u32];
    fn reverse_weights(&self, id: u32) -> &[u32];
    fn forward_datasources(&self, id: u32) -> &[u8];
    fn reverse_datasources(&self, id: u32) -> &[u8];

    fn name_for_id(&self, id: NameID) -> &str;
    fn ref_for_id(&self, id: NameID) -> &str;
    fn pronunciation_for_id(&self, id: NameID) -> &str;
    fn destinations_for_id(&self, id: NameID) -> &str;
    fn exits_for_id(&self, id: NameID) -> &str;

    fn name_index(&self, node: NodeID) -> NameID;
    fn class_data(&self, node: NodeID) -> ClassData;
    fn is_segregated(&self, node: NodeID) -> bool;
    fn is_left_hand_driving(&self, node: NodeID) -> bool;
    fn travel_mode(&self, node: NodeID) -> TravelMode;

    fn bearing_class(&self, node: NodeID) -> BearingClass;
    fn entry_class(&self, id: EntryClassID) -> EntryClass;
    fn turn_description(&self, id: LaneDescriptionID) -> TurnLaneDescription;

    fn weight_name(&self) -> &str;
    fn weight_multiplier(&self) -> f64;
    fn timestamp(&self) -> &str;
    fn checksum(&self) -> u32;
    fn datasource_name(&self, id: u8) -> &str;

    fn overrides_starting_at(&self, node: NodeID) -> Vec<ManeuverOverride>;
}
