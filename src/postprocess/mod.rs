//! Step post-processing (§4.G): ten ordered passes over an assembled step vector.
//!
//! Mirrors the teacher's `Transformation` enum + `apply_transformations` pattern
//! (`examples/a-b-street-osm2streets/osm2streets/src/transform/mod.rs`): an explicit ordered list
//! of named passes,
//! each a free function, run once in sequence. Unlike the teacher's `StreetNetwork`, there is no
//! single mutable graph to thread through -- each pass takes `&mut Vec<RouteStep>` (plus `&mut
//! LegGeometry` where it must touch geometry) and the `GuidanceConfig` explicitly. Passes are
//! strictly sequential: reordering them breaks correctness (roundabout detection assumes
//! un-trimmed geometry; sliproad collapse assumes roundabouts already resolved).

mod anticipate_lanes;
mod build_intersections;
mod collapse_segregated;
mod collapse_turns;
mod combine;
mod depart_arrive;
mod overrides;
mod resync_geometry;
mod roundabout_handling;
mod trim;

use crate::coordinate::Coordinate;
use crate::facade::DataFacade;
use crate::ids::NodeID;
use crate::leg_geometry::LegGeometry;
use crate::maneuver_override::ManeuverOverride;
use crate::step_assembler::RouteStep;
use crate::GuidanceConfig;

pub use anticipate_lanes::anticipate_lane_changes;
pub use build_intersections::build_intersections_and_suppress_short_names;
pub use collapse_segregated::collapse_segregated_turns;
pub use collapse_turns::collapse_turn_instructions;
pub use combine::classify_combined_turn;
pub use depart_arrive::assign_depart_arrive_locations;
pub use overrides::apply_maneuver_overrides;
pub use resync_geometry::resync_geometry;
pub use roundabout_handling::handle_roundabouts;
pub use trim::trim_short_segments;

/// Runs G.1 through G.10 in order over one leg's step vector and geometry.
#[allow(clippy::too_many_arguments)]
pub fn apply_post_processing<F: DataFacade>(
    steps: &mut Vec<RouteStep>,
    geometry: &mut LegGeometry,
    facade: &F,
    config: &GuidanceConfig,
    overrides: &[ManeuverOverride],
    path_node_sequence: &[NodeID],
    depart_input_location: Coordinate,
    arrive_input_location: Coordinate,
) {
    apply_maneuver_overrides(steps, overrides, path_node_sequence); // G.1
    collapse_segregated_turns(steps); // G.2
    handle_roundabouts(steps); // G.3
    trim_short_segments(steps, geometry); // G.4
    collapse_turn_instructions(steps, config); // G.5 (G.6 is the shared `classify_combined_turn` helper)
    anticipate_lane_changes(steps, facade); // G.7
    build_intersections_and_suppress_short_names(steps, config); // G.8
    assign_depart_arrive_locations(steps, depart_input_location, arrive_input_location); // G.9
    resync_geometry(steps, geometry); // G.10
}
