//! Guidance assembly and post-processing core for a contracted-hierarchy road router.
//!
//! Consumes an [`InternalRouteResult`] produced by the routing search (out of this crate's
//! scope) and turns it into a rider-facing [`Route`]: per-leg geometry, turn-by-turn steps, and
//! the ten-stage instruction post-processing pipeline described in `postprocess`. Logging follows
//! `osm2streets`'s convention of `log::debug!`/`log::warn!` at pass boundaries rather than a
//! dedicated tracing layer.

pub mod bearing_entry;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod facade;
pub mod ids;
pub mod intersection;
pub mod lane;
pub mod leg_geometry;
pub mod maneuver_override;
pub mod path_data;
pub mod phantom;
pub mod postprocess;
pub mod road_class;
pub mod route;
pub mod route_assembler;
pub mod step_assembler;
pub mod travel_mode;
pub mod turn;
pub mod turn_lanes;
pub mod unpacker;

pub use config::GuidanceConfig;
pub use error::{Result, RouteGuidanceError};
pub use facade::DataFacade;
pub use leg_geometry::LegGeometry;
pub use maneuver_override::ManeuverOverride;
pub use path_data::{InternalRouteResult, PathData};
pub use route::{Route, RouteLeg};

use ids::NodeID;

/// Assembles the full rider-facing [`Route`] and its per-leg [`LegGeometry`] from a routing
/// search's raw result. One leg at a time: geometry, then steps, then the G.1-G.10
/// post-processing pipeline, then summed into the leg and route totals.
///
/// `overrides` are the operator-supplied maneuver overrides that may apply anywhere in the route
/// (§4.J); each leg checks them against its own via-node sequence.
pub fn assemble_route<F: DataFacade>(
    facade: &F,
    result: &InternalRouteResult,
    overrides: &[ManeuverOverride],
    config: &GuidanceConfig,
) -> Result<(Route, Vec<LegGeometry>)> {
    if !result.is_valid() {
        return Err(RouteGuidanceError::NoRoute);
    }
    result
        .check_shape()
        .map_err(RouteGuidanceError::DataIntegrity)?;
    result
        .check_leg_continuity()
        .map_err(RouteGuidanceError::DataIntegrity)?;

    let mut legs = Vec::with_capacity(result.leg_endpoints.len());
    let mut geometries = Vec::with_capacity(result.leg_endpoints.len());

    for (i, endpoints) in result.leg_endpoints.iter().enumerate() {
        let path_data = &result.unpacked_path_segments[i];
        let reversed_source = result.source_traversed_in_reverse[i];
        let reversed_target = result.target_traversed_in_reverse[i];

        let mut geometry = leg_geometry::assemble_geometry(
            facade,
            path_data,
            &endpoints.source,
            &endpoints.target,
            reversed_source,
            reversed_target,
        );

        let mut steps = step_assembler::assemble_steps(
            path_data,
            &geometry,
            &endpoints.source,
            &endpoints.target,
            reversed_source,
            reversed_target,
            facade,
        );

        let path_node_sequence = leg_node_sequence(&endpoints.source, &endpoints.target, path_data, reversed_source, reversed_target);

        postprocess::apply_post_processing(
            &mut steps,
            &mut geometry,
            facade,
            config,
            overrides,
            &path_node_sequence,
            endpoints.source.input_location,
            endpoints.target.input_location,
        );

        log::debug!("leg {} assembled into {} steps", i, steps.len());

        legs.push(route_assembler::assemble_leg(steps));
        geometries.push(geometry);
    }

    let route = route_assembler::assemble_route(legs);
    Ok((route, geometries))
}

/// The edge-based-node sequence a leg's path visited, source through target, for matching
/// against [`ManeuverOverride::node_sequence`].
fn leg_node_sequence(
    source: &phantom::PhantomNode,
    target: &phantom::PhantomNode,
    path_data: &[PathData],
    reversed_source: bool,
    reversed_target: bool,
) -> Vec<NodeID> {
    let source_id = if reversed_source {
        source.reverse_segment_id.id
    } else {
        source.forward_segment_id.id
    };
    let target_id = if reversed_target {
        target.reverse_segment_id.id
    } else {
        target.forward_segment_id.id
    };

    let mut sequence = Vec::with_capacity(path_data.len() + 2);
    sequence.push(source_id);
    sequence.extend(path_data.iter().map(|p| p.turn_via_node));
    sequence.push(target_id);
    sequence
}
