//! G.10 Resync Geometry.
//!
//! Grounded against `examples/original_source/include/engine/guidance/assemble_geometry.hpp`'s
//! segment/offset bookkeeping: once steps have been merged and trimmed, the leg geometry's
//! segment table must be rebuilt so each non-arrive step owns exactly one segment again.

use crate::leg_geometry::LegGeometry;
use crate::step_assembler::RouteStep;

/// Rebuilds `segment_offsets`/`segment_distances` from the final step vector: one segment per
/// step excluding the trailing Arrive step (which carries no distance of its own), with the
/// sentinel offset pinned to Arrive's `geometry_begin` so it survives any upstream index drift
/// from the trim/collapse passes.
pub fn resync_geometry(steps: &[RouteStep], geometry: &mut LegGeometry) {
    let Some(arrive) = steps.last() else { return };
    let real_steps = &steps[..steps.len() - 1];

    let mut offsets = Vec::with_capacity(real_steps.len() + 1);
    let mut distances = Vec::with_capacity(real_steps.len());

    offsets.push(steps.first().map(|s| s.geometry_begin).unwrap_or(0));
    for step in real_steps {
        offsets.push(step.geometry_end);
        distances.push(step.distance);
    }
    if let Some(last) = offsets.last_mut() {
        *last = arrive.geometry_begin;
    }

    geometry.segment_offsets = offsets;
    geometry.segment_distances = distances;
}
