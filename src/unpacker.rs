//! Edge unpacking (§4.B): DFS expansion of contracted shortcut edges into original edges.
//!
//! Grounded against `examples/original_source/include/engine/edge_unpacker.hpp`: the stack is
//! pushed in reverse so the first pop corresponds to the first step of the route, and a missing
//! edge in both directions is a data-structure invariant violation, not a recoverable condition.

use crate::error::{Result, RouteGuidanceError};
use crate::facade::{DataFacade, EdgeData};
use crate::ids::NodeID;

/// Depth-first-unpacks the contracted-hierarchy path `packed_path` (a sequence of node IDs)
/// into original, non-shortcut edges, invoking `callback` once per original edge in travel
/// order.
pub fn unpack_ch_path<F>(
    facade: &F,
    packed_path: &[NodeID],
    mut callback: impl FnMut((NodeID, NodeID), &F::EdgeData),
) -> Result<()>
where
    F: DataFacade,
{
    if packed_path.len() < 2 {
        return Ok(());
    }

    // Pushed in reverse so the first pair popped is the first step of the route (it's a LIFO
    // stack, so we want the natural order to come out backwards of how we push).
    let mut stack: Vec<(NodeID, NodeID)> = Vec::with_capacity(packed_path.len());
    for window in packed_path.windows(2).rev() {
        stack.push((window[0], window[1]));
    }

    while let Some(edge) = stack.pop() {
        let (u, v) = edge;

        let mut edge_id = facade.find_smallest_edge(u, v, &|data| data.is_forward());
        let mut swapped = false;
        if edge_id.is_none() {
            edge_id = facade.find_smallest_edge(v, u, &|data| data.is_backward());
            swapped = true;
        }

        let edge_id = edge_id.ok_or_else(|| {
            RouteGuidanceError::DataIntegrity(format!(
                "no forward or backward edge between {} and {} during CH unpacking",
                u, v
            ))
        })?;

        let data = facade.edge_data(edge_id);
        debug_assert!(data.weight().is_finite(), "edge weight invalid");
        if !data.weight().is_finite() {
            return Err(RouteGuidanceError::DataIntegrity(format!(
                "edge {} has non-finite weight",
                edge_id
            )));
        }

        if data.is_shortcut() {
            let middle = data.middle_node();
            // Same order regardless of which direction we found the edge in: first..middle,
            // then middle..second, matching the edge's own (u, v) orientation.
            if swapped {
                stack.push((middle, u));
                stack.push((v, middle));
            } else {
                stack.push((middle, v));
                stack.push((u, middle));
            }
        } else {
            callback((u, v), data);
        }
    }

    Ok(())
}
