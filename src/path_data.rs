//! Per-via-node path data produced by edge unpacking, and the raw route result the routing
//! search hands to this crate.

use crate::ids::{EntryClassID, LaneDescriptionID, NameID, NodeID};
use crate::phantom::PhantomEndpoints;
use crate::road_class::ClassData;
use crate::travel_mode::TravelMode;
use crate::turn::TurnInstruction;

/// One element per via-node along an unpacked path.
///
/// Contract: `duration_until_turn` (and `weight_until_turn`) include the turn cost that follows
/// it. To get the segment-only duration, subtract `duration_of_turn` (same for weight) -- see
/// `segment_only_duration`/`segment_only_weight`.
#[derive(Clone, Debug, PartialEq)]
pub struct PathData {
    pub turn_via_node: NodeID,
    pub name_id: NameID,
    pub duration_until_turn: f64,
    pub weight_until_turn: f64,
    pub weight_of_turn: f64,
    pub duration_of_turn: f64,
    pub turn_instruction: TurnInstruction,
    pub lane_data: Option<LaneDescriptionID>,
    pub travel_mode: TravelMode,
    pub entry_class_id: EntryClassID,
    pub datasource_id: u8,
    pub classes: ClassData,
    pub is_left_hand_driving: bool,
    pub is_segregated: bool,
    pub pre_turn_bearing: f64,
    pub post_turn_bearing: f64,
}

impl PathData {
    pub fn segment_only_duration(&self) -> f64 {
        (self.duration_until_turn - self.duration_of_turn) / 10.0
    }

    pub fn segment_only_weight(&self, weight_multiplier: f64) -> f64 {
        (self.weight_until_turn - self.weight_of_turn) / weight_multiplier
    }
}

/// The raw shortest-path result handed to this crate by the routing search (out of this crate's
/// scope to produce).
#[derive(Clone, Debug)]
pub struct InternalRouteResult {
    pub unpacked_path_segments: Vec<Vec<PathData>>,
    pub leg_endpoints: Vec<PhantomEndpoints>,
    pub source_traversed_in_reverse: Vec<bool>,
    pub target_traversed_in_reverse: Vec<bool>,
    /// The infinite sentinel (`f64::INFINITY`) means no route was found.
    pub shortest_path_weight: f64,
}

impl InternalRouteResult {
    pub fn is_valid(&self) -> bool {
        self.shortest_path_weight.is_finite()
    }

    /// Data-model invariant: the four per-leg sequences must all agree in length.
    pub fn check_shape(&self) -> Result<(), String> {
        let n = self.leg_endpoints.len();
        if self.unpacked_path_segments.len() != n
            || self.source_traversed_in_reverse.len() != n
            || self.target_traversed_in_reverse.len() != n
        {
            return Err(format!(
                "InternalRouteResult leg-indexed sequences disagree in length: \
                 unpacked_path_segments={}, leg_endpoints={}, source_rev={}, target_rev={}",
                self.unpacked_path_segments.len(),
                n,
                self.source_traversed_in_reverse.len(),
                self.target_traversed_in_reverse.len()
            ));
        }
        Ok(())
    }

    /// Precondition for a multi-leg route: adjacent legs must share an endpoint.
    pub fn check_leg_continuity(&self) -> Result<(), String> {
        for i in 0..self.leg_endpoints.len().saturating_sub(1) {
            let a = &self.leg_endpoints[i].target;
            let b = &self.leg_endpoints[i + 1].source;
            if a.location != b.location {
                return Err(format!("leg {} target does not match leg {} source", i, i + 1));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_route_sentinel() {
        let result = InternalRouteResult {
            unpacked_path_segments: vec![],
            leg_endpoints: vec![],
            source_traversed_in_reverse: vec![],
            target_traversed_in_reverse: vec![],
            shortest_path_weight: f64::INFINITY,
        };
        assert!(!result.is_valid());
    }
}
