//! Operator-supplied instruction overrides (§4.J, applied in post-processing pass §G.1).

use crate::coordinate::Coordinate;
use crate::ids::NodeID;
use crate::turn::{DirectionModifier, TurnType};

/// A single operator override: when the edge-based-node sequence `node_sequence` is found in the
/// path (ignoring transient EBN duplicates), rewrite the instruction at the via-node
/// `turn_coordinate`.
#[derive(Clone, Debug, PartialEq)]
pub struct ManeuverOverride {
    pub node_sequence: Vec<NodeID>,
    pub turn_coordinate: Coordinate,
    pub new_type: Option<TurnType>,
    pub new_modifier: Option<DirectionModifier>,
}

impl ManeuverOverride {
    /// `true` iff `path` contains `self.node_sequence` as a (possibly non-contiguous after
    /// de-duplicating immediate repeats) subsequence, matching the EBN-duplicate-skipping rule
    /// from §G.1.
    pub fn matches_path(&self, path: &[NodeID]) -> bool {
        if self.node_sequence.is_empty() {
            return false;
        }
        let mut deduped: Vec<NodeID> = Vec::with_capacity(path.len());
        for &n in path {
            if deduped.last() != Some(&n) {
                deduped.push(n);
            }
        }
        deduped
            .windows(self.node_sequence.len())
            .any(|w| w == self.node_sequence.as_slice())
    }
}
