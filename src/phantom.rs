//! Phantom nodes: the projection of a user coordinate onto a graph edge.
//!
//! The original implementation packs four validity bits and a 12-bit bearing into adjacent
//! bitfields inside `PhantomNode`. Per SPEC_FULL.md / the source's REDESIGN FLAGS, we instead
//! encode them into a single `u16` with named accessors -- no alignment assumptions, and no
//! sentinel integers leak past the accessor API.

use crate::coordinate::Coordinate;
use crate::ids::{ComponentID, SegmentID};

const SOURCE_FORWARD: u16 = 1 << 0;
const TARGET_FORWARD: u16 = 1 << 1;
const SOURCE_REVERSE: u16 = 1 << 2;
const TARGET_REVERSE: u16 = 1 << 3;
const BEARING_SHIFT: u16 = 4;
const BEARING_MASK: u16 = 0x0FFF; // 12 bits

/// Packed validity bits (4) + bearing (12 bits), matching the original's bitfield layout but
/// exposed only through accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhantomFlags(u16);

impl PhantomFlags {
    pub fn new(
        source_forward: bool,
        target_forward: bool,
        source_reverse: bool,
        target_reverse: bool,
        bearing: u16,
    ) -> Self {
        debug_assert!(bearing < 360, "bearing must be in [0, 360)");
        let mut bits = 0u16;
        if source_forward {
            bits |= SOURCE_FORWARD;
        }
        if target_forward {
            bits |= TARGET_FORWARD;
        }
        if source_reverse {
            bits |= SOURCE_REVERSE;
        }
        if target_reverse {
            bits |= TARGET_REVERSE;
        }
        bits |= (bearing & BEARING_MASK) << BEARING_SHIFT;
        PhantomFlags(bits)
    }

    pub fn is_valid_source_forward(&self) -> bool {
        self.0 & SOURCE_FORWARD != 0
    }
    pub fn is_valid_target_forward(&self) -> bool {
        self.0 & TARGET_FORWARD != 0
    }
    pub fn is_valid_source_reverse(&self) -> bool {
        self.0 & SOURCE_REVERSE != 0
    }
    pub fn is_valid_target_reverse(&self) -> bool {
        self.0 & TARGET_REVERSE != 0
    }

    pub fn bearing(&self) -> u16 {
        (self.0 >> BEARING_SHIFT) & BEARING_MASK
    }

    /// At least one of {forward source/target, reverse source/target} must hold for this
    /// phantom node to be usable as a route endpoint.
    pub fn usable_as_endpoint(&self) -> bool {
        (self.is_valid_source_forward() && self.is_valid_target_forward())
            || (self.is_valid_source_reverse() && self.is_valid_target_reverse())
    }
}

/// Per-direction weight/duration/distance, with the offset into the edge's geometry they were
/// computed relative to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DirectionalPhantomData {
    pub weight: f64,
    pub duration: f64,
    pub distance: f64,
}

impl DirectionalPhantomData {
    pub fn is_finite(&self) -> bool {
        self.weight.is_finite() && self.duration.is_finite() && self.distance.is_finite()
    }
}

/// The projection of a user coordinate onto an edge of the graph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhantomNode {
    pub forward_segment_id: SegmentID,
    pub reverse_segment_id: SegmentID,
    pub forward: DirectionalPhantomData,
    pub reverse: DirectionalPhantomData,
    pub fwd_segment_position: usize,
    pub flags: PhantomFlags,
    pub location: Coordinate,
    pub input_location: Coordinate,
    pub component: ComponentID,
}

impl PhantomNode {
    /// Data-model invariant: a segment enabled for travel must carry finite weight/duration/distance.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.forward_segment_id.enabled && !self.forward.is_finite() {
            return Err("forward segment enabled but has non-finite cost".into());
        }
        if self.reverse_segment_id.enabled && !self.reverse.is_finite() {
            return Err("reverse segment enabled but has non-finite cost".into());
        }
        if self.flags.bearing() >= 360 {
            return Err("bearing out of range".into());
        }
        Ok(())
    }
}

/// A `{source, target}` pair defining one leg of a route.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhantomEndpoints {
    pub source: PhantomNode,
    pub target: PhantomNode,
}
