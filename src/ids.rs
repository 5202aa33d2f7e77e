//! Opaque 32-bit identifiers, styled after `osm2streets::ids` (newtypes with `Display`, ordered
//! and hashable), but sized and sentineled to match the contracted-hierarchy graph's
//! `NodeID`/`EdgeID`/`NameID` conventions rather than abstreet's non-contiguous usize ids.

use std::fmt;

macro_rules! opaque_id {
    ($name:ident, $special:ident) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            pub const $special: $name = $name(u32::MAX);

            pub fn is_valid(&self) -> bool {
                *self != Self::$special
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$special
            }
        }
    };
}

opaque_id!(NodeID, SPECIAL_NODEID);
opaque_id!(EdgeID, SPECIAL_EDGEID);
opaque_id!(NameID, SPECIAL_NAMEID);

/// A segment identifier paired with whether that segment is enabled for travel in this
/// direction. Mirrors OSRM's `SegmentID { id, enabled }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SegmentID {
    pub id: NodeID,
    pub enabled: bool,
}

impl SegmentID {
    pub fn invalid() -> Self {
        SegmentID {
            id: NodeID::SPECIAL_NODEID,
            enabled: false,
        }
    }
}

/// Identifies a weakly-connected component of the road graph. `is_tiny` marks components too
/// small to offer useful routing (e.g. a single disconnected driveway).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComponentID {
    pub id: u32,
    pub is_tiny: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntryClassID(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LaneDescriptionID(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_invalid() {
        assert!(!NodeID::SPECIAL_NODEID.is_valid());
        assert!(NodeID(0).is_valid());
    }
}
