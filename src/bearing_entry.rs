//! Compact per-intersection-node representations of which outgoing directions exist and are
//! traversable, as exposed by the DataFacade (§6.1's `bearing_class`/`entry_class`).
//!
//! The original implementation stores these as template-packed bitsets shared across many
//! intersections with identical shape, to save memory at planet scale. This crate isn't
//! responsible for that storage-layer compression (it's upstream, in the extractor); it only
//! needs the logical view, so these are plain bitsets.

const BUCKETS: usize = 16;
const BUCKET_WIDTH: f64 = 360.0 / BUCKETS as f64;

fn bucket_of(bearing: f64) -> usize {
    ((bearing.rem_euclid(360.0)) / BUCKET_WIDTH).floor() as usize % BUCKETS
}

/// The set of discretized bearings along which roads leave an intersection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BearingClass(u16);

impl BearingClass {
    pub fn from_bearings(bearings: impl IntoIterator<Item = f64>) -> Self {
        let mut mask = 0u16;
        for b in bearings {
            mask |= 1 << bucket_of(b);
        }
        BearingClass(mask)
    }

    pub fn contains_bearing(&self, bearing: f64) -> bool {
        self.0 & (1 << bucket_of(bearing)) != 0
    }

    pub fn degree(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Which of the bearings in the corresponding `BearingClass` actually permit entry (as opposed
/// to being one-way-against or otherwise blocked).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntryClass(u16);

impl EntryClass {
    pub fn from_allowed_bearings(bearings: impl IntoIterator<Item = f64>) -> Self {
        let mut mask = 0u16;
        for b in bearings {
            mask |= 1 << bucket_of(b);
        }
        EntryClass(mask)
    }

    pub fn allows_bearing(&self, bearing: f64) -> bool {
        self.0 & (1 << bucket_of(bearing)) != 0
    }
}
