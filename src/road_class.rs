//! Road classification, modelled as a small `enumset`-backed bitset -- the same pattern
//! `osm2streets::types` uses for its compact tag-derived enums, appropriate here because a road
//! can simultaneously be e.g. "link" and "motorway".

use enumset::{EnumSet, EnumSetType};

#[derive(EnumSetType, Debug)]
pub enum RoadClassFlag {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    LivingStreet,
    Service,
    Track,
    LinkRoad,
    Roundabout,
}

/// A road's class data, as reported per-node by the DataFacade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassData {
    #[serde(with = "enumset::serde_impl")]
    flags: EnumSet<RoadClassFlag>,
}

impl ClassData {
    pub fn new(flags: EnumSet<RoadClassFlag>) -> Self {
        ClassData { flags }
    }

    pub fn has(&self, flag: RoadClassFlag) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_motorway_like(&self) -> bool {
        self.has(RoadClassFlag::Motorway) || self.has(RoadClassFlag::Trunk)
    }

    pub fn is_link(&self) -> bool {
        self.has(RoadClassFlag::LinkRoad)
    }

    pub fn is_roundabout(&self) -> bool {
        self.has(RoadClassFlag::Roundabout)
    }

    /// Coarse priority ranking used to pick the "main" road out of a fork/merge/continuation
    /// ambiguity: lower is higher priority.
    pub fn priority_rank(&self) -> u8 {
        if self.has(RoadClassFlag::Motorway) {
            0
        } else if self.has(RoadClassFlag::Trunk) {
            1
        } else if self.has(RoadClassFlag::Primary) {
            2
        } else if self.has(RoadClassFlag::Secondary) {
            3
        } else if self.has(RoadClassFlag::Tertiary) {
            4
        } else if self.has(RoadClassFlag::Residential) {
            5
        } else if self.has(RoadClassFlag::LivingStreet) {
            6
        } else if self.has(RoadClassFlag::Service) {
            7
        } else {
            8
        }
    }
}

/// Per-class scaling factor for the sliproad triangle-area threshold (§4.E.8,
/// SPEC_FULL.md / Open Question 2). Higher-priority roads (motorway/trunk links) get a larger
/// allowance since their slip geometry tends to be wider and longer than a residential cut-through.
/// These factors are load-bearing for regression tests and are copied verbatim from the shape of
/// thresholds implied by the original extractor's lane-count- and class-scaled distances
/// (`examples/original_source/src/extractor/guidance/coordinate_extractor.cpp`); they are not
/// re-derived.
pub fn sliproad_area_factor(class: &ClassData) -> f64 {
    if class.has(RoadClassFlag::Motorway) || class.has(RoadClassFlag::Trunk) {
        6.0
    } else if class.has(RoadClassFlag::Primary) {
        4.5
    } else if class.has(RoadClassFlag::Secondary) {
        3.5
    } else if class.has(RoadClassFlag::Tertiary) {
        2.5
    } else {
        1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_motorway_above_residential() {
        let mw = ClassData::new(RoadClassFlag::Motorway.into());
        let res = ClassData::new(RoadClassFlag::Residential.into());
        assert!(mw.priority_rank() < res.priority_rank());
    }

    #[test]
    fn sliproad_factor_scales_with_class() {
        let mw = ClassData::new(RoadClassFlag::Motorway.into());
        let res = ClassData::new(RoadClassFlag::Residential.into());
        assert!(sliproad_area_factor(&mw) > sliproad_area_factor(&res));
    }
}
