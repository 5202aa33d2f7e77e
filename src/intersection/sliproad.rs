//! Sliproad detection (§4.E step 8): a short link road between two named roads that OSRM treats
//! as an internal classification detail rather than a turn of its own (hence `TurnType::Sliproad`
//! serializing to `"invalid"` on the wire, see `turn::TurnType::wire_name`).
//!
//! Grounded against
//! `examples/original_source/src/extractor/guidance/sliproad_handler.cpp`'s triangle-area bound
//! and through-street rejection rule.

use crate::road_class::{sliproad_area_factor, ClassData};

const MIN_TRIANGLE_AREA_M2: f64 = 3.0;

pub struct SliproadCandidate {
    pub length_m: f64,
    pub triangle_area_m2: f64,
    pub curvature_sign_flips: bool,
    pub is_through_street: bool,
    pub same_name: bool,
    pub same_class_and_mode: bool,
    pub class: ClassData,
}

/// `max_collapse_distance` is `GuidanceConfig::max_sliproad_threshold`.
pub fn is_sliproad(candidate: &SliproadCandidate, max_collapse_distance: f64) -> bool {
    if candidate.length_m > 2.0 * max_collapse_distance {
        return false;
    }
    if !candidate.same_class_and_mode {
        return false;
    }
    if candidate.is_through_street {
        return false;
    }
    if candidate.curvature_sign_flips {
        return false;
    }

    let factor = sliproad_area_factor(&candidate.class);
    let upper_bound = (factor * max_collapse_distance).powi(2);
    if candidate.triangle_area_m2 < MIN_TRIANGLE_AREA_M2 || candidate.triangle_area_m2 > upper_bound {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road_class::RoadClassFlag;

    fn base_candidate() -> SliproadCandidate {
        SliproadCandidate {
            length_m: 20.0,
            triangle_area_m2: 50.0,
            curvature_sign_flips: false,
            is_through_street: false,
            same_name: false,
            same_class_and_mode: true,
            class: ClassData::new(RoadClassFlag::Tertiary.into()),
        }
    }

    #[test]
    fn ordinary_short_link_is_sliproad() {
        assert!(is_sliproad(&base_candidate(), 30.0));
    }

    #[test]
    fn through_street_is_rejected() {
        let mut c = base_candidate();
        c.is_through_street = true;
        assert!(!is_sliproad(&c, 30.0));
    }

    #[test]
    fn oversized_triangle_is_rejected() {
        let mut c = base_candidate();
        c.triangle_area_m2 = 1_000_000.0;
        assert!(!is_sliproad(&c, 30.0));
    }
}
