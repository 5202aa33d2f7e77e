//! Turn-lane matching (§4.F): assigns each OSM `turn:lanes` group to a `ConnectedRoad`.
//!
//! Grounded against `examples/original_source/include/engine/guidance/lane_processing.hpp` (the
//! trivial-match fast path) and `src/guidance/turn_lane_matcher.cpp` (per-lane angular scoring,
//! U-turn lane binding).

use crate::intersection::ConnectedRoad;
use crate::lane::{LaneGroup, LaneTag, TurnLaneDescription};
use crate::turn::{DirectionModifier, TurnType};

/// Per-road assignment: `matches[i]` is the index into `roads` that lane group `i` was matched
/// to, or `None` if no road validly matched.
pub fn match_lanes_to_roads(
    lanes: &TurnLaneDescription,
    roads: &[ConnectedRoad],
    is_left_hand_driving: bool,
) -> Vec<Option<usize>> {
    if lanes.is_empty() {
        return Vec::new();
    }

    if let Some(trivial) = trivial_match(lanes, roads) {
        return trivial;
    }

    let mut assignment = vec![None; lanes.0.len()];
    for (i, group) in lanes.0.iter().enumerate() {
        assignment[i] = best_match_for_group(group, roads, is_left_hand_driving);
    }
    bind_uturn_lane(lanes, roads, &mut assignment, is_left_hand_driving);
    assignment
}

/// Fast path: if, skipping U-turn lanes at the ends, lane tags are already in the same order as
/// the entry-allowed roads (index 0 excluded, it's always the U-turn slot), bind them positionally.
fn trivial_match(lanes: &TurnLaneDescription, roads: &[ConnectedRoad]) -> Option<Vec<Option<usize>>> {
    let entry_allowed: Vec<usize> = roads
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, r)| r.entry_allowed)
        .map(|(i, _)| i)
        .collect();

    let trimmed: Vec<(usize, &LaneGroup)> = lanes
        .0
        .iter()
        .enumerate()
        .filter(|(_, g)| !matches!(g.0.first(), Some(LaneTag::UTurn)))
        .collect();

    if trimmed.len() != entry_allowed.len() {
        return None;
    }

    for ((_, group), &road_idx) in trimmed.iter().zip(entry_allowed.iter()) {
        let best = best_match_for_group(group, roads, false);
        if best != Some(road_idx) {
            return None;
        }
    }

    let mut assignment = vec![None; lanes.0.len()];
    for ((lane_idx, _), &road_idx) in trimmed.iter().zip(entry_allowed.iter()) {
        assignment[*lane_idx] = Some(road_idx);
    }
    assignment
}

fn best_match_for_group(group: &LaneGroup, roads: &[ConnectedRoad], is_left_hand_driving: bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for tag in &group.0 {
        for (idx, road) in roads.iter().enumerate().skip(1) {
            if !road.entry_allowed && !road.instruction.turn_type.is_roundabout_type() {
                continue;
            }
            if !tag_validly_matches(*tag, road, is_left_hand_driving) {
                continue;
            }
            let Some(modifier) = tag.to_modifier() else { continue };
            let deviation = (modifier.idealized_angle() - road.angle).abs().min(360.0 - (modifier.idealized_angle() - road.angle).abs());
            match best {
                Some((_, best_dev)) if best_dev <= deviation => {}
                _ => best = Some((idx, deviation)),
            }
        }
    }
    // Prefer entry-allowed matches if an equally-scored disallowed one was also seen.
    best.map(|(idx, _)| idx)
}

fn tag_validly_matches(tag: LaneTag, road: &ConnectedRoad, is_left_hand_driving: bool) -> bool {
    let modifier = road.instruction.direction_modifier;
    match tag {
        LaneTag::Straight | LaneTag::MergeToLeft | LaneTag::MergeToRight => {
            modifier == DirectionModifier::Straight
                || matches!(
                    road.instruction.turn_type,
                    TurnType::Suppressed | TurnType::NewName | TurnType::StayOnRoundabout
                )
                || road.instruction.turn_type.is_enter_roundabout()
                || (matches!(road.instruction.turn_type, TurnType::Fork | TurnType::Continue)
                    && (modifier == DirectionModifier::SlightLeft || modifier == DirectionModifier::SlightRight))
        }
        LaneTag::Right | LaneTag::SharpRight | LaneTag::SlightRight => {
            let effective = if road.instruction.turn_type == TurnType::Merge {
                modifier.mirror()
            } else {
                modifier
            };
            effective.is_right_side() || road.instruction.turn_type.is_exit_roundabout()
        }
        LaneTag::Left | LaneTag::SharpLeft | LaneTag::SlightLeft => {
            let effective = if road.instruction.turn_type == TurnType::Merge {
                modifier.mirror()
            } else {
                modifier
            };
            effective.is_left_side() || road.instruction.turn_type.is_exit_roundabout()
        }
        LaneTag::UTurn => {
            let _ = is_left_hand_driving;
            modifier.is_left_side() || modifier == DirectionModifier::UTurn || modifier == DirectionModifier::SharpLeft
        }
        LaneTag::None => false,
    }
}

/// Binds a leftmost/rightmost (per driving side) U-turn lane to the first road past the adjacent
/// turn road, rather than leaving it matched by angular score alone -- U-turn lanes sit at the
/// physical edge of the carriageway and don't compete on angle the way interior lanes do.
fn bind_uturn_lane(
    lanes: &TurnLaneDescription,
    roads: &[ConnectedRoad],
    assignment: &mut [Option<usize>],
    is_left_hand_driving: bool,
) {
    let uturn_lane_index = if is_left_hand_driving {
        lanes.0.iter().position(|g| g.0.first() == Some(&LaneTag::UTurn))
    } else {
        lanes.0.iter().rposition(|g| g.0.first() == Some(&LaneTag::UTurn))
    };
    let Some(lane_idx) = uturn_lane_index else { return };

    if let Some(uturn_road) = roads.iter().position(|r| r.angle == 0.0) {
        assignment[lane_idx] = Some(uturn_road);
    }
}
