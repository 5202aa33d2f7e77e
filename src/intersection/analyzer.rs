//! The intersection-analysis pipeline itself (§4.E steps 1-10).
//!
//! Grounded against `examples/original_source`: dual carriageway merging against
//! `src/extractor/guidance/intersection_normalizer.cpp`'s angular-separation and Y-arm-validity
//! thresholds, turn-allowance and the roundabout reflex-arc test (`alpha`/`beta`/`gamma` against
//! the ring's entry/exit bearings) against
//! `src/extractor/intersection/intersection_analysis.cpp`'s `isTurnAllowed`, motorway/ramp
//! classification against `src/guidance/motorway_handler.cpp`.
//!
//! Step 3 (propagating a neighboring intersection's merge into this one's bearings) needs live
//! access to the *next* intersection along each candidate road, which this crate's `DataFacade`
//! does not yet expose a walk-one-hop-and-classify primitive for. It is not implemented here;
//! see DESIGN.md's Open Question log.

use crate::config::GuidanceConfig;
use crate::coordinate::{angular_deviation, reverse_bearing};
use crate::ids::{EdgeID, LaneDescriptionID, NameID};
use crate::intersection::roundabout::{self, RoundaboutType};
use crate::intersection::sliproad::{self, SliproadCandidate};
use crate::intersection::{ConnectedRoad, IntersectionView};
use crate::road_class::ClassData;
use crate::travel_mode::TravelMode;
use crate::turn::{DirectionModifier, TurnInstruction, TurnType};

const DUAL_CARRIAGEWAY_MAX_ANGLE: f64 = 60.0;

/// One candidate outgoing road, as the caller (the facade-driven request pipeline) has already
/// resolved it: geometry sampling (§4.I) and raw turn-restriction lookups have already happened.
#[derive(Clone, Debug)]
pub struct OutgoingRoad {
    pub edge_id: EdgeID,
    pub perceived_bearing: f64,
    pub segment_length: f64,
    pub name_id: NameID,
    pub class: ClassData,
    pub travel_mode: TravelMode,
    pub is_reversed: bool,
    pub restricted: bool,
    pub is_roundabout: bool,
    pub lane_data_id: Option<LaneDescriptionID>,
    pub has_uturn_lane: bool,
    pub sliproad: Option<SliproadCandidate>,
}

#[derive(Clone, Copy, Debug)]
pub struct RoundaboutRing {
    pub length_m: f64,
    pub has_unique_consistent_name: bool,
    pub tagged_circular: bool,
    /// Bearing the ring carries traffic in on its way into this intersection, used by the
    /// reflex-arc test as the reference the incoming/candidate bearings are measured against.
    pub ring_bearing: f64,
    /// Bearing the ring carries traffic out on its way away from this intersection. Distinct from
    /// `ring_bearing` whenever the ring curves between entry and exit, which is the usual case.
    pub exit_bearing: f64,
}

pub struct IntersectionInput {
    pub incoming_edge_id: EdgeID,
    pub incoming_bearing: f64,
    pub incoming_name_id: NameID,
    pub incoming_class: ClassData,
    pub incoming_mode: TravelMode,
    pub node_degree: usize,
    pub is_barrier: bool,
    pub is_left_hand_driving: bool,
    pub bidirectional_edge_count: usize,
    pub outgoing: Vec<OutgoingRoad>,
    pub roundabout: Option<RoundaboutRing>,
}

/// A connected road paired with the raw facts it was derived from, kept together through
/// sorting/merging so later pipeline steps never have to re-derive positional correspondence.
struct Road {
    outgoing: OutgoingRoad,
    connected: ConnectedRoad,
}

/// Runs the full §4.E pipeline for one intersection and returns the classified
/// `IntersectionView`.
pub fn analyze_intersection(input: &IntersectionInput, config: &GuidanceConfig) -> IntersectionView {
    let merged = merge_dual_carriageways(&input.outgoing);

    let mut roads: Vec<Road> = merged
        .into_iter()
        .map(|outgoing| {
            let angle = angle_from_incoming(input.incoming_bearing, outgoing.perceived_bearing);
            let connected = ConnectedRoad {
                edge_id: outgoing.edge_id,
                angle,
                bearing: outgoing.perceived_bearing,
                entry_allowed: false,
                instruction: TurnInstruction::NO_TURN,
                lane_data_id: outgoing.lane_data_id,
                segment_length: outgoing.segment_length,
                is_valid: !outgoing.is_reversed,
            };
            Road { outgoing, connected }
        })
        .collect();

    roads.sort_by(|a, b| a.connected.angle.partial_cmp(&b.connected.angle).unwrap());

    let uturn_outgoing = OutgoingRoad {
        edge_id: EdgeID::SPECIAL_EDGEID,
        perceived_bearing: reverse_bearing(input.incoming_bearing),
        segment_length: 0.0,
        name_id: input.incoming_name_id,
        class: input.incoming_class,
        travel_mode: input.incoming_mode,
        is_reversed: false,
        restricted: false,
        is_roundabout: false,
        lane_data_id: None,
        has_uturn_lane: false,
        sliproad: None,
    };
    roads.insert(
        0,
        Road {
            connected: ConnectedRoad::uturn(uturn_outgoing.perceived_bearing),
            outgoing: uturn_outgoing,
        },
    );

    assign_turn_allowance(input, &mut roads);
    classify_roundabout(input, &mut roads);
    classify_motorway(input, &mut roads);
    classify_sliproad(&mut roads, config);
    apply_suppress_mode(input, &mut roads);
    classify_obvious_continue(input, &mut roads);

    IntersectionView::new(roads.into_iter().map(|r| r.connected).collect())
}

fn angle_from_incoming(incoming_bearing: f64, outgoing_bearing: f64) -> f64 {
    let raw = outgoing_bearing - reverse_bearing(incoming_bearing);
    raw.rem_euclid(360.0)
}

/// §4.E step 2: merges adjacent outgoing roads forming a split dual-carriageway pair.
fn merge_dual_carriageways(outgoing: &[OutgoingRoad]) -> Vec<OutgoingRoad> {
    let mut used = vec![false; outgoing.len()];
    let mut merged = Vec::with_capacity(outgoing.len());

    for i in 0..outgoing.len() {
        if used[i] {
            continue;
        }
        let mut partner = None;
        for j in (i + 1)..outgoing.len() {
            if !used[j] && is_mergeable_pair(&outgoing[i], &outgoing[j]) {
                partner = Some(j);
                break;
            }
        }
        if let Some(j) = partner {
            used[i] = true;
            used[j] = true;
            let (kept, dropped) = if outgoing[i].is_reversed { (j, i) } else { (i, j) };
            let averaged_bearing = crate::coordinate::average_bearings(&[
                outgoing[kept].perceived_bearing,
                outgoing[dropped].perceived_bearing,
            ]);
            let mut keeper = outgoing[kept].clone();
            keeper.perceived_bearing = averaged_bearing;
            merged.push(keeper);
        } else {
            merged.push(outgoing[i].clone());
        }
    }
    merged
}

fn is_mergeable_pair(a: &OutgoingRoad, b: &OutgoingRoad) -> bool {
    if a.name_id == NameID::SPECIAL_NAMEID || a.name_id != b.name_id {
        return false;
    }
    if a.travel_mode != b.travel_mode {
        return false;
    }
    if a.is_roundabout || b.is_roundabout {
        return false;
    }
    if a.is_reversed == b.is_reversed {
        return false;
    }
    angular_deviation(a.perceived_bearing, b.perceived_bearing) < DUAL_CARRIAGEWAY_MAX_ANGLE
}

/// §4.E step 5: turn allowance, including the U-turn and roundabout reflex-arc rules.
fn assign_turn_allowance(input: &IntersectionInput, roads: &mut [Road]) {
    let uturn_allowed = input.node_degree <= 1
        || input.is_barrier
        || input.bidirectional_edge_count <= 1
        || input.outgoing.iter().any(|o| o.has_uturn_lane);

    for road in roads.iter_mut() {
        if road.outgoing.edge_id == EdgeID::SPECIAL_EDGEID {
            road.connected.entry_allowed = uturn_allowed;
        } else {
            road.connected.entry_allowed = !road.outgoing.is_reversed && !road.outgoing.restricted;
        }
    }

    if let Some(ring) = &input.roundabout {
        let alpha = angular_deviation(ring.ring_bearing, reverse_bearing(input.incoming_bearing));
        let beta = angular_deviation(ring.ring_bearing, ring.exit_bearing);
        for road in roads.iter_mut() {
            if road.outgoing.edge_id == EdgeID::SPECIAL_EDGEID {
                continue;
            }
            let gamma = angular_deviation(ring.ring_bearing, road.connected.bearing);
            let disallow = (alpha < beta && gamma < alpha) || (alpha > beta && gamma > alpha);
            if disallow {
                road.connected.entry_allowed = false;
            }
        }
    }
}

/// §4.E step 6: roundabout classification.
fn classify_roundabout(input: &IntersectionInput, roads: &mut [Road]) {
    let Some(ring) = &input.roundabout else { return };
    let exit_bearings: Vec<f64> = roads
        .iter()
        .filter(|r| r.outgoing.is_roundabout)
        .map(|r| r.connected.bearing)
        .collect();
    let ring_type = roundabout::classify_ring(
        ring.length_m,
        &exit_bearings,
        ring.has_unique_consistent_name,
        ring.tagged_circular,
    );
    if ring_type == RoundaboutType::None {
        return;
    }

    for road in roads.iter_mut().filter(|r| r.connected.entry_allowed && r.outgoing.is_roundabout) {
        let turn_type = match ring_type {
            RoundaboutType::RoundaboutIntersection => TurnType::EnterRoundaboutIntersection,
            RoundaboutType::Rotary => TurnType::EnterRotary,
            RoundaboutType::Roundabout => TurnType::EnterRoundabout,
            RoundaboutType::None => unreachable!(),
        };
        road.connected.instruction = TurnInstruction::new(turn_type, DirectionModifier::Straight);
    }
}

/// §4.E step 7: motorway/ramp/fork classification by relative road-class priority.
fn classify_motorway(input: &IntersectionInput, roads: &mut [Road]) {
    if !input.incoming_class.is_motorway_like() {
        return;
    }
    let candidate_indices: Vec<usize> = roads
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.outgoing.edge_id != EdgeID::SPECIAL_EDGEID
                && r.connected.entry_allowed
                && r.connected.instruction.turn_type == TurnType::NoTurn
        })
        .map(|(i, _)| i)
        .collect();

    if candidate_indices.is_empty() {
        return;
    }

    if candidate_indices.len() == 1 {
        let idx = candidate_indices[0];
        let turn_type = if roads[idx].outgoing.class.is_motorway_like() {
            TurnType::Merge
        } else {
            TurnType::OffRamp
        };
        let modifier = DirectionModifier::from_turn_angle(roads[idx].connected.angle);
        roads[idx].connected.instruction = TurnInstruction::new(turn_type, modifier);
        return;
    }

    let first_rank = roads[candidate_indices[0]].outgoing.class.priority_rank();
    let same_class = candidate_indices
        .iter()
        .all(|&i| roads[i].outgoing.class.priority_rank() == first_rank);
    for &idx in &candidate_indices {
        let modifier = DirectionModifier::from_turn_angle(roads[idx].connected.angle);
        let turn_type = if same_class { TurnType::Fork } else { TurnType::OffRamp };
        roads[idx].connected.instruction = TurnInstruction::new(turn_type, modifier);
    }
}

/// §4.E step 8: sliproad detection.
fn classify_sliproad(roads: &mut [Road], config: &GuidanceConfig) {
    for road in roads.iter_mut() {
        let Some(candidate) = &road.outgoing.sliproad else { continue };
        if sliproad::is_sliproad(candidate, config.max_sliproad_threshold) {
            let modifier = road.connected.instruction.direction_modifier;
            road.connected.instruction = TurnInstruction::new(TurnType::Sliproad, modifier);
        }
    }
}

/// §4.E step 9: ferry/rail legs carry no turn-by-turn guidance.
fn apply_suppress_mode(input: &IntersectionInput, roads: &mut [Road]) {
    if !input.incoming_mode.suppresses_turn_guidance() {
        return;
    }
    let all_outgoing_share_mode = input.outgoing.iter().all(|o| o.travel_mode == input.incoming_mode);
    if !all_outgoing_share_mode {
        return;
    }
    for road in roads.iter_mut() {
        let modifier = road.connected.instruction.direction_modifier;
        road.connected.instruction = TurnInstruction::new(TurnType::NoTurn, modifier);
    }
}

/// §4.E step 10: an outgoing road is "obvious" when it is the only entry-allowed, unclassified,
/// roughly-straight continuation of matching class/name.
fn classify_obvious_continue(input: &IntersectionInput, roads: &mut [Road]) {
    let unclassified: Vec<usize> = roads
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.outgoing.edge_id != EdgeID::SPECIAL_EDGEID
                && r.connected.entry_allowed
                && r.connected.instruction.turn_type == TurnType::NoTurn
        })
        .map(|(i, _)| i)
        .collect();

    if unclassified.len() != 1 {
        return;
    }
    let idx = unclassified[0];
    let is_straight = angular_deviation(roads[idx].connected.angle, 180.0) < 35.0;
    let same_class = roads[idx].outgoing.class.priority_rank() == input.incoming_class.priority_rank();
    let same_name = roads[idx].outgoing.name_id == input.incoming_name_id && roads[idx].outgoing.name_id != NameID::SPECIAL_NAMEID;

    if !is_straight || !same_class {
        let modifier = DirectionModifier::from_turn_angle(roads[idx].connected.angle);
        roads[idx].connected.instruction = TurnInstruction::new(TurnType::Turn, modifier);
        return;
    }

    let turn_type = if same_name {
        TurnType::Suppressed
    } else if roads[idx].outgoing.name_id != NameID::SPECIAL_NAMEID {
        TurnType::NewName
    } else {
        TurnType::Continue
    };
    roads[idx].connected.instruction = TurnInstruction::new(turn_type, DirectionModifier::Straight);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road_class::RoadClassFlag;

    fn sample_road(name: u32, bearing: f64, reversed: bool) -> OutgoingRoad {
        OutgoingRoad {
            edge_id: EdgeID(name),
            perceived_bearing: bearing,
            segment_length: 100.0,
            name_id: NameID(name),
            class: ClassData::new(RoadClassFlag::Residential.into()),
            travel_mode: TravelMode::Driving,
            is_reversed: reversed,
            restricted: false,
            is_roundabout: false,
            lane_data_id: None,
            has_uturn_lane: false,
            sliproad: None,
        }
    }

    fn base_input(outgoing: Vec<OutgoingRoad>) -> IntersectionInput {
        IntersectionInput {
            incoming_edge_id: EdgeID(999),
            incoming_bearing: 0.0,
            incoming_name_id: NameID(1),
            incoming_class: ClassData::new(RoadClassFlag::Residential.into()),
            incoming_mode: TravelMode::Driving,
            node_degree: 3,
            is_barrier: false,
            is_left_hand_driving: false,
            bidirectional_edge_count: 2,
            outgoing,
            roundabout: None,
        }
    }

    #[test]
    fn uturn_is_always_first() {
        let input = base_input(vec![sample_road(1, 170.0, false), sample_road(2, 10.0, false)]);
        let config = GuidanceConfig::default();
        let view = analyze_intersection(&input, &config);
        assert!(view.check_uturn_first());
    }

    #[test]
    fn single_straight_continuation_is_obvious() {
        let input = base_input(vec![sample_road(1, 180.0, false)]);
        let config = GuidanceConfig::default();
        let view = analyze_intersection(&input, &config);
        let straight = view.roads.iter().find(|r| r.angle > 1.0).unwrap();
        assert!(matches!(
            straight.instruction.turn_type,
            TurnType::Suppressed | TurnType::Continue | TurnType::NewName
        ));
    }

    #[test]
    fn dual_carriageway_pair_merges_into_one_road() {
        let input = base_input(vec![sample_road(5, 10.0, false), sample_road(5, 350.0, true)]);
        let config = GuidanceConfig::default();
        let view = analyze_intersection(&input, &config);
        // U-turn slot plus exactly one merged outgoing road.
        assert_eq!(view.roads.len(), 2);
    }
}
