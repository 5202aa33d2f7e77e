//! OSM turn-lane tag parsing primitives, consumed by the turn-lane matcher (§4.F).

use crate::turn::DirectionModifier;

/// One lane's parsed `turn:lanes` tag value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneTag {
    None,
    UTurn,
    SharpRight,
    Right,
    SlightRight,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
    MergeToLeft,
    MergeToRight,
}

impl LaneTag {
    /// Per-lane tag -> direction modifier map (§4.F).
    pub fn to_modifier(&self) -> Option<DirectionModifier> {
        match self {
            LaneTag::None => None,
            LaneTag::UTurn => Some(DirectionModifier::UTurn),
            LaneTag::SharpRight => Some(DirectionModifier::SharpRight),
            LaneTag::Right => Some(DirectionModifier::Right),
            LaneTag::SlightRight => Some(DirectionModifier::SlightRight),
            LaneTag::Straight => Some(DirectionModifier::Straight),
            LaneTag::SlightLeft => Some(DirectionModifier::SlightLeft),
            LaneTag::Left => Some(DirectionModifier::Left),
            LaneTag::SharpLeft => Some(DirectionModifier::SharpLeft),
            // merge_to_left/right lanes continue essentially straight from the driver's
            // perspective; they just end up merged into a neighbor lane shortly after.
            LaneTag::MergeToLeft | LaneTag::MergeToRight => Some(DirectionModifier::Straight),
        }
    }

    pub fn parse(tag: &str) -> LaneTag {
        match tag {
            "uturn" => LaneTag::UTurn,
            "sharp_right" => LaneTag::SharpRight,
            "right" => LaneTag::Right,
            "slight_right" => LaneTag::SlightRight,
            "through" | "straight" => LaneTag::Straight,
            "slight_left" => LaneTag::SlightLeft,
            "left" => LaneTag::Left,
            "sharp_left" => LaneTag::SharpLeft,
            "merge_to_left" => LaneTag::MergeToLeft,
            "merge_to_right" => LaneTag::MergeToRight,
            _ => LaneTag::None,
        }
    }
}

/// A single lane group's tags, left-to-right or right-to-left depending on driving side, as
/// parsed from an OSM `turn:lanes` value (`|`-separated groups, `;`-separated tags within a
/// group).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaneGroup(pub Vec<LaneTag>);

/// The full, ordered (by physical position) turn-lane description for one edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnLaneDescription(pub Vec<LaneGroup>);

impl TurnLaneDescription {
    pub fn parse(mask: &str) -> TurnLaneDescription {
        if mask.is_empty() {
            return TurnLaneDescription::default();
        }
        TurnLaneDescription(
            mask.split('|')
                .map(|group| LaneGroup(group.split(';').map(LaneTag::parse).collect()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pipe_and_semicolon_separated_mask() {
        let parsed = TurnLaneDescription::parse("left|through;right|right");
        assert_eq!(parsed.0.len(), 3);
        assert_eq!(parsed.0[0].0, vec![LaneTag::Left]);
        assert_eq!(parsed.0[1].0, vec![LaneTag::Straight, LaneTag::Right]);
        assert_eq!(parsed.0[2].0, vec![LaneTag::Right]);
    }

    #[test]
    fn merge_tags_map_to_straight() {
        assert_eq!(LaneTag::MergeToLeft.to_modifier(), Some(DirectionModifier::Straight));
        assert_eq!(LaneTag::MergeToRight.to_modifier(), Some(DirectionModifier::Straight));
    }
}
