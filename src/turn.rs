//! Turn types, direction modifiers and the small enums used throughout the pipeline.
//!
//! `Serialize` impls follow the stable wire format documented in SPEC_FULL.md §6.3 even though
//! actual JSON emission lives downstream of this crate -- keeping the encoding here means a thin
//! external serializer needs no translation table of its own.

use serde::{Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnType {
    NoTurn,
    NewName,
    Continue,
    Turn,
    Merge,
    OnRamp,
    OffRamp,
    Fork,
    EndOfRoad,
    Notification,
    Suppressed,
    Sliproad,
    EnterRoundabout,
    EnterAndExitRoundabout,
    EnterRotary,
    EnterAndExitRotary,
    EnterRoundaboutIntersection,
    EnterAndExitRoundaboutIntersection,
    EnterRoundaboutAtExit,
    ExitRoundabout,
    EnterRotaryAtExit,
    ExitRotary,
    EnterRoundaboutIntersectionAtExit,
    ExitRoundaboutIntersection,
    StayOnRoundabout,
    MaxTurnType,
}

impl TurnType {
    pub fn is_roundabout_type(&self) -> bool {
        matches!(
            self,
            TurnType::EnterRoundabout
                | TurnType::EnterAndExitRoundabout
                | TurnType::EnterRotary
                | TurnType::EnterAndExitRotary
                | TurnType::EnterRoundaboutIntersection
                | TurnType::EnterAndExitRoundaboutIntersection
                | TurnType::EnterRoundaboutAtExit
                | TurnType::ExitRoundabout
                | TurnType::EnterRotaryAtExit
                | TurnType::ExitRotary
                | TurnType::EnterRoundaboutIntersectionAtExit
                | TurnType::ExitRoundaboutIntersection
                | TurnType::StayOnRoundabout
        )
    }

    pub fn is_rotary_type(&self) -> bool {
        matches!(
            self,
            TurnType::EnterRotary | TurnType::EnterAndExitRotary | TurnType::EnterRotaryAtExit | TurnType::ExitRotary
        )
    }

    pub fn is_enter_roundabout(&self) -> bool {
        matches!(
            self,
            TurnType::EnterRoundabout
                | TurnType::EnterAndExitRoundabout
                | TurnType::EnterRotary
                | TurnType::EnterAndExitRotary
                | TurnType::EnterRoundaboutIntersection
                | TurnType::EnterAndExitRoundaboutIntersection
                | TurnType::EnterRoundaboutAtExit
                | TurnType::EnterRotaryAtExit
                | TurnType::EnterRoundaboutIntersectionAtExit
        )
    }

    pub fn is_exit_roundabout(&self) -> bool {
        matches!(
            self,
            TurnType::ExitRoundabout | TurnType::ExitRotary | TurnType::ExitRoundaboutIntersection
        )
    }

    /// lower-snake-case wire name, with the `Sliproad -> "invalid"` special case from
    /// SPEC_FULL.md §6.3 (sliproads are an internal classification, hidden from the renderer).
    pub fn wire_name(&self) -> &'static str {
        match self {
            TurnType::NoTurn => "no_turn",
            TurnType::NewName => "new name",
            TurnType::Continue => "continue",
            TurnType::Turn => "turn",
            TurnType::Merge => "merge",
            TurnType::OnRamp => "on ramp",
            TurnType::OffRamp => "off ramp",
            TurnType::Fork => "fork",
            TurnType::EndOfRoad => "end of road",
            TurnType::Notification => "notification",
            TurnType::Suppressed => "suppressed",
            TurnType::Sliproad => "invalid",
            TurnType::EnterRoundabout => "roundabout",
            TurnType::EnterAndExitRoundabout => "roundabout",
            TurnType::EnterRotary => "rotary",
            TurnType::EnterAndExitRotary => "rotary",
            TurnType::EnterRoundaboutIntersection => "roundabout turn",
            TurnType::EnterAndExitRoundaboutIntersection => "roundabout turn",
            TurnType::EnterRoundaboutAtExit => "roundabout",
            TurnType::ExitRoundabout => "exit roundabout",
            TurnType::EnterRotaryAtExit => "rotary",
            TurnType::ExitRotary => "exit rotary",
            TurnType::EnterRoundaboutIntersectionAtExit => "roundabout turn",
            TurnType::ExitRoundaboutIntersection => "exit roundabout",
            TurnType::StayOnRoundabout => "on roundabout",
            TurnType::MaxTurnType => "invalid",
        }
    }
}

impl Serialize for TurnType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.wire_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectionModifier {
    UTurn,
    SharpRight,
    Right,
    SlightRight,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
}

impl DirectionModifier {
    /// Idealized angle in degrees for this modifier, used by the turn-lane matcher (§4.F) to
    /// score how well a lane tag fits a connected road.
    pub fn idealized_angle(&self) -> f64 {
        match self {
            DirectionModifier::UTurn => 0.0,
            DirectionModifier::SharpRight => 35.0,
            DirectionModifier::Right => 90.0,
            DirectionModifier::SlightRight => 135.0,
            DirectionModifier::Straight => 180.0,
            DirectionModifier::SlightLeft => 225.0,
            DirectionModifier::Left => 270.0,
            DirectionModifier::SharpLeft => 315.0,
        }
    }

    /// Classify a perceived turn angle (bearing-before -> bearing-after turn angle, measured as
    /// `[0, 360)` with 180 being straight ahead) into a direction modifier.
    pub fn from_turn_angle(angle: f64) -> DirectionModifier {
        let angle = angle.rem_euclid(360.0);
        match angle {
            a if a < 10.0 || a >= 350.0 => DirectionModifier::UTurn,
            a if a < 60.0 => DirectionModifier::SharpRight,
            a if a < 140.0 => DirectionModifier::Right,
            a if a < 170.0 => DirectionModifier::SlightRight,
            a if a < 190.0 => DirectionModifier::Straight,
            a if a < 220.0 => DirectionModifier::SlightLeft,
            a if a < 300.0 => DirectionModifier::Left,
            _ => DirectionModifier::SharpLeft,
        }
    }

    pub fn is_right_side(&self) -> bool {
        matches!(
            self,
            DirectionModifier::SharpRight | DirectionModifier::Right | DirectionModifier::SlightRight
        )
    }

    pub fn is_left_side(&self) -> bool {
        matches!(
            self,
            DirectionModifier::SharpLeft | DirectionModifier::Left | DirectionModifier::SlightLeft
        )
    }

    pub fn mirror(&self) -> DirectionModifier {
        match self {
            DirectionModifier::SharpRight => DirectionModifier::SharpLeft,
            DirectionModifier::Right => DirectionModifier::Left,
            DirectionModifier::SlightRight => DirectionModifier::SlightLeft,
            DirectionModifier::SlightLeft => DirectionModifier::SlightRight,
            DirectionModifier::Left => DirectionModifier::Right,
            DirectionModifier::SharpLeft => DirectionModifier::SharpRight,
            other => *other,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            DirectionModifier::UTurn => "uturn",
            DirectionModifier::SharpRight => "sharp right",
            DirectionModifier::Right => "right",
            DirectionModifier::SlightRight => "slight right",
            DirectionModifier::Straight => "straight",
            DirectionModifier::SlightLeft => "slight left",
            DirectionModifier::Left => "left",
            DirectionModifier::SharpLeft => "sharp left",
        }
    }
}

impl Serialize for DirectionModifier {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.wire_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TurnInstruction {
    #[serde(rename = "type")]
    pub turn_type: TurnType,
    pub direction_modifier: DirectionModifier,
}

impl TurnInstruction {
    pub const NO_TURN: TurnInstruction = TurnInstruction {
        turn_type: TurnType::NoTurn,
        direction_modifier: DirectionModifier::Straight,
    };

    pub fn new(turn_type: TurnType, direction_modifier: DirectionModifier) -> Self {
        TurnInstruction {
            turn_type,
            direction_modifier,
        }
    }
}

/// Where a maneuver sits relative to the leg it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WaypointType {
    None,
    Depart,
    Arrive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliproad_hidden_on_wire() {
        assert_eq!(TurnType::Sliproad.wire_name(), "invalid");
    }

    #[test]
    fn modifier_wire_names_match_spec_table() {
        assert_eq!(DirectionModifier::UTurn.wire_name(), "uturn");
        assert_eq!(DirectionModifier::SharpRight.wire_name(), "sharp right");
        assert_eq!(DirectionModifier::SlightLeft.wire_name(), "slight left");
    }

    #[test]
    fn turn_angle_classification_is_symmetric() {
        assert_eq!(DirectionModifier::from_turn_angle(180.0), DirectionModifier::Straight);
        assert_eq!(DirectionModifier::from_turn_angle(0.0), DirectionModifier::UTurn);
        assert_eq!(DirectionModifier::from_turn_angle(90.0), DirectionModifier::Right);
        assert_eq!(DirectionModifier::from_turn_angle(270.0), DirectionModifier::Left);
    }

    #[test]
    fn mirror_is_involutive() {
        for m in [
            DirectionModifier::SharpRight,
            DirectionModifier::Right,
            DirectionModifier::SlightRight,
            DirectionModifier::Straight,
            DirectionModifier::SlightLeft,
            DirectionModifier::Left,
            DirectionModifier::SharpLeft,
        ] {
            assert_eq!(m.mirror().mirror(), m);
        }
    }
}
