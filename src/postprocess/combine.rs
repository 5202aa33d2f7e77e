//! G.6 Combined-turn classification strategy, shared by the G.2 and G.5 merge passes.
//!
//! Grounded against `examples/original_source/src/engine/guidance/collapse_turns.cpp`'s
//! `combineTurnTypes`/`getTurnDirection` helpers.

use crate::turn::{DirectionModifier, TurnType};

/// `prev_name`/`second_name` are the street names bracketing the merged pair -- the step before
/// the pair, and the step the pair merges into.
pub fn classify_combined_turn(
    prev_name: &str,
    first_type: TurnType,
    second_type: TurnType,
    combined_modifier: DirectionModifier,
    second_name: &str,
) -> TurnType {
    let same_name = !prev_name.is_empty() && prev_name == second_name;

    if first_type == TurnType::Sliproad || second_type == TurnType::Sliproad {
        return if same_name { TurnType::Continue } else { TurnType::Turn };
    }

    if combined_modifier == DirectionModifier::Straight {
        return if same_name { TurnType::Suppressed } else { TurnType::NewName };
    }

    if matches!(second_type, TurnType::Fork | TurnType::Merge) {
        return second_type;
    }

    if first_type == TurnType::Suppressed && second_type == TurnType::NewName {
        return TurnType::Turn;
    }

    if first_type == TurnType::NewName && second_type == TurnType::Suppressed {
        return TurnType::Turn;
    }

    if first_type == TurnType::Continue && !same_name {
        return TurnType::Turn;
    }

    if first_type == TurnType::Turn && same_name && second_type != TurnType::Suppressed {
        return TurnType::Continue;
    }

    if second_type == TurnType::OnRamp {
        return TurnType::OnRamp;
    }

    if first_type == TurnType::EndOfRoad || second_type == TurnType::EndOfRoad {
        return TurnType::EndOfRoad;
    }

    second_type
}
