//! Public error taxonomy (see SPEC_FULL.md §7).

/// Errors that can cross the crate's public boundary.
///
/// Heuristic misses (failing to recognize a sliproad, roundabout, or obvious continuation) are
/// never represented here -- they degrade silently to a less opinionated instruction instead.
#[derive(thiserror::Error, Debug)]
pub enum RouteGuidanceError {
    #[error("invalid route input: {0}")]
    InvalidInput(String),

    #[error("no route found")]
    NoRoute,

    #[error("data integrity violation: {0}")]
    DataIntegrity(String),
}

pub type Result<T> = std::result::Result<T, RouteGuidanceError>;
