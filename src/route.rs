//! `Route`/`RouteLeg` aggregate types (§6.3).

use crate::step_assembler::RouteStep;

/// One leg's steps plus the aggregate distance/duration/weight and a human summary.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    pub summary: String,
    pub steps: Vec<RouteStep>,
}

/// The full route: legs plus their sum.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Route {
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    pub legs: Vec<RouteLeg>,
}
