//! Derivations over one forecast: chart alignment and goal months.
//!
//! Everything here is pure and synchronous. Inputs are borrowed and new
//! values are returned; nothing is cached between calls.

mod goals;
mod series;

pub use goals::{GOAL_NOT_REACHED, GoalSimulation, GoalTargets, goal_month};
pub use series::{ChartPoint, ChartSeries, align_series};
