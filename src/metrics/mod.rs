// Metrics engine: formula library, declarative metric tables, and the
// per-entity aggregators.

pub mod formulas;
pub mod player;
pub mod table;
pub mod team;

pub use player::player_stats;
pub use table::{PlayerMetric, Requirement, Scale, PLAYER_METRICS, TEAM_METRICS};
pub use team::team_stats;

use std::collections::BTreeMap;

/// A complete named-metric result set for one entity. The key set is fixed
/// per aggregator (see [`PLAYER_METRICS`] / [`TEAM_METRICS`]); a `None` value
/// means the metric is undefined for this record -- the engine's only
/// failure kind, and a first-class result the caller must handle.
pub type StatLine = BTreeMap<&'static str, Option<f64>>;
