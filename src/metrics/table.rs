// Declarative metric tables.
//
// The player aggregator is a single loop over `PLAYER_METRICS`: each entry
// names a metric, declares which optional context groups it needs, carries
// its scale as metadata, and points at a compute function. Presence checks
// live in one place (`Requirement::is_met`) instead of being repeated per
// metric, and the metric set extends by adding a table row.

use crate::boxscore::PlayerBoxScore;
use crate::metrics::formulas;

// ---------------------------------------------------------------------------
// Scale metadata
// ---------------------------------------------------------------------------

/// The unit a metric is reported in. Carried in the tables so tests can
/// assert scale mechanically; mixing the decimal and x100 conventions is the
/// classic correctness bug in this domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Raw ratio (TS%, eFG%, FTr, PPP, four factors).
    Decimal,
    /// Ratio x100 (USG%, AST%, REB%, TOV%, STL%, BLK%).
    Percent,
    /// Plain count (estimated possessions).
    Count,
    /// Possessions per 48 minutes (pace).
    Per48,
    /// Points per 100 possessions (ORtg, DRtg, net rating).
    Per100,
}

// ---------------------------------------------------------------------------
// Context requirements
// ---------------------------------------------------------------------------

/// Which optional context groups a player metric needs. Presence is
/// evaluated per group: a metric is computed only when every group it names
/// is present on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Raw counts only.
    NoContext,
    /// `team_possessions` group (USG%).
    TeamPossessions,
    /// `team_shooting` group (AST%).
    TeamShooting,
    /// Both rebound lines (`team_rebounds` and `opponent_rebounds`).
    Rebounding,
    /// `opponent_shooting` group; the attempt total alone suffices (STL%).
    OpponentShooting,
    /// `opponent_shooting` group with the three-point split present (BLK%).
    OpponentArc,
}

impl Requirement {
    pub fn is_met(&self, boxscore: &PlayerBoxScore) -> bool {
        match self {
            Requirement::NoContext => true,
            Requirement::TeamPossessions => boxscore.team_possessions.is_some(),
            Requirement::TeamShooting => boxscore.team_shooting.is_some(),
            Requirement::Rebounding => {
                boxscore.team_rebounds.is_some() && boxscore.opponent_rebounds.is_some()
            }
            Requirement::OpponentShooting => boxscore.opponent_shooting.is_some(),
            Requirement::OpponentArc => boxscore
                .opponent_shooting
                .is_some_and(|o| o.three_point_attempts.is_some()),
        }
    }
}

// ---------------------------------------------------------------------------
// Player metric table
// ---------------------------------------------------------------------------

/// One row of the player metric table.
pub struct PlayerMetric {
    pub name: &'static str,
    pub scale: Scale,
    pub requires: Requirement,
    pub compute: fn(&PlayerBoxScore) -> Option<f64>,
}

/// Every metric the player aggregator reports. The key set is fixed:
/// aggregation substitutes `None` for unmet requirements rather than
/// omitting keys. Declaration order here is for reading; the emitted
/// `StatLine` is a sorted map, so consumers see keys alphabetically.
pub const PLAYER_METRICS: &[PlayerMetric] = &[
    PlayerMetric {
        name: "ts_pct",
        scale: Scale::Decimal,
        requires: Requirement::NoContext,
        compute: player_ts,
    },
    PlayerMetric {
        name: "efg_pct",
        scale: Scale::Decimal,
        requires: Requirement::NoContext,
        compute: player_efg,
    },
    PlayerMetric {
        name: "ftr",
        scale: Scale::Decimal,
        requires: Requirement::NoContext,
        compute: player_ftr,
    },
    PlayerMetric {
        name: "ppp",
        scale: Scale::Decimal,
        requires: Requirement::NoContext,
        compute: player_ppp,
    },
    PlayerMetric {
        name: "usg_pct",
        scale: Scale::Percent,
        requires: Requirement::TeamPossessions,
        compute: player_usg,
    },
    PlayerMetric {
        name: "tov_pct",
        scale: Scale::Percent,
        requires: Requirement::NoContext,
        compute: player_tov,
    },
    PlayerMetric {
        name: "ast_pct",
        scale: Scale::Percent,
        requires: Requirement::TeamShooting,
        compute: player_ast,
    },
    PlayerMetric {
        name: "reb_pct",
        scale: Scale::Percent,
        requires: Requirement::Rebounding,
        compute: player_reb,
    },
    PlayerMetric {
        name: "oreb_pct",
        scale: Scale::Percent,
        requires: Requirement::Rebounding,
        compute: player_oreb,
    },
    PlayerMetric {
        name: "dreb_pct",
        scale: Scale::Percent,
        requires: Requirement::Rebounding,
        compute: player_dreb,
    },
    PlayerMetric {
        name: "stl_pct",
        scale: Scale::Percent,
        requires: Requirement::OpponentShooting,
        compute: player_stl,
    },
    PlayerMetric {
        name: "blk_pct",
        scale: Scale::Percent,
        requires: Requirement::OpponentArc,
        compute: player_blk,
    },
];

// ---------------------------------------------------------------------------
// Team metric descriptors
// ---------------------------------------------------------------------------

/// Name and scale for every metric the team aggregator reports. Team
/// computation has cross-metric dependencies (ratings feed net rating,
/// components feed four factors), so the values are assembled in
/// `metrics::team` rather than through per-row compute functions; this table
/// is the authoritative key set and scale metadata. As with the player
/// table, declaration order is for reading only.
pub const TEAM_METRICS: &[(&str, Scale)] = &[
    ("ts_pct", Scale::Decimal),
    ("efg_pct", Scale::Decimal),
    ("ftr", Scale::Decimal),
    ("possessions", Scale::Count),
    ("pace", Scale::Per48),
    ("ppp", Scale::Decimal),
    ("tov_pct", Scale::Percent),
    ("oreb_pct", Scale::Percent),
    ("dreb_pct", Scale::Percent),
    ("reb_pct", Scale::Percent),
    ("ortg", Scale::Per100),
    ("drtg", Scale::Per100),
    ("net_rtg", Scale::Per100),
    ("four_factors", Scale::Decimal),
];

// ---------------------------------------------------------------------------
// Player compute functions
// ---------------------------------------------------------------------------

fn player_ts(b: &PlayerBoxScore) -> Option<f64> {
    formulas::true_shooting(
        b.points as f64,
        b.field_goals_attempted as f64,
        b.free_throws_attempted as f64,
    )
}

fn player_efg(b: &PlayerBoxScore) -> Option<f64> {
    formulas::effective_fg(
        b.field_goals_made as f64,
        b.three_pointers_made as f64,
        b.field_goals_attempted as f64,
    )
}

fn player_ftr(b: &PlayerBoxScore) -> Option<f64> {
    formulas::free_throw_rate(b.free_throws_attempted as f64, b.field_goals_attempted as f64)
}

fn player_ppp(b: &PlayerBoxScore) -> Option<f64> {
    formulas::points_per_possession(
        b.points as f64,
        b.field_goals_attempted as f64,
        b.free_throws_attempted as f64,
        b.turnovers as f64,
    )
}

fn player_usg(b: &PlayerBoxScore) -> Option<f64> {
    let team = b.team_possessions?;
    formulas::usage_pct(
        b.field_goals_attempted as f64,
        b.free_throws_attempted as f64,
        b.turnovers as f64,
        b.minutes,
        team.field_goals_attempted as f64,
        team.free_throw_attempts as f64,
        team.turnovers as f64,
        b.team_minutes,
    )
}

fn player_tov(b: &PlayerBoxScore) -> Option<f64> {
    formulas::turnover_pct(
        b.field_goals_attempted as f64,
        b.free_throws_attempted as f64,
        b.turnovers as f64,
    )
}

fn player_ast(b: &PlayerBoxScore) -> Option<f64> {
    let team = b.team_shooting?;
    formulas::assist_pct(
        b.assists as f64,
        b.minutes,
        team.field_goals_made as f64,
        b.team_minutes,
        b.field_goals_made as f64,
    )
}

fn player_reb(b: &PlayerBoxScore) -> Option<f64> {
    let team = b.team_rebounds?;
    let opp = b.opponent_rebounds?;
    formulas::rebound_pct(
        b.rebounds as f64,
        b.minutes,
        team.total as f64,
        opp.total as f64,
        b.team_minutes,
    )
}

fn player_oreb(b: &PlayerBoxScore) -> Option<f64> {
    let team = b.team_rebounds?;
    let opp = b.opponent_rebounds?;
    // Offensive boards are contested against the opponent's defensive boards.
    formulas::rebound_pct(
        b.offensive_rebounds as f64,
        b.minutes,
        team.offensive as f64,
        opp.defensive as f64,
        b.team_minutes,
    )
}

fn player_dreb(b: &PlayerBoxScore) -> Option<f64> {
    let team = b.team_rebounds?;
    let opp = b.opponent_rebounds?;
    formulas::rebound_pct(
        b.defensive_rebounds as f64,
        b.minutes,
        team.defensive as f64,
        opp.offensive as f64,
        b.team_minutes,
    )
}

fn player_stl(b: &PlayerBoxScore) -> Option<f64> {
    formulas::steal_pct(
        b.steals as f64,
        b.minutes,
        opponent_possessions_estimate(b)?,
        b.team_minutes,
    )
}

fn player_blk(b: &PlayerBoxScore) -> Option<f64> {
    let opp = b.opponent_shooting?;
    formulas::block_pct(
        b.blocks as f64,
        b.minutes,
        opp.field_goals_attempted as f64,
        opp.three_point_attempts? as f64,
        b.team_minutes,
    )
}

/// Opponent possessions as seen from a player's box score.
///
/// Player-level feeds carry opponent shot attempts and rebounds but not
/// opponent free-throw attempts or turnovers, so those terms are zero here.
/// This is an accepted approximation baked into player-level STL%, not a
/// missing-data case; the opponent rebound line refines the estimate when it
/// happens to be present.
fn opponent_possessions_estimate(b: &PlayerBoxScore) -> Option<f64> {
    let opp = b.opponent_shooting?;
    let opp_oreb = b.opponent_rebounds.map(|r| r.offensive).unwrap_or(0);
    Some(formulas::possessions(
        opp.field_goals_attempted as f64,
        0.0,
        opp_oreb as f64,
        0.0,
    ))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
