// Box-score record types: immutable per-game raw counting stats for a player
// or a team, optionally enriched with the team/opponent totals that rate-stat
// denominators need.
//
// Optional context is grouped per metric family and carried as
// `Option<Group>` rather than nullable scalars, so an absent group can never
// be mistaken for a legitimate zero. A metric that needs a group is computed
// only when the whole group is present.

use serde::{Deserialize, Serialize};

/// Full-game team minutes: 48 minutes on the clock times 5 players on court.
pub const TEAM_MINUTES_FULL_GAME: f64 = 240.0;

// ---------------------------------------------------------------------------
// Optional context groups
// ---------------------------------------------------------------------------

/// Team totals behind the usage-percentage denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamPossessions {
    pub field_goals_attempted: u32,
    pub free_throw_attempts: u32,
    pub turnovers: u32,
}

/// Team shooting totals behind the assist-percentage denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamShooting {
    pub field_goals_made: u32,
}

/// A full rebound line (offensive / defensive / total). Used for both the
/// player's team and the opponent; the rebound-percentage triad needs both
/// sides to size the available-rebound pools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReboundLine {
    pub offensive: u32,
    pub defensive: u32,
    pub total: u32,
}

/// Opponent shot-attempt totals behind steal% and block%. Total attempts
/// drive the steal% possession estimate on their own; the three-point split
/// is needed only for block% and is frequently absent from feeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentShooting {
    pub field_goals_attempted: u32,
    #[serde(default)]
    pub three_point_attempts: Option<u32>,
}

// ---------------------------------------------------------------------------
// Player record
// ---------------------------------------------------------------------------

/// One player's raw box score for a single game.
///
/// Constructed once from an upstream feed, consumed by
/// [`crate::metrics::player_stats`], then discarded. The engine never mutates
/// it and performs no sanity validation: counts are assumed pre-validated by
/// the ingest layer, and malformed values propagate arithmetically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBoxScore {
    pub minutes: f64,
    pub points: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub personal_fouls: u32,

    /// Total team minutes for the game. 240 for regulation; higher with
    /// overtime periods.
    #[serde(default = "default_team_minutes")]
    pub team_minutes: f64,

    // Optional context, present only when the upstream feed supplied every
    // field of the group.
    #[serde(default)]
    pub team_possessions: Option<TeamPossessions>,
    #[serde(default)]
    pub team_shooting: Option<TeamShooting>,
    #[serde(default)]
    pub team_rebounds: Option<ReboundLine>,
    #[serde(default)]
    pub opponent_rebounds: Option<ReboundLine>,
    #[serde(default)]
    pub opponent_shooting: Option<OpponentShooting>,
}

fn default_team_minutes() -> f64 {
    TEAM_MINUTES_FULL_GAME
}

impl Default for PlayerBoxScore {
    fn default() -> Self {
        Self {
            minutes: 0.0,
            points: 0,
            field_goals_made: 0,
            field_goals_attempted: 0,
            three_pointers_made: 0,
            three_pointers_attempted: 0,
            free_throws_made: 0,
            free_throws_attempted: 0,
            offensive_rebounds: 0,
            defensive_rebounds: 0,
            rebounds: 0,
            assists: 0,
            steals: 0,
            blocks: 0,
            turnovers: 0,
            personal_fouls: 0,
            team_minutes: TEAM_MINUTES_FULL_GAME,
            team_possessions: None,
            team_shooting: None,
            team_rebounds: None,
            opponent_rebounds: None,
            opponent_shooting: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Team record
// ---------------------------------------------------------------------------

/// One team's raw box score for a single game.
///
/// Self-contained: team metrics are derived from a pair of `TeamBoxScore`
/// values (team and opponent) for the same game, so no optional context
/// groups are carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBoxScore {
    /// Total minutes for the game (240 for regulation).
    #[serde(default = "default_team_minutes")]
    pub minutes: f64,
    pub points: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub personal_fouls: u32,
}

impl Default for TeamBoxScore {
    fn default() -> Self {
        Self {
            minutes: TEAM_MINUTES_FULL_GAME,
            points: 0,
            field_goals_made: 0,
            field_goals_attempted: 0,
            three_pointers_made: 0,
            three_pointers_attempted: 0,
            free_throws_made: 0,
            free_throws_attempted: 0,
            offensive_rebounds: 0,
            defensive_rebounds: 0,
            rebounds: 0,
            assists: 0,
            steals: 0,
            blocks: 0,
            turnovers: 0,
            personal_fouls: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
