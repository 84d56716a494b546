// Box-score CSV loading and normalization.
//
// Reads provider-export CSVs: one row per player (or team) per game, with
// uppercase stat column headers. Context columns are optional; a context
// group materializes on the record only when every column it needs is
// present in the row, which is how partial feeds degrade to undefined
// metrics instead of failing.

use crate::boxscore::{
    OpponentShooting, PlayerBoxScore, ReboundLine, TeamBoxScore, TeamPossessions, TeamShooting,
    TEAM_MINUTES_FULL_GAME,
};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A player's box score with the display label the export carried. The
/// engine itself is identifier-agnostic; the label is for output only.
#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub name: String,
    pub boxscore: PlayerBoxScore,
}

/// A team's box score with its display label.
#[derive(Debug, Clone)]
pub struct TeamRow {
    pub name: String,
    pub boxscore: TeamBoxScore,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Player export row. Counting stats come in as f64 because some providers
/// export "12.0"; they are rounded to counts. Context columns are optional
/// and frequently blank.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlayerRow {
    #[serde(default)]
    PLAYER: String,
    MIN: f64,
    PTS: f64,
    FGM: f64,
    FGA: f64,
    #[serde(rename = "3PM")]
    ThreePM: f64,
    #[serde(rename = "3PA")]
    ThreePA: f64,
    FTM: f64,
    FTA: f64,
    ORB: f64,
    DRB: f64,
    REB: f64,
    AST: f64,
    STL: f64,
    BLK: f64,
    TOV: f64,
    PF: f64,

    #[serde(default)]
    TM_MIN: Option<f64>,
    #[serde(default)]
    TM_FGM: Option<f64>,
    #[serde(default)]
    TM_FGA: Option<f64>,
    #[serde(default)]
    TM_FTA: Option<f64>,
    #[serde(default)]
    TM_TOV: Option<f64>,
    #[serde(default)]
    TM_ORB: Option<f64>,
    #[serde(default)]
    TM_DRB: Option<f64>,
    #[serde(default)]
    TM_REB: Option<f64>,
    #[serde(default)]
    OPP_ORB: Option<f64>,
    #[serde(default)]
    OPP_DRB: Option<f64>,
    #[serde(default)]
    OPP_REB: Option<f64>,
    #[serde(default)]
    OPP_FGA: Option<f64>,
    #[serde(default)]
    OPP_3PA: Option<f64>,
}

/// Team export row.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawTeamRow {
    #[serde(default)]
    TEAM: String,
    #[serde(default)]
    MIN: Option<f64>,
    PTS: f64,
    FGM: f64,
    FGA: f64,
    #[serde(rename = "3PM")]
    ThreePM: f64,
    #[serde(rename = "3PA")]
    ThreePA: f64,
    FTM: f64,
    FTA: f64,
    ORB: f64,
    DRB: f64,
    REB: f64,
    AST: f64,
    STL: f64,
    BLK: f64,
    TOV: f64,
    PF: f64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn as_count(value: f64) -> u32 {
    value.round() as u32
}

fn count_opt(value: Option<f64>) -> Option<u32> {
    value.map(as_count)
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => {
                if !raw.MIN.is_finite() {
                    warn!("skipping player '{}': non-finite MIN value", raw.PLAYER.trim());
                    continue;
                }
                rows.push(PlayerRow {
                    name: raw.PLAYER.trim().to_string(),
                    boxscore: player_from_raw(&raw),
                });
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(rows)
}

fn load_teams_from_reader<R: Read>(rdr: R) -> Result<Vec<TeamRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawTeamRow>() {
        match result {
            Ok(raw) => rows.push(TeamRow {
                name: raw.TEAM.trim().to_string(),
                boxscore: team_from_raw(&raw),
            }),
            Err(e) => {
                warn!("skipping malformed team row: {}", e);
            }
        }
    }
    Ok(rows)
}

fn player_from_raw(raw: &RawPlayerRow) -> PlayerBoxScore {
    let team_possessions = match (
        count_opt(raw.TM_FGA),
        count_opt(raw.TM_FTA),
        count_opt(raw.TM_TOV),
    ) {
        (Some(field_goals_attempted), Some(free_throw_attempts), Some(turnovers)) => {
            Some(TeamPossessions {
                field_goals_attempted,
                free_throw_attempts,
                turnovers,
            })
        }
        _ => None,
    };

    let team_shooting = count_opt(raw.TM_FGM).map(|field_goals_made| TeamShooting {
        field_goals_made,
    });

    let team_rebounds = rebound_line(raw.TM_ORB, raw.TM_DRB, raw.TM_REB);
    let opponent_rebounds = rebound_line(raw.OPP_ORB, raw.OPP_DRB, raw.OPP_REB);

    // OPP_FGA alone materializes the group; the three-point split is an
    // optional refinement carried inside it.
    let opponent_shooting = count_opt(raw.OPP_FGA).map(|field_goals_attempted| OpponentShooting {
        field_goals_attempted,
        three_point_attempts: count_opt(raw.OPP_3PA),
    });

    PlayerBoxScore {
        minutes: raw.MIN,
        points: as_count(raw.PTS),
        field_goals_made: as_count(raw.FGM),
        field_goals_attempted: as_count(raw.FGA),
        three_pointers_made: as_count(raw.ThreePM),
        three_pointers_attempted: as_count(raw.ThreePA),
        free_throws_made: as_count(raw.FTM),
        free_throws_attempted: as_count(raw.FTA),
        offensive_rebounds: as_count(raw.ORB),
        defensive_rebounds: as_count(raw.DRB),
        rebounds: as_count(raw.REB),
        assists: as_count(raw.AST),
        steals: as_count(raw.STL),
        blocks: as_count(raw.BLK),
        turnovers: as_count(raw.TOV),
        personal_fouls: as_count(raw.PF),
        team_minutes: raw.TM_MIN.unwrap_or(TEAM_MINUTES_FULL_GAME),
        team_possessions,
        team_shooting,
        team_rebounds,
        opponent_rebounds,
        opponent_shooting,
    }
}

fn rebound_line(
    offensive: Option<f64>,
    defensive: Option<f64>,
    total: Option<f64>,
) -> Option<ReboundLine> {
    match (count_opt(offensive), count_opt(defensive), count_opt(total)) {
        (Some(offensive), Some(defensive), Some(total)) => Some(ReboundLine {
            offensive,
            defensive,
            total,
        }),
        _ => None,
    }
}

fn team_from_raw(raw: &RawTeamRow) -> TeamBoxScore {
    TeamBoxScore {
        minutes: raw.MIN.unwrap_or(TEAM_MINUTES_FULL_GAME),
        points: as_count(raw.PTS),
        field_goals_made: as_count(raw.FGM),
        field_goals_attempted: as_count(raw.FGA),
        three_pointers_made: as_count(raw.ThreePM),
        three_pointers_attempted: as_count(raw.ThreePA),
        free_throws_made: as_count(raw.FTM),
        free_throws_attempted: as_count(raw.FTA),
        offensive_rebounds: as_count(raw.ORB),
        defensive_rebounds: as_count(raw.DRB),
        rebounds: as_count(raw.REB),
        assists: as_count(raw.AST),
        steals: as_count(raw.STL),
        blocks: as_count(raw.BLK),
        turnovers: as_count(raw.TOV),
        personal_fouls: as_count(raw.PF),
    }
}

// ---------------------------------------------------------------------------
// Path-based loaders (public)
// ---------------------------------------------------------------------------

/// Load player box-score rows from a CSV export. Malformed rows are skipped
/// with a warning rather than failing the whole file.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRow>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_players_from_reader(file).map_err(|e| LoadError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load team box-score rows from a CSV export. Rows are expected in
/// game-pair order (team, opponent, team, opponent, ...).
pub fn load_teams(path: &Path) -> Result<Vec<TeamRow>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_teams_from_reader(file).map_err(|e| LoadError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
