// Advanced-stat formula library.
//
// Every function is a pure map from explicit numeric scalars to a single
// result. The shared contract: compute the denominator; if it is exactly
// zero the metric is undefined and the function returns `None`. Undefined is
// the engine's only failure kind -- nothing here panics or returns a
// sentinel.
//
// Scale conventions are part of each metric's contract and must not be
// mixed: TS%, eFG%, FTr and PPP are raw ratios (decimal scale), the
// percentage metrics are returned x100. Formulas follow Basketball Reference
// and Dean Oliver's "Basketball on Paper".

use crate::config::FourFactorsWeights;

/// Fraction of free-throw attempts that end a possession. Empirical league
/// estimate covering and-one and technical free throws; fixed, not
/// configurable.
pub const FT_POSSESSION_COEFF: f64 = 0.44;

/// Minutes per regulation period-clock "game" used by the pace formula.
pub const PACE_MINUTES: f64 = 48.0;

// ---------------------------------------------------------------------------
// Shooting efficiency (decimal scale)
// ---------------------------------------------------------------------------

/// True Shooting Percentage: `PTS / (2 * (FGA + 0.44 * FTA))`.
///
/// Returns a decimal (0.6757 for 67.57%), or `None` when the player took no
/// true shooting possessions.
pub fn true_shooting(points: f64, fga: f64, fta: f64) -> Option<f64> {
    let denominator = 2.0 * (fga + FT_POSSESSION_COEFF * fta);
    if denominator == 0.0 {
        return None;
    }
    Some(points / denominator)
}

/// Effective Field Goal Percentage: `(FGM + 0.5 * 3PM) / FGA`.
///
/// Weights made threes for their extra point. Decimal scale; `None` when
/// FGA is zero.
pub fn effective_fg(fgm: f64, three_pm: f64, fga: f64) -> Option<f64> {
    if fga == 0.0 {
        return None;
    }
    Some((fgm + 0.5 * three_pm) / fga)
}

/// Free Throw Rate: `FTA / FGA`. Decimal scale; `None` when FGA is zero.
pub fn free_throw_rate(fta: f64, fga: f64) -> Option<f64> {
    if fga == 0.0 {
        return None;
    }
    Some(fta / fga)
}

// ---------------------------------------------------------------------------
// Possession-share metrics (percent scale)
// ---------------------------------------------------------------------------

/// Usage Percentage:
/// `100 * ((FGA + 0.44*FTA + TOV) * (TmMP/5)) / (MP * (TmFGA + 0.44*TmFTA + TmTOV))`.
///
/// Share of team possessions used by the player while on court. `None` when
/// the player logged no minutes or the team possession term is zero.
pub fn usage_pct(
    fga: f64,
    fta: f64,
    tov: f64,
    minutes: f64,
    team_fga: f64,
    team_fta: f64,
    team_tov: f64,
    team_minutes: f64,
) -> Option<f64> {
    if minutes == 0.0 {
        return None;
    }
    let player_poss = fga + FT_POSSESSION_COEFF * fta + tov;
    let team_poss = team_fga + FT_POSSESSION_COEFF * team_fta + team_tov;
    if team_poss == 0.0 {
        return None;
    }
    Some(100.0 * (player_poss * (team_minutes / 5.0)) / (minutes * team_poss))
}

/// Assist Percentage: `100 * AST / (((MP / (TmMP/5)) * TmFGM) - FGM)`.
///
/// Share of teammate field goals the player assisted while on court. The
/// denominator estimates teammate makes during the player's minutes; when it
/// is zero or negative (tiny minutes samples) the metric is undefined.
pub fn assist_pct(
    assists: f64,
    minutes: f64,
    team_fgm: f64,
    team_minutes: f64,
    own_fgm: f64,
) -> Option<f64> {
    if minutes == 0.0 || team_minutes == 0.0 {
        return None;
    }
    let teammate_fgm = (minutes / (team_minutes / 5.0)) * team_fgm - own_fgm;
    if teammate_fgm <= 0.0 {
        return None;
    }
    Some(100.0 * assists / teammate_fgm)
}

/// Rebound Percentage: `100 * (REB * (TmMP/5)) / (MP * (TmREB + OppREB))`.
///
/// Share of available rebounds collected while on court. Also covers the
/// offensive and defensive variants: pass ORB against `TmORB + OppDRB`, or
/// DRB against `TmDRB + OppORB`. `None` on zero minutes or an empty rebound
/// pool.
pub fn rebound_pct(
    rebounds: f64,
    minutes: f64,
    team_rebounds: f64,
    opponent_rebounds: f64,
    team_minutes: f64,
) -> Option<f64> {
    if minutes == 0.0 {
        return None;
    }
    let available = team_rebounds + opponent_rebounds;
    if available == 0.0 {
        return None;
    }
    Some(100.0 * (rebounds * (team_minutes / 5.0)) / (minutes * available))
}

/// Turnover Percentage: `100 * TOV / (FGA + 0.44*FTA + TOV)`.
///
/// Share of the player's own possessions ending in a turnover. `None` when
/// no possessions were used.
pub fn turnover_pct(fga: f64, fta: f64, tov: f64) -> Option<f64> {
    let possessions = fga + FT_POSSESSION_COEFF * fta + tov;
    if possessions == 0.0 {
        return None;
    }
    Some(100.0 * tov / possessions)
}

/// Steal Percentage: `100 * STL / ((MP / (TmMP/5)) * OppPoss)`.
///
/// Share of opponent possessions ending in the player's steal while on
/// court. `None` on zero player or team minutes, or when the scaled opponent
/// possession count is zero.
pub fn steal_pct(
    steals: f64,
    minutes: f64,
    opponent_possessions: f64,
    team_minutes: f64,
) -> Option<f64> {
    if minutes == 0.0 || team_minutes == 0.0 {
        return None;
    }
    let on_court_poss = (minutes / (team_minutes / 5.0)) * opponent_possessions;
    if on_court_poss == 0.0 {
        return None;
    }
    Some(100.0 * steals / on_court_poss)
}

/// Block Percentage: `100 * BLK / ((MP / (TmMP/5)) * (OppFGA - Opp3PA))`.
///
/// Share of opponent two-point attempts blocked while on court. `None` on
/// zero player or team minutes, or when the scaled two-point attempt count
/// is zero.
pub fn block_pct(
    blocks: f64,
    minutes: f64,
    opponent_fga: f64,
    opponent_three_pa: f64,
    team_minutes: f64,
) -> Option<f64> {
    if minutes == 0.0 || team_minutes == 0.0 {
        return None;
    }
    let two_point_attempts = opponent_fga - opponent_three_pa;
    let on_court_attempts = (minutes / (team_minutes / 5.0)) * two_point_attempts;
    if on_court_attempts == 0.0 {
        return None;
    }
    Some(100.0 * blocks / on_court_attempts)
}

// ---------------------------------------------------------------------------
// Possessions, pace, per-possession scoring
// ---------------------------------------------------------------------------

/// Points Per Possession: `PTS / (FGA + 0.44*FTA + TOV)`.
///
/// Decimal scale (1.05 points per possession). `None` when no possessions
/// were used.
pub fn points_per_possession(points: f64, fga: f64, fta: f64, tov: f64) -> Option<f64> {
    let possessions = fga + FT_POSSESSION_COEFF * fta + tov;
    if possessions == 0.0 {
        return None;
    }
    Some(points / possessions)
}

/// Estimated possessions (Dean Oliver): `FGA + 0.44*FTA - ORB + TOV`.
///
/// Always defined. Pathological inputs (huge ORB against tiny FGA) can
/// produce a negative estimate; that is propagated, not guarded.
pub fn possessions(fga: f64, fta: f64, oreb: f64, tov: f64) -> f64 {
    fga + FT_POSSESSION_COEFF * fta - oreb + tov
}

/// Pace: `48 * ((TmPoss + OppPoss) / (2 * (MP/5)))`.
///
/// Combined possessions normalized to a 48-minute game. `None` when minutes
/// is zero.
pub fn pace(team_possessions: f64, opponent_possessions: f64, minutes: f64) -> Option<f64> {
    if minutes == 0.0 {
        return None;
    }
    Some(PACE_MINUTES * ((team_possessions + opponent_possessions) / (2.0 * (minutes / 5.0))))
}

// ---------------------------------------------------------------------------
// Four factors
// ---------------------------------------------------------------------------

/// Dean Oliver's Four Factors composite:
/// `w.shooting * eFG% + w.turnovers * (1 - TOV%/100) + w.rebounding * (ORB%/100) + w.free_throws * FTr`.
///
/// TOV% is inverted (fewer turnovers score higher) and the percent-scale
/// inputs are brought back to decimals before weighting. All four components
/// are required: callers must not invoke this with a placeholder for an
/// undefined component -- the composite is undefined whenever any input is.
pub fn four_factors(
    efg_pct: f64,
    tov_pct: f64,
    oreb_pct: f64,
    ftr: f64,
    weights: &FourFactorsWeights,
) -> f64 {
    weights.shooting * efg_pct
        + weights.turnovers * (1.0 - tov_pct / 100.0)
        + weights.rebounding * (oreb_pct / 100.0)
        + weights.free_throws * ftr
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
