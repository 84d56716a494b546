// Team aggregator: derives a team's advanced line from its own box score
// paired with the opponent's for the same game.

use crate::boxscore::TeamBoxScore;
use crate::config::FourFactorsWeights;
use crate::metrics::formulas;
use crate::metrics::StatLine;

/// Compute every team metric for a single game.
///
/// Both teams' possession estimates are derived first; pace, the ratings and
/// per-possession scoring hang off them. Offensive rating requires the
/// team's own possession estimate to be strictly positive, defensive rating
/// the opponent's, and net rating both. Four factors is computed only when
/// eFG%, TOV%, ORB% and FTr are all defined. The returned key set is
/// identical for every input (see [`crate::metrics::TEAM_METRICS`]).
pub fn team_stats(
    team: &TeamBoxScore,
    opponent: &TeamBoxScore,
    weights: &FourFactorsWeights,
) -> StatLine {
    let ts_pct = formulas::true_shooting(
        team.points as f64,
        team.field_goals_attempted as f64,
        team.free_throws_attempted as f64,
    );
    let efg_pct = formulas::effective_fg(
        team.field_goals_made as f64,
        team.three_pointers_made as f64,
        team.field_goals_attempted as f64,
    );
    let ftr = formulas::free_throw_rate(
        team.free_throws_attempted as f64,
        team.field_goals_attempted as f64,
    );

    let team_poss = formulas::possessions(
        team.field_goals_attempted as f64,
        team.free_throws_attempted as f64,
        team.offensive_rebounds as f64,
        team.turnovers as f64,
    );
    let opp_poss = formulas::possessions(
        opponent.field_goals_attempted as f64,
        opponent.free_throws_attempted as f64,
        opponent.offensive_rebounds as f64,
        opponent.turnovers as f64,
    );

    let pace = formulas::pace(team_poss, opp_poss, team.minutes);
    let ppp = formulas::points_per_possession(
        team.points as f64,
        team.field_goals_attempted as f64,
        team.free_throws_attempted as f64,
        team.turnovers as f64,
    );
    let tov_pct = formulas::turnover_pct(
        team.field_goals_attempted as f64,
        team.free_throws_attempted as f64,
        team.turnovers as f64,
    );

    // Rebound triad over the combined pools. Each pool carries its own
    // zero guard: a game can have an empty offensive pool while total
    // rebounds exist.
    let oreb_pct = share_of_pool(team.offensive_rebounds, opponent.defensive_rebounds);
    let dreb_pct = share_of_pool(team.defensive_rebounds, opponent.offensive_rebounds);
    let reb_pct = share_of_pool(team.rebounds, opponent.rebounds);

    let ortg = (team_poss > 0.0).then(|| 100.0 * team.points as f64 / team_poss);
    let drtg = (opp_poss > 0.0).then(|| 100.0 * opponent.points as f64 / opp_poss);
    let net_rtg = ortg.zip(drtg).map(|(o, d)| o - d);

    let four_factors = match (efg_pct, tov_pct, oreb_pct, ftr) {
        (Some(efg), Some(tov), Some(oreb), Some(ftr)) => {
            Some(formulas::four_factors(efg, tov, oreb, ftr, weights))
        }
        _ => None,
    };

    let mut stats = StatLine::new();
    stats.insert("ts_pct", ts_pct);
    stats.insert("efg_pct", efg_pct);
    stats.insert("ftr", ftr);
    stats.insert("possessions", Some(team_poss));
    stats.insert("pace", pace);
    stats.insert("ppp", ppp);
    stats.insert("tov_pct", tov_pct);
    stats.insert("oreb_pct", oreb_pct);
    stats.insert("dreb_pct", dreb_pct);
    stats.insert("reb_pct", reb_pct);
    stats.insert("ortg", ortg);
    stats.insert("drtg", drtg);
    stats.insert("net_rtg", net_rtg);
    stats.insert("four_factors", four_factors);
    stats
}

/// A team's share of a two-sided rebound pool, x100. `None` on an empty
/// pool.
fn share_of_pool(collected: u32, conceded: u32) -> Option<f64> {
    let pool = collected + conceded;
    if pool == 0 {
        return None;
    }
    Some(100.0 * collected as f64 / pool as f64)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::table::TEAM_METRICS;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Home side of the reference game: 100.8 estimated possessions.
    fn home() -> TeamBoxScore {
        TeamBoxScore {
            points: 110,
            field_goals_made: 41,
            field_goals_attempted: 88,
            three_pointers_made: 12,
            three_pointers_attempted: 34,
            free_throws_made: 16,
            free_throws_attempted: 20,
            offensive_rebounds: 10,
            defensive_rebounds: 33,
            rebounds: 43,
            assists: 25,
            steals: 7,
            blocks: 5,
            turnovers: 14,
            personal_fouls: 19,
            ..Default::default()
        }
    }

    /// Away side: 88 + 0.44*5 - 5 + 14 = 99.2 estimated possessions.
    fn away() -> TeamBoxScore {
        TeamBoxScore {
            points: 104,
            field_goals_made: 40,
            field_goals_attempted: 88,
            three_pointers_made: 10,
            three_pointers_attempted: 30,
            free_throws_made: 4,
            free_throws_attempted: 5,
            offensive_rebounds: 5,
            defensive_rebounds: 36,
            rebounds: 41,
            assists: 22,
            steals: 8,
            blocks: 3,
            turnovers: 14,
            personal_fouls: 17,
            ..Default::default()
        }
    }

    #[test]
    fn key_set_matches_table() {
        let stats = team_stats(&home(), &away(), &FourFactorsWeights::default());
        let mut keys: Vec<&str> = stats.keys().copied().collect();
        keys.sort_unstable();
        let mut want: Vec<&str> = TEAM_METRICS.iter().map(|(n, _)| *n).collect();
        want.sort_unstable();
        assert_eq!(keys, want);
    }

    #[test]
    fn possessions_and_pace_reference_game() {
        let stats = team_stats(&home(), &away(), &FourFactorsWeights::default());
        // 88 + 0.44*20 - 10 + 14 = 100.8
        assert!(approx_eq(stats["possessions"].unwrap(), 100.8, 1e-12));
        // 48 * ((100.8 + 99.2) / (2 * 48)) = 100.0
        assert!(approx_eq(stats["pace"].unwrap(), 100.0, 1e-9));
    }

    #[test]
    fn ratings_reference_game() {
        let stats = team_stats(&home(), &away(), &FourFactorsWeights::default());
        let ortg = stats["ortg"].unwrap();
        let drtg = stats["drtg"].unwrap();
        assert!(approx_eq(ortg, 100.0 * 110.0 / 100.8, 1e-12));
        assert!(approx_eq(ortg, 109.13, 5e-3));
        assert!(approx_eq(drtg, 100.0 * 104.0 / 99.2, 1e-12));
        assert!(approx_eq(stats["net_rtg"].unwrap(), ortg - drtg, 1e-12));
    }

    #[test]
    fn pace_symmetric_between_sides() {
        let w = FourFactorsWeights::default();
        let h = team_stats(&home(), &away(), &w);
        let a = team_stats(&away(), &home(), &w);
        assert!(approx_eq(h["pace"].unwrap(), a["pace"].unwrap(), 1e-9));
    }

    #[test]
    fn ratings_mirror_between_sides() {
        let w = FourFactorsWeights::default();
        let h = team_stats(&home(), &away(), &w);
        let a = team_stats(&away(), &home(), &w);
        assert!(approx_eq(h["ortg"].unwrap(), a["drtg"].unwrap(), 1e-12));
        assert!(approx_eq(h["drtg"].unwrap(), a["ortg"].unwrap(), 1e-12));
        assert!(approx_eq(
            h["net_rtg"].unwrap(),
            -a["net_rtg"].unwrap(),
            1e-12
        ));
    }

    #[test]
    fn rebound_shares_complementary_over_shared_pool() {
        let w = FourFactorsWeights::default();
        let h = team_stats(&home(), &away(), &w);
        let a = team_stats(&away(), &home(), &w);
        // The home offensive pool (home ORB + away DRB) is the away
        // defensive pool, so the shares sum to 100.
        assert!(approx_eq(
            h["oreb_pct"].unwrap() + a["dreb_pct"].unwrap(),
            100.0,
            1e-9
        ));
        assert!(approx_eq(
            h["reb_pct"].unwrap() + a["reb_pct"].unwrap(),
            100.0,
            1e-9
        ));
    }

    #[test]
    fn four_factors_uses_supplied_weights() {
        let h = home();
        let a = away();
        let default_score = team_stats(&h, &a, &FourFactorsWeights::default())["four_factors"]
            .unwrap();
        let shooting_only = FourFactorsWeights {
            shooting: 1.0,
            turnovers: 0.0,
            rebounding: 0.0,
            free_throws: 0.0,
        };
        let efg_score = team_stats(&h, &a, &shooting_only)["four_factors"].unwrap();
        // With all weight on shooting the score collapses to eFG%.
        let efg = (41.0 + 0.5 * 12.0) / 88.0;
        assert!(approx_eq(efg_score, efg, 1e-12));
        assert!(!approx_eq(default_score, efg_score, 1e-12));
    }

    #[test]
    fn scoreless_team_has_undefined_shooting_but_defined_possessions() {
        let empty = TeamBoxScore::default();
        let stats = team_stats(&empty, &away(), &FourFactorsWeights::default());
        assert!(stats["ts_pct"].is_none());
        assert!(stats["efg_pct"].is_none());
        assert!(stats["ftr"].is_none());
        assert!(stats["ppp"].is_none());
        assert!(stats["tov_pct"].is_none());
        assert!(stats["four_factors"].is_none());
        // Estimated possessions is always defined, here exactly zero.
        assert!(approx_eq(stats["possessions"].unwrap(), 0.0, 1e-12));
        // Zero own possessions: no offensive rating, hence no net rating,
        // but the opponent's possessions still define a defensive rating.
        assert!(stats["ortg"].is_none());
        assert!(stats["drtg"].is_some());
        assert!(stats["net_rtg"].is_none());
    }

    #[test]
    fn empty_rebound_pools_are_undefined_individually() {
        let mut h = home();
        let mut a = away();
        // No offensive boards on either side: the offensive pool for the
        // home team is empty only if away also grabbed no defensive boards.
        h.offensive_rebounds = 0;
        h.rebounds = h.defensive_rebounds;
        a.defensive_rebounds = 0;
        a.rebounds = a.offensive_rebounds;
        let stats = team_stats(&h, &a, &FourFactorsWeights::default());
        assert!(stats["oreb_pct"].is_none());
        // The other pools still exist.
        assert!(stats["dreb_pct"].is_some());
        assert!(stats["reb_pct"].is_some());
        // And four factors degrades with its missing component.
        assert!(stats["four_factors"].is_none());
    }
}
