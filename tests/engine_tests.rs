// Integration tests for the stats derivation engine.
//
// These tests exercise the crate end-to-end through its public API: CSV
// fixtures through the loader, records through both aggregators, and the
// serialized stat lines a downstream consumer would see.

use boxscore_analytics::boxscore::{
    OpponentShooting, PlayerBoxScore, ReboundLine, TeamBoxScore, TeamPossessions, TeamShooting,
};
use boxscore_analytics::config::FourFactorsWeights;
use boxscore_analytics::loader;
use boxscore_analytics::metrics::{self, Scale, PLAYER_METRICS, TEAM_METRICS};

use std::path::Path;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Reference home team: 100.8 estimated possessions.
fn home_team() -> TeamBoxScore {
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

/// Reference away team: 99.2 estimated possessions.
fn away_team() -> TeamBoxScore {
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

/// A star guard's line from the home side of the reference game, with full
/// context.
fn star_guard() -> PlayerBoxScore {
    PlayerBoxScore {
        minutes: 36.0,
        points: 27,
        field_goals_made: 10,
        field_goals_attempted: 20,
        three_pointers_made: 3,
        three_pointers_attempted: 8,
        free_throws_made: 4,
        free_throws_attempted: 5,
        offensive_rebounds: 2,
        defensive_rebounds: 6,
        rebounds: 8,
        assists: 7,
        steals: 2,
        blocks: 1,
        turnovers: 3,
        personal_fouls: 2,
        team_minutes: 240.0,
        team_possessions: Some(TeamPossessions {
            field_goals_attempted: 88,
            free_throw_attempts: 20,
            turnovers: 14,
        }),
        team_shooting: Some(TeamShooting {
            field_goals_made: 41,
        }),
        team_rebounds: Some(ReboundLine {
            offensive: 10,
            defensive: 33,
            total: 43,
        }),
        opponent_rebounds: Some(ReboundLine {
            offensive: 5,
            defensive: 36,
            total: 41,
        }),
        opponent_shooting: Some(OpponentShooting {
            field_goals_attempted: 88,
            three_point_attempts: Some(30),
        }),
    }
}

// ===========================================================================
// Player pipeline
// ===========================================================================

#[test]
fn player_line_full_context_all_defined() {
    let stats = metrics::player_stats(&star_guard());
    for m in PLAYER_METRICS {
        let v = stats[m.name].unwrap_or_else(|| panic!("{} should be defined", m.name));
        assert!(v.is_finite());
        // Percent-scale values for a real line land well above decimal scale.
        match m.scale {
            Scale::Decimal => assert!(v < 3.0, "{} = {v} looks mis-scaled", m.name),
            Scale::Percent => assert!(v > 1.0, "{} = {v} looks mis-scaled", m.name),
            _ => {}
        }
    }

    // Spot-check the shooting line against hand computation.
    assert!(approx_eq(stats["ts_pct"].unwrap(), 27.0 / 44.4, 1e-12));
    assert!(approx_eq(stats["efg_pct"].unwrap(), 0.575, 1e-12));
}

#[test]
fn player_line_without_context_degrades_not_fails() {
    let bare = PlayerBoxScore {
        team_possessions: None,
        team_shooting: None,
        team_rebounds: None,
        opponent_rebounds: None,
        opponent_shooting: None,
        ..star_guard()
    };
    let stats = metrics::player_stats(&bare);

    // Same key set, degraded values.
    assert_eq!(stats.len(), PLAYER_METRICS.len());
    assert!(stats["ts_pct"].is_some());
    assert!(stats["tov_pct"].is_some());
    assert!(stats["usg_pct"].is_none());
    assert!(stats["ast_pct"].is_none());
    assert!(stats["reb_pct"].is_none());
    assert!(stats["stl_pct"].is_none());
    assert!(stats["blk_pct"].is_none());
}

#[test]
fn efg_dominates_raw_fg_exactly_when_threes_fall() {
    let mut b = star_guard();
    let fg_pct = b.field_goals_made as f64 / b.field_goals_attempted as f64;

    // With made threes, eFG% strictly exceeds FG%.
    let stats = metrics::player_stats(&b);
    assert!(stats["efg_pct"].unwrap() > fg_pct);

    // Without made threes, they coincide.
    b.three_pointers_made = 0;
    let stats = metrics::player_stats(&b);
    assert!(approx_eq(stats["efg_pct"].unwrap(), fg_pct, 1e-12));
}

#[test]
fn scoreless_attemptless_line_is_undefined_across_shooting_rates() {
    let b = PlayerBoxScore {
        minutes: 3.0,
        ..Default::default()
    };
    let stats = metrics::player_stats(&b);
    assert!(stats["ts_pct"].is_none());
    assert!(stats["ftr"].is_none());
    assert!(stats["ppp"].is_none());
}

// ===========================================================================
// Team pipeline
// ===========================================================================

#[test]
fn team_reference_game_values() {
    let weights = FourFactorsWeights::default();
    let stats = metrics::team_stats(&home_team(), &away_team(), &weights);

    assert!(approx_eq(stats["possessions"].unwrap(), 100.8, 1e-12));
    assert!(approx_eq(stats["pace"].unwrap(), 100.0, 1e-9));
    assert!(approx_eq(stats["ortg"].unwrap(), 109.13, 5e-3));

    // Four factors is defined and assembled from the defined components.
    let efg = (41.0 + 0.5 * 12.0) / 88.0;
    let tov = 100.0 * 14.0 / (88.0 + 0.44 * 20.0 + 14.0);
    let oreb = 100.0 * 10.0 / (10.0 + 36.0);
    let ftr = 20.0 / 88.0;
    let expected = 0.40 * efg + 0.25 * (1.0 - tov / 100.0) + 0.20 * (oreb / 100.0) + 0.15 * ftr;
    assert!(approx_eq(stats["four_factors"].unwrap(), expected, 1e-12));
}

#[test]
fn team_key_set_is_stable() {
    let weights = FourFactorsWeights::default();
    let real = metrics::team_stats(&home_team(), &away_team(), &weights);
    let degenerate = metrics::team_stats(
        &TeamBoxScore::default(),
        &TeamBoxScore::default(),
        &weights,
    );
    assert_eq!(real.len(), TEAM_METRICS.len());
    let real_keys: Vec<&str> = real.keys().copied().collect();
    let degenerate_keys: Vec<&str> = degenerate.keys().copied().collect();
    assert_eq!(real_keys, degenerate_keys);
}

#[test]
fn degenerate_game_is_all_undefined_except_possessions() {
    let weights = FourFactorsWeights::default();
    let stats = metrics::team_stats(
        &TeamBoxScore::default(),
        &TeamBoxScore::default(),
        &weights,
    );
    for (name, scale) in TEAM_METRICS {
        match name {
            &"possessions" => assert!(stats[name].is_some()),
            // Pace is defined: minutes default to 240 even in an empty record.
            &"pace" => assert!(stats[name].is_some()),
            _ => assert!(stats[name].is_none(), "{name} ({scale:?}) should be undefined"),
        }
    }
}

// ===========================================================================
// Loader -> aggregator flow
// ===========================================================================

#[test]
fn csv_fixture_players_flow_through_the_engine() {
    let rows = loader::load_players(Path::new(&format!("{FIXTURES}/players.csv"))).unwrap();
    assert_eq!(rows.len(), 4);

    // The star's CSV line mirrors `star_guard()`; results must match.
    let star = rows.iter().find(|r| r.name == "Star Guard").unwrap();
    assert_eq!(star.boxscore, star_guard());
    let stats = metrics::player_stats(&star.boxscore);
    assert!(approx_eq(stats["efg_pct"].unwrap(), 0.575, 1e-12));
    assert!(stats["usg_pct"].is_some());

    // Context-free bench row: raw rates defined, shares undefined.
    let bench = rows.iter().find(|r| r.name == "Bench Wing").unwrap();
    let stats = metrics::player_stats(&bench.boxscore);
    assert!(stats["efg_pct"].is_some());
    assert!(stats["usg_pct"].is_none());
    assert!(stats["stl_pct"].is_none());

    // A DNP row with full context: zero minutes leaves every on-court share
    // undefined but never panics.
    let dnp = rows.iter().find(|r| r.name == "DNP Center").unwrap();
    let stats = metrics::player_stats(&dnp.boxscore);
    for m in PLAYER_METRICS {
        assert!(stats[m.name].is_none(), "{} should be undefined for a DNP", m.name);
    }
}

#[test]
fn csv_fixture_teams_flow_through_the_engine() {
    let rows = loader::load_teams(Path::new(&format!("{FIXTURES}/teams.csv"))).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].boxscore, home_team());
    assert_eq!(rows[1].boxscore, away_team());

    let weights = FourFactorsWeights::default();
    let home = metrics::team_stats(&rows[0].boxscore, &rows[1].boxscore, &weights);
    let away = metrics::team_stats(&rows[1].boxscore, &rows[0].boxscore, &weights);

    assert!(approx_eq(home["pace"].unwrap(), away["pace"].unwrap(), 1e-9));
    assert!(approx_eq(home["ortg"].unwrap(), away["drtg"].unwrap(), 1e-12));
    assert!(approx_eq(
        home["oreb_pct"].unwrap() + away["dreb_pct"].unwrap(),
        100.0,
        1e-9
    ));
}

// ===========================================================================
// Output contract
// ===========================================================================

#[test]
fn stat_lines_serialize_with_null_for_undefined() {
    let bare = PlayerBoxScore {
        minutes: 20.0,
        points: 8,
        field_goals_made: 4,
        field_goals_attempted: 10,
        turnovers: 1,
        ..Default::default()
    };
    let stats = metrics::player_stats(&bare);
    let json = serde_json::to_value(&stats).unwrap();

    // Defined metrics serialize as numbers, undefined as explicit null --
    // downstream consumers distinguish "missing data" from zero.
    assert!(json["efg_pct"].is_number());
    assert!(json["usg_pct"].is_null());
    assert_eq!(json.as_object().unwrap().len(), PLAYER_METRICS.len());
}

#[test]
fn concurrent_calls_on_shared_records_need_no_coordination() {
    // The engine is pure over immutable inputs; hammer it from several
    // threads against the same records and expect identical results.
    let player = star_guard();
    let home = home_team();
    let away = away_team();
    let weights = FourFactorsWeights::default();

    let expected_player = metrics::player_stats(&player);
    let expected_team = metrics::team_stats(&home, &away, &weights);

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(metrics::player_stats(&player), expected_player);
                    assert_eq!(metrics::team_stats(&home, &away, &weights), expected_team);
                }
            });
        }
    });
}
