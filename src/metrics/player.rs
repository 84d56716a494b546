// Player aggregator: one pass over the declarative metric table.

use crate::boxscore::PlayerBoxScore;
use crate::metrics::table::PLAYER_METRICS;
use crate::metrics::StatLine;

/// Compute every player metric for a single game record.
///
/// Context-free metrics (TS%, eFG%, FTr, PPP, TOV%) are always attempted;
/// context-dependent metrics are attempted only when every optional group
/// they require is present, and come back `None` otherwise without the
/// formula being invoked. The returned key set is identical for every input
/// -- only values vary.
///
/// STL% leans on an opponent-possession estimate built from opponent
/// field-goal attempts and offensive rebounds alone; opponent free throws
/// and turnovers are not attributable at player granularity and enter as
/// zero. That is a documented accuracy limit of the player-level metric, not
/// a missing-data condition. BLK% additionally needs the opponent
/// three-point split to size the two-point attempt pool, so a record with
/// attempt totals but no split still gets STL% and only BLK% degrades.
pub fn player_stats(boxscore: &PlayerBoxScore) -> StatLine {
    PLAYER_METRICS
        .iter()
        .map(|metric| {
            let value = if metric.requires.is_met(boxscore) {
                (metric.compute)(boxscore)
            } else {
                None
            };
            (metric.name, value)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
