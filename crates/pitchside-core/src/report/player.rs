// Per-player report: scoring rates, discipline and a bounded rating.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ratio, RECENT_MATCHES};
use crate::league::League;
use crate::model::{Match, Player, PlayerId, PlayerStatistics, Team};
use crate::standings::recent_finished;

/// Card-based conduct classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisciplinaryRecord {
    Excellent,
    Good,
    Regular,
    Poor,
}

impl DisciplinaryRecord {
    /// Any red card is Poor; otherwise more than 3 yellows is Regular, more
    /// than 1 is Good, and the rest Excellent.
    pub fn classify(stats: &PlayerStatistics) -> Self {
        if stats.red_cards > 0 {
            DisciplinaryRecord::Poor
        } else if stats.yellow_cards > 3 {
            DisciplinaryRecord::Regular
        } else if stats.yellow_cards > 1 {
            DisciplinaryRecord::Good
        } else {
            DisciplinaryRecord::Excellent
        }
    }
}

impl fmt::Display for DisciplinaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisciplinaryRecord::Excellent => "Excellent",
            DisciplinaryRecord::Good => "Good",
            DisciplinaryRecord::Regular => "Regular",
            DisciplinaryRecord::Poor => "Poor",
        };
        f.write_str(s)
    }
}

/// Composite 0-100 score: 50 baseline, +30 per goal per match, +20 per
/// assist per match, -0.1 per yellow and -0.5 per red.
pub fn performance_rating(stats: &PlayerStatistics) -> f64 {
    let goals_per_match = ratio(stats.goals, stats.matches);
    let assists_per_match = ratio(stats.assists, stats.matches);
    let penalty = stats.yellow_cards as f64 * 0.1 + stats.red_cards as f64 * 0.5;
    let score = goals_per_match * 30.0 + assists_per_match * 20.0 + 50.0 - penalty;
    score.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub player: Player,
    pub team: Team,
    pub goals_per_match: f64,
    pub assists_per_match: f64,
    pub disciplinary_record: DisciplinaryRecord,
    pub performance_rating: f64,
    /// Last finished matches of the player's team, oldest first.
    pub recent_matches: Vec<Match>,
}

/// Build the report for `id`. `None` if the player or its team is missing.
pub fn player_report(league: &League, id: PlayerId) -> Option<PlayerReport> {
    let player = league.player(id)?;
    let team = league.team(player.team_id)?;
    let stats = &player.statistics;

    Some(PlayerReport {
        goals_per_match: ratio(stats.goals, stats.matches),
        assists_per_match: ratio(stats.assists, stats.matches),
        disciplinary_record: DisciplinaryRecord::classify(stats),
        performance_rating: performance_rating(stats),
        recent_matches: recent_finished(team.id, league.matches().list(), RECENT_MATCHES)
            .into_iter()
            .cloned()
            .collect(),
        player: player.clone(),
        team: team.clone(),
    })
}
