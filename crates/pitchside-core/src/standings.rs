// League table: aggregates finished matches into ranked team records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Match, Outcome, Player, PlayerId, Team, TeamId, TeamStatistics};

/// One finished match as seen from a team in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResult {
    pub outcome: Outcome,
    pub opponent: TeamId,
    pub opponent_name: String,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl FormResult {
    /// Score from the team's side, e.g. "2-1".
    pub fn score(&self) -> String {
        format!("{}-{}", self.goals_for, self.goals_against)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based rank after sorting.
    pub position: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub statistics: TeamStatistics,
    /// Oldest first, at most `form_length` entries.
    pub form: Vec<FormResult>,
}

/// Ranked table for a season at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueTable {
    pub season: String,
    pub computed_at: DateTime<Utc>,
    pub entries: Vec<RankingEntry>,
}

impl LeagueTable {
    pub fn entry(&self, team: TeamId) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.team_id == team)
    }

    pub fn position_of(&self, team: TeamId) -> Option<usize> {
        self.entry(team).map(|e| e.position)
    }
}

/// Aggregate a team's record over the finished matches in `matches`.
pub fn team_statistics(team: TeamId, matches: &[Match]) -> TeamStatistics {
    let mut stats = TeamStatistics::default();
    for m in matches.iter().filter(|m| m.is_finished()) {
        if let Some((scored, conceded)) = m.score_for(team) {
            stats.record(scored, conceded);
        }
    }
    stats
}

/// The last `n` finished matches involving `team`, oldest first, in input order.
pub fn recent_finished<'a>(team: TeamId, matches: &'a [Match], n: usize) -> Vec<&'a Match> {
    let played: Vec<&Match> = matches
        .iter()
        .filter(|m| m.is_finished() && m.involves(team))
        .collect();
    let skip = played.len().saturating_sub(n);
    played.into_iter().skip(skip).collect()
}

/// W/D/L sequence for the team's last `n` finished matches.
pub fn recent_outcomes(team: TeamId, matches: &[Match], n: usize) -> Vec<Outcome> {
    recent_finished(team, matches, n)
        .into_iter()
        .filter_map(|m| m.outcome_for(team))
        .collect()
}

/// Compute the league table.
///
/// Only finished matches count. Entries are ordered by points, then goal
/// difference, then goals scored, all descending; the sort is stable so
/// remaining ties keep the order of `teams`.
pub fn calculate(teams: &[Team], matches: &[Match], form_length: usize) -> Vec<RankingEntry> {
    let names: HashMap<TeamId, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();

    let mut entries: Vec<RankingEntry> = teams
        .iter()
        .map(|team| RankingEntry {
            position: 0,
            team_id: team.id,
            team_name: team.name.clone(),
            statistics: team_statistics(team.id, matches),
            form: recent_finished(team.id, matches, form_length)
                .into_iter()
                .filter_map(|m| form_result(team.id, m, &names))
                .collect(),
        })
        .collect();

    entries.sort_by(|a, b| {
        let (a, b) = (&a.statistics, &b.statistics);
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.position = idx + 1;
    }
    entries
}

fn form_result(team: TeamId, m: &Match, names: &HashMap<TeamId, &str>) -> Option<FormResult> {
    let (goals_for, goals_against) = m.score_for(team)?;
    let opponent = m.opponent_of(team)?;
    Some(FormResult {
        outcome: Outcome::from_scores(goals_for, goals_against),
        opponent,
        opponent_name: names
            .get(&opponent)
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
        goals_for,
        goals_against,
    })
}

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

pub const UNKNOWN_TEAM: &str = "Unknown team";

/// A player row in a top scorers / top assists list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: String,
    /// Goals or assists, depending on the board.
    pub value: u32,
    pub matches: u32,
}

pub fn top_scorers(players: &[Player], teams: &[Team], limit: usize) -> Vec<LeaderboardRow> {
    leaderboard(players, teams, limit, |p| p.statistics.goals)
}

pub fn top_assists(players: &[Player], teams: &[Team], limit: usize) -> Vec<LeaderboardRow> {
    leaderboard(players, teams, limit, |p| p.statistics.assists)
}

fn leaderboard<F>(players: &[Player], teams: &[Team], limit: usize, stat: F) -> Vec<LeaderboardRow>
where
    F: Fn(&Player) -> u32,
{
    let mut rows: Vec<LeaderboardRow> = players
        .iter()
        .filter(|p| stat(p) > 0)
        .map(|p| LeaderboardRow {
            player_id: p.id,
            player_name: p.name.clone(),
            team_name: teams
                .iter()
                .find(|t| t.id == p.team_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
            value: stat(p),
            matches: p.statistics.matches,
        })
        .collect();
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows.truncate(limit);
    rows
}
