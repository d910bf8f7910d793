// Matches, match events and result outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{EventId, MatchId, PlayerId, TeamId};
use crate::store::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
    Postponed,
    Cancelled,
}

impl MatchStatus {
    pub fn display_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "Scheduled",
            MatchStatus::Live => "Live",
            MatchStatus::Finished => "Finished",
            MatchStatus::Postponed => "Postponed",
            MatchStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
    OwnGoal,
}

/// A single incident inside a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: EventId,
    pub match_id: MatchId,
    pub kind: EventKind,
    pub player_id: PlayerId,
    /// Player name at the time of the event, kept for display.
    pub player_name: String,
    /// Side the event is attributed to.
    pub team_id: TeamId,
    pub minute: u16,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a match event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub kind: EventKind,
    pub player_id: PlayerId,
    #[serde(default)]
    pub player_name: String,
    pub team_id: TeamId,
    pub minute: u16,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub status: MatchStatus,
    pub home_score: u32,
    pub away_score: u32,
    /// Events in registration order.
    pub events: Vec<MatchEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Match {
    type Id = MatchId;

    fn id(&self) -> MatchId {
        self.id
    }
}

impl Match {
    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Goals scored and conceded from `team`'s point of view, or `None` if
    /// the team did not play in this match.
    pub fn score_for(&self, team: TeamId) -> Option<(u32, u32)> {
        if self.home_team == team {
            Some((self.home_score, self.away_score))
        } else if self.away_team == team {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }

    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if self.home_team == team {
            Some(self.away_team)
        } else if self.away_team == team {
            Some(self.home_team)
        } else {
            None
        }
    }

    pub fn outcome_for(&self, team: TeamId) -> Option<Outcome> {
        self.score_for(team)
            .map(|(scored, conceded)| Outcome::from_scores(scored, conceded))
    }

    /// Winner of the match, `None` on a draw.
    pub fn winner(&self) -> Option<TeamId> {
        if self.home_score > self.away_score {
            Some(self.home_team)
        } else if self.away_score > self.home_score {
            Some(self.away_team)
        } else {
            None
        }
    }

    /// Recount both scores from the full event list.
    ///
    /// Only `Goal` events count, each for the side it is attributed to. The
    /// recount never depends on the previous score or on event order.
    pub fn recount_score(&mut self) {
        let goals_for = |team: TeamId| {
            self.events
                .iter()
                .filter(|e| e.match_id == self.id && e.team_id == team && e.kind == EventKind::Goal)
                .count() as u32
        };
        let home = goals_for(self.home_team);
        let away = goals_for(self.away_team);
        self.home_score = home;
        self.away_score = away;
    }

    /// Events ordered by minute; registration order breaks ties.
    pub fn timeline(&self) -> Vec<&MatchEvent> {
        let mut events: Vec<&MatchEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.minute);
        events
    }
}

/// Creation payload for a match. New matches start at 0-0 with no events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub date: DateTime<Utc>,
    pub venue: String,
    #[serde(default = "default_status")]
    pub status: MatchStatus,
}

fn default_status() -> MatchStatus {
    MatchStatus::Scheduled
}

/// Partial update for a match's schedule. Scores are never set directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchUpdate {
    pub date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub status: Option<MatchStatus>,
}

impl MatchUpdate {
    pub(crate) fn apply(self, m: &mut Match) {
        if let Some(date) = self.date {
            m.date = date;
        }
        if let Some(venue) = self.venue {
            m.venue = venue;
        }
        if let Some(status) = self.status {
            m.status = status;
        }
    }
}

/// Result of a match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl Outcome {
    pub fn from_scores(scored: u32, conceded: u32) -> Self {
        use std::cmp::Ordering;
        match scored.cmp(&conceded) {
            Ordering::Greater => Outcome::Win,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::Loss,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Flattened view of a finished match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    pub date: DateTime<Utc>,
    pub winner: Option<TeamId>,
}

impl From<&Match> for MatchResult {
    fn from(m: &Match) -> Self {
        MatchResult {
            match_id: m.id,
            home_team: m.home_team,
            away_team: m.away_team,
            home_score: m.home_score,
            away_score: m.away_score,
            date: m.date,
            winner: m.winner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_match(home: TeamId, away: TeamId) -> Match {
        let now = Utc::now();
        Match {
            id: MatchId::new(),
            home_team: home,
            away_team: away,
            date: now,
            venue: "Campo".into(),
            status: MatchStatus::Live,
            home_score: 0,
            away_score: 0,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn event(m: &Match, kind: EventKind, team: TeamId, minute: u16) -> MatchEvent {
        MatchEvent {
            id: EventId::new(),
            match_id: m.id,
            kind,
            player_id: PlayerId::new(),
            player_name: String::new(),
            team_id: team,
            minute,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn recount_counts_only_goals_per_side() {
        let (home, away) = (TeamId::new(), TeamId::new());
        let mut m = bare_match(home, away);
        m.events.push(event(&m, EventKind::Goal, home, 80));
        m.events.push(event(&m, EventKind::YellowCard, away, 10));
        m.events.push(event(&m, EventKind::Goal, away, 5));
        m.events.push(event(&m, EventKind::Goal, home, 33));
        m.events.push(event(&m, EventKind::OwnGoal, away, 60));
        m.recount_score();

        assert_eq!(m.home_score, 2);
        assert_eq!(m.away_score, 1);
    }

    #[test]
    fn recount_overwrites_stale_scores() {
        let (home, away) = (TeamId::new(), TeamId::new());
        let mut m = bare_match(home, away);
        m.home_score = 7;
        m.away_score = 3;
        m.events.push(event(&m, EventKind::Goal, away, 12));
        m.recount_score();
        assert_eq!((m.home_score, m.away_score), (0, 1));
    }

    #[test]
    fn perspective_helpers() {
        let (home, away, other) = (TeamId::new(), TeamId::new(), TeamId::new());
        let mut m = bare_match(home, away);
        m.home_score = 1;
        m.away_score = 2;

        assert_eq!(m.score_for(home), Some((1, 2)));
        assert_eq!(m.score_for(away), Some((2, 1)));
        assert_eq!(m.score_for(other), None);
        assert_eq!(m.outcome_for(away), Some(Outcome::Win));
        assert_eq!(m.opponent_of(home), Some(away));
        assert_eq!(m.winner(), Some(away));
    }

    #[test]
    fn timeline_sorts_by_minute_stably() {
        let (home, away) = (TeamId::new(), TeamId::new());
        let mut m = bare_match(home, away);
        m.events.push(event(&m, EventKind::Goal, home, 70));
        m.events.push(event(&m, EventKind::Substitution, away, 46));
        m.events.push(event(&m, EventKind::YellowCard, home, 46));

        let minutes: Vec<(u16, EventKind)> = m.timeline().iter().map(|e| (e.minute, e.kind)).collect();
        assert_eq!(
            minutes,
            vec![
                (46, EventKind::Substitution),
                (46, EventKind::YellowCard),
                (70, EventKind::Goal)
            ]
        );
    }

    #[test]
    fn outcome_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Outcome::Draw).unwrap(), "\"D\"");
        assert_eq!(Outcome::from_scores(0, 0), Outcome::Draw);
        assert_eq!(Outcome::Loss.to_string(), "L");
    }
}
