// Teams and their aggregate results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TeamId;
use super::matches::Outcome;
use crate::store::Record;

/// Aggregate results for a team. Always derived from finished matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
    pub goal_difference: i32,
}

impl TeamStatistics {
    /// Fold one finished match into the aggregate, keeping `points` and
    /// `goal_difference` consistent with the counters.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.matches += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        match Outcome::from_scores(scored, conceded) {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.points = self.wins * 3 + self.draws;
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
    }
}

/// A club registered in the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Optional badge image URL.
    pub logo: Option<String>,
    pub founded_year: i32,
    pub stadium: String,
    pub city: String,
    pub statistics: TeamStatistics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Team {
    type Id = TeamId;

    fn id(&self) -> TeamId {
        self.id
    }
}

/// Creation payload for a team; id, statistics and timestamps are assigned
/// by the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub founded_year: i32,
    pub stadium: String,
    pub city: String,
}

/// Partial update for a team. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the logo.
    pub logo: Option<Option<String>>,
    pub founded_year: Option<i32>,
    pub stadium: Option<String>,
    pub city: Option<String>,
}

impl TeamUpdate {
    pub(crate) fn apply(self, team: &mut Team) {
        if let Some(name) = self.name {
            team.name = name;
        }
        if let Some(logo) = self.logo {
            team.logo = logo;
        }
        if let Some(year) = self.founded_year {
            team.founded_year = year;
        }
        if let Some(stadium) = self.stadium {
            team.stadium = stadium;
        }
        if let Some(city) = self.city {
            team.city = city;
        }
    }
}
