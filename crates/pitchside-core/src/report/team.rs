// Per-team report: home/away split, averages, top scorer, form and fixtures.

use serde::{Deserialize, Serialize};

use super::ratio;
use crate::league::League;
use crate::model::{Match, MatchStatus, Outcome, Player, Team, TeamId};
use crate::standings::{recent_outcomes, team_statistics};

/// Win/draw/loss counts over a subset of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl ResultRecord {
    fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    pub team: Team,
    /// Table position, `None` if the team is not ranked.
    pub current_position: Option<usize>,
    pub home_record: ResultRecord,
    pub away_record: ResultRecord,
    /// Goals scored per finished match.
    pub goal_scoring_average: f64,
    /// Goals conceded per finished match.
    pub defensive_average: f64,
    pub top_scorer: Option<Player>,
    pub recent_form: Vec<Outcome>,
    pub upcoming_matches: Vec<Match>,
}

/// Build the report for `id`. `None` if the team does not exist.
pub fn team_report(league: &League, id: TeamId) -> Option<TeamReport> {
    let team = league.team(id)?;
    let matches = league.matches().list();
    let settings = league.settings();

    let mut home_record = ResultRecord::default();
    let mut away_record = ResultRecord::default();
    for m in matches.iter().filter(|m| m.is_finished()) {
        let Some(outcome) = m.outcome_for(id) else {
            continue;
        };
        if m.home_team == id {
            home_record.add(outcome);
        } else {
            away_record.add(outcome);
        }
    }

    let totals = team_statistics(id, matches);

    let upcoming_matches = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Scheduled && m.involves(id))
        .take(settings.upcoming_limit)
        .cloned()
        .collect();

    Some(TeamReport {
        current_position: league.standings().position_of(id),
        home_record,
        away_record,
        goal_scoring_average: ratio(totals.goals_for, totals.matches),
        defensive_average: ratio(totals.goals_against, totals.matches),
        top_scorer: top_scorer(league, id).cloned(),
        recent_form: recent_outcomes(id, matches, settings.form_length),
        upcoming_matches,
        team: team.clone(),
    })
}

/// First player with the most goals, `None` for a team without players.
fn top_scorer(league: &League, team: TeamId) -> Option<&Player> {
    league
        .players_by_team(team)
        .into_iter()
        .fold(None, |best: Option<&Player>, p| match best {
            Some(b) if b.statistics.goals >= p.statistics.goals => Some(b),
            _ => Some(p),
        })
}
