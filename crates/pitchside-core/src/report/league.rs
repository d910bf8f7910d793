// League-wide summary: goals, leaders and fair-play ranking.

use serde::{Deserialize, Serialize};

use super::ratio;
use crate::league::League;
use crate::model::{Team, TeamId};

/// A team's position in the fair-play ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairPlayEntry {
    pub team_id: TeamId,
    pub team_name: String,
    /// Yellow cards + 2 x red cards across the team's players.
    pub card_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueReport {
    pub total_matches: u32,
    pub total_goals: u32,
    pub average_goals_per_match: f64,
    pub most_wins: Option<Team>,
    pub best_attack: Option<Team>,
    pub best_defense: Option<Team>,
    /// Cleanest team first.
    pub fair_play_ranking: Vec<FairPlayEntry>,
}

pub fn league_report(league: &League) -> LeagueReport {
    let finished = league.finished_matches();
    let total_matches = finished.len() as u32;
    let total_goals: u32 = finished.iter().map(|m| m.home_score + m.away_score).sum();
    let teams = league.teams().list();

    let mut fair_play_ranking: Vec<FairPlayEntry> = teams
        .iter()
        .map(|t| FairPlayEntry {
            team_id: t.id,
            team_name: t.name.clone(),
            card_points: league
                .players_by_team(t.id)
                .iter()
                .map(|p| p.statistics.card_points())
                .fold(0u32, |acc, c| acc.saturating_add(c)),
        })
        .collect();
    fair_play_ranking.sort_by_key(|e| e.card_points);

    LeagueReport {
        total_matches,
        total_goals,
        average_goals_per_match: ratio(total_goals, total_matches),
        most_wins: first_max_above_zero(teams, |t| t.statistics.wins).cloned(),
        best_attack: first_max_above_zero(teams, |t| t.statistics.goals_for).cloned(),
        best_defense: first_min(teams, |t| t.statistics.goals_against).cloned(),
        fair_play_ranking,
    }
}

/// First team holding the strictly largest value; `None` if nobody is above 0.
fn first_max_above_zero<F>(teams: &[Team], key: F) -> Option<&Team>
where
    F: Fn(&Team) -> u32,
{
    let mut best: Option<&Team> = None;
    let mut best_value = 0;
    for team in teams {
        let value = key(team);
        if value > best_value {
            best = Some(team);
            best_value = value;
        }
    }
    best
}

/// First team holding the smallest value; `None` only for an empty league.
fn first_min<F>(teams: &[Team], key: F) -> Option<&Team>
where
    F: Fn(&Team) -> u32,
{
    let mut best: Option<&Team> = None;
    for team in teams {
        match best {
            Some(b) if key(b) <= key(team) => {}
            _ => best = Some(team),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewPlayer, NewTeam, PlayerStatistics, PlayerUpdate, Position, TeamStatistics};
    use chrono::Utc;

    fn team(name: &str, wins: u32, goals_for: u32, goals_against: u32) -> Team {
        let now = Utc::now();
        Team {
            id: TeamId::new(),
            name: name.into(),
            logo: None,
            founded_year: 1910,
            stadium: "Estádio".into(),
            city: "Natal".into(),
            statistics: TeamStatistics {
                wins,
                goals_for,
                goals_against,
                ..Default::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn leaders_prefer_first_on_ties() {
        let teams = vec![
            team("A", 2, 5, 3),
            team("B", 4, 9, 1),
            team("C", 4, 9, 1),
        ];
        assert_eq!(first_max_above_zero(&teams, |t| t.statistics.wins).unwrap().name, "B");
        assert_eq!(first_max_above_zero(&teams, |t| t.statistics.goals_for).unwrap().name, "B");
        assert_eq!(first_min(&teams, |t| t.statistics.goals_against).unwrap().name, "B");
    }

    #[test]
    fn no_leader_when_nobody_has_won() {
        let teams = vec![team("A", 0, 0, 0), team("B", 0, 0, 2)];
        assert!(first_max_above_zero(&teams, |t| t.statistics.wins).is_none());
        assert_eq!(first_min(&teams, |t| t.statistics.goals_against).unwrap().name, "A");
    }

    #[test]
    fn empty_league_report() {
        let report = league_report(&League::default());
        assert_eq!(report.total_matches, 0);
        assert_eq!(report.total_goals, 0);
        assert_eq!(report.average_goals_per_match, 0.0);
        assert!(report.most_wins.is_none());
        assert!(report.best_attack.is_none());
        assert!(report.best_defense.is_none());
        assert!(report.fair_play_ranking.is_empty());
    }

    #[test]
    fn fair_play_saturates_on_extreme_card_counts() {
        let mut league = League::default();
        let clean = league
            .add_team(NewTeam {
                name: "Clean FC".into(),
                logo: None,
                founded_year: 1990,
                stadium: "Campo Limpo".into(),
                city: "Natal".into(),
            })
            .unwrap();
        let rough = league
            .add_team(NewTeam {
                name: "Rough FC".into(),
                logo: None,
                founded_year: 1990,
                stadium: "Campo Duro".into(),
                city: "Natal".into(),
            })
            .unwrap();
        for (number, red_cards) in [(4, u32::MAX / 2 + 1), (5, 7)] {
            let id = league
                .add_player(NewPlayer {
                    name: format!("Zagueiro {number}"),
                    position: Position::Defender,
                    number,
                    age: 30,
                    team_id: rough,
                    photo: None,
                })
                .unwrap();
            league
                .update_player(
                    id,
                    PlayerUpdate {
                        statistics: Some(PlayerStatistics {
                            red_cards,
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        let report = league_report(&league);
        let ranking: Vec<(TeamId, u32)> = report
            .fair_play_ranking
            .iter()
            .map(|e| (e.team_id, e.card_points))
            .collect();
        assert_eq!(ranking, vec![(clean, 0), (rough, u32::MAX)]);
    }
}
