// League context: owns every entity collection and performs all mutations.

pub mod notifications;
pub mod validate;

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::{Config, LeagueConfig, ValidationRules};
use crate::error::{LeagueError, Result};
use crate::model::{
    EventId, Match, MatchEvent, MatchId, MatchResult, MatchStatus, MatchUpdate, NewEvent,
    NewMatch, NewPlayer, NewTeam, Notification, Player, PlayerId, PlayerUpdate, Team, TeamId,
    TeamStatistics, TeamUpdate,
};
use crate::standings::{self, LeaderboardRow, LeagueTable};
use crate::store::Collection;

/// In-memory state of one league season.
///
/// Collections are copy-on-write: callers may hold a `snapshot()` of any of
/// them across mutations. Derived data (standings, reports) is recomputed
/// from the current collections on every call.
#[derive(Debug, Clone, Default)]
pub struct League {
    settings: LeagueConfig,
    rules: ValidationRules,
    teams: Collection<Team>,
    players: Collection<Player>,
    matches: Collection<Match>,
    notifications: Collection<Notification>,
}

impl League {
    pub fn new(settings: LeagueConfig, rules: ValidationRules) -> Self {
        League {
            settings,
            rules,
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.league.clone(), config.validation.clone())
    }

    pub fn settings(&self) -> &LeagueConfig {
        &self.settings
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn teams(&self) -> &Collection<Team> {
        &self.teams
    }

    pub fn players(&self) -> &Collection<Player> {
        &self.players
    }

    pub fn matches(&self) -> &Collection<Match> {
        &self.matches
    }

    pub fn notifications(&self) -> &Collection<Notification> {
        &self.notifications
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    /// Register a team. Statistics start at zero.
    pub fn add_team(&mut self, new: NewTeam) -> Result<TeamId> {
        self.check_team_fields(&new.name, new.founded_year, &new.stadium, &new.city)
            .inspect_err(|e| warn!("Rejected team '{}': {}", new.name, e))?;

        let now = Utc::now();
        let team = Team {
            id: TeamId::new(),
            name: new.name,
            logo: new.logo,
            founded_year: new.founded_year,
            stadium: new.stadium,
            city: new.city,
            statistics: TeamStatistics::default(),
            created_at: now,
            updated_at: now,
        };
        debug!("Added team '{}' ({})", team.name, team.id);
        let id = self.teams.insert(team);
        self.refresh_team_statistics();
        Ok(id)
    }

    /// Apply a partial update. `Ok(false)` if the team does not exist.
    pub fn update_team(&mut self, id: TeamId, update: TeamUpdate) -> Result<bool> {
        let Some(current) = self.teams.get(id) else {
            warn!("update_team: unknown team {}", id);
            return Ok(false);
        };
        let mut candidate = current.clone();
        update.apply(&mut candidate);
        self.check_team_fields(
            &candidate.name,
            candidate.founded_year,
            &candidate.stadium,
            &candidate.city,
        )?;

        candidate.updated_at = Utc::now();
        Ok(self.teams.update(id, |team| *team = candidate))
    }

    /// Remove a team and every player registered to it.
    ///
    /// Matches that reference the team are kept; they simply stop
    /// contributing to any table entry.
    pub fn delete_team(&mut self, id: TeamId) -> bool {
        if !self.teams.remove(id) {
            warn!("delete_team: unknown team {}", id);
            return false;
        }
        let removed = self.players.retain(|p| p.team_id != id);
        debug!("Deleted team {} and {} of its players", id, removed);
        true
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Register a player with empty statistics. The owning team must exist.
    pub fn add_player(&mut self, new: NewPlayer) -> Result<PlayerId> {
        self.check_player_fields(&new.name, new.age, new.number, new.team_id)
            .inspect_err(|e| warn!("Rejected player '{}': {}", new.name, e))?;

        let now = Utc::now();
        let player = Player {
            id: PlayerId::new(),
            name: new.name,
            position: new.position,
            number: new.number,
            age: new.age,
            team_id: new.team_id,
            photo: new.photo,
            statistics: Default::default(),
            created_at: now,
            updated_at: now,
        };
        debug!("Added player '{}' ({}) to team {}", player.name, player.id, player.team_id);
        Ok(self.players.insert(player))
    }

    /// Apply a partial update. `Ok(false)` if the player does not exist.
    pub fn update_player(&mut self, id: PlayerId, update: PlayerUpdate) -> Result<bool> {
        let Some(current) = self.players.get(id) else {
            warn!("update_player: unknown player {}", id);
            return Ok(false);
        };
        let mut candidate = current.clone();
        update.apply(&mut candidate);
        self.check_player_fields(
            &candidate.name,
            candidate.age,
            candidate.number,
            candidate.team_id,
        )?;

        candidate.updated_at = Utc::now();
        Ok(self.players.update(id, |player| *player = candidate))
    }

    pub fn delete_player(&mut self, id: PlayerId) -> bool {
        let removed = self.players.remove(id);
        if !removed {
            warn!("delete_player: unknown player {}", id);
        }
        removed
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn players_by_team(&self, team: TeamId) -> Vec<&Player> {
        self.players.iter().filter(|p| p.team_id == team).collect()
    }

    // -----------------------------------------------------------------------
    // Matches
    // -----------------------------------------------------------------------

    /// Schedule a match. Scores start at 0-0 with no events.
    pub fn create_match(&mut self, new: NewMatch) -> Result<MatchId> {
        if new.home_team == new.away_team {
            return Err(LeagueError::invalid(
                "away_team",
                "a team cannot play against itself",
            ));
        }
        for team in [new.home_team, new.away_team] {
            if !self.teams.contains(team) {
                return Err(LeagueError::TeamNotFound(team));
            }
        }
        validate::text("venue", &new.venue)?;

        let now = Utc::now();
        let m = Match {
            id: MatchId::new(),
            home_team: new.home_team,
            away_team: new.away_team,
            date: new.date,
            venue: new.venue,
            status: new.status,
            home_score: 0,
            away_score: 0,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        debug!("Created match {} ({} vs {})", m.id, m.home_team, m.away_team);
        let id = self.matches.insert(m);
        self.refresh_team_statistics();
        Ok(id)
    }

    /// Change date, venue or status. `Ok(false)` if the match does not exist.
    pub fn update_match(&mut self, id: MatchId, update: MatchUpdate) -> Result<bool> {
        if !self.matches.contains(id) {
            warn!("update_match: unknown match {}", id);
            return Ok(false);
        }
        if let Some(venue) = &update.venue {
            validate::text("venue", venue)?;
        }
        let updated = self.matches.update(id, |m| {
            update.apply(m);
            m.updated_at = Utc::now();
        });
        if updated {
            self.refresh_team_statistics();
        }
        Ok(updated)
    }

    pub fn update_match_status(&mut self, id: MatchId, status: MatchStatus) -> bool {
        let updated = self.matches.update(id, |m| {
            m.status = status;
            m.updated_at = Utc::now();
        });
        if updated {
            debug!("Match {} is now {}", id, status);
            self.refresh_team_statistics();
        } else {
            warn!("update_match_status: unknown match {}", id);
        }
        updated
    }

    pub fn delete_match(&mut self, id: MatchId) -> bool {
        let removed = self.matches.remove(id);
        if removed {
            self.refresh_team_statistics();
        } else {
            warn!("delete_match: unknown match {}", id);
        }
        removed
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id)
    }

    pub fn matches_by_team(&self, team: TeamId) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.involves(team)).collect()
    }

    /// Events of a match in registration order; empty for an unknown match.
    pub fn events_by_match(&self, id: MatchId) -> &[MatchEvent] {
        self.matches
            .get(id)
            .map(|m| m.events.as_slice())
            .unwrap_or(&[])
    }

    pub fn matches_with_status(&self, status: MatchStatus) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.status == status).collect()
    }

    pub fn live_matches(&self) -> Vec<&Match> {
        self.matches_with_status(MatchStatus::Live)
    }

    pub fn upcoming_matches(&self) -> Vec<&Match> {
        self.matches_with_status(MatchStatus::Scheduled)
    }

    pub fn finished_matches(&self) -> Vec<&Match> {
        self.matches_with_status(MatchStatus::Finished)
    }

    pub fn match_results(&self) -> Vec<MatchResult> {
        self.matches
            .iter()
            .filter(|m| m.is_finished())
            .map(MatchResult::from)
            .collect()
    }

    /// Append an event to a match and recount both scores from the full
    /// event list.
    ///
    /// Fails with `MatchNotFound` if the match does not exist, and with
    /// `TeamNotInMatch` if the event's team is neither side.
    pub fn register_event(&mut self, match_id: MatchId, new: NewEvent) -> Result<EventId> {
        let Some(m) = self.matches.get(match_id) else {
            warn!("register_event: unknown match {}", match_id);
            return Err(LeagueError::MatchNotFound(match_id));
        };
        if !m.involves(new.team_id) {
            return Err(LeagueError::TeamNotInMatch {
                match_id,
                team: new.team_id,
            });
        }
        validate::event_minute(new.minute)?;

        let player_name = if new.player_name.is_empty() {
            self.players
                .get(new.player_id)
                .map(|p| p.name.clone())
                .unwrap_or_default()
        } else {
            new.player_name
        };

        let now = Utc::now();
        let event = MatchEvent {
            id: EventId::new(),
            match_id,
            kind: new.kind,
            player_id: new.player_id,
            player_name,
            team_id: new.team_id,
            minute: new.minute,
            description: new.description,
            created_at: now,
        };
        let event_id = event.id;

        self.matches.update(match_id, |m| {
            m.events.push(event);
            m.recount_score();
            m.updated_at = now;
        });
        debug!("Registered event {} in match {}", event_id, match_id);
        self.refresh_team_statistics();
        Ok(event_id)
    }

    /// Remove an event and recount the scores. `Ok(false)` if the match has
    /// no such event.
    pub fn remove_event(&mut self, match_id: MatchId, event_id: EventId) -> Result<bool> {
        let Some(m) = self.matches.get(match_id) else {
            return Err(LeagueError::MatchNotFound(match_id));
        };
        if !m.events.iter().any(|e| e.id == event_id) {
            return Ok(false);
        }
        self.matches.update(match_id, |m| {
            m.events.retain(|e| e.id != event_id);
            m.recount_score();
            m.updated_at = Utc::now();
        });
        self.refresh_team_statistics();
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Current league table, recomputed from teams and finished matches.
    pub fn standings(&self) -> LeagueTable {
        LeagueTable {
            season: self.settings.season.clone(),
            computed_at: Utc::now(),
            entries: standings::calculate(
                self.teams.list(),
                self.matches.list(),
                self.settings.form_length,
            ),
        }
    }

    pub fn top_scorers(&self) -> Vec<LeaderboardRow> {
        standings::top_scorers(
            self.players.list(),
            self.teams.list(),
            self.settings.leaderboard_size,
        )
    }

    pub fn top_assists(&self) -> Vec<LeaderboardRow> {
        standings::top_assists(
            self.players.list(),
            self.teams.list(),
            self.settings.leaderboard_size,
        )
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Rewrite each team's statistics snapshot from the finished matches.
    /// Only teams whose aggregate actually changed get a new record.
    fn refresh_team_statistics(&mut self) {
        let matches = self.matches.snapshot();
        let now = Utc::now();
        let changed = self.teams.update_all(|team| {
            let fresh = standings::team_statistics(team.id, &matches);
            if fresh == team.statistics {
                return false;
            }
            team.statistics = fresh;
            team.updated_at = now;
            true
        });
        if changed > 0 {
            debug!("Refreshed statistics for {} teams", changed);
        }
    }

    fn check_team_fields(&self, name: &str, year: i32, stadium: &str, city: &str) -> Result<()> {
        validate::text("name", name)?;
        validate::founded_year(&self.rules, year)?;
        validate::text("stadium", stadium)?;
        validate::text("city", city)
    }

    fn check_player_fields(&self, name: &str, age: u8, number: u8, team: TeamId) -> Result<()> {
        validate::text("name", name)?;
        validate::player_age(&self.rules, age)?;
        validate::jersey_number(number)?;
        if !self.teams.contains(team) {
            return Err(LeagueError::TeamNotFound(team));
        }
        Ok(())
    }
}
