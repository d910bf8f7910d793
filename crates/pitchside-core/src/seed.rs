// Initial league data loaded from a TOML file.
//
// Records reference each other by short string keys (`flamengo`, `gabigol`)
// which are resolved to generated ids while loading. Everything goes through
// the regular `League` operations, so seed data is validated like any other
// input and match scores come from the listed events.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use tracing::{debug, info};

use crate::league::League;
use crate::model::{
    Audience, EventKind, MatchStatus, NewEvent, NewMatch, NewNotification, NewPlayer, NewTeam,
    NotificationKind, PlayerId, PlayerStatistics, PlayerUpdate, Position, TeamId,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub teams: Vec<SeedTeam>,
    #[serde(default)]
    pub players: Vec<SeedPlayer>,
    #[serde(default)]
    pub matches: Vec<SeedMatch>,
    #[serde(default)]
    pub notifications: Vec<SeedNotification>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTeam {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub founded_year: i32,
    pub stadium: String,
    pub city: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedPlayer {
    pub key: String,
    /// Key of the player's team.
    pub team: String,
    pub name: String,
    /// Full name or abbreviation ("GK", "DF", "MF", "FW").
    #[serde(deserialize_with = "position_name")]
    pub position: Position,
    pub number: u8,
    pub age: u8,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub statistics: Option<PlayerStatistics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedMatch {
    pub home: String,
    pub away: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    #[serde(default = "default_status")]
    pub status: MatchStatus,
    #[serde(default)]
    pub events: Vec<SeedEvent>,
}

fn default_status() -> MatchStatus {
    MatchStatus::Scheduled
}

fn position_name<'de, D>(deserializer: D) -> std::result::Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Position::from_str_pos(&raw)
        .ok_or_else(|| de::Error::custom(format!("unknown position '{raw}'")))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedEvent {
    pub kind: EventKind,
    /// Player key.
    pub player: String,
    /// Team key of the side the event counts for.
    pub team: String,
    pub minute: u16,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub audience: Audience,
    /// Team key for team-scoped notifications.
    #[serde(default)]
    pub team: Option<String>,
}

/// Counts of what a seed added to the league.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub teams: usize,
    pub players: usize,
    pub matches: usize,
    pub events: usize,
    pub notifications: usize,
}

/// Parse a seed file from TOML text.
pub fn parse_seed(text: &str) -> Result<SeedFile> {
    toml::from_str(text).context("failed to parse seed file")
}

/// Read, parse and apply the seed file at `path`.
pub fn load_seed(path: &Path, league: &mut League) -> Result<SeedSummary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let seed = parse_seed(&text).with_context(|| format!("invalid seed file {}", path.display()))?;
    let summary = apply_seed(&seed, league)?;
    info!(
        "Seed {} loaded: {} teams, {} players, {} matches",
        path.display(),
        summary.teams,
        summary.players,
        summary.matches
    );
    Ok(summary)
}

/// Insert every record of `seed` into `league`.
///
/// Teams go first, then players, matches (events registered before the
/// final status is applied) and notifications. Stops at the first record
/// the league rejects; records inserted before it are kept.
pub fn apply_seed(seed: &SeedFile, league: &mut League) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    let mut teams: HashMap<&str, TeamId> = HashMap::new();
    let mut players: HashMap<&str, PlayerId> = HashMap::new();

    for t in &seed.teams {
        if teams.contains_key(t.key.as_str()) {
            bail!("duplicate team key '{}'", t.key);
        }
        let id = league
            .add_team(NewTeam {
                name: t.name.clone(),
                logo: t.logo.clone(),
                founded_year: t.founded_year,
                stadium: t.stadium.clone(),
                city: t.city.clone(),
            })
            .with_context(|| format!("failed to add team '{}'", t.key))?;
        teams.insert(&t.key, id);
        summary.teams += 1;
    }

    for p in &seed.players {
        if players.contains_key(p.key.as_str()) {
            bail!("duplicate player key '{}'", p.key);
        }
        let team_id = resolve(&teams, &p.team, "team")?;
        let id = league
            .add_player(NewPlayer {
                name: p.name.clone(),
                position: p.position,
                number: p.number,
                age: p.age,
                team_id,
                photo: p.photo.clone(),
            })
            .with_context(|| format!("failed to add player '{}'", p.key))?;
        if let Some(stats) = p.statistics {
            league
                .update_player(
                    id,
                    PlayerUpdate {
                        statistics: Some(stats),
                        ..Default::default()
                    },
                )
                .with_context(|| format!("failed to set statistics for '{}'", p.key))?;
        }
        players.insert(&p.key, id);
        summary.players += 1;
    }

    for (i, m) in seed.matches.iter().enumerate() {
        let home_team = resolve(&teams, &m.home, "team")?;
        let away_team = resolve(&teams, &m.away, "team")?;
        let match_id = league
            .create_match(NewMatch {
                home_team,
                away_team,
                date: m.date,
                venue: m.venue.clone(),
                status: MatchStatus::Live,
            })
            .with_context(|| format!("failed to create match #{} ({} vs {})", i + 1, m.home, m.away))?;

        for e in &m.events {
            let event = NewEvent {
                kind: e.kind,
                player_id: resolve(&players, &e.player, "player")?,
                player_name: String::new(),
                team_id: resolve(&teams, &e.team, "team")?,
                minute: e.minute,
                description: e.description.clone(),
            };
            league
                .register_event(match_id, event)
                .with_context(|| format!("failed to register event in match #{}", i + 1))?;
            summary.events += 1;
        }

        league.update_match_status(match_id, m.status);
        debug!("Seeded match {} vs {} ({})", m.home, m.away, m.status);
        summary.matches += 1;
    }

    for n in &seed.notifications {
        let team_id = n
            .team
            .as_deref()
            .map(|key| resolve(&teams, key, "team"))
            .transpose()?;
        league.create_notification(NewNotification {
            title: n.title.clone(),
            message: n.message.clone(),
            kind: n.kind,
            audience: n.audience,
            team_id,
        });
        summary.notifications += 1;
    }

    Ok(summary)
}

fn resolve<T: Copy>(keys: &HashMap<&str, T>, key: &str, what: &str) -> Result<T> {
    match keys.get(key) {
        Some(id) => Ok(*id),
        None => bail!("unknown {what} key '{key}'"),
    }
}
