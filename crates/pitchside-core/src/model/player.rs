// Players, their positions and individual statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{PlayerId, TeamId};
use crate::store::Record;

/// Football positions a player can be registered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Accepts full names and the usual abbreviations ("GK", "DF", "MF", "FW").
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GK" | "GOALKEEPER" => Some(Position::Goalkeeper),
            "DF" | "DEF" | "DEFENDER" => Some(Position::Defender),
            "MF" | "MID" | "MIDFIELDER" => Some(Position::Midfielder),
            "FW" | "FWD" | "FORWARD" | "STRIKER" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

/// Season totals for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
    #[serde(default)]
    pub minutes_played: u32,
}

impl PlayerStatistics {
    /// Disciplinary weight used by the fair-play ranking: yellow = 1, red = 2.
    /// Saturates at `u32::MAX`.
    pub fn card_points(&self) -> u32 {
        self.yellow_cards.saturating_add(self.red_cards.saturating_mul(2))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// Jersey number, 1..=99.
    pub number: u8,
    pub age: u8,
    pub team_id: TeamId,
    pub photo: Option<String>,
    pub statistics: PlayerStatistics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Player {
    type Id = PlayerId;

    fn id(&self) -> PlayerId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub position: Position,
    pub number: u8,
    pub age: u8,
    pub team_id: TeamId,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Partial update for a player. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub position: Option<Position>,
    pub number: Option<u8>,
    pub age: Option<u8>,
    pub team_id: Option<TeamId>,
    pub photo: Option<Option<String>>,
    pub statistics: Option<PlayerStatistics>,
}

impl PlayerUpdate {
    pub(crate) fn apply(self, player: &mut Player) {
        if let Some(name) = self.name {
            player.name = name;
        }
        if let Some(position) = self.position {
            player.position = position;
        }
        if let Some(number) = self.number {
            player.number = number;
        }
        if let Some(age) = self.age {
            player.age = age;
        }
        if let Some(team_id) = self.team_id {
            player.team_id = team_id;
        }
        if let Some(photo) = self.photo {
            player.photo = photo;
        }
        if let Some(statistics) = self.statistics {
            player.statistics = statistics;
        }
    }
}
