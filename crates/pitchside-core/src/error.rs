// Error taxonomy for league mutations.
//
// Routine "not found" on reads is not an error: lookups return `Option` and
// update/delete return `bool`. `LeagueError` covers the cases where the caller
// handed us something that cannot be stored without breaking integrity.

use thiserror::Error;

use crate::model::{MatchId, TeamId};

#[derive(Debug, Error, PartialEq)]
pub enum LeagueError {
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("team {team} does not play in match {match_id}")]
    TeamNotInMatch { match_id: MatchId, team: TeamId },

    #[error("invalid value for `{field}`: {message}")]
    InvalidInput { field: String, message: String },
}

impl LeagueError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        LeagueError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
