// Domain records: teams, players, matches, events, notifications.

pub mod ids;
pub mod matches;
pub mod notification;
pub mod player;
pub mod team;

pub use ids::{EventId, MatchId, NotificationId, PlayerId, TeamId};
pub use matches::{
    EventKind, Match, MatchEvent, MatchResult, MatchStatus, MatchUpdate, NewEvent, NewMatch,
    Outcome,
};
pub use notification::{Audience, NewNotification, Notification, NotificationKind};
pub use player::{NewPlayer, Player, PlayerStatistics, PlayerUpdate, Position};
pub use team::{NewTeam, Team, TeamStatistics, TeamUpdate};
