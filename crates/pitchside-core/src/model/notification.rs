// League notifications shown to fans and administrators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{NotificationId, TeamId};
use crate::store::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
    MatchUpdate,
    TeamNews,
}

/// Who a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    All,
    TeamFans,
    Admins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub audience: Audience,
    pub team_id: Option<TeamId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Record for Notification {
    type Id = NotificationId;

    fn id(&self) -> NotificationId {
        self.id
    }
}

impl Notification {
    /// Whether fans of `team` should see this notification.
    pub fn is_visible_to_team(&self, team: TeamId) -> bool {
        self.audience == Audience::All || self.team_id == Some(team)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub audience: Audience,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}
