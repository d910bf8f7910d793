// Notification feed operations on the league context.

use chrono::Utc;
use tracing::{debug, warn};

use super::League;
use crate::model::{
    Audience, NewNotification, Notification, NotificationId, NotificationKind, TeamId,
};

impl League {
    /// Publish a notification. The feed is kept newest-first.
    pub fn create_notification(&mut self, new: NewNotification) -> NotificationId {
        let notification = Notification {
            id: NotificationId::new(),
            title: new.title,
            message: new.message,
            kind: new.kind,
            audience: new.audience,
            team_id: new.team_id,
            is_read: false,
            created_at: Utc::now(),
            read_at: None,
        };
        debug!("Notification '{}' ({:?})", notification.title, notification.kind);
        self.notifications.prepend(notification)
    }

    pub fn mark_as_read(&mut self, id: NotificationId) -> bool {
        let updated = self.notifications.update(id, |n| {
            n.is_read = true;
            n.read_at = Some(Utc::now());
        });
        if !updated {
            warn!("mark_as_read: unknown notification {}", id);
        }
        updated
    }

    /// Mark every unread notification as read. Returns how many changed.
    pub fn mark_all_as_read(&mut self) -> usize {
        let now = Utc::now();
        self.notifications.update_all(|n| {
            if n.is_read {
                return false;
            }
            n.is_read = true;
            n.read_at = Some(now);
            true
        })
    }

    pub fn delete_notification(&mut self, id: NotificationId) -> bool {
        let removed = self.notifications.remove(id);
        if !removed {
            warn!("delete_notification: unknown notification {}", id);
        }
        removed
    }

    /// Notifications addressed to the team's fans plus league-wide ones.
    pub fn notifications_for_team(&self, team: TeamId) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.is_visible_to_team(team))
            .collect()
    }

    pub fn notifications_by_kind(&self, kind: NotificationKind) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.kind == kind).collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    pub fn unread_notifications(&self) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| !n.is_read).collect()
    }

    /// Up to `limit` notifications, newest first by creation time.
    pub fn recent_notifications(&self, limit: usize) -> Vec<&Notification> {
        let mut all: Vec<&Notification> = self.notifications.iter().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        all
    }

    /// League-wide score update, e.g. "Alvorada vs Bonsucesso - 2-1".
    pub fn send_match_update(&mut self, home: &str, away: &str, score: &str) -> NotificationId {
        self.create_notification(NewNotification {
            title: "Match update".into(),
            message: format!("{home} vs {away} - {score}"),
            kind: NotificationKind::MatchUpdate,
            audience: Audience::All,
            team_id: None,
        })
    }

    pub fn send_team_news(&mut self, team: TeamId, title: &str, message: &str) -> NotificationId {
        self.create_notification(NewNotification {
            title: title.into(),
            message: message.into(),
            kind: NotificationKind::TeamNews,
            audience: Audience::TeamFans,
            team_id: Some(team),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notifications_are_unread_and_newest_first() {
        let mut league = League::default();
        let first = league.send_match_update("Alvorada", "Bonsucesso", "1-0");
        let second = league.send_match_update("Alvorada", "Bonsucesso", "2-0");

        let feed = league.notifications().list();
        assert_eq!(feed[0].id, second);
        assert_eq!(feed[1].id, first);
        assert_eq!(feed[0].message, "Alvorada vs Bonsucesso - 2-0");
        assert_eq!(league.unread_count(), 2);
    }

    #[test]
    fn mark_as_read_stamps_time() {
        let mut league = League::default();
        let id = league.send_match_update("A", "B", "0-0");
        assert!(league.mark_as_read(id));
        let n = league.notifications().get(id).unwrap();
        assert!(n.is_read);
        assert!(n.read_at.is_some());
        assert!(!league.mark_as_read(NotificationId::new()));
    }

    #[test]
    fn mark_all_as_read_counts_only_unread() {
        let mut league = League::default();
        let a = league.send_match_update("A", "B", "0-0");
        league.send_match_update("A", "B", "1-0");
        league.mark_as_read(a);

        assert_eq!(league.mark_all_as_read(), 1);
        assert_eq!(league.unread_count(), 0);
        assert_eq!(league.mark_all_as_read(), 0);
    }

    #[test]
    fn team_feed_includes_league_wide_notifications() {
        let mut league = League::default();
        let team = TeamId::new();
        let other = TeamId::new();
        league.send_team_news(team, "New signing", "A striker joins");
        league.send_team_news(other, "Injury", "Keeper out");
        league.send_match_update("A", "B", "0-0");

        let feed = league.notifications_for_team(team);
        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|n| n.team_id == Some(team) || n.audience == Audience::All));
        assert_eq!(league.notifications_by_kind(NotificationKind::TeamNews).len(), 2);
    }

    #[test]
    fn delete_and_recent() {
        let mut league = League::default();
        let ids: Vec<NotificationId> = (0..4)
            .map(|i| league.send_match_update("A", "B", &format!("{i}-0")))
            .collect();
        assert!(league.delete_notification(ids[0]));
        assert!(!league.delete_notification(ids[0]));

        let recent = league.recent_notifications(2);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].created_at >= recent[1].created_at);
        assert_eq!(league.unread_notifications().len(), 3);
    }
}
