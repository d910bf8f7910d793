// Typed identifiers for every stored entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Team`](super::Team).
    TeamId
);
entity_id!(
    /// Identifier of a [`Player`](super::Player).
    PlayerId
);
entity_id!(
    /// Identifier of a [`Match`](super::Match).
    MatchId
);
entity_id!(
    /// Identifier of a [`MatchEvent`](super::MatchEvent).
    EventId
);
entity_id!(
    /// Identifier of a [`Notification`](super::Notification).
    NotificationId
);
