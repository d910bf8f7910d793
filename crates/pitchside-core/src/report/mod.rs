// Derived analytics: player, team and league reports.
//
// Every generator is a pure read of the league's current collections.

pub mod league;
pub mod player;
pub mod team;

pub use league::{league_report, FairPlayEntry, LeagueReport};
pub use player::{performance_rating, player_report, DisciplinaryRecord, PlayerReport};
pub use team::{team_report, ResultRecord, TeamReport};

/// `num / den`, or 0.0 when `den` is zero.
pub(crate) fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Number of finished matches listed in a player report.
pub const RECENT_MATCHES: usize = 5;
