// Library root: the league core used by the `pitchside` binary and the
// integration tests.

pub mod config;
pub mod error;
pub mod export;
pub mod league;
pub mod model;
pub mod report;
pub mod seed;
pub mod standings;
pub mod store;

pub use error::{LeagueError, Result};
pub use league::League;
