// Field checks for creation and update payloads.

use chrono::{Datelike, Utc};

use crate::config::ValidationRules;
use crate::error::{LeagueError, Result};

/// Events past this minute are rejected (90 + extra time + stoppage).
pub const MAX_EVENT_MINUTE: u16 = 130;

const MIN_TEXT_LEN: usize = 2;

pub(crate) fn text(field: &str, value: &str) -> Result<()> {
    if value.trim().chars().count() < MIN_TEXT_LEN {
        return Err(LeagueError::invalid(
            field,
            format!("must be at least {MIN_TEXT_LEN} characters"),
        ));
    }
    Ok(())
}

pub(crate) fn founded_year(rules: &ValidationRules, year: i32) -> Result<()> {
    let this_year = Utc::now().year();
    if year < rules.min_founded_year || year > this_year {
        return Err(LeagueError::invalid(
            "founded_year",
            format!(
                "must be between {} and {this_year}, got {year}",
                rules.min_founded_year
            ),
        ));
    }
    Ok(())
}

pub(crate) fn player_age(rules: &ValidationRules, age: u8) -> Result<()> {
    if !(rules.min_player_age..=rules.max_player_age).contains(&age) {
        return Err(LeagueError::invalid(
            "age",
            format!(
                "must be between {} and {}, got {age}",
                rules.min_player_age, rules.max_player_age
            ),
        ));
    }
    Ok(())
}

pub(crate) fn jersey_number(number: u8) -> Result<()> {
    if !(1..=99).contains(&number) {
        return Err(LeagueError::invalid(
            "number",
            format!("must be between 1 and 99, got {number}"),
        ));
    }
    Ok(())
}

pub(crate) fn event_minute(minute: u16) -> Result<()> {
    if !(1..=MAX_EVENT_MINUTE).contains(&minute) {
        return Err(LeagueError::invalid(
            "minute",
            format!("must be between 1 and {MAX_EVENT_MINUTE}, got {minute}"),
        ));
    }
    Ok(())
}
