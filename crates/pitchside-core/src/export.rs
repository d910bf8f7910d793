// CSV and JSON renderings of the table and reports.

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::report::TeamReport;
use crate::standings::LeagueTable;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct StandingsRow<'a> {
    position: usize,
    team: &'a str,
    matches: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i32,
    points: u32,
    form: String,
}

/// Write the table as CSV, one row per team with a header line.
pub fn write_standings_csv<W: io::Write>(table: &LeagueTable, out: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(out);
    for entry in &table.entries {
        let s = &entry.statistics;
        wtr.serialize(StandingsRow {
            position: entry.position,
            team: &entry.team_name,
            matches: s.matches,
            wins: s.wins,
            draws: s.draws,
            losses: s.losses,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
            goal_difference: s.goal_difference,
            points: s.points,
            form: entry.form.iter().map(|f| f.outcome.letter()).collect(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a team report as `metric,value` CSV rows.
pub fn write_team_report_csv<W: io::Write>(report: &TeamReport, out: W) -> Result<(), ExportError> {
    let position = report
        .current_position
        .map(|p| p.to_string())
        .unwrap_or_default();
    let record = |r: &crate::report::ResultRecord| format!("{}-{}-{}", r.wins, r.draws, r.losses);
    let top_scorer = report
        .top_scorer
        .as_ref()
        .map(|p| format!("{} ({})", p.name, p.statistics.goals))
        .unwrap_or_default();
    let form: String = report.recent_form.iter().map(|o| o.letter()).collect();

    let rows: [(&str, String); 9] = [
        ("team", report.team.name.clone()),
        ("position", position),
        ("home_record", record(&report.home_record)),
        ("away_record", record(&report.away_record)),
        ("goal_scoring_average", format!("{:.2}", report.goal_scoring_average)),
        ("defensive_average", format!("{:.2}", report.defensive_average)),
        ("top_scorer", top_scorer),
        ("recent_form", form),
        ("upcoming_matches", report.upcoming_matches.len().to_string()),
    ];

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["metric", "value"])?;
    for (metric, value) in &rows {
        wtr.write_record([*metric, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pretty JSON for any report or table.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Outcome, TeamId, TeamStatistics};
    use crate::standings::{FormResult, RankingEntry};
    use chrono::Utc;

    fn table() -> LeagueTable {
        let mut stats = TeamStatistics::default();
        stats.record(2, 1);
        stats.record(0, 0);
        LeagueTable {
            season: "2024".into(),
            computed_at: Utc::now(),
            entries: vec![RankingEntry {
                position: 1,
                team_id: TeamId::new(),
                team_name: "Alvorada, FC".into(),
                statistics: stats,
                form: vec![
                    FormResult {
                        outcome: Outcome::Win,
                        opponent: TeamId::new(),
                        opponent_name: "B".into(),
                        goals_for: 2,
                        goals_against: 1,
                    },
                    FormResult {
                        outcome: Outcome::Draw,
                        opponent: TeamId::new(),
                        opponent_name: "C".into(),
                        goals_for: 0,
                        goals_against: 0,
                    },
                ],
            }],
        }
    }

    #[test]
    fn standings_csv_has_header_and_quoted_names() {
        let mut buf = Vec::new();
        write_standings_csv(&table(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "position,team,matches,wins,draws,losses,goals_for,goals_against,goal_difference,points,form"
        );
        assert_eq!(lines.next().unwrap(), "1,\"Alvorada, FC\",2,1,1,0,2,1,1,4,WD");
        assert!(lines.next().is_none());
    }

    #[test]
    fn json_round_trips_through_serde_value() {
        let json = to_json(&table()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["season"], "2024");
        assert_eq!(value["entries"][0]["statistics"]["points"], 4);
        assert_eq!(value["entries"][0]["form"][1]["outcome"], "D");
    }
}
