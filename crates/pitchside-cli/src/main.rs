// League console entry point.
//
// Startup sequence:
// 1. Load config (copies defaults/ into config/ on first run)
// 2. Initialize tracing (stderr, filter from RUST_LOG or config)
// 3. Build the League context
// 4. Load seed data, if configured
// 5. Print the requested view
//
// Usage: pitchside [summary | standings-csv | teams-csv | json]

use std::io;
use std::path::Path;

use anyhow::{bail, Context};
use tracing::info;

use pitchside_core::config::{self, Config};
use pitchside_core::export;
use pitchside_core::report;
use pitchside_core::seed;
use pitchside_core::League;

fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config)?;
    info!(
        "Config loaded: league={}, season={}",
        config.league.name, config.league.season
    );

    // 3. Build the league
    let mut league = League::from_config(&config);

    // 4. Seed data
    if let Some(path) = &config.data.seed {
        seed::load_seed(Path::new(path), &mut league)
            .with_context(|| format!("failed to load seed data from {path}"))?;
    } else {
        info!("No seed file configured; starting with an empty league");
    }

    // 5. Output
    let view = std::env::args().nth(1).unwrap_or_else(|| "summary".into());
    let stdout = io::stdout();
    match view.as_str() {
        "summary" => print_summary(&config, &league),
        "standings-csv" => export::write_standings_csv(&league.standings(), stdout.lock())
            .context("failed to write standings CSV")?,
        "teams-csv" => {
            for team in league.teams().iter() {
                if let Some(r) = report::team_report(&league, team.id) {
                    export::write_team_report_csv(&r, stdout.lock())
                        .with_context(|| format!("failed to write report for {}", team.name))?;
                    println!();
                }
            }
        }
        "json" => {
            let json = export::to_json(&report::league_report(&league))
                .context("failed to serialize league report")?;
            println!("{json}");
        }
        other => bail!("unknown view '{other}' (expected summary, standings-csv, teams-csv or json)"),
    }

    info!("Done");
    Ok(())
}

fn print_summary(config: &Config, league: &League) {
    let table = league.standings();
    println!("{} {}", config.league.name, table.season);
    println!();
    println!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}  Form",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for e in &table.entries {
        let s = &e.statistics;
        let form: String = e.form.iter().map(|f| f.outcome.letter()).collect();
        println!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}  {}",
            e.position,
            e.team_name,
            s.matches,
            s.wins,
            s.draws,
            s.losses,
            s.goals_for,
            s.goals_against,
            s.goal_difference,
            s.points,
            form
        );
    }

    let scorers = league.top_scorers();
    if !scorers.is_empty() {
        println!();
        println!("Top scorers");
        for (i, row) in scorers.iter().enumerate() {
            println!("{:>3}. {:<28} {:<20} {:>3}", i + 1, row.player_name, row.team_name, row.value);
        }
    }

    let r = report::league_report(league);
    println!();
    println!(
        "{} matches, {} goals ({:.2} per match)",
        r.total_matches, r.total_goals, r.average_goals_per_match
    );
    let name = |t: &Option<pitchside_core::model::Team>| {
        t.as_ref().map(|t| t.name.clone()).unwrap_or_else(|| "-".into())
    };
    println!("Most wins:    {}", name(&r.most_wins));
    println!("Best attack:  {}", name(&r.best_attack));
    println!("Best defense: {}", name(&r.best_defense));
    println!("Fair play:");
    for e in &r.fair_play_ranking {
        println!("  {:<24} {:>3}", e.team_name, e.card_points);
    }

    let upcoming = league.upcoming_matches();
    if !upcoming.is_empty() {
        println!();
        println!("Upcoming");
        for m in upcoming {
            let team = |id| league.team(id).map(|t| t.name.as_str()).unwrap_or("?");
            println!(
                "  {}  {} vs {} @ {}",
                m.date.format("%Y-%m-%d %H:%M"),
                team(m.home_team),
                team(m.away_team),
                m.venue
            );
        }
    }

    println!();
    println!("{} unread notifications", league.unread_count());
}

/// Initialize tracing to stderr so stdout stays clean for CSV/JSON output.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
