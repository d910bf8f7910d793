// Configuration loading and parsing (config/league.toml).

use chrono::Datelike;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Top-level assembled configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub league: LeagueConfig,
    #[serde(default)]
    pub validation: ValidationRules,
    #[serde(default)]
    pub data: DataPaths,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub season: String,
    /// Number of most recent finished matches shown as form.
    #[serde(default = "default_form_length")]
    pub form_length: usize,
    /// How many scheduled matches a team report lists.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
    /// Rows in the top scorer / top assist leaderboards.
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        LeagueConfig {
            name: "Pitchside League".into(),
            season: "2024".into(),
            form_length: default_form_length(),
            upcoming_limit: default_upcoming_limit(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}

fn default_form_length() -> usize {
    5
}

fn default_upcoming_limit() -> usize {
    3
}

fn default_leaderboard_size() -> usize {
    10
}

/// Field constraints applied when records are created or updated.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationRules {
    pub min_founded_year: i32,
    pub min_player_age: u8,
    pub max_player_age: u8,
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules {
            min_founded_year: 1850,
            min_player_age: 16,
            max_player_age: 50,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataPaths {
    /// Seed file loaded at startup, relative to the base directory.
    pub seed: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "pitchside=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to
/// `base_dir`.
///
/// This does not copy defaults. Prefer `load_config()` which handles default
/// initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("league.toml");
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Files shipped in `defaults/` and copied into `config/` on first run.
/// `league.toml` is required; the seed is optional.
pub const CONFIG_FILES: [&str; 2] = ["league.toml", "seed.toml"];

/// Copy each of [`CONFIG_FILES`] from `defaults/` into `config/` unless the
/// user already has a copy. Returns the paths that were created.
///
/// A tree without `defaults/` is fine as long as `config/` exists.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(vec![]);
        }
        return Err(copy_error(format!(
            "no defaults/ or config/ directory in {}; run pitchside from the project root",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut copied = Vec::new();
    for name in CONFIG_FILES {
        let source = defaults_dir.join(name);
        if !source.is_file() {
            continue;
        }
        let target = config_dir.join(name);
        if copy_if_missing(&source, &target)? {
            copied.push(target);
        }
    }
    Ok(copied)
}

/// `Ok(false)` when `target` already exists; the user's copy is never
/// overwritten.
fn copy_if_missing(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    use std::io::Write;

    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_error(format!("cannot create {}: {e}", target.display()))),
    };
    let content = std::fs::read(source)
        .map_err(|e| copy_error(format!("cannot read {}: {e}", source.display())))?;
    dest.write_all(&content)
        .map_err(|e| copy_error(format!("cannot write {}: {e}", target.display())))?;
    Ok(true)
}

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Load `config/league.toml` from the working directory, seeding `config/`
/// from `defaults/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.name.trim().is_empty() {
        return Err(invalid("league.name", "must not be empty"));
    }

    let sizes: &[(&str, usize)] = &[
        ("league.form_length", config.league.form_length),
        ("league.upcoming_limit", config.league.upcoming_limit),
        ("league.leaderboard_size", config.league.leaderboard_size),
    ];
    for (name, val) in sizes {
        if *val == 0 {
            return Err(invalid(name, "must be > 0"));
        }
    }

    let rules = &config.validation;
    let this_year = chrono::Utc::now().year();
    if rules.min_founded_year > this_year {
        return Err(invalid(
            "validation.min_founded_year",
            format!("must not be after {this_year}, got {}", rules.min_founded_year),
        ));
    }
    if rules.min_player_age > rules.max_player_age {
        return Err(invalid(
            "validation.min_player_age",
            format!(
                "must not exceed max_player_age ({} > {})",
                rules.min_player_age, rules.max_player_age
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Workspace root, which holds the shipped `defaults/` directory.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    /// Fresh temp dir with `config/league.toml` containing `league_toml`.
    fn config_dir_with(name: &str, league_toml: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/league.toml"), league_toml).unwrap();
        tmp
    }

    fn default_league_toml() -> String {
        fs::read_to_string(project_root().join("defaults/league.toml")).unwrap()
    }

    #[test]
    fn load_valid_config_from_shipped_defaults() {
        let tmp = config_dir_with("pitchside_config_defaults", &default_league_toml());
        let config = load_config_from(&tmp).expect("should load shipped defaults");

        assert_eq!(config.league.name, "Liga da Várzea");
        assert_eq!(config.league.season, "2024");
        assert_eq!(config.league.form_length, 5);
        assert_eq!(config.league.upcoming_limit, 3);
        assert_eq!(config.league.leaderboard_size, 10);
        assert_eq!(config.validation.min_founded_year, 1850);
        assert_eq!(config.validation.min_player_age, 16);
        assert_eq!(config.validation.max_player_age, 50);
        assert_eq!(config.data.seed.as_deref(), Some("config/seed.toml"));
        assert_eq!(config.logging.filter, "pitchside=info,warn");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let tmp = config_dir_with(
            "pitchside_config_minimal",
            "[league]\nname = \"Sunday League\"\nseason = \"2025\"\n",
        );
        let config = load_config_from(&tmp).expect("minimal config should load");

        assert_eq!(config.league.form_length, 5);
        assert_eq!(config.league.upcoming_limit, 3);
        assert_eq!(config.validation.max_player_age, 50);
        assert!(config.data.seed.is_none());
        assert_eq!(config.logging.filter, "pitchside=info,warn");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_form_length() {
        let tmp = config_dir_with(
            "pitchside_config_zero_form",
            &default_league_toml().replace("form_length = 5", "form_length = 0"),
        );
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "league.form_length");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_inverted_age_range() {
        let tmp = config_dir_with(
            "pitchside_config_ages",
            &default_league_toml().replace("min_player_age = 16", "min_player_age = 60"),
        );
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "validation.min_player_age");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_blank_league_name() {
        let tmp = config_dir_with(
            "pitchside_config_blank_name",
            "[league]\nname = \"  \"\nseason = \"2025\"\n",
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "league.name"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = std::env::temp_dir().join("pitchside_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("league.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = config_dir_with("pitchside_config_invalid", "this is not valid [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("league.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_league_and_seed() {
        let tmp = std::env::temp_dir().join("pitchside_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        for name in CONFIG_FILES {
            fs::copy(root.join("defaults").join(name), defaults_dir.join(name)).unwrap();
        }
        fs::write(defaults_dir.join("notes.txt"), "scratch\n").unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 2);
        assert!(tmp.join("config/league.toml").exists());
        assert!(tmp.join("config/seed.toml").exists());
        assert!(!tmp.join("config/notes.txt").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_tolerates_missing_seed() {
        let tmp = std::env::temp_dir().join("pitchside_config_no_seed");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            project_root().join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied, vec![tmp.join("config").join("league.toml")]);
        assert!(!tmp.join("config/seed.toml").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("pitchside_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();

        fs::copy(
            project_root().join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();
        fs::write(config_dir.join("league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(config_dir.join("league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("pitchside_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no defaults/ or config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
