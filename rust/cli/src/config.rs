//! Resolved table configuration: defaults, overridden by a TOML file
//! (`axiomind_CONFIG`), overridden in turn by environment variables.

use serde::{Deserialize, Serialize};
use std::fs;

use axiomind_engine::engine::TableConfig;
use axiomind_engine::errors::GameError;
use axiomind_engine::money::Chips;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub max_seats: u8,
    pub rake_percent: u8,
    pub turn_timeout_seconds: u64,
    pub level: u8,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            small_blind: 1,
            big_blind: 2,
            starting_stack: 200,
            max_seats: 6,
            rake_percent: 0,
            turn_timeout_seconds: 30,
            level: 1,
            seed: None,
        }
    }
}

impl Config {
    /// Builds the validated table configuration the engine expects from
    /// this config's blinds/rake/timeout/seat settings.
    pub fn table_config(&self) -> Result<TableConfig, GameError> {
        TableConfig::new(
            Chips::from_major(self.small_blind as i64),
            Chips::from_major(self.big_blind as i64),
            self.rake_percent,
            self.turn_timeout_seconds,
            self.max_seats,
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_stack: ValueSource,
    pub max_seats: ValueSource,
    pub rake_percent: ValueSource,
    pub turn_timeout_seconds: ValueSource,
    pub level: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_stack: ValueSource::Default,
            max_seats: ValueSource::Default,
            rake_percent: ValueSource::Default,
            turn_timeout_seconds: ValueSource::Default,
            level: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
#[allow(dead_code)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[allow(dead_code)]
pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("axiomind_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.max_seats {
            cfg.max_seats = v;
            sources.max_seats = ValueSource::File;
        }
        if let Some(v) = f.rake_percent {
            cfg.rake_percent = v;
            sources.rake_percent = ValueSource::File;
        }
        if let Some(v) = f.turn_timeout_seconds {
            cfg.turn_timeout_seconds = v;
            sources.turn_timeout_seconds = ValueSource::File;
        }
        if let Some(v) = f.level {
            cfg.level = v;
            sources.level = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Ok(v) = std::env::var("axiomind_SMALL_BLIND")
        && !v.is_empty()
    {
        cfg.small_blind = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid small_blind".into()))?;
        sources.small_blind = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("axiomind_BIG_BLIND")
        && !v.is_empty()
    {
        cfg.big_blind = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid big_blind".into()))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("axiomind_STARTING_STACK")
        && !v.is_empty()
    {
        cfg.starting_stack = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting_stack".into()))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("axiomind_MAX_SEATS")
        && !v.is_empty()
    {
        cfg.max_seats = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_seats".into()))?;
        sources.max_seats = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("axiomind_RAKE_PERCENT")
        && !v.is_empty()
    {
        cfg.rake_percent = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid rake_percent".into()))?;
        sources.rake_percent = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("axiomind_TURN_TIMEOUT_SECONDS")
        && !v.is_empty()
    {
        cfg.turn_timeout_seconds = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid turn_timeout_seconds".into()))?;
        sources.turn_timeout_seconds = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("axiomind_LEVEL")
        && !v.is_empty()
    {
        cfg.level = v
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid level".into()))?;
        sources.level = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("axiomind_SEED")
        && !v.is_empty()
    {
        cfg.seed = Some(
            v.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    max_seats: Option<u8>,
    #[serde(default)]
    rake_percent: Option<u8>,
    #[serde(default)]
    turn_timeout_seconds: Option<u64>,
    #[serde(default)]
    level: Option<u8>,
    #[serde(default)]
    seed: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must be >0".into(),
        ));
    }
    if cfg.big_blind < 2 * cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be at least twice small_blind".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if !(2..=10).contains(&cfg.max_seats) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_seats must be in 2..=10".into(),
        ));
    }
    if cfg.rake_percent > 100 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: rake_percent must be <=100".into(),
        ));
    }
    if cfg.turn_timeout_seconds == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: turn_timeout_seconds must be >0".into(),
        ));
    }
    if !(1..=20).contains(&cfg.level) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: level must be in 1..=20".into(),
        ));
    }
    Ok(())
}
