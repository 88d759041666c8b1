use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use thiserror::Error;

use axiomind_engine::engine::TableConfig;
use axiomind_engine::errors::GameError;
use axiomind_engine::money::Chips;

/// Default new-table configuration, applied whenever a caller doesn't
/// supply its own blinds/rake/timeout/seat count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSettings {
    pub small_blind_minor: i64,
    pub big_blind_minor: i64,
    pub rake_percent: u8,
    pub turn_timeout_seconds: u64,
    pub max_seats: u8,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            small_blind_minor: Chips::from_major(1).minor(),
            big_blind_minor: Chips::from_major(2).minor(),
            rake_percent: 0,
            turn_timeout_seconds: 30,
            max_seats: 6,
        }
    }
}

impl TableSettings {
    pub fn to_table_config(&self) -> Result<TableConfig, SettingsError> {
        TableConfig::new(
            Chips::from_minor(self.small_blind_minor),
            Chips::from_minor(self.big_blind_minor),
            self.rake_percent,
            self.turn_timeout_seconds,
            self.max_seats,
        )
        .map_err(SettingsError::InvalidTableConfig)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.to_table_config().map(|_| ())
    }
}

/// In-memory settings store with validation, guarding the default
/// `TableSettings` new tables are created with.
#[derive(Debug)]
pub struct SettingsStore {
    settings: RwLock<TableSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(TableSettings::default()),
        }
    }

    pub fn with_settings(settings: TableSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings: RwLock::new(settings),
        })
    }

    pub fn get(&self) -> Result<TableSettings, SettingsError> {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SettingsError::StoragePoisoned)
    }

    pub fn update(&self, new_settings: TableSettings) -> Result<TableSettings, SettingsError> {
        new_settings.validate()?;
        let mut guard = self.settings.write().map_err(|_| SettingsError::StoragePoisoned)?;
        *guard = new_settings.clone();
        Ok(new_settings)
    }

    pub fn reset(&self) -> Result<TableSettings, SettingsError> {
        let defaults = TableSettings::default();
        self.update(defaults)
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid table configuration: {0}")]
    InvalidTableConfig(GameError),
    #[error("settings storage poisoned")]
    StoragePoisoned,
}
