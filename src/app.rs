//! App Core for Passgen.
//!
//! Owns the settings, the generator, and the history store, and runs the
//! generation flow: charset → password → score → history.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::platform;
use crate::services::charset_builder::build_charset;
use crate::services::password_generator::{PasswordGenerator, PasswordGeneratorTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::strength_scorer;
use crate::types::charset::GenerationRequest;
use crate::types::errors::{AppError, HistoryError};
use crate::types::history::HistoryEntry;
use crate::types::settings::GeneratorSettings;

/// Central application struct holding the settings, the generator, and the history.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub generator: PasswordGenerator,
    pub history: HistoryStore,
}

impl App {
    /// Creates a new App, loading settings and history.
    ///
    /// `settings_path` overrides the settings file location; the history file
    /// location comes from the settings, falling back to the platform data
    /// directory.
    pub fn new(settings_path: Option<String>) -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        let settings = settings_engine.load()?;
        let history = open_history(&settings)?;

        Ok(Self {
            settings_engine,
            generator: PasswordGenerator::new(),
            history,
        })
    }

    /// Updates one setting and saves it.
    ///
    /// A change of `history_path` switches the live history store to the new
    /// file. If that file cannot be opened the previous value is restored and
    /// the store keeps using the old file.
    pub fn update_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), AppError> {
        let previous = self.settings_engine.get_settings().clone();
        self.settings_engine.set_value(key, value)?;
        self.rebind_history(previous)
    }

    /// Restores the default settings, switching the history store back to the
    /// default file when the path changes.
    pub fn reset_settings(&mut self) -> Result<(), AppError> {
        let previous = self.settings_engine.get_settings().clone();
        self.settings_engine.reset()?;
        self.rebind_history(previous)
    }

    fn rebind_history(&mut self, previous: GeneratorSettings) -> Result<(), AppError> {
        let current = self.settings_engine.get_settings();
        if current.history_path == previous.history_path {
            return Ok(());
        }

        match open_history(current) {
            Ok(history) => {
                info!(path = %history.path().display(), "switched history file");
                self.history = history;
                Ok(())
            }
            Err(e) => {
                let old_path = serde_json::to_value(&previous.history_path).unwrap_or_default();
                if let Err(restore) = self.settings_engine.set_value("history_path", old_path) {
                    warn!(error = %restore, "could not restore previous history path");
                }
                Err(e)
            }
        }
    }

    /// Generates a password for `request`, scores it, and records it.
    ///
    /// Nothing is recorded when any step fails.
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<HistoryEntry, AppError> {
        let alphabet = build_charset(&request.classes)?;
        let password = self.generator.generate(alphabet.chars(), request.length)?;
        let strength = strength_scorer::score(password.as_str());

        let entry = HistoryEntry::now(password, strength);
        self.history.append(entry.clone())?;
        Ok(entry)
    }

    /// Generates a password using the saved settings.
    pub fn generate_with_settings(&mut self) -> Result<HistoryEntry, AppError> {
        let request = self.settings_engine.get_settings().to_request();
        self.generate(&request)
    }

    /// `timestamp | password | strength` lines for the last `n` entries,
    /// newest first. `None` uses the `recent_limit` setting.
    pub fn display_lines(&self, n: Option<usize>) -> Vec<String> {
        let n = n.unwrap_or(self.settings_engine.get_settings().recent_limit);
        self.history
            .recent(n)
            .into_iter()
            .map(HistoryEntry::display_line)
            .collect()
    }
}

/// Opens and loads the history file named by `settings`.
///
/// An unreadable history file is moved aside when the
/// `quarantine_corrupt_history` setting is on, otherwise the
/// `CorruptHistory` error is returned.
fn open_history(settings: &GeneratorSettings) -> Result<HistoryStore, AppError> {
    let history_path = settings
        .history_path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(platform::default_history_path);
    let mut history = HistoryStore::new(history_path);

    match history.load() {
        Ok(entries) => {
            info!(entries = entries.len(), "history ready");
        }
        Err(HistoryError::CorruptHistory(msg)) if settings.quarantine_corrupt_history => {
            history.quarantine_and_start_fresh()?;
            warn!(error = %msg, "starting with an empty history");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(history)
}
