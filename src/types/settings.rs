use serde::{Deserialize, Serialize};

use super::charset::{CharacterClass, GenerationRequest};

/// Longest password the generator will produce.
pub const MAX_PASSWORD_LENGTH: usize = 64;

/// Persisted generator preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    /// Number of entries shown in the history view.
    pub recent_limit: usize,
    /// Overrides the history file location; `None` uses the platform data dir.
    pub history_path: Option<String>,
    /// Move an unreadable history file aside on startup instead of failing.
    pub quarantine_corrupt_history: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            length: 12,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            recent_limit: 10,
            history_path: None,
            quarantine_corrupt_history: true,
        }
    }
}

impl GeneratorSettings {
    /// The classes enabled in these settings, in declaration order.
    pub fn classes(&self) -> Vec<CharacterClass> {
        let flags = [self.uppercase, self.lowercase, self.digits, self.symbols];
        CharacterClass::ALL
            .iter()
            .zip(flags)
            .filter(|(_, enabled)| *enabled)
            .map(|(class, _)| *class)
            .collect()
    }

    /// Builds a generation request from the saved preferences.
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest::new(self.length, self.classes())
    }

    /// Checks the invariants `SettingsEngine` enforces before saving.
    pub fn validate(&self) -> Result<(), String> {
        if self.length == 0 || self.length > MAX_PASSWORD_LENGTH {
            return Err(format!(
                "length must be between 1 and {}, got {}",
                MAX_PASSWORD_LENGTH, self.length
            ));
        }
        if self.recent_limit == 0 {
            return Err("recent_limit must be at least 1".to_string());
        }
        if self.classes().is_empty() {
            return Err("at least one character class must be enabled".to_string());
        }
        Ok(())
    }
}
