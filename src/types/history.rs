use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::password::Password;
use super::strength::StrengthLevel;

/// Format of the `timestamp` field in the history file and in exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One recorded generation event.
///
/// Field order matches the persisted record: `password`, `timestamp`, `strength`.
/// Entries are read-only once built; the timestamp always has whole-second
/// precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    password: Password,
    #[serde(rename = "timestamp", with = "timestamp_format")]
    generated_at: NaiveDateTime,
    strength: StrengthLevel,
}

impl HistoryEntry {
    /// Builds an entry, truncating `generated_at` to whole seconds so the
    /// entry survives a save/load cycle unchanged.
    pub fn new(password: Password, generated_at: NaiveDateTime, strength: StrengthLevel) -> Self {
        Self {
            password,
            generated_at: truncate_to_seconds(generated_at),
            strength,
        }
    }

    /// Builds an entry stamped with the current local time.
    pub fn now(password: Password, strength: StrengthLevel) -> Self {
        Self::new(password, Local::now().naive_local(), strength)
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    pub fn strength(&self) -> StrengthLevel {
        self.strength
    }

    /// The timestamp as written to disk.
    pub fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `timestamp | password | strength`, as shown in the history list.
    pub fn display_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.timestamp(),
            self.password.as_str(),
            self.strength
        )
    }
}

fn truncate_to_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&at.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
