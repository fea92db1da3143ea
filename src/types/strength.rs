use std::fmt;

use serde::{Deserialize, Serialize};

/// Strength classification derived from a password's content.
///
/// Always written with the English labels. The labels of older Russian-language
/// history files are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthLevel {
    #[serde(alias = "🔴 Слабый")]
    Weak,
    #[serde(alias = "🟡 Средний")]
    Medium,
    #[serde(alias = "🟢 Сильный")]
    Strong,
}

impl StrengthLevel {
    /// Label used in the history file and in CSV exports.
    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
