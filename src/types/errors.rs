use std::fmt;

// === GenerationError ===

/// Errors related to building an alphabet and generating a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No character class was selected.
    EmptySelection,
    /// The requested length is outside the supported range.
    InvalidLength(usize),
    /// The alphabet to sample from is empty.
    EmptyAlphabet,
    /// The operating system random source failed.
    RandomSource(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptySelection => {
                write!(f, "No character class selected")
            }
            GenerationError::InvalidLength(length) => {
                write!(f, "Invalid password length: {}", length)
            }
            GenerationError::EmptyAlphabet => write!(f, "Alphabet is empty"),
            GenerationError::RandomSource(msg) => {
                write!(f, "Random source failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

// === HistoryError ===

/// Errors related to the persisted generation history.
#[derive(Debug)]
pub enum HistoryError {
    /// The history file could not be written, or could not be moved aside.
    PersistenceError(String),
    /// The history file exists but could not be read or parsed.
    CorruptHistory(String),
    /// Writing an export failed.
    ExportError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::PersistenceError(msg) => {
                write!(f, "History persistence error: {}", msg)
            }
            HistoryError::CorruptHistory(msg) => write!(f, "History file is corrupt: {}", msg),
            HistoryError::ExportError(msg) => write!(f, "History export error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings key is invalid or not found.
    InvalidKey(String),
    /// The value provided for a setting is invalid.
    InvalidValue(String),
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// JSON serialization or deserialization failed.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === AppError ===

/// Errors surfaced by the application core.
#[derive(Debug)]
pub enum AppError {
    Generation(GenerationError),
    History(HistoryError),
    Settings(SettingsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Generation(e) => write!(f, "{}", e),
            AppError::History(e) => write!(f, "{}", e),
            AppError::Settings(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Generation(e) => Some(e),
            AppError::History(e) => Some(e),
            AppError::Settings(e) => Some(e),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        AppError::History(e)
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        AppError::Settings(e)
    }
}
