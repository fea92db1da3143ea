//! History Store for Passgen.
//!
//! Implements `HistoryStoreTrait`: an append-only log of generated passwords,
//! persisted as a JSON array and exported as CSV.
//!
//! Every append rewrites the whole log into a temporary file next to the
//! target and renames it into place, so the file on disk always holds either
//! the previous log or the new one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Header row of CSV exports.
pub const EXPORT_HEADER: [&str; 3] = ["timestamp", "password", "strength"];

/// Trait defining history store operations.
pub trait HistoryStoreTrait {
    fn load(&mut self) -> Result<&[HistoryEntry], HistoryError>;
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError>;
    fn recent(&self, n: usize) -> Vec<&HistoryEntry>;
    fn export_all<W: Write>(&self, sink: W) -> Result<usize, HistoryError>;
}

enum StoreState {
    Uninitialized,
    Ready(Vec<HistoryEntry>),
}

/// History store backed by a JSON file.
///
/// Starts uninitialized; `load()` must succeed (or
/// `quarantine_and_start_fresh()` be called) before any other operation.
/// Using the store before that is a bug in the caller and panics.
pub struct HistoryStore {
    path: PathBuf,
    state: StoreState,
}

#[cold]
#[track_caller]
fn not_ready() -> ! {
    panic!("HistoryStore used before load()")
}

impl HistoryStore {
    /// Creates an uninitialized store for the history file at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            state: StoreState::Uninitialized,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready(_))
    }

    /// All entries, oldest first.
    #[track_caller]
    pub fn entries(&self) -> &[HistoryEntry] {
        match &self.state {
            StoreState::Ready(entries) => entries,
            StoreState::Uninitialized => not_ready(),
        }
    }

    #[track_caller]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[track_caller]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Writes the CSV export to a newly created file at `path`.
    #[track_caller]
    pub fn export_to_path<P: AsRef<Path>>(&self, path: P) -> Result<usize, HistoryError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            HistoryError::ExportError(format!("Failed to create {}: {}", path.display(), e))
        })?;
        let rows = self.export_all(file)?;
        info!(rows, path = %path.display(), "exported password history");
        Ok(rows)
    }

    /// Recovers from an unreadable history file.
    ///
    /// Renames the existing file to `<name>.corrupt-<YYYYmmddHHMMSS>` and
    /// leaves the store ready with an empty log. Returns the new location of
    /// the old file, if there was one.
    ///
    /// Only a regular file that can be opened is moved. Anything else (a
    /// directory, a file without read permission) is an environment problem
    /// rather than bad content, so it fails with `PersistenceError` and the
    /// store stays as it was.
    pub fn quarantine_and_start_fresh(&mut self) -> Result<Option<PathBuf>, HistoryError> {
        let quarantined = if self.path.exists() {
            ensure_readable_file(&self.path)?;

            let stamp = Local::now().format("%Y%m%d%H%M%S");
            let mut name = self.path.clone().into_os_string();
            name.push(format!(".corrupt-{}", stamp));
            let target = PathBuf::from(name);

            fs::rename(&self.path, &target).map_err(|e| {
                HistoryError::PersistenceError(format!(
                    "Failed to move {} aside: {}",
                    self.path.display(),
                    e
                ))
            })?;
            warn!(from = %self.path.display(), to = %target.display(), "quarantined unreadable history file");
            Some(target)
        } else {
            None
        };

        self.state = StoreState::Ready(Vec::new());
        Ok(quarantined)
    }
}

impl HistoryStoreTrait for HistoryStore {
    /// Reads the log from disk, replacing the in-memory copy.
    ///
    /// A missing file is an empty log. A file that cannot be read or parsed
    /// yields `CorruptHistory` and leaves the store as it was.
    fn load(&mut self) -> Result<&[HistoryEntry], HistoryError> {
        let entries: Vec<HistoryEntry> = match fs::read(&self.path) {
            Ok(bytes) => {
                let bytes = Zeroizing::new(bytes);
                serde_json::from_slice(&bytes).map_err(|e| {
                    warn!(path = %self.path.display(), "history file is not valid");
                    HistoryError::CorruptHistory(format!("{}: {}", self.path.display(), e))
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(HistoryError::CorruptHistory(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        info!(entries = entries.len(), path = %self.path.display(), "loaded password history");
        self.state = StoreState::Ready(entries);
        Ok(self.entries())
    }

    /// Appends one entry and persists the full log before returning.
    ///
    /// On a write failure the entry is removed again, so memory and disk both
    /// keep the previous log.
    #[track_caller]
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let StoreState::Ready(entries) = &mut self.state else {
            not_ready()
        };

        entries.push(entry);
        if let Err(e) = write_log(&self.path, entries) {
            entries.pop();
            warn!(path = %self.path.display(), error = %e, "history append rolled back");
            return Err(HistoryError::PersistenceError(e));
        }

        debug!(entries = entries.len(), "appended history entry");
        Ok(())
    }

    /// The last `n` entries, newest first.
    #[track_caller]
    fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries().iter().rev().take(n).collect()
    }

    /// Writes every entry as CSV, oldest first, preceded by a header row.
    /// Returns the number of data rows written.
    #[track_caller]
    fn export_all<W: Write>(&self, sink: W) -> Result<usize, HistoryError> {
        let entries = self.entries();
        let mut writer = csv::Writer::from_writer(sink);

        writer
            .write_record(EXPORT_HEADER)
            .map_err(|e| HistoryError::ExportError(e.to_string()))?;

        for entry in entries {
            let timestamp = entry.timestamp();
            writer
                .write_record([
                    timestamp.as_str(),
                    entry.password().as_str(),
                    entry.strength().label(),
                ])
                .map_err(|e| HistoryError::ExportError(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| HistoryError::ExportError(e.to_string()))?;

        Ok(entries.len())
    }
}

fn ensure_readable_file(path: &Path) -> Result<(), HistoryError> {
    let file = File::open(path).map_err(|e| {
        HistoryError::PersistenceError(format!("Cannot open {}: {}", path.display(), e))
    })?;
    let metadata = file.metadata().map_err(|e| {
        HistoryError::PersistenceError(format!("Cannot inspect {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(HistoryError::PersistenceError(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    Ok(())
}

/// Replaces the file at `path` with the serialized log.
fn write_log(path: &Path, entries: &[HistoryEntry]) -> Result<(), String> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create history directory: {}", e))?;

    let json = Zeroizing::new(
        serde_json::to_vec_pretty(entries)
            .map_err(|e| format!("Failed to serialize history: {}", e))?,
    );

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| format!("Failed to create temporary history file: {}", e))?;
    tmp.write_all(&json)
        .map_err(|e| format!("Failed to write history: {}", e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| format!("Failed to sync history: {}", e))?;
    tmp.persist(path)
        .map_err(|e| format!("Failed to replace {}: {}", path.display(), e.error))?;

    Ok(())
}
