//! Unit tests for the HistoryStore public API.
//!
//! These tests exercise loading, appending, recent views, CSV export, and the
//! failure paths, using history files inside a temporary directory.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use tempfile::TempDir;

use passgen::managers::history_store::{HistoryStore, HistoryStoreTrait};
use passgen::types::errors::HistoryError;
use passgen::types::history::HistoryEntry;
use passgen::types::password::Password;
use passgen::types::strength::StrengthLevel;

/// Helper: a history path inside a fresh temp directory.
fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("password_history.json");
    (dir, path)
}

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(12, minute, 0)
        .unwrap()
}

fn entry(password: &str, minute: u32, strength: StrengthLevel) -> HistoryEntry {
    HistoryEntry::new(Password::new(password), at(minute), strength)
}

fn loaded_store(path: &PathBuf) -> HistoryStore {
    let mut store = HistoryStore::new(path.clone());
    store.load().expect("load should succeed");
    store
}

// ─── Load ───

#[test]
fn test_load_without_file_yields_empty_log() {
    let (_dir, path) = setup();
    let mut store = HistoryStore::new(path.clone());

    let entries = store.load().unwrap();
    assert!(entries.is_empty());
    assert!(!path.exists(), "load must not create the history file");
}

#[test]
fn test_load_reproduces_appended_entries_in_order() {
    let (_dir, path) = setup();
    let appended = vec![
        entry("first", 1, StrengthLevel::Weak),
        entry("Second-2", 2, StrengthLevel::Medium),
        entry("Th1rd!pass-word", 3, StrengthLevel::Strong),
    ];

    {
        let mut store = loaded_store(&path);
        for e in &appended {
            store.append(e.clone()).unwrap();
        }
    }

    let mut reloaded = HistoryStore::new(path);
    assert_eq!(reloaded.load().unwrap(), appended.as_slice());
}

#[test]
fn test_load_twice_is_idempotent() {
    let (_dir, path) = setup();
    {
        let mut store = loaded_store(&path);
        store.append(entry("one", 1, StrengthLevel::Weak)).unwrap();
        store.append(entry("two", 2, StrengthLevel::Weak)).unwrap();
    }

    let mut store = HistoryStore::new(path);
    let first = store.load().unwrap().to_vec();
    let second = store.load().unwrap().to_vec();
    assert_eq!(first, second);
}

#[test]
fn test_load_reads_hand_written_file() {
    let (_dir, path) = setup();
    fs::write(
        &path,
        r#"[
  {"password": "abc,def", "timestamp": "2023-12-31 23:59:59", "strength": "Weak"},
  {"password": "Abcdefghijk1!", "timestamp": "2024-01-01 00:00:00", "strength": "Strong"}
]"#,
    )
    .unwrap();

    let mut store = HistoryStore::new(path);
    let entries = store.load().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].password().as_str(), "abc,def");
    assert_eq!(entries[1].strength(), StrengthLevel::Strong);
    assert_eq!(entries[1].timestamp(), "2024-01-01 00:00:00");
}

/// History written by the earlier Russian-language tool: same file layout,
/// localized strength labels, non-ASCII escaped by its JSON writer.
#[test]
fn test_load_reads_legacy_localized_labels() {
    let (_dir, path) = setup();
    fs::write(
        &path,
        r#"[
  {
    "password": "aB3$xY9!kLm2",
    "timestamp": "2024-02-10 09:15:42",
    "strength": "\ud83d\udfe2 \u0421\u0438\u043b\u044c\u043d\u044b\u0439"
  },
  {
    "password": "abc",
    "timestamp": "2024-02-10 09:16:00",
    "strength": "\ud83d\udd34 \u0421\u043b\u0430\u0431\u044b\u0439"
  },
  {
    "password": "Abc12345",
    "timestamp": "2024-02-11 18:00:05",
    "strength": "\ud83d\udfe1 \u0421\u0440\u0435\u0434\u043d\u0438\u0439"
  }
]"#,
    )
    .unwrap();

    let mut store = HistoryStore::new(path.clone());
    let strengths: Vec<StrengthLevel> = store.load().unwrap().iter().map(|e| e.strength()).collect();
    assert_eq!(
        strengths,
        vec![StrengthLevel::Strong, StrengthLevel::Weak, StrengthLevel::Medium]
    );

    // The next write uses the English labels.
    store.append(entry("new", 1, StrengthLevel::Weak)).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains(r#""strength": "Strong""#));
    assert!(!text.contains("Сильный"));
    assert_eq!(loaded_store(&path).len(), 4);
}

#[test]
fn test_load_corrupt_file_fails_with_corrupt_history() {
    let (_dir, path) = setup();
    fs::write(&path, "{ not json").unwrap();

    let mut store = HistoryStore::new(path.clone());
    let result = store.load();
    assert!(matches!(result, Err(HistoryError::CorruptHistory(_))));
    assert!(!store.is_ready(), "a failed load must leave the store uninitialized");
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json", "corrupt data must be kept");
}

#[test]
fn test_load_unknown_strength_label_is_corrupt() {
    let (_dir, path) = setup();
    fs::write(
        &path,
        r#"[{"password": "x", "timestamp": "2024-01-01 00:00:00", "strength": "Epic"}]"#,
    )
    .unwrap();

    let mut store = HistoryStore::new(path);
    assert!(matches!(store.load(), Err(HistoryError::CorruptHistory(_))));
}

#[test]
fn test_failed_reload_keeps_previous_log() {
    let (_dir, path) = setup();
    let mut store = loaded_store(&path);
    store.append(entry("kept", 1, StrengthLevel::Weak)).unwrap();

    fs::write(&path, "garbage").unwrap();
    assert!(store.load().is_err());
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].password().as_str(), "kept");
}

#[test]
fn test_quarantine_moves_corrupt_file_aside() {
    let (dir, path) = setup();
    fs::write(&path, "garbage").unwrap();

    let mut store = HistoryStore::new(path.clone());
    assert!(store.load().is_err());

    let moved = store.quarantine_and_start_fresh().unwrap().expect("file should be moved");
    assert!(!path.exists());
    assert_eq!(fs::read_to_string(&moved).unwrap(), "garbage");
    assert!(moved.starts_with(dir.path()));
    assert!(moved
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("password_history.json.corrupt-"));

    assert!(store.is_empty());
    store.append(entry("fresh", 1, StrengthLevel::Weak)).unwrap();
    assert_eq!(loaded_store(&path).len(), 1);
}

/// A path that exists but cannot be read as a file is reported, never moved.
#[test]
fn test_quarantine_refuses_non_file() {
    let (_dir, path) = setup();
    fs::create_dir(&path).unwrap();

    let mut store = HistoryStore::new(path.clone());
    assert!(matches!(store.load(), Err(HistoryError::CorruptHistory(_))));

    let result = store.quarantine_and_start_fresh();
    assert!(matches!(result, Err(HistoryError::PersistenceError(_))));
    assert!(path.is_dir(), "directory must stay in place");
    assert!(!store.is_ready());
}

// ─── Append ───

#[test]
fn test_appended_entry_matches_reloaded_entry() {
    let (_dir, path) = setup();
    let precise = Local::now().naive_local().with_nanosecond(987_654_321).unwrap();

    let mut store = loaded_store(&path);
    store
        .append(HistoryEntry::new(Password::new("now"), precise, StrengthLevel::Weak))
        .unwrap();

    assert_eq!(store.entries()[0].generated_at().nanosecond(), 0);
    let reloaded = loaded_store(&path);
    assert_eq!(store.entries(), reloaded.entries());
}

#[test]
fn test_append_creates_missing_directories() {
    let (dir, _) = setup();
    let path = dir.path().join("nested").join("deeper").join("history.json");
    let mut store = loaded_store(&path);

    store.append(entry("x", 1, StrengthLevel::Weak)).unwrap();
    assert!(path.exists());
}

#[test]
fn test_append_failure_rolls_back() {
    let (dir, _) = setup();
    // The parent "directory" is a regular file, so nothing can be written.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let path = blocker.join("history.json");

    let mut store = loaded_store(&path);
    let result = store.append(entry("lost", 1, StrengthLevel::Weak));

    assert!(matches!(result, Err(HistoryError::PersistenceError(_))));
    assert!(store.is_empty(), "failed append must not stay in memory");
}

#[test]
fn test_append_failure_keeps_disk_and_memory_consistent() {
    let (dir, _) = setup();
    let data_dir = dir.path().join("data");
    let path = data_dir.join("history.json");

    let mut store = loaded_store(&path);
    store.append(entry("one", 1, StrengthLevel::Weak)).unwrap();
    let on_disk_before = fs::read_to_string(&path).unwrap();

    // Swap the directory for a file so the next write cannot happen.
    let parked = dir.path().join("parked");
    fs::rename(&data_dir, &parked).unwrap();
    fs::write(&data_dir, "").unwrap();

    assert!(store.append(entry("two", 2, StrengthLevel::Weak)).is_err());
    assert_eq!(store.len(), 1);

    // Put the directory back: the persisted log is untouched.
    fs::remove_file(&data_dir).unwrap();
    fs::rename(&parked, &data_dir).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), on_disk_before);

    store.append(entry("three", 3, StrengthLevel::Weak)).unwrap();
    let reloaded = loaded_store(&path);
    let passwords: Vec<&str> = reloaded.entries().iter().map(|e| e.password().as_str()).collect();
    assert_eq!(passwords, vec!["one", "three"]);
}

#[test]
#[should_panic(expected = "HistoryStore used before load()")]
fn test_recent_before_load_panics() {
    let (_dir, path) = setup();
    let store = HistoryStore::new(path);
    let _ = store.recent(5);
}

#[test]
#[should_panic(expected = "HistoryStore used before load()")]
fn test_export_before_load_panics() {
    let (_dir, path) = setup();
    let store = HistoryStore::new(path);
    let _ = store.export_all(Vec::new());
}

// ─── Recent ───

#[test]
fn test_recent_is_newest_first_and_clamped() {
    let (_dir, path) = setup();
    let mut store = loaded_store(&path);
    for (i, pw) in ["a", "b", "c", "d"].iter().enumerate() {
        store.append(entry(pw, i as u32, StrengthLevel::Weak)).unwrap();
    }

    let two: Vec<&str> = store.recent(2).iter().map(|e| e.password().as_str()).collect();
    assert_eq!(two, vec!["d", "c"]);

    let all: Vec<&str> = store.recent(100).iter().map(|e| e.password().as_str()).collect();
    assert_eq!(all, vec!["d", "c", "b", "a"]);

    assert!(store.recent(0).is_empty());
}

// ─── Export ───

#[test]
fn test_export_is_chronological_with_header() {
    let (_dir, path) = setup();
    let mut store = loaded_store(&path);
    store.append(entry("first", 1, StrengthLevel::Weak)).unwrap();
    store.append(entry("Second1!Second", 2, StrengthLevel::Strong)).unwrap();

    // A recent() view must not affect export order.
    let _ = store.recent(1);

    let mut out = Vec::new();
    let rows = store.export_all(&mut out).unwrap();
    assert_eq!(rows, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "timestamp,password,strength\n\
         2024-05-01 12:01:00,first,Weak\n\
         2024-05-01 12:02:00,Second1!Second,Strong\n"
    );
}

#[test]
fn test_export_quotes_embedded_commas_and_quotes() {
    let (_dir, path) = setup();
    let mut store = loaded_store(&path);
    store.append(entry("a,b\"c", 1, StrengthLevel::Weak)).unwrap();

    let mut out = Vec::new();
    store.export_all(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("2024-05-01 12:01:00,\"a,b\"\"c\",Weak"));

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[1], "a,b\"c");
}

#[test]
fn test_export_of_empty_log_writes_header_only() {
    let (_dir, path) = setup();
    let store = loaded_store(&path);

    let mut out = Vec::new();
    assert_eq!(store.export_all(&mut out).unwrap(), 0);
    assert_eq!(String::from_utf8(out).unwrap(), "timestamp,password,strength\n");
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

#[test]
fn test_export_to_broken_sink_fails() {
    let (_dir, path) = setup();
    let mut store = loaded_store(&path);
    store.append(entry("x", 1, StrengthLevel::Weak)).unwrap();

    let result = store.export_all(BrokenSink);
    assert!(matches!(result, Err(HistoryError::ExportError(_))));
}

#[test]
fn test_export_to_path() {
    let (dir, path) = setup();
    let mut store = loaded_store(&path);
    store.append(entry("x", 1, StrengthLevel::Weak)).unwrap();

    let target = dir.path().join("export.csv");
    assert_eq!(store.export_to_path(&target).unwrap(), 1);
    assert!(fs::read_to_string(&target).unwrap().starts_with("timestamp,password,strength\n"));

    let bad = dir.path().join("missing-dir").join("export.csv");
    assert!(matches!(store.export_to_path(&bad), Err(HistoryError::ExportError(_))));
}
