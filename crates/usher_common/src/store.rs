//! Durable progress persistence.
//!
//! Two surfaces: a key-value store holding the progress snapshot, and an
//! append-only JSONL log of interactions with entry-count rotation.
//! Every failure here is recoverable; the in-memory state stays
//! authoritative for the session and the next scheduled flush retries.

use crate::error::UsherError;
use crate::interaction::InteractionRecord;
use crate::state::ProgressSnapshot;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Key under which the progress snapshot is stored.
pub const SNAPSHOT_KEY: &str = "progress";

/// Minimal key-value persistence surface.
///
/// Keys are short identifiers, values are opaque strings. Durable across
/// restarts, scoped to the state directory.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// File-backed key-value store: one file per key under a directory.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write to temp file then rename (atomic)
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// Typed snapshot persistence on top of a [`KvStore`].
pub struct SnapshotStore {
    kv: Box<dyn KvStore>,
}

impl SnapshotStore {
    pub fn new(kv: Box<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileKvStore::new(dir)))
    }

    /// Load the persisted snapshot. Absent or unreadable snapshots fall
    /// back to the default (beginner/0) so a session can always start.
    pub fn load(&self) -> ProgressSnapshot {
        match self.kv.get(SNAPSHOT_KEY) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("malformed progress snapshot, starting fresh: {}", e);
                    ProgressSnapshot::default()
                }
            },
            Ok(None) => ProgressSnapshot::default(),
            Err(e) => {
                warn!("progress snapshot unreadable, starting fresh: {}", e);
                ProgressSnapshot::default()
            }
        }
    }

    pub fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), UsherError> {
        let text = serde_json::to_string(snapshot)?;
        self.kv
            .set(SNAPSHOT_KEY, &text)
            .map_err(|e| UsherError::Store(e.to_string()))
    }
}

/// Append-only JSONL log of interactions with rotation.
pub struct InteractionLog {
    path: PathBuf,
    max_entries: usize,
}

impl InteractionLog {
    pub fn new(path: impl AsRef<Path>, max_entries: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_entries: max_entries.max(4),
        }
    }

    /// Append an interaction record.
    pub fn append(&self, record: &InteractionRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;

        self.maybe_rotate()?;

        Ok(())
    }

    /// Read all records. Malformed lines are skipped (forward compatibility).
    pub fn read_all(&self) -> io::Result<Vec<InteractionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("skipping malformed interaction line: {}", e);
                }
            }
        }

        Ok(records)
    }

    /// Read records from the last N days.
    pub fn read_recent(&self, days: i64) -> io::Result<Vec<InteractionRecord>> {
        let cutoff = chrono::Utc::now() - chrono::Duration::days(days);
        let all = self.read_all()?;
        Ok(all.into_iter().filter(|r| r.timestamp >= cutoff).collect())
    }

    /// Rotate the log if it exceeds max entries, keeping the newest 75%.
    fn maybe_rotate(&self) -> io::Result<()> {
        let records = self.read_all()?;
        if records.len() <= self.max_entries {
            return Ok(());
        }

        let keep_count = self.max_entries * 3 / 4;
        let to_keep = &records[records.len() - keep_count..];

        let temp_path = self.path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&temp_path)?;
            for record in to_keep {
                let line = serde_json::to_string(record)?;
                writeln!(file, "{}", line)?;
            }
        }
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
