//! History Module
//!
//! Keeps the last generated mind maps in a JSON-lines file. Each line after the
//! `#` header is one [`HistoryEntry`]. At most [`MAX_ENTRIES`] are kept; recording
//! a new entry evicts the oldest.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::mindmap::MindNode;

/// Maximum number of entries kept in the history file
pub const MAX_ENTRIES: usize = 10;

/// One generated mind map together with the text it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub created_at: DateTime<Local>,
    pub input: String,
    pub tree: MindNode,
}

/// File-backed history of generated mind maps
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Opens the store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        debug!("History store at {:?}", path);
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a new entry, evicting the oldest ones beyond [`MAX_ENTRIES`].
    pub fn record(&self, input: &str, tree: &MindNode) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            created_at: Local::now(),
            input: input.to_string(),
            tree: tree.clone(),
        };

        let mut entries = self.read_entries()?;
        entries.push(entry.clone());
        if entries.len() > MAX_ENTRIES {
            let evicted = entries.len() - MAX_ENTRIES;
            entries.drain(..evicted);
            debug!("Evicted {} history entries", evicted);
        }
        self.write_entries(&entries)?;

        info!("Recorded history entry {} ('{}')", entry.id, entry.tree.label);
        Ok(entry)
    }

    /// All entries, newest first.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.read_entries()?;
        entries.reverse();
        Ok(entries)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<HistoryEntry>> {
        Ok(self.read_entries()?.into_iter().find(|e| e.id == id))
    }

    /// Removes one entry; returns whether it existed.
    pub fn remove(&self, id: Uuid) -> Result<bool> {
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.write_entries(&entries)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        info!("History cleared");
        Ok(())
    }

    /// Oldest first, in file order. Unparseable lines are skipped.
    fn read_entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(trimmed) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping unreadable history line: {}", e),
            }
        }
        Ok(entries)
    }

    fn write_entries(&self, entries: &[HistoryEntry]) -> Result<()> {
        let mut file = fs::File::create(&self.path)?;

        writeln!(file, "# Mind map history - last {} entries", entries.len())?;
        writeln!(file, "# Updated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file)?;

        for entry in entries {
            writeln!(file, "{}", serde_json::to_string(entry)?)?;
        }
        Ok(())
    }
}
