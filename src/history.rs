use crate::error::EditError;
use crate::model::SceneSnapshot;

/// Linear, single-branch undo/redo over full scene snapshots.
///
/// Each entry is an immutable encoded copy (JSON text), fully decoupled
/// from live objects so replay cannot alias editor state. Capturing
/// while undone discards the stale future; there is no coalescing, so
/// one logical edit always maps to exactly one entry.
pub struct History {
    entries: Vec<String>,
    /// 1-indexed position; 0 = nothing captured yet.
    current: usize,
    /// Maximum entries kept; 0 = unlimited.
    max_entries: usize,
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        History {
            entries: Vec::new(),
            current: 0,
            max_entries,
        }
    }

    /// Encodes and appends `snap`, truncating any redo tail first.
    /// Oldest entries are evicted once the depth limit is exceeded.
    pub fn capture(&mut self, snap: &SceneSnapshot) -> Result<(), EditError> {
        let encoded =
            serde_json::to_string(snap).map_err(|e| EditError::MalformedEncoding(e.to_string()))?;
        self.entries.truncate(self.current);
        self.entries.push(encoded);
        self.current = self.entries.len();
        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(0..excess);
            self.current -= excess;
        }
        Ok(())
    }

    /// Steps back and returns the snapshot at the new position, or
    /// None when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<SceneSnapshot>, EditError> {
        if self.current <= 1 {
            return Ok(None);
        }
        self.current -= 1;
        self.decode(self.current - 1).map(Some)
    }

    /// Steps forward and returns that snapshot, or None at the tail.
    pub fn redo(&mut self) -> Result<Option<SceneSnapshot>, EditError> {
        if self.current >= self.entries.len() {
            return Ok(None);
        }
        self.current += 1;
        self.decode(self.current - 1).map(Some)
    }

    /// Snapshot at the current position, if anything was captured.
    pub fn current(&self) -> Result<Option<SceneSnapshot>, EditError> {
        if self.current == 0 {
            return Ok(None);
        }
        self.decode(self.current - 1).map(Some)
    }

    pub fn can_undo(&self) -> bool {
        self.current > 1
    }

    pub fn can_redo(&self) -> bool {
        self.current < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-indexed position of the current entry (0 = empty).
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = 0;
    }

    fn decode(&self, idx: usize) -> Result<SceneSnapshot, EditError> {
        serde_json::from_str(&self.entries[idx])
            .map_err(|e| EditError::MalformedEncoding(e.to_string()))
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(0)
    }
}
