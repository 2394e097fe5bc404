use std::collections::VecDeque;

use ropey::Rope;

pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// A single replacement of `removed` by `inserted` at char offset `at`.
///
/// Plain insertions have an empty `removed`, plain deletions an empty
/// `inserted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub at: usize,
    pub removed: String,
    pub inserted: String,
}

impl Edit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            at,
            removed: String::new(),
            inserted: text.into(),
        }
    }

    pub fn replace(at: usize, removed: impl Into<String>, inserted: impl Into<String>) -> Self {
        Self {
            at,
            removed: removed.into(),
            inserted: inserted.into(),
        }
    }

    /// Char offset just past the inserted text, where the cursor lands after applying.
    pub fn end_after_apply(&self) -> usize {
        self.at + self.inserted.chars().count()
    }

    pub fn apply(&self, rope: &mut Rope) -> anyhow::Result<()> {
        let removed_len = self.removed.chars().count();

        rope.try_remove(self.at..self.at + removed_len)?;
        rope.try_insert(self.at, &self.inserted)?;

        Ok(())
    }

    pub fn revert(&self, rope: &mut Rope) -> anyhow::Result<()> {
        let inserted_len = self.inserted.chars().count();

        rope.try_remove(self.at..self.at + inserted_len)?;
        rope.try_insert(self.at, &self.removed)?;

        Ok(())
    }
}

struct Entry {
    id: u64,
    edit: Edit,
}

/// Bounded undo manager.
///
/// Every recorded edit gets a fresh id; [`History::revision`] is the id of the
/// newest edit still applied, which lets the document compare "now" against
/// "last saved" without diffing text.
pub struct History {
    undo: VecDeque<Entry>,
    redo: Vec<Entry>,
    limit: usize,
    next_id: u64,
    // Revision of the state underneath the oldest entry still in `undo`.
    base: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
            next_id: 1,
            base: 0,
        }
    }

    pub fn record(&mut self, edit: Edit) {
        let id = self.next_id;
        self.next_id += 1;

        self.redo.clear();
        self.undo.push_back(Entry { id, edit });

        while self.undo.len() > self.limit {
            if let Some(evicted) = self.undo.pop_front() {
                self.base = evicted.id;
            }
        }
    }

    /// Reverts the newest edit and returns the char offset the cursor should move to.
    pub fn undo(&mut self, rope: &mut Rope) -> anyhow::Result<Option<usize>> {
        let Some(entry) = self.undo.pop_back() else {
            return Ok(None);
        };

        if let Err(err) = entry.edit.revert(rope) {
            self.undo.push_back(entry);
            return Err(err);
        }

        let cursor = entry.edit.at + entry.edit.removed.chars().count();
        self.redo.push(entry);

        Ok(Some(cursor))
    }

    pub fn redo(&mut self, rope: &mut Rope) -> anyhow::Result<Option<usize>> {
        let Some(entry) = self.redo.pop() else {
            return Ok(None);
        };

        if let Err(err) = entry.edit.apply(rope) {
            self.redo.push(entry);
            return Err(err);
        }

        let cursor = entry.edit.end_after_apply();
        self.undo.push_back(entry);

        Ok(Some(cursor))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.undo.back().map(|entry| entry.id).unwrap_or(self.base)
    }

    /// Drops all entries. The revision afterwards is distinct from every
    /// revision handed out before.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.base = self.next_id;
        self.next_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_and_record(history: &mut History, rope: &mut Rope, edit: Edit) {
        edit.apply(rope).unwrap();
        history.record(edit);
    }

    #[test]
    fn undo_and_redo_restore_text() {
        let mut rope = Rope::from("hello");
        let mut history = History::default();

        apply_and_record(&mut history, &mut rope, Edit::insert(5, " world"));
        apply_and_record(&mut history, &mut rope, Edit::replace(0, "hello", "goodbye"));
        assert_eq!(rope.to_string(), "goodbye world");

        assert_eq!(history.undo(&mut rope).unwrap(), Some(5));
        assert_eq!(rope.to_string(), "hello world");
        assert_eq!(history.undo(&mut rope).unwrap(), Some(5));
        assert_eq!(rope.to_string(), "hello");
        assert_eq!(history.undo(&mut rope).unwrap(), None);

        assert_eq!(history.redo(&mut rope).unwrap(), Some(11));
        assert_eq!(rope.to_string(), "hello world");
    }

    #[test]
    fn recording_clears_redo() {
        let mut rope = Rope::new();
        let mut history = History::default();

        apply_and_record(&mut history, &mut rope, Edit::insert(0, "a"));
        history.undo(&mut rope).unwrap();
        assert!(history.can_redo());

        apply_and_record(&mut history, &mut rope, Edit::insert(0, "b"));
        assert!(!history.can_redo());
        assert_eq!(history.redo(&mut rope).unwrap(), None);
        assert_eq!(rope.to_string(), "b");
    }

    #[test]
    fn limit_evicts_oldest_and_keeps_revisions_distinct() {
        let mut rope = Rope::new();
        let mut history = History::new(2);
        let initial = history.revision();

        for c in ["a", "b", "c"] {
            let at = rope.len_chars();
            apply_and_record(&mut history, &mut rope, Edit::insert(at, c));
        }

        while history.undo(&mut rope).unwrap().is_some() {}

        assert_eq!(rope.to_string(), "a");
        assert_ne!(history.revision(), initial);
    }

    #[test]
    fn reset_yields_fresh_revision() {
        let mut rope = Rope::new();
        let mut history = History::default();

        apply_and_record(&mut history, &mut rope, Edit::insert(0, "x"));
        let before = history.revision();

        history.reset();

        assert!(!history.can_undo());
        assert_ne!(history.revision(), before);
        assert_ne!(history.revision(), 0);
    }
}
