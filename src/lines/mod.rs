//! Line collection management
//!
//! `LineBoard` is the sole writer of the persisted line array. Every change
//! goes through `mutate`, which copies the current collection, applies the
//! change to the copy, and persists the result, so readers never observe a
//! partially written state.

pub mod commands;
pub mod selection;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Store;
use selection::SelectionSet;

/// Stable opaque identity of a line, assigned at creation and never reused
/// within a collection. Asynchronous write-backs are keyed by this, not by
/// the positional index that was current when the request was issued.
pub type LineId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    #[serde(default)]
    pub id: LineId,
    pub orig: String,
    pub tran: String,
    pub src: String,
    pub tgt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<String>,
}

/// Named snapshot with an independent lifecycle from the live collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub date: DateTime<Utc>,
    pub lines: Vec<LineRecord>,
}

pub struct LineBoard<'a> {
    store: &'a mut Store,
    selection: SelectionSet,
}

impl<'a> LineBoard<'a> {
    /// Opens the board over the store, assigning fresh ids to any legacy
    /// records that were persisted without one.
    pub fn new(store: &'a mut Store) -> Result<Self> {
        let mut board = Self {
            store,
            selection: SelectionSet::new(),
        };
        board.ensure_ids()?;
        Ok(board)
    }

    fn ensure_ids(&mut self) -> Result<()> {
        let mut lines = self.store.lines();
        let mut seen = std::collections::BTreeSet::new();
        let mut next = Self::next_id(&lines);
        let mut changed = false;
        for line in &mut lines {
            if line.id == 0 || !seen.insert(line.id) {
                line.id = next;
                seen.insert(next);
                next += 1;
                changed = true;
            }
        }
        if changed {
            self.store.set_lines(&lines)?;
        }
        Ok(())
    }

    fn next_id(lines: &[LineRecord]) -> LineId {
        lines.iter().map(|l| l.id).max().map_or(1, |max| max + 1)
    }

    /// Snapshot copy of the current collection.
    pub fn lines(&self) -> Vec<LineRecord> {
        self.store.lines()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// The one sanctioned path for structural change: copy, mutate the copy,
    /// persist the copy. The selection is reconciled in the same call.
    pub fn mutate<F>(&mut self, f: F) -> Result<Vec<LineRecord>>
    where
        F: FnOnce(&mut Vec<LineRecord>),
    {
        let mut copy = self.store.lines();
        f(&mut copy);
        self.store.set_lines(&copy)?;
        self.selection.retain_valid(copy.len());
        Ok(copy)
    }

    /// Appends a freshly translated line; returns its stable id.
    pub fn append(&mut self, orig: String, tran: String, src: String, tgt: String) -> Result<LineId> {
        let mut id = 0;
        self.mutate(|lines| {
            id = Self::next_id(lines);
            lines.push(LineRecord {
                id,
                orig,
                tran,
                src,
                tgt,
                explain: None,
            });
        })?;
        Ok(id)
    }

    /// In-place edit of a line's text fields.
    pub fn edit(&mut self, index: usize, orig: Option<String>, tran: Option<String>) -> Result<()> {
        let count = self.store.lines().len();
        if index >= count {
            anyhow::bail!("No line at index {} ({} lines)", index, count);
        }
        self.mutate(|lines| {
            if let Some(orig) = orig {
                lines[index].orig = orig;
            }
            if let Some(tran) = tran {
                lines[index].tran = tran;
            }
        })?;
        Ok(())
    }

    /// Removes the lines at `indices`. Removal runs in descending index
    /// order so earlier removals never shift later targets within the batch.
    /// The selection is cleared afterwards.
    pub fn delete_indices(&mut self, indices: &[usize]) -> Result<Vec<LineRecord>> {
        let mut idxs: Vec<usize> = indices.to_vec();
        idxs.sort_unstable_by(|a, b| b.cmp(a));
        idxs.dedup();

        let next = self.mutate(|lines| {
            for &i in &idxs {
                if i < lines.len() {
                    lines.remove(i);
                }
            }
        })?;
        self.selection.clear();
        Ok(next)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.mutate(|lines| lines.clear())?;
        self.selection.clear();
        Ok(())
    }

    /// Copies the referenced lines by value into a new or overwritten note.
    /// The live collection is not touched.
    pub fn save_note(&mut self, name: &str, indices: &[usize]) -> Result<usize> {
        let lines = self.store.lines();
        let mut idxs: Vec<usize> = indices.to_vec();
        idxs.sort_unstable();
        idxs.dedup();

        let picked: Vec<LineRecord> = idxs
            .into_iter()
            .filter_map(|i| lines.get(i).cloned())
            .collect();
        if picked.is_empty() {
            anyhow::bail!("No lines selected");
        }

        let count = picked.len();
        let mut notes = self.store.notes();
        notes.insert(
            name.to_string(),
            Note {
                date: Utc::now(),
                lines: picked,
            },
        );
        self.store.set_notes(&notes)?;
        Ok(count)
    }

    /// Appends the note's lines to the end of the live collection, under
    /// fresh ids. Existing content is never replaced.
    pub fn load_note(&mut self, name: &str) -> Result<usize> {
        let notes = self.store.notes();
        let note = notes
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("No note named '{}'", name))?;

        let count = note.lines.len();
        let loaded = note.lines.clone();
        self.mutate(|lines| {
            let mut next = Self::next_id(lines);
            for mut line in loaded {
                line.id = next;
                next += 1;
                lines.push(line);
            }
        })?;
        Ok(count)
    }

    /// Removes a note from the name -> note map only.
    pub fn delete_note(&mut self, name: &str) -> Result<()> {
        let mut notes = self.store.notes();
        if notes.remove(name).is_none() {
            anyhow::bail!("No note named '{}'", name);
        }
        self.store.set_notes(&notes)
    }

    /// Current index of the line with the given id, if it still exists.
    pub fn resolve(&self, id: LineId) -> Option<usize> {
        self.store.lines().iter().position(|l| l.id == id)
    }

    /// Writes a finished translation back into the line that requested it.
    /// The line is looked up by id at completion time; a result for a line
    /// that has since been deleted is discarded. Returns whether the write
    /// landed.
    pub fn commit_translation(&mut self, id: LineId, tran: String) -> Result<bool> {
        self.commit(id, |line| line.tran = tran)
    }

    /// Caches a fetched explanation on its line; same id resolution and
    /// discard policy as `commit_translation`. No other field is touched.
    pub fn commit_explanation(&mut self, id: LineId, explain: String) -> Result<bool> {
        self.commit(id, |line| line.explain = Some(explain))
    }

    fn commit<F>(&mut self, id: LineId, write: F) -> Result<bool>
    where
        F: FnOnce(&mut LineRecord),
    {
        match self.resolve(id) {
            Some(index) => {
                self.mutate(|lines| write(&mut lines[index]))?;
                Ok(true)
            }
            None => {
                tracing::warn!("Result arrived for deleted line (id {}), discarding", id);
                Ok(false)
            }
        }
    }
}
