//! # Note Ledger
//!
//! Free-form operator notes. Not part of the billing state machine; they
//! share the persistence lifecycle so they survive restarts, and unlike
//! the financial ledgers they are fully editable and deletable.

use suvidha_core::types::Note;

/// All scratchpad notes.
#[derive(Debug, Clone, Default)]
pub struct NoteLedger {
    notes: Vec<Note>,
}

impl NoteLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the ledger from persisted notes.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        NoteLedger { notes }
    }

    /// The raw notes, for persistence.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Appends a new note.
    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Overwrites a note's content. Returns `false` if absent.
    pub fn update(&mut self, id: &str, content: &str) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.content = content.to_string();
                true
            }
            None => false,
        }
    }

    /// Deletes a note. Returns `false` if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }

    /// All notes, newest first.
    pub fn list(&self) -> Vec<Note> {
        let mut notes = self.notes.clone();
        notes.sort_by_key(|n| std::cmp::Reverse(n.created_at));
        notes
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
