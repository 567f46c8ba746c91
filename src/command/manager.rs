// CommandManager - Bounded undo/redo history of grid edits

use crate::command::trait_def::UndoableCommand;
use crate::error::{Result, SequencerError};
use crate::sequencer::note::NoteToggle;
use crate::sequencer::store::NoteStore;
use std::collections::VecDeque;

/// Edits remembered when no limit is given
const DEFAULT_MAX_HISTORY: usize = 100;

/// Which way a command moves through the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Back,
    Forward,
}

/// Runs edits against a store and remembers them for undo/redo
///
/// A fresh edit discards everything that was undone. Past the limit the
/// oldest edit is forgotten.
pub struct CommandManager {
    /// Applied edits, newest last
    done: VecDeque<Box<dyn UndoableCommand>>,
    /// Reverted edits, newest last
    undone: VecDeque<Box<dyn UndoableCommand>>,
    limit: usize,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// History that remembers at most `limit` edits
    pub fn with_capacity(limit: usize) -> Self {
        Self {
            done: VecDeque::with_capacity(limit),
            undone: VecDeque::new(),
            limit,
        }
    }

    /// Apply an edit and remember it
    ///
    /// # Errors
    /// The edit's own error; a failed edit is forgotten.
    pub fn execute(
        &mut self,
        mut command: Box<dyn UndoableCommand>,
        store: &mut NoteStore,
    ) -> Result<NoteToggle> {
        let change = command.execute(store)?;
        log::debug!("{}", command.description());

        self.undone.clear();
        self.done.push_back(command);
        while self.done.len() > self.limit {
            self.done.pop_front();
        }

        Ok(change)
    }

    /// Revert the newest applied edit
    ///
    /// # Errors
    /// `NothingToUndo` on an empty history. If the edit itself fails it stays
    /// where it was.
    pub fn undo(&mut self, store: &mut NoteStore) -> Result<NoteToggle> {
        self.shift(Direction::Back, store)
    }

    /// Re-apply the newest reverted edit
    ///
    /// # Errors
    /// `NothingToRedo` when nothing was undone. If the edit itself fails it
    /// stays where it was.
    pub fn redo(&mut self, store: &mut NoteStore) -> Result<NoteToggle> {
        self.shift(Direction::Forward, store)
    }

    fn shift(&mut self, direction: Direction, store: &mut NoteStore) -> Result<NoteToggle> {
        let (from, to) = match direction {
            Direction::Back => (&mut self.done, &mut self.undone),
            Direction::Forward => (&mut self.undone, &mut self.done),
        };

        let mut command = from.pop_back().ok_or(match direction {
            Direction::Back => SequencerError::NothingToUndo,
            Direction::Forward => SequencerError::NothingToRedo,
        })?;

        let outcome = match direction {
            Direction::Back => command.undo(store),
            Direction::Forward => command.execute(store),
        };

        if outcome.is_ok() {
            to.push_back(command);
        } else {
            from.push_back(command);
        }
        outcome
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Label of the edit `undo` would revert, e.g. for a menu entry
    pub fn undo_description(&self) -> Option<String> {
        self.done.back().map(|command| command.description())
    }

    /// Label of the edit `redo` would re-apply
    pub fn redo_description(&self) -> Option<String> {
        self.undone.back().map(|command| command.description())
    }

    pub fn undo_count(&self) -> usize {
        self.done.len()
    }

    pub fn redo_count(&self) -> usize {
        self.undone.len()
    }
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}
