// UndoableCommand trait definition

use crate::error::Result;
use crate::sequencer::note::NoteToggle;
use crate::sequencer::store::NoteStore;

/// Trait for edits that support undo/redo
///
/// Every edit of the note store goes through a command so that the history
/// can replay it. Both directions report the cell change they made, which the
/// session forwards to the grid.
///
/// # Example
/// ```
/// use step_sequencer::command::trait_def::UndoableCommand;
/// use step_sequencer::command::commands::ToggleNoteCommand;
/// use step_sequencer::sequencer::{GridBounds, NoteStore};
///
/// let mut store = NoteStore::new(GridBounds::new(400, 25, 6));
/// let mut command = ToggleNoteCommand::new(0, 12, 0);
///
/// assert!(command.execute(&mut store).unwrap().is_added());
/// assert!(!command.undo(&mut store).unwrap().is_added());
/// assert!(store.is_empty());
/// ```
pub trait UndoableCommand: Send {
    /// Apply the edit
    ///
    /// Called for the first execution and again on redo.
    fn execute(&mut self, store: &mut NoteStore) -> Result<NoteToggle>;

    /// Revert the edit made by the last `execute`
    fn undo(&mut self, store: &mut NoteStore) -> Result<NoteToggle>;

    /// Get a human-readable description of the command
    ///
    /// Used for UI display (e.g., "Undo: Add note at tick 4")
    fn description(&self) -> String;
}
