// Concrete command implementations

use crate::command::trait_def::UndoableCommand;
use crate::error::{Result, SequencerError};
use crate::sequencer::note::{InstrumentIndex, NoteToggle, PitchIndex, Tick};
use crate::sequencer::store::NoteStore;

/// Toggle one grid cell
///
/// Undo toggles the same cell back with the instrument of the note that was
/// affected, so removing a note and undoing restores its original instrument.
pub struct ToggleNoteCommand {
    tick: Tick,
    pitch: PitchIndex,
    instrument: InstrumentIndex,
    last_change: Option<NoteToggle>,
}

impl ToggleNoteCommand {
    pub fn new(tick: Tick, pitch: PitchIndex, instrument: InstrumentIndex) -> Self {
        Self {
            tick,
            pitch,
            instrument,
            last_change: None,
        }
    }
}

impl UndoableCommand for ToggleNoteCommand {
    fn execute(&mut self, store: &mut NoteStore) -> Result<NoteToggle> {
        let change = store.toggle(self.tick, self.pitch, self.instrument)?;
        self.last_change = Some(change);
        Ok(change)
    }

    fn undo(&mut self, store: &mut NoteStore) -> Result<NoteToggle> {
        let change = self.last_change.ok_or(SequencerError::NothingToUndo)?;
        let note = change.note();
        store.toggle(note.tick, note.pitch, note.instrument)
    }

    fn description(&self) -> String {
        match self.last_change {
            Some(NoteToggle::Removed(_)) => {
                format!("Remove note at tick {}, pitch {}", self.tick, self.pitch)
            }
            _ => format!("Add note at tick {}, pitch {}", self.tick, self.pitch),
        }
    }
}
