// Note representation for the sequencer
// A note is a single grid cell (tick, pitch) played with one instrument

use serde::{Deserialize, Serialize};

/// Discrete unit of musical time
pub type Tick = u32;

/// Pitch index within the grid's pitch range (12 = reference pitch)
pub type PitchIndex = u8;

/// Index into the instrument registry
pub type InstrumentIndex = u8;

/// Grid coordinate of a note; at most one note may occupy a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub tick: Tick,
    pub pitch: PitchIndex,
}

impl Cell {
    pub fn new(tick: Tick, pitch: PitchIndex) -> Self {
        Self { tick, pitch }
    }
}

/// A placed note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Tick at which the note is triggered
    pub tick: Tick,

    /// Pitch index (see `sequencer::pitch`)
    pub pitch: PitchIndex,

    /// Instrument index in the registry
    pub instrument: InstrumentIndex,
}

impl Note {
    pub fn new(tick: Tick, pitch: PitchIndex, instrument: InstrumentIndex) -> Self {
        Self {
            tick,
            pitch,
            instrument,
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.tick, self.pitch)
    }
}

/// Outcome of toggling a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteToggle {
    /// The cell was empty and now holds this note
    Added(Note),
    /// The cell held this note and is now empty
    Removed(Note),
}

impl NoteToggle {
    pub fn note(&self) -> &Note {
        match self {
            NoteToggle::Added(note) | NoteToggle::Removed(note) => note,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, NoteToggle::Added(_))
    }
}
