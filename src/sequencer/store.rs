// Note store - sparse collection of placed notes
// Keyed by (tick, pitch), iterable in insertion order, indexed by tick for playback

use crate::error::{Result, SequencerError};
use crate::sequencer::note::{Cell, InstrumentIndex, Note, NoteToggle, PitchIndex, Tick};
use std::collections::{BTreeMap, HashMap};

/// Valid coordinate ranges for notes in a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    /// Ticks are valid in `0..total_ticks`
    pub total_ticks: Tick,
    /// Pitches are valid in `0..pitch_range`
    pub pitch_range: u16,
    /// Instruments are valid in `0..instrument_count`
    pub instrument_count: usize,
}

impl GridBounds {
    pub fn new(total_ticks: Tick, pitch_range: u16, instrument_count: usize) -> Self {
        Self {
            total_ticks,
            pitch_range,
            instrument_count,
        }
    }

    /// Check a (tick, pitch, instrument) triple against the bounds
    ///
    /// # Errors
    /// Returns `InvalidArgument` naming the first coordinate that is out of range.
    pub fn validate(
        &self,
        tick: Tick,
        pitch: PitchIndex,
        instrument: InstrumentIndex,
    ) -> Result<()> {
        if tick >= self.total_ticks {
            return Err(SequencerError::out_of_range(
                "Tick",
                tick,
                self.total_ticks as usize,
            ));
        }

        if u16::from(pitch) >= self.pitch_range {
            return Err(SequencerError::out_of_range(
                "Pitch",
                pitch,
                self.pitch_range as usize,
            ));
        }

        if instrument as usize >= self.instrument_count {
            return Err(SequencerError::out_of_range(
                "Instrument",
                instrument,
                self.instrument_count,
            ));
        }

        Ok(())
    }
}

/// Sparse note collection with at most one note per (tick, pitch)
///
/// `toggle` is the only mutation. Lookups by cell are O(1) and the per-tick
/// index keeps `notes_at` independent of the total number of notes, which
/// matters because playback calls it on every tick.
#[derive(Debug, Clone)]
pub struct NoteStore {
    bounds: GridBounds,

    /// Notes keyed by their cell
    notes: HashMap<Cell, Note>,

    /// Cells in insertion order
    order: Vec<Cell>,

    /// Pitches present at each tick, in insertion order
    by_tick: BTreeMap<Tick, Vec<PitchIndex>>,
}

impl NoteStore {
    /// Create an empty store
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            notes: HashMap::new(),
            order: Vec::new(),
            by_tick: BTreeMap::new(),
        }
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Toggle the cell at (tick, pitch)
    ///
    /// Removes and returns the note if the cell is occupied (whatever its
    /// instrument), otherwise inserts a new note with `instrument`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if any coordinate is out of range; the store
    /// is left untouched.
    pub fn toggle(
        &mut self,
        tick: Tick,
        pitch: PitchIndex,
        instrument: InstrumentIndex,
    ) -> Result<NoteToggle> {
        self.bounds.validate(tick, pitch, instrument)?;

        let cell = Cell::new(tick, pitch);

        if let Some(note) = self.notes.remove(&cell) {
            if let Some(index) = self.order.iter().position(|c| *c == cell) {
                self.order.remove(index);
            }

            if let Some(pitches) = self.by_tick.get_mut(&tick) {
                pitches.retain(|p| *p != pitch);
                if pitches.is_empty() {
                    self.by_tick.remove(&tick);
                }
            }

            return Ok(NoteToggle::Removed(note));
        }

        let note = Note::new(tick, pitch, instrument);
        self.notes.insert(cell, note);
        self.order.push(cell);
        self.by_tick.entry(tick).or_default().push(pitch);

        Ok(NoteToggle::Added(note))
    }

    /// All notes at `tick`, in insertion order
    pub fn notes_at(&self, tick: Tick) -> Vec<Note> {
        self.by_tick
            .get(&tick)
            .map(|pitches| {
                pitches
                    .iter()
                    .filter_map(|pitch| self.notes.get(&Cell::new(tick, *pitch)).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All notes ordered by tick; notes sharing a tick keep insertion order
    pub fn all_sorted_by_tick(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.iter().copied().collect();
        notes.sort_by_key(|note| note.tick);
        notes
    }

    /// Get the note at a cell
    pub fn get(&self, tick: Tick, pitch: PitchIndex) -> Option<&Note> {
        self.notes.get(&Cell::new(tick, pitch))
    }

    /// Check whether a cell is occupied
    pub fn contains(&self, tick: Tick, pitch: PitchIndex) -> bool {
        self.notes.contains_key(&Cell::new(tick, pitch))
    }

    /// Notes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.order.iter().filter_map(|cell| self.notes.get(cell))
    }

    /// Get the number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> NoteStore {
        NoteStore::new(GridBounds::new(400, 25, 6))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = store();

        let added = store.toggle(10, 12, 1).unwrap();
        assert_eq!(added, NoteToggle::Added(Note::new(10, 12, 1)));
        assert!(store.contains(10, 12));
        assert_eq!(store.len(), 1);

        let removed = store.toggle(10, 12, 1).unwrap();
        assert_eq!(removed, NoteToggle::Removed(Note::new(10, 12, 1)));
        assert!(!store.contains(10, 12));
        assert!(store.is_empty());
        assert!(store.notes_at(10).is_empty());
    }

    #[test]
    fn test_toggle_never_overwrites_instrument() {
        let mut store = store();
        store.toggle(3, 4, 0).unwrap();

        // A second toggle with another instrument removes the original note
        let result = store.toggle(3, 4, 5).unwrap();
        assert_eq!(result, NoteToggle::Removed(Note::new(3, 4, 0)));
        assert!(store.is_empty());

        // Re-adding picks up the new instrument
        store.toggle(3, 4, 5).unwrap();
        assert_eq!(store.get(3, 4).map(|n| n.instrument), Some(5));
    }

    #[test]
    fn test_notes_at_matches_tick_only() {
        let mut store = store();
        store.toggle(5, 0, 0).unwrap();
        store.toggle(6, 0, 0).unwrap();
        store.toggle(5, 20, 2).unwrap();
        store.toggle(5, 3, 1).unwrap();

        let notes = store.notes_at(5);
        assert_eq!(
            notes,
            vec![Note::new(5, 0, 0), Note::new(5, 20, 2), Note::new(5, 3, 1)]
        );
        assert_eq!(store.notes_at(6), vec![Note::new(6, 0, 0)]);
        assert!(store.notes_at(7).is_empty());
    }

    #[test]
    fn test_notes_at_after_removal_in_middle() {
        let mut store = store();
        store.toggle(8, 1, 0).unwrap();
        store.toggle(8, 2, 0).unwrap();
        store.toggle(8, 3, 0).unwrap();
        store.toggle(8, 2, 0).unwrap();

        assert_eq!(store.notes_at(8), vec![Note::new(8, 1, 0), Note::new(8, 3, 0)]);
    }

    #[test]
    fn test_all_sorted_by_tick_is_stable() {
        let mut store = store();
        store.toggle(50, 1, 0).unwrap();
        store.toggle(0, 9, 1).unwrap();
        store.toggle(50, 0, 2).unwrap();
        store.toggle(7, 4, 3).unwrap();

        let sorted = store.all_sorted_by_tick();
        assert_eq!(
            sorted,
            vec![
                Note::new(0, 9, 1),
                Note::new(7, 4, 3),
                Note::new(50, 1, 0),
                Note::new(50, 0, 2),
            ]
        );
    }

    #[test]
    fn test_iter_keeps_insertion_order() {
        let mut store = store();
        store.toggle(9, 0, 0).unwrap();
        store.toggle(1, 0, 0).unwrap();
        store.toggle(4, 0, 0).unwrap();
        store.toggle(1, 0, 0).unwrap();

        let ticks: Vec<Tick> = store.iter().map(|n| n.tick).collect();
        assert_eq!(ticks, vec![9, 4]);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut store = store();

        assert!(matches!(
            store.toggle(400, 0, 0),
            Err(SequencerError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.toggle(0, 25, 0),
            Err(SequencerError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.toggle(0, 0, 6),
            Err(SequencerError::InvalidArgument(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_edges_of_range_accepted() {
        let mut store = store();
        assert!(store.toggle(399, 24, 5).unwrap().is_added());
        assert!(store.toggle(0, 0, 0).unwrap().is_added());
    }
}
