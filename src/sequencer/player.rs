// Sequencer Player - turns transport triggers into sound previews
// Resolves instruments to sound ids and keeps preview failures away from the transport

use crate::error::{Result, SequencerError};
use crate::instrument::InstrumentRegistry;
use crate::sequencer::note::{Note, PitchIndex};
use crate::sequencer::transport::{PlayheadUpdate, TransportObserver};

/// Host side of playback: plays sounds and displays the playhead
pub trait PlaybackObserver {
    /// Play a sound at a pitch index
    ///
    /// Return `SequencerError::Unavailable` when the sound cannot be played.
    /// Errors are logged and never stop playback.
    fn preview(&mut self, sound_id: &str, pitch: PitchIndex) -> Result<()>;

    /// Playhead moved
    fn playhead(&mut self, _update: &PlayheadUpdate) {}
}

/// Adapts a `PlaybackObserver` to the transport
pub struct SequencerPlayer<'a, O: PlaybackObserver + ?Sized> {
    registry: &'a InstrumentRegistry,
    observer: &'a mut O,
    triggered: usize,
    failed: usize,
}

impl<'a, O: PlaybackObserver + ?Sized> SequencerPlayer<'a, O> {
    pub fn new(registry: &'a InstrumentRegistry, observer: &'a mut O) -> Self {
        Self {
            registry,
            observer,
            triggered: 0,
            failed: 0,
        }
    }

    /// Number of previews played successfully
    pub fn triggered(&self) -> usize {
        self.triggered
    }

    /// Number of previews that failed
    pub fn failed(&self) -> usize {
        self.failed
    }

    fn preview_note(&mut self, note: &Note) -> Result<()> {
        let sound_id = self.registry.sound_id(note.instrument).ok_or_else(|| {
            SequencerError::Unavailable(format!("no sound for instrument {}", note.instrument))
        })?;
        self.observer.preview(sound_id, note.pitch)
    }
}

impl<O: PlaybackObserver + ?Sized> TransportObserver for SequencerPlayer<'_, O> {
    fn trigger(&mut self, note: &Note) {
        match self.preview_note(note) {
            Ok(()) => self.triggered += 1,
            Err(e) => {
                self.failed += 1;
                log::warn!(
                    "Preview failed at tick {} (pitch {}): {}",
                    note.tick,
                    note.pitch,
                    e
                );
            }
        }
    }

    fn playhead(&mut self, update: &PlayheadUpdate) {
        self.observer.playhead(update);
    }
}
