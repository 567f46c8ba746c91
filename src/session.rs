// Editor Session - owns the grid, transport, history and exporter of one editing session
// The host drives it with UI events and timer polls, and receives output through an observer

use crate::command::{CommandManager, ToggleNoteCommand};
use crate::config::SequencerConfig;
use crate::error::Result;
use crate::export::{ExportArtifact, Exporter, IdSource};
use crate::instrument::InstrumentRegistry;
use crate::sequencer::note::{InstrumentIndex, Note, NoteToggle, PitchIndex, Tick};
use crate::sequencer::player::{PlaybackObserver, SequencerPlayer};
use crate::sequencer::store::NoteStore;
use crate::sequencer::timeline::Speed;
use crate::sequencer::transport::{
    PlayheadUpdate, TickOutcome, Transport, TransportObserver, TransportState,
};
use std::time::Instant;

/// Everything the session reports back to the host
pub trait SessionObserver: PlaybackObserver {
    /// A grid cell gained or lost a note
    fn note_changed(&mut self, _change: &NoteToggle) {}

    /// Play/pause/stop state changed
    fn transport_changed(&mut self, _state: TransportState) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PlaybackObserver for NullObserver {
    fn preview(&mut self, _sound_id: &str, _pitch: PitchIndex) -> Result<()> {
        Ok(())
    }
}

impl SessionObserver for NullObserver {}

/// Playhead reports from seek/stop go straight to the session observer
struct PlayheadForwarder<'a> {
    observer: &'a mut dyn SessionObserver,
}

impl TransportObserver for PlayheadForwarder<'_> {
    fn trigger(&mut self, _note: &Note) {}

    fn playhead(&mut self, update: &PlayheadUpdate) {
        self.observer.playhead(update);
    }
}

/// One editing session
pub struct EditorSession {
    config: SequencerConfig,
    registry: InstrumentRegistry,
    store: NoteStore,
    transport: Transport,
    history: CommandManager,
    exporter: Exporter,
    selected_instrument: InstrumentIndex,
}

impl EditorSession {
    /// Create a session from a validated configuration
    pub fn new(config: SequencerConfig) -> Result<Self> {
        config.validate()?;

        let registry = config.registry()?;
        let store = NoteStore::new(config.grid_bounds());
        let mut transport = Transport::new(config.timeline());
        transport.set_loop_on_finish(config.loop_on_finish);
        transport.set_speed(Speed::new(config.default_speed));
        let exporter = Exporter::new(config.export_target);

        log::info!(
            "Session created: {} ticks at {} ticks/s, {} pitches, {} instruments",
            config.total_ticks,
            config.ticks_per_second,
            config.pitch_range,
            registry.len()
        );

        Ok(Self {
            config,
            registry,
            store,
            transport,
            history: CommandManager::new(),
            exporter,
            selected_instrument: 0,
        })
    }

    /// Create a session whose exports draw identifiers from `ids`
    pub fn with_id_source(config: SequencerConfig, ids: Box<dyn IdSource>) -> Result<Self> {
        let mut session = Self::new(config)?;
        session.exporter.set_id_source(ids);
        Ok(session)
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn registry(&self) -> &InstrumentRegistry {
        &self.registry
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    pub fn exporter_mut(&mut self) -> &mut Exporter {
        &mut self.exporter
    }

    pub fn selected_instrument(&self) -> InstrumentIndex {
        self.selected_instrument
    }

    /// Choose the instrument used by subsequent toggles
    pub fn select_instrument(&mut self, instrument: InstrumentIndex) -> Result<()> {
        self.registry.check_index(instrument)?;
        self.selected_instrument = instrument;
        log::debug!("Selected instrument {}", instrument);
        Ok(())
    }

    /// Toggle a cell with the selected instrument
    pub fn toggle(
        &mut self,
        tick: Tick,
        pitch: PitchIndex,
        observer: &mut dyn SessionObserver,
    ) -> Result<NoteToggle> {
        let command = ToggleNoteCommand::new(tick, pitch, self.selected_instrument);
        let change = self.history.execute(Box::new(command), &mut self.store)?;
        observer.note_changed(&change);
        Ok(change)
    }

    pub fn undo(&mut self, observer: &mut dyn SessionObserver) -> Result<NoteToggle> {
        let change = self.history.undo(&mut self.store)?;
        observer.note_changed(&change);
        Ok(change)
    }

    pub fn redo(&mut self, observer: &mut dyn SessionObserver) -> Result<NoteToggle> {
        let change = self.history.redo(&mut self.store)?;
        observer.note_changed(&change);
        Ok(change)
    }

    /// Set the playback speed; invalid values fall back to 1.0
    pub fn set_speed(&mut self, value: f64) {
        self.transport.set_speed(Speed::new(value));
    }

    /// Set the playback speed from UI text; unparsable text falls back to 1.0
    pub fn set_speed_text(&mut self, text: &str) {
        self.transport.set_speed(Speed::parse(text));
    }

    pub fn play(&mut self, observer: &mut dyn SessionObserver) -> bool {
        let started = self.transport.play();
        if started {
            observer.transport_changed(self.transport.state());
        }
        started
    }

    pub fn pause(&mut self, observer: &mut dyn SessionObserver) -> bool {
        let paused = self.transport.pause();
        if paused {
            observer.transport_changed(self.transport.state());
        }
        paused
    }

    pub fn stop(&mut self, observer: &mut dyn SessionObserver) {
        let was_stopped = self.transport.state() == TransportState::Stopped;
        self.transport.stop(&mut PlayheadForwarder { observer: &mut *observer });
        if !was_stopped {
            observer.transport_changed(self.transport.state());
        }
    }

    /// Move the playhead to `fraction` of the piece (clamped to [0, 1])
    pub fn seek(&mut self, fraction: f64, observer: &mut dyn SessionObserver) {
        let before = self.transport.state();
        self.transport.seek(
            fraction,
            &mut PlayheadForwarder {
                observer: &mut *observer,
            },
        );
        if self.transport.state() != before {
            observer.transport_changed(self.transport.state());
        }
    }

    /// Perform one tick advance immediately
    pub fn advance(&mut self, observer: &mut dyn SessionObserver) -> TickOutcome {
        let outcome = {
            let mut player = SequencerPlayer::new(&self.registry, &mut *observer);
            self.transport.advance(&self.store, &mut player)
        };
        if outcome == TickOutcome::Finished {
            observer.transport_changed(self.transport.state());
        }
        outcome
    }

    /// Perform every tick advance that has fallen due by `now`
    pub fn poll(&mut self, now: Instant, observer: &mut dyn SessionObserver) -> usize {
        let was_playing = self.transport.state().is_playing();
        let fired = {
            let mut player = SequencerPlayer::new(&self.registry, &mut *observer);
            self.transport.poll(now, &self.store, &mut player)
        };
        if was_playing && !self.transport.state().is_playing() {
            observer.transport_changed(self.transport.state());
        }
        fired
    }

    /// Export the current notes with the current speed
    pub fn export(&mut self) -> Result<ExportArtifact> {
        self.exporter
            .export(&self.store, self.transport.speed().value(), &self.registry)
    }
}
