// Step Sequencer - Library exports for the demo host, tests and benchmarks

pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod instrument;
pub mod sequencer;
pub mod session;

// Re-export commonly used types for convenience
pub use command::{CommandManager, ToggleNoteCommand, UndoableCommand};
pub use config::SequencerConfig;
pub use error::{Result, SequencerError};
pub use export::{
    ExportArtifact, ExportTarget, ExportedSong, Exporter, FixedIdSource, IdSource,
    RandomIdSource, SoundTrigger,
};
pub use instrument::{Color, Instrument, InstrumentRegistry};
pub use sequencer::{
    GridBounds, Note, NoteStore, NoteToggle, PlaybackObserver, PlayheadUpdate, Speed,
    TickOutcome, TickTimeline, Transport, TransportState, pitch_ratio,
};
pub use session::{EditorSession, NullObserver, SessionObserver};
