// Sequencer module
// Note model, tick timeline, transport and playback

pub mod note;
pub mod pitch;
pub mod player;
pub mod store;
pub mod timeline;
pub mod transport;

pub use note::{Cell, InstrumentIndex, Note, NoteToggle, PitchIndex, Tick};
pub use pitch::{CENTER_PITCH, pitch_label, pitch_ratio};
pub use player::{PlaybackObserver, SequencerPlayer};
pub use store::{GridBounds, NoteStore};
pub use timeline::{Speed, TickTimeline, format_time};
pub use transport::{PlayheadUpdate, TickOutcome, Transport, TransportObserver, TransportState};
