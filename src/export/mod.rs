// Song Export - Encodes the note store as a module for a game scripting runtime
//
// Every export is a fresh snapshot: notes sorted by tick, the speed, the
// instrument sound table and a random identifier in [100, 999]. Identifiers are
// not checked against earlier exports, so two exports may share one.

pub mod script;
pub mod song;

pub use song::{ExportedSong, NoteTuple, SoundTrigger};

use crate::error::Result;
use crate::instrument::InstrumentRegistry;
use crate::sequencer::store::NoteStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Smallest export identifier
pub const MIN_EXPORT_ID: u16 = 100;

/// Largest export identifier
pub const MAX_EXPORT_ID: u16 = 999;

/// Source of export identifiers
pub trait IdSource: Send {
    /// Next identifier, in `MIN_EXPORT_ID..=MAX_EXPORT_ID`
    fn next_id(&mut self) -> u16;
}

/// Uniformly random identifiers
pub struct RandomIdSource {
    rng: StdRng,
}

impl RandomIdSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of identifiers
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIdSource {
    fn next_id(&mut self) -> u16 {
        self.rng.gen_range(MIN_EXPORT_ID..=MAX_EXPORT_ID)
    }
}

/// Always returns the same identifier
#[derive(Debug, Clone, Copy)]
pub struct FixedIdSource(pub u16);

impl IdSource for FixedIdSource {
    fn next_id(&mut self) -> u16 {
        self.0
    }
}

/// Output language of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    /// ES module with an embedded `getNotesAt(tick)`
    #[default]
    JavaScript,
    /// Lua module with an embedded `getNotesAt(tick)`
    Lua,
    /// Plain data document with no embedded query function
    ///
    /// Readers load it with `decode_json` and query it through
    /// `ExportedSong::query`. Non-finite speeds are written as the strings
    /// `"NaN"`, `"Infinity"` and `"-Infinity"`.
    Json,
}

impl ExportTarget {
    /// Get file extension for this target
    pub fn extension(&self) -> &'static str {
        match self {
            ExportTarget::JavaScript => "js",
            ExportTarget::Lua => "lua",
            ExportTarget::Json => "json",
        }
    }
}

/// Result of an export: text to save plus a suggested filename
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub contents: String,
    pub target: ExportTarget,
    pub song: ExportedSong,
}

impl ExportArtifact {
    pub fn id(&self) -> u16 {
        self.song.id
    }

    /// Bytes handed to the download collaborator
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Song exporter
pub struct Exporter {
    target: ExportTarget,
    ids: Box<dyn IdSource>,
}

impl Exporter {
    /// Create an exporter with random identifiers
    pub fn new(target: ExportTarget) -> Self {
        Self::with_id_source(target, Box::new(RandomIdSource::new()))
    }

    pub fn with_id_source(target: ExportTarget, ids: Box<dyn IdSource>) -> Self {
        Self { target, ids }
    }

    pub fn target(&self) -> ExportTarget {
        self.target
    }

    pub fn set_target(&mut self, target: ExportTarget) {
        self.target = target;
    }

    pub fn set_id_source(&mut self, ids: Box<dyn IdSource>) {
        self.ids = ids;
    }

    /// Export the store
    ///
    /// `speed` is embedded exactly as given.
    ///
    /// # Errors
    /// Only the JSON target can fail (serialization error).
    pub fn export(
        &mut self,
        store: &NoteStore,
        speed: f64,
        registry: &InstrumentRegistry,
    ) -> Result<ExportArtifact> {
        let id = self.ids.next_id();
        let song = ExportedSong::from_store(id, speed, store, registry);
        let contents = encode(&song, self.target)?;
        let filename = format!("{}.{}", song.name(), self.target.extension());

        log::info!(
            "Exported {} notes as {} ({} bytes)",
            song.data.len(),
            filename,
            contents.len()
        );

        Ok(ExportArtifact {
            filename,
            contents,
            target: self.target,
            song,
        })
    }
}

/// Encode a song for a target
pub fn encode(song: &ExportedSong, target: ExportTarget) -> Result<String> {
    Ok(match target {
        ExportTarget::JavaScript => script::write_javascript(song),
        ExportTarget::Lua => script::write_lua(song),
        ExportTarget::Json => serde_json::to_string_pretty(song)?,
    })
}

/// Read back a JSON export
pub fn decode_json(contents: &str) -> Result<ExportedSong> {
    Ok(serde_json::from_str(contents)?)
}
