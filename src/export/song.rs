// Structured form of an exported song

use crate::instrument::InstrumentRegistry;
use crate::sequencer::note::{InstrumentIndex, PitchIndex, Tick};
use crate::sequencer::pitch::pitch_ratio;
use crate::sequencer::store::NoteStore;
use serde::{Deserialize, Serialize};

/// Compact note encoding: `[tick, instrumentIndex, pitchIndex]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTuple(pub Tick, pub InstrumentIndex, pub PitchIndex);

impl NoteTuple {
    pub fn tick(&self) -> Tick {
        self.0
    }

    pub fn instrument(&self) -> InstrumentIndex {
        self.1
    }

    pub fn pitch(&self) -> PitchIndex {
        self.2
    }
}

/// One sound to play, as returned by a tick query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundTrigger {
    pub sound: String,
    pub pitch: f64,
}

/// Everything an export carries, independent of the output language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedSong {
    pub id: u16,
    #[serde(with = "speed_value")]
    pub speed: f64,
    pub instruments: Vec<String>,
    pub data: Vec<NoteTuple>,
}

impl ExportedSong {
    /// Snapshot a store in chronological order
    pub fn from_store(
        id: u16,
        speed: f64,
        store: &NoteStore,
        registry: &InstrumentRegistry,
    ) -> Self {
        let data = store
            .all_sorted_by_tick()
            .into_iter()
            .map(|note| NoteTuple(note.tick, note.instrument, note.pitch))
            .collect();

        Self {
            id,
            speed,
            instruments: registry.sound_ids(),
            data,
        }
    }

    /// Identifier-suffixed name of the exported structure, e.g. `music123`
    pub fn name(&self) -> String {
        format!("music{}", self.id)
    }

    /// Sounds to play at `tick`, with pitch ratios at full precision
    ///
    /// Entries whose instrument index is missing from the table are skipped.
    pub fn query(&self, tick: Tick) -> Vec<SoundTrigger> {
        self.data
            .iter()
            .filter(|entry| entry.tick() == tick)
            .filter_map(|entry| {
                self.instruments
                    .get(entry.instrument() as usize)
                    .map(|sound| SoundTrigger {
                        sound: sound.clone(),
                        pitch: pitch_ratio(entry.pitch()),
                    })
            })
            .collect()
    }
}

/// Speed as a JSON number, or `"NaN"`, `"Infinity"`, `"-Infinity"`
///
/// JSON has no literal for non-finite numbers; serde_json would write `null`
/// and then refuse to read it back.
mod speed_value {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value > 0.0 {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::custom(format!("invalid speed '{}'", other))),
            },
        }
    }
}
