// Instrument registry - fixed, ordered list of playable sounds
// The index of an instrument in the registry is what notes and exports refer to

pub mod color;

pub use color::Color;

use crate::error::{Result, SequencerError};
use crate::sequencer::note::InstrumentIndex;
use serde::{Deserialize, Serialize};

/// Maximum number of instruments (indices must fit in `InstrumentIndex`)
pub const MAX_INSTRUMENTS: usize = InstrumentIndex::MAX as usize + 1;

/// A playable instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Display name shown in the palette
    pub name: String,
    /// Identifier of the sound resource played for this instrument
    pub sound_id: String,
    /// Cell color used by the grid
    pub color: Color,
}

impl Instrument {
    pub fn new(name: impl Into<String>, sound_id: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            sound_id: sound_id.into(),
            color,
        }
    }
}

/// Ordered, immutable list of instruments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentRegistry {
    instruments: Vec<Instrument>,
}

impl InstrumentRegistry {
    /// Build a registry from an ordered list
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the list is empty or longer than `MAX_INSTRUMENTS`.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self> {
        if instruments.is_empty() {
            return Err(SequencerError::InvalidConfig(
                "Instrument registry cannot be empty".to_string(),
            ));
        }

        if instruments.len() > MAX_INSTRUMENTS {
            return Err(SequencerError::InvalidConfig(format!(
                "Instrument registry cannot hold more than {} instruments",
                MAX_INSTRUMENTS
            )));
        }

        Ok(Self { instruments })
    }

    /// The instruments available out of the box
    pub fn default_instruments() -> Vec<Instrument> {
        vec![
            Instrument::new("Piano", "piano", Color::from_rgb(74, 144, 217)),
            Instrument::new("Bass", "bass", Color::from_rgb(208, 2, 27)),
            Instrument::new("Drum", "drum", Color::from_rgb(245, 166, 35)),
            Instrument::new("Bell", "bell", Color::from_rgb(126, 211, 33)),
            Instrument::new("Pluck", "pluck", Color::from_rgb(144, 19, 254)),
            Instrument::new("Flute", "flute", Color::from_rgb(80, 227, 194)),
        ]
    }

    pub fn get(&self, index: InstrumentIndex) -> Option<&Instrument> {
        self.instruments.get(index as usize)
    }

    /// Sound id for an instrument index
    pub fn sound_id(&self, index: InstrumentIndex) -> Option<&str> {
        self.get(index).map(|instrument| instrument.sound_id.as_str())
    }

    /// Sound ids in registry order (this is the export instrument table)
    pub fn sound_ids(&self) -> Vec<String> {
        self.instruments
            .iter()
            .map(|instrument| instrument.sound_id.clone())
            .collect()
    }

    /// Fails with `InvalidArgument` when the index does not name an instrument
    pub fn check_index(&self, index: InstrumentIndex) -> Result<()> {
        if (index as usize) < self.instruments.len() {
            Ok(())
        } else {
            Err(SequencerError::out_of_range(
                "Instrument",
                index,
                self.instruments.len(),
            ))
        }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }
}

impl Default for InstrumentRegistry {
    fn default() -> Self {
        Self {
            instruments: Self::default_instruments(),
        }
    }
}
