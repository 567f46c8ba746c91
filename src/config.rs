// Session configuration
// Fixed constants of an editing session, loaded from RON with defaults for missing fields

use crate::error::{Result, SequencerError};
use crate::export::ExportTarget;
use crate::instrument::{Instrument, InstrumentRegistry, MAX_INSTRUMENTS};
use crate::sequencer::note::Tick;
use crate::sequencer::pitch::DEFAULT_PITCH_RANGE;
use crate::sequencer::store::GridBounds;
use crate::sequencer::timeline::{DEFAULT_TICKS_PER_SECOND, DEFAULT_TOTAL_TICKS, TickTimeline};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Largest supported number of pitch rows
pub const MAX_PITCH_RANGE: u16 = 128;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Length of the piece in ticks
    pub total_ticks: Tick,
    /// Nominal playback rate at speed 1.0
    pub ticks_per_second: u32,
    /// Number of pitch rows (index 12 is the reference pitch)
    pub pitch_range: u16,
    /// Rewind and keep playing when the end is reached
    pub loop_on_finish: bool,
    /// Speed used until the UI sends one
    pub default_speed: f64,
    /// Output language for exports
    pub export_target: ExportTarget,
    /// Instrument palette, in index order
    pub instruments: Vec<Instrument>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            total_ticks: DEFAULT_TOTAL_TICKS,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            pitch_range: DEFAULT_PITCH_RANGE,
            loop_on_finish: false,
            default_speed: 1.0,
            export_target: ExportTarget::default(),
            instruments: InstrumentRegistry::default_instruments(),
        }
    }
}

impl SequencerConfig {
    /// Load and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading sequencer configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Render as pretty RON
    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Check that the constants describe a usable session
    pub fn validate(&self) -> Result<()> {
        if self.total_ticks == 0 {
            return Err(SequencerError::InvalidConfig(
                "total_ticks must be > 0".to_string(),
            ));
        }

        if self.ticks_per_second == 0 {
            return Err(SequencerError::InvalidConfig(
                "ticks_per_second must be > 0".to_string(),
            ));
        }

        if self.pitch_range == 0 || self.pitch_range > MAX_PITCH_RANGE {
            return Err(SequencerError::InvalidConfig(format!(
                "pitch_range must be between 1 and {}",
                MAX_PITCH_RANGE
            )));
        }

        if !(self.default_speed.is_finite() && self.default_speed > 0.0) {
            return Err(SequencerError::InvalidConfig(
                "default_speed must be a positive number".to_string(),
            ));
        }

        if self.instruments.is_empty() || self.instruments.len() > MAX_INSTRUMENTS {
            return Err(SequencerError::InvalidConfig(format!(
                "instruments must list between 1 and {} entries",
                MAX_INSTRUMENTS
            )));
        }

        Ok(())
    }

    pub fn timeline(&self) -> TickTimeline {
        TickTimeline::new(self.total_ticks, self.ticks_per_second)
    }

    pub fn registry(&self) -> Result<InstrumentRegistry> {
        InstrumentRegistry::new(self.instruments.clone())
    }

    pub fn grid_bounds(&self) -> GridBounds {
        GridBounds::new(self.total_ticks, self.pitch_range, self.instruments.len())
    }
}

impl FromStr for SequencerConfig {
    type Err = SequencerError;

    /// Parse and validate a RON configuration string
    fn from_str(content: &str) -> Result<Self> {
        let config: SequencerConfig = ron::from_str(content)?;
        config.validate()?;
        log::debug!("{:#?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Color;

    #[test]
    fn test_defaults() {
        let config = SequencerConfig::default();

        assert_eq!(config.total_ticks, 400);
        assert_eq!(config.ticks_per_second, 20);
        assert_eq!(config.pitch_range, 25);
        assert!(!config.loop_on_finish);
        assert_eq!(config.export_target, ExportTarget::JavaScript);
        assert!(config.validate().is_ok());
        assert_eq!(config.timeline().total_seconds(), 20);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = SequencerConfig::from_str("(total_ticks: 800, loop_on_finish: true)").unwrap();

        assert_eq!(config.total_ticks, 800);
        assert!(config.loop_on_finish);
        assert_eq!(config.ticks_per_second, 20);
        assert_eq!(config.instruments.len(), 6);
    }

    #[test]
    fn test_instruments_from_ron() {
        let config = SequencerConfig::from_str(
            r##"(
                export_target: lua,
                instruments: [
                    (name: "Lead", sound_id: "lead", color: "#ff0000"),
                    (name: "Kick", sound_id: "kick", color: "#00ff00"),
                ],
            )"##,
        )
        .unwrap();

        assert_eq!(config.export_target, ExportTarget::Lua);
        assert_eq!(config.instruments[1].sound_id, "kick");
        assert_eq!(config.instruments[0].color, Color::from_rgb(255, 0, 0));
        assert_eq!(config.grid_bounds().instrument_count, 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for content in [
            "(total_ticks: 0)",
            "(ticks_per_second: 0)",
            "(pitch_range: 0)",
            "(pitch_range: 200)",
            "(default_speed: -1.0)",
            "(instruments: [])",
        ] {
            let result = SequencerConfig::from_str(content);
            assert!(
                matches!(result, Err(SequencerError::InvalidConfig(_))),
                "{} should be rejected",
                content
            );
        }
    }

    #[test]
    fn test_parse_via_str() {
        let config: SequencerConfig = "(pitch_range: 13)".parse().unwrap();
        assert_eq!(config.pitch_range, 13);

        let result = "(pitch_range: 0)".parse::<SequencerConfig>();
        assert!(matches!(result, Err(SequencerError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_ron() {
        let result = SequencerConfig::from_str("(total_ticks: \"many\")");
        assert!(matches!(result, Err(SequencerError::RonParse(_))));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SequencerConfig {
            loop_on_finish: true,
            default_speed: 1.25,
            ..Default::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(SequencerConfig::from_str(&text).unwrap(), config);
    }
}
