// Timeline - tick-based time representation
// Handles conversion between ticks, progress fractions, seconds and timer periods

use crate::sequencer::note::Tick;
use std::fmt;
use std::time::Duration;

/// Default length of a piece in ticks
pub const DEFAULT_TOTAL_TICKS: Tick = 400;

/// Default playback rate at speed 1.0
pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;

/// Playback speed multiplier
///
/// Always finite and strictly positive: anything else is replaced by 1.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    pub const NORMAL: Speed = Speed(1.0);

    /// Normalize a raw speed value
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            log::warn!("Invalid speed {}, falling back to {}", value, Self::NORMAL.0);
            Self::NORMAL
        }
    }

    /// Normalize speed text coming from an input field
    ///
    /// Empty or non-numeric text gives the normal speed.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) => Self::new(value),
            Err(_) => {
                log::warn!("Speed '{}' is not a number, using {}", text, Self::NORMAL.0);
                Self::NORMAL
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Fixed tick grid of a piece: its length and nominal rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimeline {
    total_ticks: Tick,
    ticks_per_second: u32,
}

impl TickTimeline {
    /// Creates a new timeline
    pub fn new(total_ticks: Tick, ticks_per_second: u32) -> Self {
        assert!(total_ticks > 0, "Timeline must have at least one tick");
        assert!(ticks_per_second > 0, "Ticks per second must be > 0");
        Self {
            total_ticks,
            ticks_per_second,
        }
    }

    pub fn total_ticks(&self) -> Tick {
        self.total_ticks
    }

    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Fraction of the piece reached at `tick`
    pub fn progress(&self, tick: Tick) -> f64 {
        f64::from(tick) / f64::from(self.total_ticks)
    }

    /// Tick reached by seeking to `fraction` of the piece
    ///
    /// The fraction is clamped to [0, 1]; NaN seeks to the start.
    pub fn tick_for_fraction(&self, fraction: f64) -> Tick {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let tick = (fraction * f64::from(self.total_ticks)).floor() as Tick;
        tick.min(self.total_ticks)
    }

    /// Whole seconds elapsed at `tick` (nominal, independent of speed)
    pub fn elapsed_seconds(&self, tick: Tick) -> u32 {
        tick / self.ticks_per_second
    }

    /// Whole seconds in the full piece
    pub fn total_seconds(&self) -> u32 {
        self.elapsed_seconds(self.total_ticks)
    }

    /// Time between two tick advances at the given speed
    pub fn tick_period(&self, speed: Speed) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second) / speed.value())
    }
}

impl Default for TickTimeline {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_TICKS, DEFAULT_TICKS_PER_SECOND)
    }
}

/// Format seconds as `m:ss`
///
/// Minutes are not padded and grow without bound (no hours field).
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
