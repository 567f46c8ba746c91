// Transport - Playback control and state management
// Controls play/pause/stop/seek, the playhead tick and the tick timer

use super::note::{Note, Tick};
use super::store::NoteStore;
use super::timeline::{Speed, TickTimeline, format_time};
use std::time::{Duration, Instant};

/// Transport state (play/pause/stop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl TransportState {
    /// Check if transport is playing
    pub fn is_playing(&self) -> bool {
        matches!(self, TransportState::Playing)
    }

    /// Check if transport is stopped or paused
    pub fn is_stopped(&self) -> bool {
        matches!(self, TransportState::Stopped | TransportState::Paused)
    }
}

/// Playhead position reported to the UI
#[derive(Debug, Clone, PartialEq)]
pub struct PlayheadUpdate {
    /// Tick the playhead is on
    pub tick: Tick,
    /// `tick / total_ticks`
    pub progress: f64,
    /// Elapsed time, `m:ss`
    pub elapsed: String,
    /// Length of the piece, `m:ss`
    pub total: String,
}

/// Receives what the transport produces while it runs
pub trait TransportObserver {
    /// Called for every note on the tick being played
    fn trigger(&mut self, note: &Note);

    /// Called whenever the playhead moves
    fn playhead(&mut self, update: &PlayheadUpdate);
}

/// Result of a single tick advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Transport was not playing; nothing happened
    Idle,
    /// The given tick was played
    Played(Tick),
    /// The end was reached and the transport stopped
    Finished,
}

/// Longest lag the timer catches up on after the host stops polling
pub const MAX_CATCH_UP: Duration = Duration::from_secs(1);

/// Periodic tick timer, owned by the transport
///
/// The timer is armed lazily: the first `poll` after it is created anchors the
/// schedule, and one tick falls due every `period` after that. Ticks missed
/// within `MAX_CATCH_UP` are replayed; after a longer stall the missed ticks
/// are dropped and the schedule restarts from `now` with a single tick.
#[derive(Debug, Clone, Copy)]
struct TickTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Consume one due tick, if any
    fn take_due(&mut self, now: Instant) -> bool {
        let mut due = *self.next_due.get_or_insert(now + self.period);
        if due > now {
            return false;
        }
        let lag = now.duration_since(due);
        if lag > MAX_CATCH_UP {
            log::warn!("Tick timer {:?} behind, skipping missed ticks", lag);
            due = now;
        }
        self.next_due = Some(due + self.period);
        true
    }
}

/// Transport controller
/// Manages playback state, playhead position and tick scheduling
pub struct Transport {
    timeline: TickTimeline,
    state: TransportState,
    current_tick: Tick,
    speed: Speed,
    loop_on_finish: bool,

    /// Present exactly while playing
    timer: Option<TickTimer>,
}

impl Transport {
    /// Create new transport, stopped at tick 0
    pub fn new(timeline: TickTimeline) -> Self {
        Self {
            timeline,
            state: TransportState::Stopped,
            current_tick: 0,
            speed: Speed::NORMAL,
            loop_on_finish: false,
            timer: None,
        }
    }

    pub fn timeline(&self) -> &TickTimeline {
        &self.timeline
    }

    /// Get current state
    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Set the speed; a running timer is re-armed with the new period
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        if let Some(timer) = self.timer.as_mut() {
            *timer = TickTimer::new(self.timeline.tick_period(speed));
        }
    }

    pub fn is_loop_on_finish(&self) -> bool {
        self.loop_on_finish
    }

    /// Enable/disable rewinding to the start instead of stopping at the end
    pub fn set_loop_on_finish(&mut self, enabled: bool) {
        self.loop_on_finish = enabled;
    }

    /// Whether a tick timer is currently scheduled
    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    /// Time between tick advances at the current speed
    pub fn tick_period(&self) -> Duration {
        self.timeline.tick_period(self.speed)
    }

    /// Play from the current tick
    ///
    /// Returns false (and changes nothing) if already playing, so there is
    /// never more than one timer.
    pub fn play(&mut self) -> bool {
        if self.state.is_playing() {
            return false;
        }

        let period = self.tick_period();
        self.timer = Some(TickTimer::new(period));
        self.state = TransportState::Playing;
        log::debug!(
            "Transport playing from tick {} (period {:?})",
            self.current_tick,
            period
        );
        true
    }

    /// Pause (keep current tick)
    ///
    /// Returns false if the transport was not playing.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }

        self.timer = None;
        self.state = TransportState::Paused;
        log::debug!("Transport paused at tick {}", self.current_tick);
        true
    }

    /// Stop (reset tick to 0)
    pub fn stop(&mut self, observer: &mut dyn TransportObserver) {
        self.pause();
        self.state = TransportState::Stopped;
        self.current_tick = 0;
        log::debug!("Transport stopped");
        self.emit_playhead(observer);
    }

    /// Move the playhead to `fraction` of the piece
    ///
    /// A playing transport is paused around the move and resumed afterwards,
    /// so no tick can fire halfway through a seek. Seeking to the very end
    /// leaves it paused there.
    pub fn seek(&mut self, fraction: f64, observer: &mut dyn TransportObserver) {
        let was_playing = self.pause();

        self.current_tick = self.timeline.tick_for_fraction(fraction);
        log::debug!("Transport seek to tick {}", self.current_tick);
        self.emit_playhead(observer);

        if was_playing && self.current_tick < self.timeline.total_ticks() {
            self.play();
        }
    }

    /// Perform one tick advance
    ///
    /// Plays every note on the current tick, reports the playhead, then moves
    /// to the next tick. At the end of the piece the transport stops (or
    /// rewinds when loop-on-finish is enabled) without playing anything.
    pub fn advance(
        &mut self,
        store: &NoteStore,
        observer: &mut dyn TransportObserver,
    ) -> TickOutcome {
        if !self.state.is_playing() {
            return TickOutcome::Idle;
        }

        if self.current_tick >= self.timeline.total_ticks() {
            if !self.loop_on_finish {
                self.stop(observer);
                return TickOutcome::Finished;
            }
            log::debug!("Transport looping back to start");
            self.current_tick = 0;
        }

        let tick = self.current_tick;
        for note in store.notes_at(tick) {
            observer.trigger(&note);
        }
        self.emit_playhead(observer);
        self.current_tick += 1;

        TickOutcome::Played(tick)
    }

    /// Perform every tick advance that has fallen due by `now`
    ///
    /// Returns the number of advances performed. Does nothing when no timer
    /// is scheduled.
    pub fn poll(
        &mut self,
        now: Instant,
        store: &NoteStore,
        observer: &mut dyn TransportObserver,
    ) -> usize {
        let mut fired = 0;

        while let Some(timer) = self.timer.as_mut() {
            if !timer.take_due(now) {
                break;
            }
            self.advance(store, observer);
            fired += 1;
        }

        fired
    }

    /// Build the playhead report for the current tick
    pub fn playhead(&self) -> PlayheadUpdate {
        PlayheadUpdate {
            tick: self.current_tick,
            progress: self.timeline.progress(self.current_tick),
            elapsed: format_time(self.timeline.elapsed_seconds(self.current_tick)),
            total: format_time(self.timeline.total_seconds()),
        }
    }

    fn emit_playhead(&self, observer: &mut dyn TransportObserver) {
        observer.playhead(&self.playhead());
    }
}
