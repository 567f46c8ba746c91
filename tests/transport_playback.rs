// Integration test for playback through an editor session
// Drives a full run of the transport and checks what the host receives

use step_sequencer::sequencer::{Tick, pitch_ratio};
use step_sequencer::{
    EditorSession, NullObserver, PlaybackObserver, PlayheadUpdate, Result, SequencerConfig,
    SequencerError, SessionObserver, TickOutcome, TransportState,
};
use std::time::{Duration, Instant};

#[derive(Default)]
struct RecordingHost {
    previews: Vec<(String, u8)>,
    updates: Vec<PlayheadUpdate>,
    states: Vec<TransportState>,
    reject: Option<String>,
}

impl PlaybackObserver for RecordingHost {
    fn preview(&mut self, sound_id: &str, pitch: u8) -> Result<()> {
        if self.reject.as_deref() == Some(sound_id) {
            return Err(SequencerError::Unavailable(format!("{} not loaded", sound_id)));
        }
        self.previews.push((sound_id.to_string(), pitch));
        Ok(())
    }

    fn playhead(&mut self, update: &PlayheadUpdate) {
        self.updates.push(update.clone());
    }
}

impl SessionObserver for RecordingHost {
    fn transport_changed(&mut self, state: TransportState) {
        self.states.push(state);
    }
}

fn session_with_ticks(total_ticks: Tick) -> EditorSession {
    EditorSession::new(SequencerConfig {
        total_ticks,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_full_run_from_stopped() {
    let mut session = session_with_ticks(400);
    let mut host = RecordingHost::default();

    session.play(&mut host);
    for _ in 0..400 {
        assert!(matches!(session.advance(&mut host), TickOutcome::Played(_)));
    }
    assert_eq!(session.advance(&mut host), TickOutcome::Finished);

    assert_eq!(session.transport().state(), TransportState::Stopped);
    assert_eq!(session.transport().current_tick(), 0);

    // Updates while playing, then the reset from stop
    let (played, reset) = host.updates.split_at(400);
    assert!(played.iter().enumerate().all(|(i, u)| u.tick == i as Tick));
    assert!(played.iter().all(|u| u.tick < 400));
    assert_eq!(reset.len(), 1);
    assert_eq!(reset[0].tick, 0);

    assert_eq!(played[399].elapsed, "0:19");
    assert_eq!(played[399].total, "0:20");
    assert_eq!(host.states, vec![TransportState::Playing, TransportState::Stopped]);
}

#[test]
fn test_play_twice_keeps_one_timer() {
    let mut session = session_with_ticks(400);
    let mut host = RecordingHost::default();
    let start = Instant::now();

    assert!(session.play(&mut host));
    assert!(!session.play(&mut host));
    session.poll(start, &mut host);

    // One timer at 20 ticks/s: 10 advances in half a second, not 20
    let fired = session.poll(start + Duration::from_millis(500), &mut host);
    assert_eq!(fired, 10);
    assert_eq!(session.transport().current_tick(), 10);
}

#[test]
fn test_pause_halts_advances() {
    let mut session = session_with_ticks(400);
    let mut host = RecordingHost::default();
    let start = Instant::now();

    session.play(&mut host);
    session.poll(start, &mut host);
    session.poll(start + Duration::from_millis(100), &mut host);
    assert!(session.pause(&mut host));

    let tick = session.transport().current_tick();
    assert_eq!(session.poll(start + Duration::from_secs(3), &mut host), 0);
    assert_eq!(session.advance(&mut host), TickOutcome::Idle);
    assert_eq!(session.transport().current_tick(), tick);
}

#[test]
fn test_seek_half_way() {
    let mut session = session_with_ticks(400);
    let mut host = RecordingHost::default();

    session.seek(0.5, &mut host);
    assert_eq!(session.transport().current_tick(), 200);

    session.seek(7.0, &mut host);
    assert_eq!(session.transport().current_tick(), 400);

    session.seek(-1.0, &mut host);
    assert_eq!(session.transport().current_tick(), 0);
}

#[test]
fn test_failed_preview_keeps_playing() {
    let mut session = session_with_ticks(400);
    let mut host = RecordingHost {
        reject: Some("piano".to_string()),
        ..Default::default()
    };

    session.toggle(0, 12, &mut NullObserver).unwrap();
    session.select_instrument(1).unwrap();
    session.toggle(0, 0, &mut NullObserver).unwrap();
    session.toggle(1, 24, &mut NullObserver).unwrap();

    session.play(&mut host);
    session.advance(&mut host);
    session.advance(&mut host);

    assert_eq!(
        host.previews,
        vec![("bass".to_string(), 0), ("bass".to_string(), 24)]
    );
    assert_eq!(session.transport().current_tick(), 2);
    assert!(session.transport().state().is_playing());
}

#[test]
fn test_toggle_twice_clears_cell() {
    let mut session = session_with_ticks(400);

    session.toggle(42, 7, &mut NullObserver).unwrap();
    session.toggle(42, 7, &mut NullObserver).unwrap();

    assert!(!session.store().contains(42, 7));
    assert!(session.store().notes_at(42).is_empty());
}

#[test]
fn test_pitch_ratios() {
    assert_eq!(pitch_ratio(12), 1.0);
    assert_eq!(pitch_ratio(0), 0.5);
    assert_eq!(pitch_ratio(24), 2.0);
}
