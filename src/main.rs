use step_sequencer::sequencer::pitch_label;
use step_sequencer::{
    EditorSession, NoteToggle, PlaybackObserver, PlayheadUpdate, Result, SequencerConfig,
    SessionObserver, TransportState,
};
use std::thread;
use std::time::{Duration, Instant};

/// Environment variable naming a RON configuration file
const CONFIG_ENV_VAR: &str = "STEP_SEQUENCER_CONFIG";

/// How often the terminal host polls the transport
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Demo melody: (tick, pitch, instrument)
const DEMO_NOTES: &[(u32, u8, u8)] = &[
    (0, 12, 0),
    (0, 0, 1),
    (10, 16, 0),
    (20, 19, 0),
    (20, 7, 1),
    (30, 24, 0),
    (30, 12, 2),
    (40, 19, 5),
    (50, 16, 4),
    (60, 12, 3),
];

/// Terminal host: prints previews and the playhead
#[derive(Default)]
struct TerminalHost {
    last_second: Option<String>,
}

impl PlaybackObserver for TerminalHost {
    fn preview(&mut self, sound_id: &str, pitch: u8) -> Result<()> {
        println!("  ♪ {} ({})", sound_id, pitch_label(pitch));
        Ok(())
    }

    fn playhead(&mut self, update: &PlayheadUpdate) {
        // One line per elapsed second
        if self.last_second.as_deref() != Some(update.elapsed.as_str()) {
            println!(
                "[{} / {}] tick {} ({:.0}%)",
                update.elapsed,
                update.total,
                update.tick,
                update.progress * 100.0
            );
            self.last_second = Some(update.elapsed.clone());
        }
    }
}

impl SessionObserver for TerminalHost {
    fn note_changed(&mut self, change: &NoteToggle) {
        let note = change.note();
        log::debug!(
            "{} note at tick {}, pitch {}",
            if change.is_added() { "Added" } else { "Removed" },
            note.tick,
            note.pitch
        );
    }

    fn transport_changed(&mut self, state: TransportState) {
        println!("Transport: {:?}", state);
    }
}

fn load_config() -> Result<SequencerConfig> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => SequencerConfig::from_file(path),
        Err(_) => Ok(SequencerConfig::default()),
    }
}

fn run() -> Result<()> {
    let mut export_only = false;
    let mut speed_text = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--export-only" => export_only = true,
            _ => speed_text = Some(arg),
        }
    }

    let config = load_config()?;
    let mut session = EditorSession::new(config)?;
    let mut host = TerminalHost::default();

    for &(tick, pitch, instrument) in DEMO_NOTES {
        // Skip notes that do not fit a custom configuration
        if session.select_instrument(instrument).is_err() {
            continue;
        }
        if let Err(e) = session.toggle(tick, pitch, &mut host) {
            log::warn!("Demo note skipped: {}", e);
        }
    }

    if let Some(text) = speed_text {
        session.set_speed_text(&text);
    }
    println!(
        "{} notes, speed {}",
        session.store().len(),
        session.transport().speed()
    );

    if !export_only {
        session.play(&mut host);
        while session.transport().state().is_playing() {
            session.poll(Instant::now(), &mut host);
            thread::sleep(POLL_INTERVAL);
        }
    }

    let artifact = session.export()?;
    std::fs::write(&artifact.filename, artifact.as_bytes())?;
    println!("Exported {} ({} bytes)", artifact.filename, artifact.contents.len());

    Ok(())
}

fn main() {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    println!("=== Step Sequencer ===");

    if let Err(e) = run() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
