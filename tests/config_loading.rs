// Integration test for configuration files
// Loads RON files from disk and builds sessions from them

use std::io::Write;
use step_sequencer::{EditorSession, ExportTarget, SequencerConfig, SequencerError};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_config_file() {
    let file = write_config(
        r##"(
            total_ticks: 64,
            ticks_per_second: 8,
            pitch_range: 13,
            export_target: json,
            instruments: [
                (name: "Kick", sound_id: "kick", color: "#ff8800"),
                (name: "Snare", sound_id: "snare", color: "#0088ff"),
            ],
        )"##,
    );

    let config = SequencerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.total_ticks, 64);
    assert_eq!(config.export_target, ExportTarget::Json);

    let session = EditorSession::new(config).unwrap();
    assert_eq!(session.registry().sound_ids(), vec!["kick", "snare"]);
    assert_eq!(session.transport().timeline().total_seconds(), 8);
    assert_eq!(session.store().bounds().pitch_range, 13);
}

#[test]
fn test_saved_config_reloads() {
    let config = SequencerConfig {
        total_ticks: 120,
        loop_on_finish: true,
        ..Default::default()
    };
    let file = write_config(&config.to_ron_string().unwrap());

    assert_eq!(SequencerConfig::from_file(file.path()).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SequencerConfig::from_file(dir.path().join("missing.ron"));
    assert!(matches!(result, Err(SequencerError::Io(_))));
}

#[test]
fn test_invalid_file_rejected() {
    let file = write_config("(ticks_per_second: 0)");
    let result = SequencerConfig::from_file(file.path());
    assert!(matches!(result, Err(SequencerError::InvalidConfig(_))));
}
