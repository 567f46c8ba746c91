// Integration test for song export
// Exports a session and checks the artifact text and its query

use step_sequencer::export::decode_json;
use step_sequencer::{
    EditorSession, ExportTarget, FixedIdSource, NullObserver, SequencerConfig, SoundTrigger,
};

fn session(target: ExportTarget, id: u16) -> EditorSession {
    let config = SequencerConfig {
        export_target: target,
        ..Default::default()
    };
    let mut session = EditorSession::with_id_source(config, Box::new(FixedIdSource(id))).unwrap();

    // Inserted out of tick order on purpose
    session.select_instrument(1).unwrap();
    session.toggle(5, 0, &mut NullObserver).unwrap();
    session.select_instrument(0).unwrap();
    session.toggle(0, 12, &mut NullObserver).unwrap();
    session
}

#[test]
fn test_export_data_and_query() {
    let mut session = session(ExportTarget::JavaScript, 482);

    let artifact = session.export().unwrap();
    let song = &artifact.song;

    assert_eq!(artifact.filename, "music482.js");
    assert_eq!(song.speed, 1.0);
    assert_eq!(
        serde_json::to_string(&song.data).unwrap(),
        "[[0,0,12],[5,1,0]]"
    );
    assert_eq!(
        song.query(0),
        vec![SoundTrigger {
            sound: "piano".to_string(),
            pitch: 1.0,
        }]
    );
}

#[test]
fn test_javascript_text() {
    let mut session = session(ExportTarget::JavaScript, 482);
    let contents = session.export().unwrap().contents;

    assert!(contents.starts_with("// Generated by step_sequencer\nconst music482 = {\n"));
    assert!(contents.contains("  id: 482,\n  speed: 1,\n"));
    assert!(contents.contains(
        "  instruments: [\"piano\", \"bass\", \"drum\", \"bell\", \"pluck\", \"flute\"],\n"
    ));
    assert!(contents.contains("  data: [\n    [0, 0, 12],\n    [5, 1, 0],\n  ],\n"));
    assert!(contents.ends_with("export default music482;\n"));
}

#[test]
fn test_lua_text() {
    let mut session = session(ExportTarget::Lua, 777);
    let artifact = session.export().unwrap();

    assert_eq!(artifact.filename, "music777.lua");
    assert!(artifact.contents.contains("    { 0, 0, 12 },\n    { 5, 1, 0 },\n"));
    assert!(artifact.contents.ends_with("return music777\n"));
}

#[test]
fn test_export_is_bit_for_bit_reproducible() {
    let mut first = session(ExportTarget::JavaScript, 300);
    let mut second = session(ExportTarget::JavaScript, 300);

    assert_eq!(
        first.export().unwrap().as_bytes(),
        second.export().unwrap().as_bytes()
    );
}

#[test]
fn test_json_export_round_trip() {
    let mut session = session(ExportTarget::Json, 640);
    session.set_speed(2.5);

    let artifact = session.export().unwrap();
    let song = decode_json(&artifact.contents).unwrap();

    assert_eq!(song, artifact.song);
    assert_eq!(song.speed, 2.5);
    assert_eq!(song.query(5)[0].sound, "bass");
    assert_eq!(song.query(5)[0].pitch, 0.5);
}

#[test]
fn test_empty_export() {
    let config = SequencerConfig::default();
    let mut session = EditorSession::with_id_source(config, Box::new(FixedIdSource(100))).unwrap();

    let artifact = session.export().unwrap();
    assert!(artifact.song.data.is_empty());
    assert!(artifact.contents.contains("  data: [],\n"));
}
