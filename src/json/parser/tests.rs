use super::*;
use glam::DVec2;
use crate::core::{Extension, LineKind, TrackError, WriterPolicy};

const SAMPLE: &str = r#"{
    "label": "Testhügel",
    "version": "6.2",
    "startPosition": { "x": 0.0, "y": -5.0 },
    "lines": [
        { "id": 1, "type": 0, "x1": 0, "y1": 0, "x2": 10, "y2": 0, "extended": 0, "flipped": false },
        { "id": 2, "type": 1, "x1": 10, "y1": 0, "x2": 20, "y2": 5, "flipped": 1, "leftExtended": 1 },
        { "id": 7, "type": 2, "x1": -3, "y1": 4, "x2": 3, "y2": 4, "flipped": true }
    ]
}"#;

#[test]
fn test_parse_sample_file() {
    let file = parse_track_file(SAMPLE).expect("Parse fehlgeschlagen");
    assert_eq!(file.label, "Testhügel");
    assert_eq!(file.lines.len(), 3);
    assert_eq!(file.start_position.map(|p| p.y), Some(-5.0));
}

#[test]
fn test_parse_lines() {
    let lines = parse_track_json(SAMPLE).expect("Parse fehlgeschlagen");
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[1].kind, LineKind::Accelerator);
    assert!(lines[1].flipped());
    assert_eq!(lines[1].extension, Extension::Left);

    // Gespeichertes Flip bleibt auch bei Deko-Linien erhalten
    assert_eq!(lines[2].kind, LineKind::Scenery);
    assert!(lines[2].flipped());
}

#[test]
fn test_missing_metadata_uses_defaults() {
    let file = parse_track_file(r#"{ "lines": [] }"#).expect("Parse fehlgeschlagen");
    assert_eq!(file.label, "");
    assert_eq!(file.version, "6.2");
    assert!(file.start_position.is_none());
}

#[test]
fn test_invalid_flag_is_error() {
    let json = r#"{ "lines": [ { "id": 1, "type": 0, "x1": 0, "y1": 0, "x2": 1, "y2": 0, "flipped": "ja" } ] }"#;
    assert!(parse_track_json(json).is_err());
}

#[test]
fn test_unknown_line_type_is_error() {
    let json = r#"{ "lines": [ { "id": 1, "type": 5, "x1": 0, "y1": 0, "x2": 1, "y2": 0 } ] }"#;
    assert!(parse_track_json(json).is_err());
}

#[test]
fn test_load_continues_ids_after_max() {
    let path = std::env::temp_dir().join("linetrack_editor_parser_ids.json");
    std::fs::write(&path, SAMPLE).expect("Testdatei schreibbar");

    let track = load_track_file(&path, &EditorOptions::default()).expect("Laden fehlgeschlagen");
    let _ = std::fs::remove_file(&path);

    assert_eq!(track.line_count(), 3);
    assert!(!track.can_undo());
    assert_eq!(track.create_reader().next_line_id(), 8);
}

#[test]
fn test_load_rejects_duplicate_ids() {
    let json = r#"{ "lines": [
        { "id": 1, "type": 0, "x1": 0, "y1": 0, "x2": 1, "y2": 0 },
        { "id": 1, "type": 0, "x1": 0, "y1": 1, "x2": 1, "y2": 1 }
    ] }"#;
    let path = std::env::temp_dir().join("linetrack_editor_parser_dupes.json");
    std::fs::write(&path, json).expect("Testdatei schreibbar");

    let result = load_track_file(&path, &EditorOptions::default());
    let _ = std::fs::remove_file(&path);
    assert!(result.is_err());
}

#[test]
fn test_load_missing_file_is_error() {
    let path = std::env::temp_dir().join("linetrack_editor_does_not_exist.json");
    assert!(load_track_file(&path, &EditorOptions::default()).is_err());
}

#[test]
fn test_load_uses_undo_depth_from_options() {
    let path = std::env::temp_dir().join("linetrack_editor_parser_depth.json");
    std::fs::write(&path, SAMPLE).expect("Testdatei schreibbar");
    let options = EditorOptions {
        undo_depth: 2,
        writer_policy: WriterPolicy::FailOnContention,
        ..EditorOptions::default()
    };

    let track = load_track_file(&path, &options).expect("Laden fehlgeschlagen");
    let _ = std::fs::remove_file(&path);
    assert_eq!(track.policy(), WriterPolicy::FailOnContention);

    for i in 0..4 {
        let mut writer = track.create_writer().expect("Writer erwartet");
        writer.begin_action().expect("Aktion öffnen");
        let x = f64::from(i);
        writer
            .insert_line(LineKind::Standard, DVec2::new(x, 20.0), DVec2::new(x, 30.0), false)
            .expect("Linie einfügen");
        writer.end_action().expect("Aktion schließen");
    }
    assert_eq!(track.undo_len(), 2);
}

#[test]
fn test_load_rejects_id_without_successor() {
    let json = r#"{ "lines": [
        { "id": 18446744073709551615, "type": 0, "x1": 0, "y1": 0, "x2": 1, "y2": 0 }
    ] }"#;
    let lines = parse_track_json(json).expect("Parse fehlgeschlagen");
    assert_eq!(
        TrackStore::from_lines(lines).err(),
        Some(TrackError::IdOverflow(u64::MAX))
    );

    let path = std::env::temp_dir().join("linetrack_editor_parser_max_id.json");
    std::fs::write(&path, json).expect("Testdatei schreibbar");
    let result = load_track_file(&path, &EditorOptions::default());
    let _ = std::fs::remove_file(&path);
    assert!(result.is_err());
}
