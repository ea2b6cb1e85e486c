//! Integrationstests für Laden, Bearbeiten und Speichern von Strecken-Dateien.

use std::sync::Arc;

use glam::DVec2;
use linetrack_editor::json::parse_track_file;
use linetrack_editor::{
    load_track_file, save_track_file, EditorOptions, EditorSession, Extension, LineKind,
};

const MIXED_FLAGS: &str = r#"{
    "label": "Alte Strecke",
    "version": "6.1",
    "lines": [
        { "id": 3, "type": 0, "x1": 0, "y1": 0, "x2": 10, "y2": 0, "extended": 2, "flipped": 0 },
        { "id": 9, "type": 1, "x1": 10, "y1": 0, "x2": 20, "y2": 5, "flipped": true, "leftExtended": 1.0 }
    ]
}"#;

#[test]
fn test_load_edit_save_reload() -> anyhow::Result<()> {
    let dir = std::env::temp_dir();
    let source = dir.join("linetrack_editor_json_source.json");
    let target = dir.join("linetrack_editor_json_target.json");
    std::fs::write(&source, MIXED_FLAGS)?;

    let track = load_track_file(&source, &EditorOptions::default())?;
    let mut session = EditorSession::with_track(
        Arc::new(track),
        EditorOptions {
            snap_radius_px: 0.5,
            ..EditorOptions::default()
        },
    );

    session.pointer_down(DVec2::new(20.0, 5.0));
    session.pointer_move(DVec2::new(30.0, 5.0));
    session.pointer_up(DVec2::new(30.0, 5.0));

    {
        let reader = session.track().create_reader();
        let created = reader.line(10).expect("neue Linie erhält ID nach dem Maximum");
        assert_eq!(created.kind, LineKind::Standard);
        // Start auf dem Ende von Linie 9 → Gelenk
        assert_eq!(created.extension, Extension::Left);
        assert_eq!(reader.line(9).map(|l| l.extension), Some(Extension::Both));
        save_track_file(&target, &reader, "Neue Strecke")?;
    }

    let written = std::fs::read_to_string(&target)?;
    let file = parse_track_file(&written)?;
    assert_eq!(file.label, "Neue Strecke");
    assert_eq!(file.lines.len(), 3);
    assert!(!written.contains("\"flipped\": 0"));

    let reloaded = load_track_file(&target, &EditorOptions::default())?;
    assert_eq!(reloaded.line_count(), 3);
    let reader = reloaded.create_reader();
    assert_eq!(reader.line(3).map(|l| l.extension), Some(Extension::Right));
    assert_eq!(reader.line(9).map(|l| l.flipped()), Some(true));

    let _ = std::fs::remove_file(&source);
    let _ = std::fs::remove_file(&target);
    Ok(())
}

#[test]
fn test_malformed_flag_fails_loading() {
    let path = std::env::temp_dir().join("linetrack_editor_json_malformed.json");
    std::fs::write(
        &path,
        r#"{ "lines": [ { "id": 1, "type": 0, "x1": 0, "y1": 0, "x2": 1, "y2": 0, "rightExtended": {} } ] }"#,
    )
    .expect("Testdatei schreibbar");

    let result = load_track_file(&path, &EditorOptions::default());
    let _ = std::fs::remove_file(&path);
    assert!(result.is_err());
}

#[test]
fn test_scenery_flip_survives_save_and_reload() -> anyhow::Result<()> {
    let dir = std::env::temp_dir();
    let source = dir.join("linetrack_editor_json_scenery_source.json");
    let target = dir.join("linetrack_editor_json_scenery_target.json");
    std::fs::write(
        &source,
        r#"{ "lines": [ { "id": 4, "type": 2, "x1": 0, "y1": 0, "x2": 5, "y2": 0, "flipped": 1 } ] }"#,
    )?;

    let track = load_track_file(&source, &EditorOptions::default())?;
    save_track_file(&target, &track.create_reader(), "Deko")?;
    let reloaded = load_track_file(&target, &EditorOptions::default())?;

    let _ = std::fs::remove_file(&source);
    let _ = std::fs::remove_file(&target);

    let reader = reloaded.create_reader();
    let line = reader.line(4).expect("Deko-Linie vorhanden");
    assert_eq!(line.kind, LineKind::Scenery);
    assert!(line.flipped());
    assert!(!line.physics_flipped());
    Ok(())
}
