//! Linetrack Editor.
//!
//! Lädt Optionen und optional eine Strecken-Datei und gibt eine
//! Zusammenfassung aus. Renderer und Host-UI binden die Library direkt ein.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use linetrack_editor::{load_track_file, EditorOptions, EditorSession, LineKind, Track};

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Linetrack Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let options = EditorOptions::load_from_file(&EditorOptions::config_path());

    let session = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let track = load_track_file(&path, &options)?;
            EditorSession::with_track(Arc::new(track), options)
        }
        None => {
            log::info!("Keine Strecken-Datei angegeben, starte mit leerer Strecke");
            EditorSession::new(options)
        }
    };

    log_summary(session.track());
    log::info!(
        "Werkzeug: {} ({})",
        session.tools().active_tool().name(),
        session.status_text()
    );
    Ok(())
}

fn log_summary(track: &Track) {
    let reader = track.create_reader();
    let count = |kind: LineKind| reader.lines().filter(|l| l.kind == kind).count();
    let total_length: f64 = reader.lines().map(|l| l.length()).sum();

    log::info!(
        "Strecke: {} Linien (Standard: {}, Beschleunigung: {}, Deko: {}), Gesamtlänge {:.2}",
        reader.line_count(),
        count(LineKind::Standard),
        count(LineKind::Accelerator),
        count(LineKind::Scenery),
        total_length
    );
}
