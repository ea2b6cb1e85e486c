//! Writer für Strecken-Dateien im JSON-Format.

use std::path::Path;

use anyhow::{Context, Result};

use super::record::{LineRecord, TrackFile, TRACK_FILE_VERSION};
use crate::core::TrackStore;

/// Serialisiert den Store als JSON-String. Flags werden immer als Bool geschrieben.
pub fn write_track_json(store: &TrackStore, label: &str) -> Result<String> {
    let file = TrackFile {
        label: label.to_string(),
        version: TRACK_FILE_VERSION.to_string(),
        start_position: None,
        lines: store.lines().map(LineRecord::from_line).collect(),
    };
    serde_json::to_string_pretty(&file).context("Strecke nicht serialisierbar")
}

/// Schreibt den Store als JSON-Datei.
pub fn save_track_file(path: &Path, store: &TrackStore, label: &str) -> Result<()> {
    let json = write_track_json(store, label)?;
    std::fs::write(path, json)
        .with_context(|| format!("Datei nicht schreibbar: {}", path.display()))?;
    log::info!(
        "Strecke gespeichert: {} ({} Linien)",
        path.display(),
        store.line_count()
    );
    Ok(())
}
