//! Parser für Strecken-Dateien im JSON-Format.

use std::path::Path;

use anyhow::{Context, Result};

use super::record::TrackFile;
use crate::core::{Line, Track, TrackStore};
use crate::shared::EditorOptions;

/// Parsed eine komplette Strecken-Datei aus einem JSON-String.
pub fn parse_track_file(json: &str) -> Result<TrackFile> {
    serde_json::from_str(json).context("Strecken-Datei ist kein gültiges JSON-Format")
}

/// Parsed alle Linien einer Strecken-Datei.
pub fn parse_track_json(json: &str) -> Result<Vec<Line>> {
    let file = parse_track_file(json)?;
    file.lines.iter().map(|record| record.to_line()).collect()
}

/// Lädt eine Strecke von der Platte. Die Historie ist danach leer.
///
/// Writer-Policy und Undo-Tiefe kommen aus den Editor-Optionen.
pub fn load_track_file(path: &Path, options: &EditorOptions) -> Result<Track> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
    let file = parse_track_file(&content)?;
    let lines = file
        .lines
        .iter()
        .map(|record| record.to_line())
        .collect::<Result<Vec<_>>>()?;

    let store = TrackStore::from_lines(lines)
        .with_context(|| format!("Ungültige Linien in {}", path.display()))?;
    log::info!(
        "Strecke '{}' geladen: {} Linien (Version {})",
        file.label,
        store.line_count(),
        file.version
    );
    Ok(Track::from_store(
        store,
        options.writer_policy,
        options.undo_depth,
    ))
}

#[cfg(test)]
mod tests;
