//! Zentrale Konfiguration für den Linien-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::{LineKind, WriterPolicy};

// ── Linien-Werkzeug ─────────────────────────────────────────────────

/// Mindestlänge (Welteinheiten): kürzere Drags werden verworfen.
pub const MINIMUM_LINE: f64 = 0.01;
/// Winkel-Raster für den Degree-Snap in Grad.
pub const ANGLE_SNAP_DEGREES: f64 = 15.0;

// ── Snapping ────────────────────────────────────────────────────────

/// Snap-Radius in Screen-Pixeln (wird über den Zoom in Welteinheiten umgerechnet).
pub const SNAP_RADIUS_PX: f64 = 10.0;
/// Radier-Radius in Screen-Pixeln.
pub const ERASER_RADIUS_PX: f64 = 5.0;

// ── Historie ────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const UNDO_DEPTH: usize = 200;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `linetrack_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    // ── Snapping ────────────────────────────────────────────────
    /// Snapping auf bestehende Linien aktiv
    pub snap_enabled: bool,
    /// Snap-Radius in Screen-Pixeln
    pub snap_radius_px: f64,
    /// Winkel-Raster für den Degree-Snap (Grad)
    pub angle_snap_degrees: f64,

    // ── Werkzeuge ───────────────────────────────────────────────
    /// Mindestlänge einer Linie in Welteinheiten
    pub minimum_line: f64,
    /// Radier-Radius in Screen-Pixeln
    pub eraser_radius_px: f64,
    /// Linienart, die beim Start einer Session ausgewählt ist
    pub default_line_kind: LineKind,

    // ── Historie & Zugriff ──────────────────────────────────────
    /// Maximale Undo-Tiefe
    pub undo_depth: usize,
    /// Verhalten bei belegtem Writer-Lock
    pub writer_policy: WriterPolicy,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            snap_radius_px: SNAP_RADIUS_PX,
            angle_snap_degrees: ANGLE_SNAP_DEGREES,

            minimum_line: MINIMUM_LINE,
            eraser_radius_px: ERASER_RADIUS_PX,
            default_line_kind: LineKind::Standard,

            undo_depth: UNDO_DEPTH,
            writer_policy: WriterPolicy::Block,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("linetrack_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("linetrack_editor.toml")
    }
}
