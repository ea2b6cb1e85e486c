//! State-Definitionen und Konstruktor für das Linien-Werkzeug.

use glam::DVec2;

use crate::app::snap::SnapHit;
use crate::core::LineKind;
use crate::shared::EditorOptions;

/// Zustand eines laufenden Drags.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DragSession {
    pub(crate) start: DVec2,
    pub(crate) end: DVec2,
    pub(crate) kind: LineKind,
    pub(crate) flipped: bool,
    /// Startpunkt ist auf Geometrie eingerastet
    pub(crate) snapped: bool,
    pub(crate) start_hit: Option<SnapHit>,
    pub(crate) end_hit: Option<SnapHit>,
}

impl DragSession {
    /// Vektor Start → Ende.
    pub(crate) fn diff(&self) -> DVec2 {
        self.end - self.start
    }
}

/// Vorschau der Linie, die beim Loslassen entstehen würde.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePreview {
    /// Startpunkt (ggf. eingerastet)
    pub start: DVec2,
    /// Aktueller Endpunkt (ggf. eingerastet)
    pub end: DVec2,
    /// Linienart der Vorschau
    pub kind: LineKind,
    /// Wird die Linie geflippt angelegt?
    pub flipped: bool,
    /// Unter der Mindestlänge: Loslassen würde nichts erzeugen
    pub too_short: bool,
}

/// Linien-Werkzeug
#[derive(Debug, Default)]
pub struct LineTool {
    /// Laufender Drag (`None` = Idle)
    pub(crate) session: Option<DragSession>,
    /// Flip für die nächste Linie vorgemerkt (Hotkey)
    pub(crate) flip_next: bool,
}

impl LineTool {
    /// Erstellt ein Linien-Werkzeug im Idle-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Läuft gerade ein Drag?
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Ist ein Flip für die nächste Linie vorgemerkt?
    pub fn flip_pending(&self) -> bool {
        self.flip_next
    }

    /// Ist der Startpunkt des laufenden Drags eingerastet?
    pub fn start_snapped(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.snapped)
    }

    /// Vorschau des laufenden Drags.
    pub fn preview(&self, options: &EditorOptions) -> Option<LinePreview> {
        self.session.as_ref().map(|session| {
            let diff = session.diff();
            LinePreview {
                start: session.start,
                end: session.end,
                kind: session.kind,
                flipped: session.flipped && session.kind.is_physics(),
                too_short: crate::core::geometry::manhattan_length(diff) < options.minimum_line
                    || diff.length() < options.minimum_line,
            }
        })
    }
}
