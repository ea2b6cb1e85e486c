//! Werkzeug-System: geschlossene Menge von Werkzeug-Varianten mit
//! gemeinsamer Zeiger-/Tasten-Schnittstelle.
//!
//! Jedes Werkzeug implementiert den `Tool`-Trait. Die `ToolBox` hält genau
//! eine Instanz pro [`ToolKind`] und dispatcht Events an das aktive Werkzeug.
//! Zustand außerhalb des Werkzeugs kommt ausschließlich über den
//! [`ToolContext`](crate::app::ToolContext).

/// Radier-Werkzeug: entfernt überstrichene Linien in einer Aktion.
pub mod eraser;
/// Linien-Werkzeug mit Snapping und Winkel-Raster.
pub mod line;
/// Tool-Trait: Schnittstelle für alle Werkzeuge.
mod tool;

pub use eraser::EraserTool;
pub use line::{LinePreview, LineTool};
pub use tool::Tool;

use crate::core::TrackError;

// ── Typen ────────────────────────────────────────────────────────

/// Tasten, die Werkzeuge auswerten können.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKey {
    /// Hotkey "Linie flippen" (wirkt auf die nächste Linie)
    FlipLine,
    /// Pfeil links
    Left,
    /// Pfeil rechts
    Right,
    /// Laufenden Drag abbrechen
    Escape,
    /// Jede andere Taste
    Other,
}

/// Ergebnis von `on_pointer_up`; steuert Renderer und Statusanzeige.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Kein Drag aktiv, nichts passiert
    Idle,
    /// Drag verworfen (zu kurz / nichts getroffen), keine Mutation
    Discarded,
    /// Änderung committet; betroffene Linien-IDs
    Committed(Vec<u64>),
    /// Commit abgebrochen (z.B. Writer-Lock belegt), keine Mutation
    Aborted(TrackError),
}

/// Auswahl der verfügbaren Werkzeuge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    /// Linien zeichnen
    #[default]
    Line,
    /// Linien radieren
    Eraser,
}

impl ToolKind {
    /// Alle Werkzeuge in Tabellen-Reihenfolge.
    pub const ALL: [ToolKind; 2] = [ToolKind::Line, ToolKind::Eraser];

    fn index(self) -> usize {
        match self {
            ToolKind::Line => 0,
            ToolKind::Eraser => 1,
        }
    }
}

/// Geschlossene Menge der Werkzeug-Varianten.
pub enum EditorTool {
    /// Linien-Werkzeug
    Line(LineTool),
    /// Radier-Werkzeug
    Eraser(EraserTool),
}

impl EditorTool {
    fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Line => EditorTool::Line(LineTool::new()),
            ToolKind::Eraser => EditorTool::Eraser(EraserTool::new()),
        }
    }

    /// Gemeinsame Schnittstelle der Variante.
    pub fn as_tool(&self) -> &dyn Tool {
        match self {
            EditorTool::Line(tool) => tool,
            EditorTool::Eraser(tool) => tool,
        }
    }

    /// Gemeinsame Schnittstelle der Variante (mutable).
    pub fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            EditorTool::Line(tool) => tool,
            EditorTool::Eraser(tool) => tool,
        }
    }
}

// ── ToolBox ──────────────────────────────────────────────────────

/// Hält je ein Werkzeug pro `ToolKind` und den aktiven Eintrag.
pub struct ToolBox {
    tools: Vec<EditorTool>,
    active: ToolKind,
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolBox {
    /// Erstellt die Tabelle mit allen Standard-Werkzeugen; aktiv ist das Linien-Werkzeug.
    pub fn new() -> Self {
        Self {
            tools: ToolKind::ALL.iter().map(|&k| EditorTool::new(k)).collect(),
            active: ToolKind::default(),
        }
    }

    /// Wechselt das aktive Werkzeug; das bisherige wird gestoppt.
    pub fn set_active(&mut self, kind: ToolKind) {
        if kind != self.active {
            self.tools[self.active.index()].as_tool_mut().stop();
            log::debug!("Werkzeug gewechselt: {:?} → {:?}", self.active, kind);
            self.active = kind;
        }
    }

    /// Art des aktiven Werkzeugs.
    pub fn active_kind(&self) -> ToolKind {
        self.active
    }

    /// Gibt eine Referenz auf das aktive Werkzeug zurück.
    pub fn active_tool(&self) -> &dyn Tool {
        self.tools[self.active.index()].as_tool()
    }

    /// Gibt eine mutable Referenz auf das aktive Werkzeug zurück.
    pub fn active_tool_mut(&mut self) -> &mut dyn Tool {
        self.tools[self.active.index()].as_tool_mut()
    }

    /// Linien-Werkzeug (für Vorschau/Status), unabhängig vom aktiven Eintrag.
    pub fn line_tool(&self) -> Option<&LineTool> {
        match &self.tools[ToolKind::Line.index()] {
            EditorTool::Line(tool) => Some(tool),
            EditorTool::Eraser(_) => None,
        }
    }
}
