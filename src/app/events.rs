//! Session-Events: Eingaben aus Host/UI und ihre zentrale Verarbeitung.

use anyhow::Context;
use glam::DVec2;

use super::session::EditorSession;
use super::tools::{ToolKey, ToolKind};
use crate::core::LineKind;

/// Eingaben, die eine Editor-Session verarbeitet.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Zeiger gedrückt (Weltkoordinaten)
    PointerDown { world_pos: DVec2 },
    /// Zeiger bewegt (Weltkoordinaten)
    PointerMove { world_pos: DVec2 },
    /// Zeiger losgelassen (Weltkoordinaten)
    PointerUp { world_pos: DVec2 },
    /// Taste gedrückt
    KeyDown { key: ToolKey },
    /// Modifier-Zustand geändert
    ModifiersChanged { flip_line: bool, angle_snap: bool },
    /// Zoom geändert (Pixel pro Welteinheit)
    ZoomChanged { zoom: f64 },
    /// Werkzeug wechseln
    ToolSelected { kind: ToolKind },
    /// Linienart für neue Linien wechseln
    LineKindSelected { kind: LineKind },
    /// Snapping ein-/ausschalten
    SnapToggled,
    /// Letzte Aktion rückgängig machen
    UndoRequested,
    /// Rückgängig gemachte Aktion wiederholen
    RedoRequested,
}

impl EditorSession {
    /// Verarbeitet ein Event. Fehler beim Schreibzugriff werden propagiert.
    pub fn handle_event(&mut self, event: SessionEvent) -> anyhow::Result<()> {
        match event {
            SessionEvent::PointerDown { world_pos } => self.pointer_down(world_pos),
            SessionEvent::PointerMove { world_pos } => self.pointer_move(world_pos),
            SessionEvent::PointerUp { world_pos } => {
                let outcome = self.pointer_up(world_pos);
                log::debug!("Pointer-Up: {:?}", outcome);
            }
            SessionEvent::KeyDown { key } => {
                if !self.key_down(key) {
                    log::debug!("Taste {:?} nicht verarbeitet", key);
                }
            }
            SessionEvent::ModifiersChanged {
                flip_line,
                angle_snap,
            } => {
                self.input.flip_line = flip_line;
                self.input.angle_snap = angle_snap;
            }
            SessionEvent::ZoomChanged { zoom } => {
                if zoom.is_finite() && zoom > 0.0 {
                    self.zoom = zoom;
                    self.render_signal().invalidate();
                } else {
                    log::warn!("Ungültiger Zoom ignoriert: {}", zoom);
                }
            }
            SessionEvent::ToolSelected { kind } => self.select_tool(kind),
            SessionEvent::LineKindSelected { kind } => self.line_kind = kind,
            SessionEvent::SnapToggled => {
                self.options.snap_enabled = !self.options.snap_enabled;
                log::info!("Snapping: {}", self.options.snap_enabled);
            }
            SessionEvent::UndoRequested => {
                self.undo().context("Undo fehlgeschlagen")?;
            }
            SessionEvent::RedoRequested => {
                self.redo().context("Redo fehlgeschlagen")?;
            }
        }
        Ok(())
    }
}
