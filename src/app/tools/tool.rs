//! Tool-Trait: Schnittstelle für alle Werkzeuge.

use glam::DVec2;

use super::{ToolKey, ToolOutcome};
use crate::app::ToolContext;

/// Schnittstelle für alle Werkzeuge (Linie, Radierer, …).
///
/// Werkzeuge sind zustandsbehaftet (Drag-Phasen). Lese- und Schreibzugriff
/// auf die Strecke holen sie sich pro Event über den Kontext und geben ihn
/// vor dem Return wieder frei.
pub trait Tool {
    /// Anzeigename für Toolbar
    fn name(&self) -> &str;

    /// Statustext (z.B. "Startpunkt ziehen")
    fn status_text(&self) -> &str;

    /// Zeiger gedrückt (Weltkoordinaten).
    fn on_pointer_down(&mut self, ctx: &ToolContext<'_>, pos: DVec2);

    /// Zeiger bewegt. Ohne aktiven Drag ein No-op.
    fn on_pointer_move(&mut self, ctx: &ToolContext<'_>, pos: DVec2);

    /// Zeiger losgelassen: committet oder verwirft den Drag.
    fn on_pointer_up(&mut self, ctx: &ToolContext<'_>, pos: DVec2) -> ToolOutcome;

    /// Taste gedrückt. Gibt `true` zurück, wenn das Werkzeug sie verarbeitet hat.
    fn on_key_down(&mut self, _ctx: &ToolContext<'_>, _key: ToolKey) -> bool {
        false
    }

    /// Laufenden Drag ohne Mutation verwerfen (Escape / Werkzeugwechsel).
    fn stop(&mut self);

    /// Läuft gerade ein Drag?
    fn is_active(&self) -> bool;
}
