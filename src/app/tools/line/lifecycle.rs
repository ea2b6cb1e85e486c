//! Lifecycle-Methoden des LineTool (Tool-Implementierung).

use glam::DVec2;

use super::super::{Tool, ToolKey, ToolOutcome};
use super::state::{DragSession, LineTool};
use crate::app::snap::{SnapHit, SnapResult};
use crate::app::ToolContext;
use crate::core::geometry::manhattan_length;

impl Tool for LineTool {
    fn name(&self) -> &str {
        "📏 Linie"
    }

    fn status_text(&self) -> &str {
        match (&self.session, self.flip_next) {
            (None, false) => "Startpunkt ziehen",
            (None, true) => "Startpunkt ziehen (nächste Linie geflippt)",
            (Some(_), _) => "Loslassen zum Erstellen, Escape zum Abbrechen",
        }
    }

    fn on_pointer_down(&mut self, ctx: &ToolContext<'_>, pos: DVec2) {
        let (start, start_hit) = if ctx.options.snap_enabled {
            let reader = ctx.track.create_reader();
            match ctx.snap_engine().snap_point(&reader, pos, ctx.zoom) {
                SnapResult::Snapped(hit) => (hit.point, Some(hit)),
                SnapResult::Free(p) => (p, None),
            }
        } else {
            (pos, None)
        };

        // Vorgemerkter Flip wird hier verbraucht
        let flipped = ctx.input.flip_line != std::mem::take(&mut self.flip_next);

        self.session = Some(DragSession {
            start,
            end: start,
            kind: ctx.line_kind,
            flipped,
            snapped: start_hit.as_ref().is_some_and(|hit| hit.point != pos),
            start_hit,
            end_hit: None,
        });
        ctx.render.invalidate();
    }

    fn on_pointer_move(&mut self, ctx: &ToolContext<'_>, pos: DVec2) {
        let Some(start) = self.session.as_ref().map(|s| s.start) else {
            return;
        };
        let (end, end_hit) = resolve_end(ctx, start, pos);
        if let Some(session) = self.session.as_mut() {
            session.end = end;
            session.end_hit = end_hit;
        }
        ctx.render.invalidate();
    }

    fn on_pointer_up(&mut self, ctx: &ToolContext<'_>, _pos: DVec2) -> ToolOutcome {
        let Some(mut session) = self.session.take() else {
            return ToolOutcome::Idle;
        };
        ctx.render.invalidate();

        // Maßgeblich ist der Endpunkt der letzten Bewegung
        let minimum = ctx.options.minimum_line;
        let moved = manhattan_length(session.diff());
        if moved < minimum {
            log::debug!("Linie verworfen: |dx|+|dy| = {:.4} < {:.4}", moved, minimum);
            return ToolOutcome::Discarded;
        }

        let (end, end_hit) = resolve_end(ctx, session.start, session.end);
        session.end = end;
        session.end_hit = end_hit;

        let length = session.diff().length();
        if length < minimum {
            log::debug!("Linie verworfen: zu kurz ({:.4} < {:.4})", length, minimum);
            return ToolOutcome::Discarded;
        }

        match self.commit(ctx, &session) {
            Ok(ids) => ToolOutcome::Committed(ids),
            Err(e) => {
                log::warn!("Linie konnte nicht erstellt werden: {}", e);
                ToolOutcome::Aborted(e)
            }
        }
    }

    fn on_key_down(&mut self, ctx: &ToolContext<'_>, key: ToolKey) -> bool {
        match key {
            ToolKey::FlipLine => {
                self.flip_next = !self.flip_next;
                log::debug!("Flip für nächste Linie: {}", self.flip_next);
                ctx.render.invalidate();
                true
            }
            ToolKey::Escape if self.session.is_some() => {
                self.stop();
                ctx.render.invalidate();
                true
            }
            _ => false,
        }
    }

    fn stop(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Linien-Drag abgebrochen");
        }
    }

    fn is_active(&self) -> bool {
        self.session.is_some()
    }
}

/// Bestimmt den Endpunkt aus der Zeigerposition.
///
/// Reihenfolge: Grad-Raster (nur mit Modifier), danach darf das
/// Geometrie-Snapping übersteuern, solange es nicht auf den Start fällt.
fn resolve_end(ctx: &ToolContext<'_>, start: DVec2, pos: DVec2) -> (DVec2, Option<SnapHit>) {
    let engine = ctx.snap_engine();
    let mut end = pos;
    if ctx.input.angle_snap {
        end = engine.snap_to_degrees(start, end);
    }

    if ctx.options.snap_enabled {
        let reader = ctx.track.create_reader();
        if let SnapResult::Snapped(hit) = engine.snap_point(&reader, end, ctx.zoom) {
            if hit.point != start {
                return (hit.point, Some(hit));
            }
        }
    }
    (end, None)
}
