//! Radier-Werkzeug: sammelt während des Drags getroffene Linien und
//! entfernt sie beim Loslassen gemeinsam.

use glam::DVec2;
use indexmap::IndexSet;

use super::{Tool, ToolOutcome};
use crate::app::ToolContext;
use crate::core::TrackError;

/// Radier-Werkzeug
#[derive(Debug, Default)]
pub struct EraserTool {
    /// Vorgemerkte Linien-IDs in Treffer-Reihenfolge
    pending: IndexSet<u64>,
    active: bool,
}

impl EraserTool {
    /// Erstellt ein Radier-Werkzeug im Idle-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vorgemerkte Linien (für die Hervorhebung im Renderer).
    pub fn pending(&self) -> impl Iterator<Item = u64> + '_ {
        self.pending.iter().copied()
    }

    fn collect(&mut self, ctx: &ToolContext<'_>, pos: DVec2) {
        let radius = ctx.options.eraser_radius_px / ctx.zoom.max(f64::EPSILON);
        let reader = ctx.track.create_reader();
        let before = self.pending.len();
        self.pending
            .extend(reader.query_near(pos, radius).into_iter().map(|n| n.line_id));
        if self.pending.len() != before {
            ctx.render.invalidate();
        }
    }

    fn commit(&self, ctx: &ToolContext<'_>) -> Result<Vec<u64>, TrackError> {
        let mut writer = ctx.track.create_writer()?;
        writer.begin_action()?;

        let mut removed = Vec::with_capacity(self.pending.len());
        for &id in &self.pending {
            match writer.remove_line(id) {
                Ok(_) => removed.push(id),
                Err(TrackError::LineNotFound(_)) => {
                    log::warn!("Linie {} bereits entfernt, übersprungen", id);
                }
                Err(e) => return Err(e),
            }
        }

        writer.end_action()?;
        Ok(removed)
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &str {
        "🧽 Radierer"
    }

    fn status_text(&self) -> &str {
        if self.active {
            "Über Linien ziehen, Loslassen zum Entfernen"
        } else {
            "Ziehen zum Radieren"
        }
    }

    fn on_pointer_down(&mut self, ctx: &ToolContext<'_>, pos: DVec2) {
        self.pending.clear();
        self.active = true;
        self.collect(ctx, pos);
    }

    fn on_pointer_move(&mut self, ctx: &ToolContext<'_>, pos: DVec2) {
        if self.active {
            self.collect(ctx, pos);
        }
    }

    fn on_pointer_up(&mut self, ctx: &ToolContext<'_>, pos: DVec2) -> ToolOutcome {
        if !self.active {
            return ToolOutcome::Idle;
        }
        self.collect(ctx, pos);
        self.active = false;

        if self.pending.is_empty() {
            return ToolOutcome::Discarded;
        }

        let result = self.commit(ctx);
        self.pending.clear();
        ctx.render.invalidate();

        match result {
            Ok(removed) if removed.is_empty() => ToolOutcome::Discarded,
            Ok(removed) => {
                log::info!("{} Linie(n) radiert", removed.len());
                ToolOutcome::Committed(removed)
            }
            Err(e) => {
                log::warn!("Radieren fehlgeschlagen: {}", e);
                ToolOutcome::Aborted(e)
            }
        }
    }

    fn stop(&mut self) {
        self.active = false;
        self.pending.clear();
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
