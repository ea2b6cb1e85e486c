//! Editor-Session: verbindet Strecke, Optionen, Eingabezustand und Werkzeuge.
//!
//! Werkzeuge erhalten pro Event einen expliziten [`ToolContext`]; es gibt
//! keinen globalen Zustand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::DVec2;

use super::snap::SnapEngine;
use super::tools::{LinePreview, Tool, ToolBox, ToolKey, ToolKind, ToolOutcome};
use crate::core::{LineKind, Track, TrackError, TrackStore};
use crate::shared::EditorOptions;

/// Render-Invalidierung: Werkzeuge setzen sie, der Renderer holt sie ab.
#[derive(Debug, Default)]
pub struct RenderSignal {
    dirty: AtomicBool,
}

impl RenderSignal {
    /// Markiert die Darstellung als veraltet.
    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Liest und löscht die Markierung.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Liest die Markierung, ohne sie zu löschen.
    pub fn is_pending(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}

/// Gehaltene Modifier-Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// "Linie flippen"-Modifier
    pub flip_line: bool,
    /// Winkel-Raster-Modifier
    pub angle_snap: bool,
}

/// Alles, was ein Werkzeug während eines Events sehen darf.
pub struct ToolContext<'a> {
    /// Geteilte Strecke
    pub track: &'a Track,
    /// Aktuelle Editor-Optionen
    pub options: &'a EditorOptions,
    /// Gehaltene Modifier
    pub input: InputState,
    /// Zoom-Faktor (Pixel pro Welteinheit)
    pub zoom: f64,
    /// Gewählte Linienart für neue Linien
    pub line_kind: LineKind,
    /// Render-Invalidierung
    pub render: &'a RenderSignal,
}

impl ToolContext<'_> {
    /// Snap-Engine mit den aktuellen Optionen.
    pub fn snap_engine(&self) -> SnapEngine {
        SnapEngine::from_options(self.options)
    }
}

/// Eine Editor-Session über einer geteilten Strecke.
pub struct EditorSession {
    track: Arc<Track>,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Gehaltene Modifier
    pub input: InputState,
    /// Zoom-Faktor (Pixel pro Welteinheit)
    pub zoom: f64,
    /// Gewählte Linienart
    pub line_kind: LineKind,
    render: Arc<RenderSignal>,
    tools: ToolBox,
}

impl EditorSession {
    /// Erstellt eine Session über einer leeren Strecke.
    pub fn new(options: EditorOptions) -> Self {
        let track = Track::from_store(TrackStore::new(), options.writer_policy, options.undo_depth);
        Self::with_track(Arc::new(track), options)
    }

    /// Erstellt eine Session über einer bestehenden Strecke.
    pub fn with_track(track: Arc<Track>, options: EditorOptions) -> Self {
        Self {
            track,
            line_kind: options.default_line_kind,
            options,
            input: InputState::default(),
            zoom: 1.0,
            render: Arc::new(RenderSignal::default()),
            tools: ToolBox::new(),
        }
    }

    /// Geteilte Strecke (z.B. für Renderer- oder Physik-Threads).
    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }

    /// Render-Invalidierung (für den Renderer).
    pub fn render_signal(&self) -> &Arc<RenderSignal> {
        &self.render
    }

    /// Werkzeug-Tabelle.
    pub fn tools(&self) -> &ToolBox {
        &self.tools
    }

    /// Wechselt das aktive Werkzeug.
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.tools.set_active(kind);
        self.render.invalidate();
    }

    /// Statustext des aktiven Werkzeugs.
    pub fn status_text(&self) -> &str {
        self.tools.active_tool().status_text()
    }

    /// Vorschau des Linien-Werkzeugs, falls gerade gezogen wird.
    pub fn line_preview(&self) -> Option<LinePreview> {
        self.tools
            .line_tool()
            .and_then(|tool| tool.preview(&self.options))
    }

    /// Zeiger gedrückt (Weltkoordinaten).
    pub fn pointer_down(&mut self, pos: DVec2) {
        self.dispatch(|tool, ctx| tool.on_pointer_down(ctx, pos));
    }

    /// Zeiger bewegt (Weltkoordinaten).
    pub fn pointer_move(&mut self, pos: DVec2) {
        self.dispatch(|tool, ctx| tool.on_pointer_move(ctx, pos));
    }

    /// Zeiger losgelassen (Weltkoordinaten).
    pub fn pointer_up(&mut self, pos: DVec2) -> ToolOutcome {
        self.dispatch(|tool, ctx| tool.on_pointer_up(ctx, pos))
    }

    /// Taste an das aktive Werkzeug weiterreichen.
    pub fn key_down(&mut self, key: ToolKey) -> bool {
        self.dispatch(|tool, ctx| tool.on_key_down(ctx, key))
    }

    /// Undo der letzten Aktion.
    pub fn undo(&mut self) -> Result<bool, TrackError> {
        let done = self.track.undo()?;
        if done {
            self.render.invalidate();
        }
        Ok(done)
    }

    /// Redo der letzten rückgängig gemachten Aktion.
    pub fn redo(&mut self) -> Result<bool, TrackError> {
        let done = self.track.redo()?;
        if done {
            self.render.invalidate();
        }
        Ok(done)
    }

    fn dispatch<R>(&mut self, f: impl FnOnce(&mut dyn Tool, &ToolContext<'_>) -> R) -> R {
        let ctx = ToolContext {
            track: &self.track,
            options: &self.options,
            input: self.input,
            zoom: self.zoom,
            line_kind: self.line_kind,
            render: &self.render,
        };
        f(self.tools.active_tool_mut(), &ctx)
    }
}
