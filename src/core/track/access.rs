//! Scoped Lese-/Schreib-Sichten auf die Strecke.

use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec2;
use parking_lot::{RwLockReadGuard, RwLockWriteGuard};

use super::super::{Extension, Line, LineKind, TrackError};
use super::{LineChange, TrackInner, TrackStore, UndoAction};

/// Geteilte, read-only Sicht auf die Strecke.
///
/// Dereferenziert auf [`TrackStore`]; der Lock wird beim Drop freigegeben.
pub struct TrackReader<'a> {
    guard: RwLockReadGuard<'a, TrackInner>,
}

impl<'a> TrackReader<'a> {
    pub(super) fn new(guard: RwLockReadGuard<'a, TrackInner>) -> Self {
        Self { guard }
    }
}

impl Deref for TrackReader<'_> {
    type Target = TrackStore;

    fn deref(&self) -> &TrackStore {
        &self.guard.store
    }
}

/// Exklusive, mutierende Sicht auf die Strecke.
///
/// Jede Mutation hängt ihre Änderung an die offene Undo-Aktion an (falls
/// eine offen ist). Beim Drop gilt:
/// - eine noch offene Aktion wird vollständig zurückgerollt
/// - der Spatial-Index wird neu aufgebaut
/// - die Revision der Strecke steigt, falls sich Geometrie geändert hat
pub struct TrackWriter<'a> {
    guard: RwLockWriteGuard<'a, TrackInner>,
    revision: &'a AtomicU64,
    changed: bool,
}

impl<'a> TrackWriter<'a> {
    pub(super) fn new(guard: RwLockWriteGuard<'a, TrackInner>, revision: &'a AtomicU64) -> Self {
        Self {
            guard,
            revision,
            changed: false,
        }
    }

    // ── Undo-Aktionen ───────────────────────────────────────────

    /// Öffnet eine Undo-Aktion. Schlägt fehl, wenn bereits eine offen ist.
    pub fn begin_action(&mut self) -> Result<(), TrackError> {
        self.guard.history.begin_action()
    }

    /// Schließt die offene Aktion; leere Aktionen werden verworfen.
    ///
    /// Gibt `true` zurück, wenn die Aktion in die Historie aufgenommen wurde.
    pub fn end_action(&mut self) -> Result<bool, TrackError> {
        self.guard.history.end_action()
    }

    /// Rollt die offene Aktion vollständig zurück und verwirft sie.
    pub fn cancel_action(&mut self) -> Result<(), TrackError> {
        let action = self.guard.history.take_open_action()?;
        self.revert(&action)
    }

    /// Ist gerade eine Aktion offen?
    pub fn is_action_open(&self) -> bool {
        self.guard.history.is_action_open()
    }

    // ── Mutationen ──────────────────────────────────────────────

    /// Fügt eine neue Linie mit frischer ID ein und gibt eine Kopie zurück.
    ///
    /// Schlägt fehl, wenn der ID-Raum erschöpft ist; der Store bleibt dann unverändert.
    pub fn insert_line(
        &mut self,
        kind: LineKind,
        p1: DVec2,
        p2: DVec2,
        flipped: bool,
    ) -> Result<Line, TrackError> {
        let line = self.guard.store.insert_new(kind, p1, p2, flipped)?;
        self.record(LineChange::Added(line.clone()));
        Ok(line)
    }

    /// Entfernt eine Linie; unbekannte IDs werden als `LineNotFound` gemeldet.
    pub fn remove_line(&mut self, id: u64) -> Result<Line, TrackError> {
        let removed = self.guard.store.remove(id)?;
        self.record(LineChange::Removed(removed.clone()));
        Ok(removed)
    }

    /// Setzt neue Endpunkte; die Konstanten werden vor der Freigabe neu berechnet.
    pub fn move_line(&mut self, id: u64, p1: DVec2, p2: DVec2) -> Result<Line, TrackError> {
        self.modify(id, |line| line.set_endpoints(p1, p2))
    }

    /// Setzt den Verlängerungszustand einer Linie.
    pub fn set_extension(&mut self, id: u64, extension: Extension) -> Result<Line, TrackError> {
        self.modify(id, |line| line.extension = extension)
    }

    /// Setzt die Orientierung einer Linie.
    pub fn set_flipped(&mut self, id: u64, flipped: bool) -> Result<Line, TrackError> {
        self.modify(id, |line| line.set_flipped(flipped))
    }

    fn modify(&mut self, id: u64, edit: impl FnOnce(&mut Line)) -> Result<Line, TrackError> {
        let mut after = self
            .guard
            .store
            .line(id)
            .cloned()
            .ok_or(TrackError::LineNotFound(id))?;
        edit(&mut after);
        let before = self.guard.store.replace(after.clone())?;
        if before != after {
            self.record(LineChange::Modified {
                before,
                after: after.clone(),
            });
        }
        Ok(after)
    }

    fn record(&mut self, change: LineChange) {
        self.changed = true;
        self.guard.history.record(change);
    }

    // ── Undo/Redo (nur über `Track`) ────────────────────────────

    pub(super) fn undo_last(&mut self) -> Result<bool, TrackError> {
        let Some(action) = self.guard.history.pop_undo() else {
            return Ok(false);
        };
        match self.apply_all(&action.inverse_changes()) {
            Ok(()) => {
                self.guard.history.push_redo(action);
                Ok(true)
            }
            Err(e) => {
                self.guard.history.push_undo(action);
                Err(e)
            }
        }
    }

    pub(super) fn redo_last(&mut self) -> Result<bool, TrackError> {
        let Some(action) = self.guard.history.pop_redo() else {
            return Ok(false);
        };
        match self.apply_all(action.changes()) {
            Ok(()) => {
                self.guard.history.push_undo(action);
                Ok(true)
            }
            Err(e) => {
                self.guard.history.push_redo(action);
                Err(e)
            }
        }
    }

    fn revert(&mut self, action: &UndoAction) -> Result<(), TrackError> {
        self.apply_all(&action.inverse_changes())
    }

    /// Wendet Änderungen ohne Aufzeichnung an (alles oder nichts).
    fn apply_all(&mut self, changes: &[LineChange]) -> Result<(), TrackError> {
        for (applied, change) in changes.iter().enumerate() {
            if let Err(e) = self.apply(change) {
                for done in changes[..applied].iter().rev() {
                    if let Err(rollback) = self.apply(&done.inverse()) {
                        log::error!("Rollback fehlgeschlagen: {}", rollback);
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn apply(&mut self, change: &LineChange) -> Result<(), TrackError> {
        let store = &mut self.guard.store;
        match change {
            LineChange::Added(line) => store.insert_existing(line.clone())?,
            LineChange::Removed(line) => {
                store.remove(line.id)?;
            }
            LineChange::Modified { after, .. } => {
                store.replace(after.clone())?;
            }
        }
        self.changed = true;
        Ok(())
    }
}

impl Deref for TrackWriter<'_> {
    type Target = TrackStore;

    fn deref(&self) -> &TrackStore {
        &self.guard.store
    }
}

impl Drop for TrackWriter<'_> {
    fn drop(&mut self) {
        if self.guard.history.is_action_open() {
            log::warn!("Writer mit offener Aktion freigegeben, Aktion wird zurückgerollt");
            if let Err(e) = self.cancel_action() {
                log::error!("Zurückrollen der offenen Aktion fehlgeschlagen: {}", e);
            }
        }
        self.guard.store.ensure_spatial_index();
        if self.changed {
            self.revision.fetch_add(1, Ordering::Release);
        }
    }
}
