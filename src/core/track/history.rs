//! Undo/Redo-Historie aus atomaren Aktionen.

use super::super::{Line, TrackError};

/// Eine einzelne umkehrbare Änderung an der Strecke.
#[derive(Debug, Clone, PartialEq)]
pub enum LineChange {
    /// Linie wurde eingefügt
    Added(Line),
    /// Linie wurde entfernt
    Removed(Line),
    /// Linie wurde verändert (gleiche ID)
    Modified {
        /// Zustand vor der Änderung
        before: Line,
        /// Zustand nach der Änderung
        after: Line,
    },
}

impl LineChange {
    /// Liefert die Änderung, die diese rückgängig macht.
    pub fn inverse(&self) -> LineChange {
        match self {
            LineChange::Added(line) => LineChange::Removed(line.clone()),
            LineChange::Removed(line) => LineChange::Added(line.clone()),
            LineChange::Modified { before, after } => LineChange::Modified {
                before: after.clone(),
                after: before.clone(),
            },
        }
    }

    /// ID der betroffenen Linie.
    pub fn line_id(&self) -> u64 {
        match self {
            LineChange::Added(line) | LineChange::Removed(line) => line.id,
            LineChange::Modified { after, .. } => after.id,
        }
    }
}

/// Geordnete Folge von Änderungen, die Undo/Redo als Einheit behandelt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UndoAction {
    changes: Vec<LineChange>,
}

impl UndoAction {
    /// Änderungen in Ausführungsreihenfolge.
    pub fn changes(&self) -> &[LineChange] {
        &self.changes
    }

    /// Anzahl der Änderungen.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Gibt `true` zurück, wenn keine Änderung aufgezeichnet wurde.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Inverse Änderungen in umgekehrter Reihenfolge (für Undo/Rollback).
    pub fn inverse_changes(&self) -> Vec<LineChange> {
        self.changes.iter().rev().map(LineChange::inverse).collect()
    }
}

/// Undo/Redo-Manager: `Idle → ActionOpen → Idle`.
///
/// Reine Buchhaltung; das Anwenden der Änderungen übernimmt der
/// [`TrackWriter`](super::TrackWriter).
#[derive(Debug)]
pub struct UndoManager {
    undo_stack: Vec<UndoAction>,
    redo_stack: Vec<UndoAction>,
    current: Option<UndoAction>,
    max_depth: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new_with_capacity(crate::shared::options::UNDO_DEPTH)
    }
}

impl UndoManager {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            current: None,
            max_depth,
        }
    }

    /// Öffnet eine neue Aktion. Aktionen sind nicht schachtelbar.
    pub fn begin_action(&mut self) -> Result<(), TrackError> {
        if self.current.is_some() {
            return Err(TrackError::ActionAlreadyOpen);
        }
        self.current = Some(UndoAction::default());
        Ok(())
    }

    /// Ist gerade eine Aktion offen?
    pub fn is_action_open(&self) -> bool {
        self.current.is_some()
    }

    /// Hängt eine Änderung an die offene Aktion an.
    ///
    /// Gibt `false` zurück, wenn keine Aktion offen ist (Änderung bleibt unaufgezeichnet).
    pub fn record(&mut self, change: LineChange) -> bool {
        match self.current.as_mut() {
            Some(action) => {
                action.changes.push(change);
                true
            }
            None => false,
        }
    }

    /// Schließt die offene Aktion.
    ///
    /// Leere Aktionen werden verworfen (`Ok(false)`), sonst landet die Aktion
    /// auf dem Undo-Stack und der Redo-Stack wird geleert (`Ok(true)`).
    pub fn end_action(&mut self) -> Result<bool, TrackError> {
        let action = self.current.take().ok_or(TrackError::NoActionOpen)?;
        if action.is_empty() {
            return Ok(false);
        }
        push_bounded(&mut self.undo_stack, action, self.max_depth);
        self.redo_stack.clear();
        Ok(true)
    }

    /// Verwirft die offene Aktion und gibt sie zum Zurückrollen zurück.
    pub fn take_open_action(&mut self) -> Result<UndoAction, TrackError> {
        self.current.take().ok_or(TrackError::NoActionOpen)
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl der Undo-Schritte.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Jüngste Undo-Aktion (read-only).
    pub fn last_undo(&self) -> Option<&UndoAction> {
        self.undo_stack.last()
    }

    pub(crate) fn pop_undo(&mut self) -> Option<UndoAction> {
        self.undo_stack.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<UndoAction> {
        self.redo_stack.pop()
    }

    /// Legt eine rückgängig gemachte Aktion auf den Redo-Stack.
    pub(crate) fn push_redo(&mut self, action: UndoAction) {
        push_bounded(&mut self.redo_stack, action, self.max_depth);
    }

    /// Legt eine Aktion zurück auf den Undo-Stack, ohne den Redo-Stack anzufassen.
    pub(crate) fn push_undo(&mut self, action: UndoAction) {
        push_bounded(&mut self.undo_stack, action, self.max_depth);
    }
}

fn push_bounded(stack: &mut Vec<UndoAction>, action: UndoAction, max_depth: usize) {
    if stack.len() >= max_depth {
        stack.remove(0);
    }
    stack.push(action);
}
