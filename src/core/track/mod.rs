//! Geteilte Strecke mit Single-Writer/Multi-Reader-Zugriff.
//!
//! - [`Track`]: Handle, das Store und Undo-Historie hinter einem RwLock hält
//! - [`TrackReader`]: geteilte, read-only Sicht (beliebig viele gleichzeitig)
//! - [`TrackWriter`]: exklusive, mutierende Sicht; schließt alle Reader aus
//!
//! Beide Sichten sind Guards: die Freigabe passiert beim Drop, auf jedem
//! Rückweg inklusive `?` und Panics.

mod access;
mod history;
mod store;


pub use access::{TrackReader, TrackWriter};
pub use history::{LineChange, UndoAction, UndoManager};
pub use store::{NearLine, TrackStore};

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::TrackError;

/// Verhalten bei belegtem Lock, wenn ein Writer angefordert wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WriterPolicy {
    /// Blockiert, bis alle Reader/Writer freigegeben haben
    #[default]
    Block,
    /// Schlägt sofort mit [`TrackError::WriterContended`] fehl
    FailOnContention,
}

/// Inhalt hinter dem Lock: Geometrie und Historie werden gemeinsam geschützt.
#[derive(Debug, Default)]
pub(crate) struct TrackInner {
    pub(crate) store: TrackStore,
    pub(crate) history: UndoManager,
}

/// Die editierbare Strecke einer Session.
///
/// Wird typischerweise als `Arc<Track>` zwischen Editor, Renderer und
/// Physik geteilt.
#[derive(Debug)]
pub struct Track {
    inner: RwLock<TrackInner>,
    policy: WriterPolicy,
    revision: AtomicU64,
}

impl Default for Track {
    fn default() -> Self {
        Self::new(WriterPolicy::default())
    }
}

impl Track {
    /// Erstellt eine leere Strecke.
    pub fn new(policy: WriterPolicy) -> Self {
        Self::from_store(TrackStore::new(), policy, crate::shared::options::UNDO_DEPTH)
    }

    /// Erstellt eine Strecke aus einem vorhandenen Store mit leerer Historie.
    pub fn from_store(store: TrackStore, policy: WriterPolicy, undo_depth: usize) -> Self {
        let mut store = store;
        store.ensure_spatial_index();
        Self {
            inner: RwLock::new(TrackInner {
                store,
                history: UndoManager::new_with_capacity(undo_depth),
            }),
            policy,
            revision: AtomicU64::new(0),
        }
    }

    /// Konfigurierte Writer-Policy.
    pub fn policy(&self) -> WriterPolicy {
        self.policy
    }

    /// Öffnet eine geteilte Lese-Sicht. Blockiert, solange ein Writer offen ist.
    pub fn create_reader(&self) -> TrackReader<'_> {
        TrackReader::new(self.inner.read())
    }

    /// Öffnet eine exklusive Schreib-Sicht gemäß [`WriterPolicy`].
    pub fn create_writer(&self) -> Result<TrackWriter<'_>, TrackError> {
        let guard = match self.policy {
            WriterPolicy::Block => self.inner.write(),
            WriterPolicy::FailOnContention => {
                self.inner.try_write().ok_or(TrackError::WriterContended)?
            }
        };
        Ok(TrackWriter::new(guard, &self.revision))
    }

    /// Macht die jüngste Aktion rückgängig (eigene Schreib-Transaktion).
    ///
    /// Gibt `Ok(false)` zurück, wenn nichts rückgängig zu machen ist.
    pub fn undo(&self) -> Result<bool, TrackError> {
        let mut writer = self.create_writer()?;
        let done = writer.undo_last()?;
        if done {
            log::info!("Undo ausgeführt");
        } else {
            log::debug!("Undo: nichts zu tun");
        }
        Ok(done)
    }

    /// Stellt die zuletzt rückgängig gemachte Aktion wieder her.
    pub fn redo(&self) -> Result<bool, TrackError> {
        let mut writer = self.create_writer()?;
        let done = writer.redo_last()?;
        if done {
            log::info!("Redo ausgeführt");
        } else {
            log::debug!("Redo: nichts zu tun");
        }
        Ok(done)
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.inner.read().history.can_undo()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        self.inner.read().history.can_redo()
    }

    /// Anzahl der Undo-Schritte.
    pub fn undo_len(&self) -> usize {
        self.inner.read().history.undo_len()
    }

    /// Anzahl der Linien (kurze Lese-Transaktion).
    pub fn line_count(&self) -> usize {
        self.create_reader().line_count()
    }

    /// Zähler, der bei jeder geometrieverändernden Schreib-Transaktion steigt.
    ///
    /// Renderer und Physik vergleichen ihn, um veraltete Caches zu erkennen.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}
