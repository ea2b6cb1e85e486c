//! Fehlertypen für den Strecken-Zugriff und die Undo-Historie.

use thiserror::Error;

/// Fehler beim Lesen/Schreiben der Strecke oder bei Undo-Aktionen.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    #[error("Linie {0} nicht gefunden")]
    LineNotFound(u64),

    #[error("Linie {0} existiert bereits")]
    DuplicateLineId(u64),

    /// Der ID-Raum ist erschöpft; keine weitere Linie kann eine ID erhalten.
    #[error("Linien-ID {0} ist zu groß, keine Folge-ID mehr verfügbar")]
    IdOverflow(u64),
    #[error("Writer-Lock belegt (Policy: FailOnContention)")]
    WriterContended,

    /// Programmierfehler: Aktionen sind nicht schachtelbar.
    #[error("BeginAction bei bereits offener Aktion")]
    ActionAlreadyOpen,

    /// Programmierfehler: EndAction/CancelAction ohne offene Aktion.
    #[error("Keine offene Aktion")]
    NoActionOpen,
}
