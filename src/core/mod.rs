//! Core-Domänentypen: Linien, Geometrie, Spatial-Index und die geteilte Strecke.

pub mod error;
pub mod geometry;
/// Core-Datenmodell einer Strecke
///
/// - Line: einzelnes Segment mit gecachten Konstanten
/// - TrackStore: geordneter Container aller Linien
/// - Track: Lock-geschütztes Handle mit Reader/Writer-Sichten und Undo-Historie
pub mod line;
pub mod spatial;
pub mod track;

pub use error::TrackError;
pub use line::{Extension, Line, LineConstants, LineEnd, LineKind};
pub use spatial::SpatialIndex;
pub use track::{
    LineChange, NearLine, Track, TrackReader, TrackStore, TrackWriter, UndoAction, UndoManager,
    WriterPolicy,
};
