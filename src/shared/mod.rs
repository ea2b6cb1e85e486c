//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Konfiguration und Konstanten, die von `core` und `app`
//! gleichermaßen genutzt werden.

pub mod options;

pub use options::EditorOptions;
pub use options::{ANGLE_SNAP_DEGREES, MINIMUM_LINE, SNAP_RADIUS_PX, UNDO_DEPTH};
