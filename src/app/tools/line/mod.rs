//! Linien-Werkzeug: Zieht eine Linie per Drag von Start- zu Endpunkt.
//!
//! Start und Ende rasten optional auf bestehende Geometrie ein, mit
//! gehaltenem Winkel-Modifier zusätzlich auf das Grad-Raster. Beim
//! Loslassen wird die Linie als eine Undo-Aktion committet.

mod commit;
mod lifecycle;
mod state;

pub use state::{LinePreview, LineTool};

#[cfg(test)]
mod tests;
