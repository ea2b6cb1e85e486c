//! JSON Import/Export für Strecken-Dateien.
//!
//! Ein `TrackFile` enthält Metadaten und eine flache Liste von `LineRecord`s.
//! Flag-Felder werden beim Lesen tolerant dekodiert (Bool oder Zahl); der
//! Core sieht ausschließlich saubere Bool-Werte.

pub mod parser;
pub mod record;
pub mod writer;

pub use parser::{load_track_file, parse_track_file, parse_track_json};
pub use record::{LineRecord, StartPosition, TrackFile};
pub use writer::{save_track_file, write_track_json};
