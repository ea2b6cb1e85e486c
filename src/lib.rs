//! Linetrack Editor Library.
//! Strecken-Kern, Snapping, Werkzeuge und Datei-I/O als Library exportiert
//! für Tests und Wiederverwendung (Renderer, Physik, Host-UI).

pub mod app;
pub mod core;
pub mod json;
pub mod shared;

pub use app::{
    EditorSession, InputState, LinePreview, RenderSignal, SessionEvent, SnapEngine, SnapResult,
    ToolContext, ToolKey, ToolKind, ToolOutcome,
};
pub use core::{
    Extension, Line, LineChange, LineEnd, LineKind, Track, TrackError, TrackReader, TrackStore,
    TrackWriter, UndoAction, UndoManager, WriterPolicy,
};
pub use json::{load_track_file, parse_track_json, save_track_file, write_track_json};
pub use shared::EditorOptions;
