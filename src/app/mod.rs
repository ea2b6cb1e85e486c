//! Application-Layer: Snapping, Werkzeuge, Session und Events.

pub mod events;
pub mod session;
pub mod snap;
pub mod tools;

pub use events::SessionEvent;
pub use session::{EditorSession, InputState, RenderSignal, ToolContext};
pub use snap::{snap_to_degrees, SnapEngine, SnapHit, SnapResult};
pub use tools::{
    EditorTool, EraserTool, LinePreview, LineTool, Tool, ToolBox, ToolKey, ToolKind, ToolOutcome,
};
