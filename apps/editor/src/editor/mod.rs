//! Document editing: the reorder primitive, the closed command set, the drag
//! adapter and the session that owns the live document.

pub mod commands;
pub mod drag;
pub mod handlers;
pub mod ids;
pub mod reorder;
pub mod session;

pub use commands::{EditCommand, EditError};
pub use session::{EditorSession, ViewMode};
