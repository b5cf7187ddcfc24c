// Adapters layer: headless implementations of the host capabilities.

pub mod clipboard;
pub mod dialogs;
pub mod memory_document;
pub mod scheduler;

pub use clipboard::MemoryClipboard;
pub use dialogs::ScriptedDialogs;
pub use memory_document::MemoryDocument;
pub use scheduler::{ManualClock, TokioScheduler};
