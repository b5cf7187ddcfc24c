pub mod debounce;
pub mod feedback;
pub mod form;
pub mod format;
pub mod mask;
pub mod page;
pub mod query;
pub mod request;
pub mod scroll;
pub mod tooltip;
pub mod ui;
pub mod validators;

pub use crate::domain::model::{Event, EventKind, Locale, NodeId, NoticeKind, TimerHandle};
pub use crate::domain::ports::{Clipboard, Dialogs, Document, Host, Scheduler};
pub use crate::utils::error::Result;
