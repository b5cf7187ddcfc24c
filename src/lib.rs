pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{StatusPolicy, TimingConfig, UiConfig};

pub use adapters::{ManualClock, MemoryClipboard, MemoryDocument, ScriptedDialogs, TokioScheduler};
pub use crate::core::debounce::{debounce, Debouncer};
pub use crate::core::feedback::{Feedback, LoadingToken};
pub use crate::core::form::validate_form;
pub use crate::core::format::{DateInput, Formatter};
pub use crate::core::mask::{mask_phone, mask_phone_digits};
pub use crate::core::page::InitReport;
pub use crate::core::request::RequestOptions;
pub use crate::core::ui::StorefrontUi;
pub use crate::core::validators::{is_valid_email, is_valid_phone};
pub use domain::model::{Event, EventKind, Locale, NodeId, NoticeKind, TimerHandle};
pub use domain::ports::{Clipboard, Dialogs, Document, Host, Scheduler};
pub use utils::error::{Result, UiError};
