use crate::utils::error::UiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Opaque handle to an element owned by a [`Document`](crate::domain::ports::Document).
///
/// A document may reuse the slot of a removed element; the generation
/// keeps handles to the removed one stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Click,
    Focus,
    Blur,
    MouseEnter,
    MouseLeave,
}

/// Event delivered to listeners. A listener cancels the triggering action
/// with [`Event::prevent_default`].
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type Listener = Arc<dyn Fn(&mut Event) + Send + Sync>;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Cancellable handle to a scheduled task.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<tokio::task::AbortHandle>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abort(mut self, abort: tokio::task::AbortHandle) -> Self {
        self.abort = Some(abort);
        self
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Bootstrap contextual style of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
    Primary,
    Secondary,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Danger => "danger",
            NoticeKind::Primary => "primary",
            NoticeKind::Secondary => "secondary",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoticeKind {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(NoticeKind::Info),
            "success" => Ok(NoticeKind::Success),
            "warning" => Ok(NoticeKind::Warning),
            "danger" | "error" => Ok(NoticeKind::Danger),
            "primary" => Ok(NoticeKind::Primary),
            "secondary" => Ok(NoticeKind::Secondary),
            other => Err(UiError::UnknownNoticeKind {
                kind: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    Before,
    After,
}

/// Regional formatting rules plus the default texts shown to shoppers.
#[derive(Debug, Clone, PartialEq)]
pub struct Locale {
    pub tag: &'static str,
    pub currency_symbol: &'static str,
    pub symbol_placement: SymbolPlacement,
    /// Whether a no-break space separates the symbol from the amount.
    pub symbol_spaced: bool,
    pub decimal_separator: char,
    pub group_separator: char,
    /// chrono strftime pattern.
    pub date_pattern: &'static str,
    pub copy_feedback: &'static str,
    pub confirm_prompt: &'static str,
}

impl Locale {
    pub const SUPPORTED_TAGS: [&'static str; 4] = ["pt-BR", "en-US", "en-GB", "de-DE"];

    pub fn pt_br() -> Self {
        Self {
            tag: "pt-BR",
            currency_symbol: "R$",
            symbol_placement: SymbolPlacement::Before,
            symbol_spaced: true,
            decimal_separator: ',',
            group_separator: '.',
            date_pattern: "%d/%m/%Y",
            copy_feedback: "Copiado para a área de transferência!",
            confirm_prompt: "Tem certeza que deseja realizar esta ação?",
        }
    }

    pub fn en_us() -> Self {
        Self {
            tag: "en-US",
            currency_symbol: "$",
            symbol_placement: SymbolPlacement::Before,
            symbol_spaced: false,
            decimal_separator: '.',
            group_separator: ',',
            date_pattern: "%-m/%-d/%Y",
            copy_feedback: "Copied to clipboard!",
            confirm_prompt: "Are you sure you want to perform this action?",
        }
    }

    pub fn en_gb() -> Self {
        Self {
            tag: "en-GB",
            currency_symbol: "£",
            date_pattern: "%d/%m/%Y",
            ..Self::en_us()
        }
    }

    pub fn de_de() -> Self {
        Self {
            tag: "de-DE",
            currency_symbol: "€",
            symbol_placement: SymbolPlacement::After,
            symbol_spaced: true,
            decimal_separator: ',',
            group_separator: '.',
            date_pattern: "%-d.%-m.%Y",
            copy_feedback: "In die Zwischenablage kopiert!",
            confirm_prompt: "Möchten Sie diese Aktion wirklich ausführen?",
        }
    }

    /// Looks up a preset by BCP 47 tag, ignoring case and `_` vs `-`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "pt-br" => Some(Self::pt_br()),
            "en-us" => Some(Self::en_us()),
            "en-gb" => Some(Self::en_gb()),
            "de-de" => Some(Self::de_de()),
            _ => None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::pt_br()
    }
}
