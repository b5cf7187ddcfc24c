//! Short-lived page feedback: loading indicators, notification banners and
//! the clipboard toast.

use crate::config::toml_config::TimingConfig;
use crate::core::query::{select_all, select_first, Selector};
use crate::domain::model::{Event, EventKind, NodeId, NoticeKind, TimerHandle};
use crate::domain::ports::{Document, Host};
use std::sync::{Arc, Weak};
use std::time::Duration;

pub const LOADING_ATTR: &str = "data-loading-indicator";
pub const TOAST_CLASS: &str = "toast-notification";
pub const NOTIFICATION_CLASS: &str = "notification";

/// Identifies the one indicator created by a `show_loading` call.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the indicator stays on the page until the token is passed to hide_loading"]
pub struct LoadingToken {
    node: NodeId,
}

impl LoadingToken {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[derive(Clone)]
pub struct Feedback {
    host: Host,
    timing: TimingConfig,
    copy_feedback: String,
}

impl Feedback {
    pub fn new(host: Host, timing: TimingConfig, copy_feedback: impl Into<String>) -> Self {
        Self {
            host,
            timing,
            copy_feedback: copy_feedback.into(),
        }
    }

    fn document(&self) -> &dyn Document {
        self.host.document.as_ref()
    }

    /// Appends a spinner to `target`, or to the body when `None`.
    pub fn show_loading(&self, target: Option<NodeId>) -> LoadingToken {
        let doc = self.document();
        let spinner = doc.create_element("div");
        doc.add_class(spinner, "spinner");
        doc.set_attribute(spinner, LOADING_ATTR, "");
        doc.set_attribute(spinner, "role", "status");
        doc.append_child(target.unwrap_or_else(|| doc.body()), spinner);

        tracing::debug!("⏳ Loading indicator {:?} shown", spinner);
        LoadingToken { node: spinner }
    }

    /// Removes the indicator behind `token`; a no-op if it is already gone.
    pub fn hide_loading(&self, token: LoadingToken) {
        let doc = self.document();
        if doc.is_connected(token.node) {
            doc.remove(token.node);
            tracing::debug!("⏳ Loading indicator {:?} hidden", token.node);
        }
    }

    /// Removes every loading indicator on the page and returns how many.
    pub fn hide_all_loading(&self) -> usize {
        let doc = self.document();
        let spinners = select_all(doc, doc.body(), &[Selector::any().attr(LOADING_ATTR)]);
        for spinner in &spinners {
            doc.remove(*spinner);
        }
        spinners.len()
    }

    /// Inserts a dismissible banner at the top of the first page container.
    ///
    /// Returns `None` when the page has no `.container`/`.container-fluid`;
    /// nothing is shown in that case.
    pub fn show_notification(&self, message: &str, kind: NoticeKind) -> Option<NodeId> {
        let doc = self.document();
        let Some(container) = select_first(
            doc,
            doc.body(),
            &[
                Selector::any().class("container"),
                Selector::any().class("container-fluid"),
            ],
        ) else {
            tracing::debug!("No container on the page, notification '{}' dropped", message);
            return None;
        };

        let banner = doc.create_element("div");
        doc.set_attribute(
            banner,
            "class",
            &format!("alert alert-{} alert-dismissible fade show {}", kind, NOTIFICATION_CLASS),
        );
        doc.set_attribute(banner, "role", "alert");
        doc.set_text(banner, message);

        let close = doc.create_element("button");
        doc.set_attribute(close, "type", "button");
        doc.add_class(close, "btn-close");
        doc.set_attribute(close, "data-bs-dismiss", "alert");
        let document: Weak<dyn Document> = Arc::downgrade(&self.host.document);
        doc.add_listener(
            close,
            EventKind::Click,
            Arc::new(move |_: &mut Event| {
                if let Some(document) = document.upgrade() {
                    document.remove(banner);
                }
            }),
        );
        doc.append_child(banner, close);

        doc.insert_first(container, banner);
        self.dismiss_after(banner, self.timing.notification_dismiss());

        tracing::debug!("🔔 Notification ({}) shown: {}", kind, message);
        Some(banner)
    }

    /// Copies `text` to the clipboard and confirms with a toast.
    ///
    /// A rejected write is only logged; the shopper sees nothing. Returns
    /// whether the text was copied.
    pub async fn copy_to_clipboard(&self, text: &str) -> bool {
        if let Err(e) = self.host.clipboard.write_text(text).await {
            tracing::warn!("⚠️ Clipboard write rejected: {}", e);
            return false;
        }

        let doc = self.document();
        let toast = doc.create_element("div");
        doc.add_class(toast, TOAST_CLASS);
        doc.set_text(toast, &self.copy_feedback);
        doc.append_child(doc.body(), toast);
        self.dismiss_after(toast, self.timing.toast_dismiss());
        true
    }

    /// Removes `node` from the page once `delay` has passed.
    pub fn dismiss_after(&self, node: NodeId, delay: Duration) -> TimerHandle {
        let document: Weak<dyn Document> = Arc::downgrade(&self.host.document);
        self.host.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(document) = document.upgrade() {
                    if document.is_connected(node) {
                        document.remove(node);
                    }
                }
            }),
        )
    }
}
