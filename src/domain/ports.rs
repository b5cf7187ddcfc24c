use crate::domain::model::{Event, EventKind, Listener, NodeId, Task, TimerHandle};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Structured document tree supplied by the page host.
///
/// All methods take `&self`; implementations synchronize internally so that
/// listeners and timer tasks can hold an `Arc` to the document and mutate it.
/// Operations on a node that does not exist are no-ops.
pub trait Document: Send + Sync {
    /// Root that transient elements are appended to when no target is given.
    fn body(&self) -> NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Every element below `node`, in document order, excluding `node` itself.
    fn descendants(&self, node: NodeId) -> Vec<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Lowercase tag name.
    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&self, node: NodeId, name: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&self, node: NodeId, class: &str);
    fn remove_class(&self, node: NodeId, class: &str);

    /// Current text value of a form field; empty for other elements.
    fn value(&self, node: NodeId) -> String;
    fn set_value(&self, node: NodeId, value: &str);

    fn text(&self, node: NodeId) -> String;
    fn set_text(&self, node: NodeId, text: &str);

    /// Creates a detached element.
    fn create_element(&self, tag: &str) -> NodeId;
    fn append_child(&self, parent: NodeId, child: NodeId);
    fn insert_first(&self, parent: NodeId, child: NodeId);
    /// Detaches `node` and its subtree and disposes of them, listeners
    /// included. Their handles become stale.
    fn remove(&self, node: NodeId);
    /// Whether `node` is reachable from the body.
    fn is_connected(&self, node: NodeId) -> bool;

    fn focus(&self, node: NodeId);
    fn focused(&self) -> Option<NodeId>;
    fn scroll_into_view(&self, node: NodeId);

    fn add_listener(&self, node: NodeId, kind: EventKind, listener: Listener);
    /// Runs the listeners registered for `kind` on `node` and returns the
    /// event so callers can see whether the default action was prevented.
    fn dispatch(&self, node: NodeId, kind: EventKind) -> Event;
}

/// Schedulable clock.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once after `delay` unless the returned handle is cancelled first.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Blocking user prompts.
pub trait Dialogs: Send + Sync {
    /// Returns true when the user accepts.
    fn confirm(&self, message: &str) -> bool;
}

/// Capabilities of the page host, shared by every helper.
#[derive(Clone)]
pub struct Host {
    pub document: Arc<dyn Document>,
    pub scheduler: Arc<dyn Scheduler>,
    pub clipboard: Arc<dyn Clipboard>,
    pub dialogs: Arc<dyn Dialogs>,
}

impl Host {
    pub fn new(
        document: Arc<dyn Document>,
        scheduler: Arc<dyn Scheduler>,
        clipboard: Arc<dyn Clipboard>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        Self {
            document,
            scheduler,
            clipboard,
            dialogs,
        }
    }
}
