use crate::core::query::{select_first, Selector};
use crate::domain::model::NodeId;
use crate::domain::ports::Document;

#[derive(Debug, Clone)]
pub enum ScrollTarget<'a> {
    Node(NodeId),
    /// Element id, with or without a leading `#`.
    Id(&'a str),
    /// First connected element matching the selector.
    Matching(Selector),
}

impl From<NodeId> for ScrollTarget<'_> {
    fn from(node: NodeId) -> Self {
        ScrollTarget::Node(node)
    }
}

/// `".name"` targets the first element with that class; anything else is an id.
impl<'a> From<&'a str> for ScrollTarget<'a> {
    fn from(target: &'a str) -> Self {
        match target.strip_prefix('.') {
            Some(class) => ScrollTarget::Matching(Selector::any().class(class)),
            None => ScrollTarget::Id(target),
        }
    }
}

impl From<Selector> for ScrollTarget<'_> {
    fn from(selector: Selector) -> Self {
        ScrollTarget::Matching(selector)
    }
}

/// Asks the host to bring the target into view. Unknown targets are ignored.
pub fn scroll_into_view<'a>(doc: &dyn Document, target: impl Into<ScrollTarget<'a>>) -> bool {
    let node = match target.into() {
        ScrollTarget::Node(node) => doc.is_connected(node).then_some(node),
        ScrollTarget::Id(id) => doc.element_by_id(id.trim_start_matches('#')),
        ScrollTarget::Matching(selector) => select_first(doc, doc.body(), &[selector]),
    };
    match node {
        Some(node) => {
            doc.scroll_into_view(node);
            true
        }
        None => false,
    }
}
