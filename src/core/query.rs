//! Minimal element matching over a [`Document`], covering the selectors the
//! page helpers rely on (`input[type="tel"]`, `.alert:not(.alert-permanent)`,
//! `form input:not([readonly])` and friends).

use crate::domain::model::NodeId;
use crate::domain::ports::Document;

#[derive(Debug, Clone)]
enum Condition {
    Class(String),
    NotClass(String),
    HasAttr(String),
    NotAttr(String),
    AttrEq(String, String),
    NotAttrEq(String, String),
}

#[derive(Debug, Clone, Default)]
pub struct Selector {
    tag: Option<String>,
    conditions: Vec<Condition>,
    ancestor: Option<Box<Selector>>,
}

impl Selector {
    /// Matches any element.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.conditions.push(Condition::Class(class.to_string()));
        self
    }

    pub fn not_class(mut self, class: &str) -> Self {
        self.conditions.push(Condition::NotClass(class.to_string()));
        self
    }

    pub fn attr(mut self, name: &str) -> Self {
        self.conditions.push(Condition::HasAttr(name.to_string()));
        self
    }

    pub fn not_attr(mut self, name: &str) -> Self {
        self.conditions.push(Condition::NotAttr(name.to_string()));
        self
    }

    pub fn attr_eq(mut self, name: &str, value: &str) -> Self {
        self.conditions
            .push(Condition::AttrEq(name.to_string(), value.to_string()));
        self
    }

    pub fn not_attr_eq(mut self, name: &str, value: &str) -> Self {
        self.conditions
            .push(Condition::NotAttrEq(name.to_string(), value.to_string()));
        self
    }

    /// Descendant combinator: the element must sit somewhere below an
    /// element matching `ancestor`.
    pub fn within(mut self, ancestor: Selector) -> Self {
        self.ancestor = Some(Box::new(ancestor));
        self
    }

    pub fn matches(&self, doc: &dyn Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if doc.tag_name(node).as_deref() != Some(tag.as_str()) {
                return false;
            }
        }

        let conditions_hold = self.conditions.iter().all(|condition| match condition {
            Condition::Class(c) => doc.has_class(node, c),
            Condition::NotClass(c) => !doc.has_class(node, c),
            Condition::HasAttr(a) => doc.attribute(node, a).is_some(),
            Condition::NotAttr(a) => doc.attribute(node, a).is_none(),
            Condition::AttrEq(a, v) => doc.attribute(node, a).as_deref() == Some(v.as_str()),
            Condition::NotAttrEq(a, v) => doc.attribute(node, a).as_deref() != Some(v.as_str()),
        });
        if !conditions_hold {
            return false;
        }

        match &self.ancestor {
            Some(ancestor) => {
                let mut current = doc.parent(node);
                while let Some(parent) = current {
                    if ancestor.matches(doc, parent) {
                        return true;
                    }
                    current = doc.parent(parent);
                }
                false
            }
            None => true,
        }
    }
}

/// Elements below `root` matching any of `selectors`, in document order.
pub fn select_all(doc: &dyn Document, root: NodeId, selectors: &[Selector]) -> Vec<NodeId> {
    doc.descendants(root)
        .into_iter()
        .filter(|node| selectors.iter().any(|s| s.matches(doc, *node)))
        .collect()
}

pub fn select_first(doc: &dyn Document, root: NodeId, selectors: &[Selector]) -> Option<NodeId> {
    doc.descendants(root)
        .into_iter()
        .find(|node| selectors.iter().any(|s| s.matches(doc, *node)))
}
