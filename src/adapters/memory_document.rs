use crate::domain::model::{Event, EventKind, Listener, NodeId};
use crate::domain::ports::Document;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    value: String,
    text: String,
    listeners: Vec<(EventKind, Listener)>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            value: String::new(),
            text: String::new(),
            listeners: Vec::new(),
        }
    }
}

struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

struct DocState {
    slots: Vec<Slot>,
    free: Vec<usize>,
    body: NodeId,
    focused: Option<NodeId>,
    scroll_requests: Vec<NodeId>,
}

impl DocState {
    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.data.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.data.as_mut())
    }

    fn allocate(&mut self, tag: &str) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.data = Some(NodeData::new(tag));
            return NodeId::new(index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            data: Some(NodeData::new(tag)),
        });
        NodeId::new(self.slots.len() - 1, 0)
    }

    /// Frees `node` and its subtree, handing back their data so the caller
    /// can drop listeners outside the lock.
    fn release(&mut self, node: NodeId) -> Vec<NodeData> {
        let mut doomed = vec![node];
        self.collect_descendants(node, &mut doomed);

        let mut released = Vec::with_capacity(doomed.len());
        for id in doomed {
            let Some(slot) = self.slots.get_mut(id.index()) else {
                continue;
            };
            if slot.generation != id.generation() {
                continue;
            }
            if let Some(data) = slot.data.take() {
                released.push(data);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index());
            }
        }
        released
    }

    fn detach(&mut self, id: NodeId) {
        let parent = match self.node_mut(id) {
            Some(node) => node.parent.take(),
            None => return,
        };
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.node(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if let Some(data) = self.node(node) {
            for child in &data.children {
                out.push(*child);
                self.collect_descendants(*child, out);
            }
        }
    }

    /// Guards against cycles before linking `child` under `parent`.
    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        self.node(parent).is_some()
            && self.node(child).is_some()
            && !self.is_ancestor_or_self(child, parent)
    }
}

/// In-memory document tree for headless hosts and tests.
pub struct MemoryDocument {
    state: Mutex<DocState>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DocState {
                slots: vec![Slot {
                    generation: 0,
                    data: Some(NodeData::new("body")),
                }],
                free: Vec::new(),
                body: NodeId::new(0, 0),
                focused: None,
                scroll_requests: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, DocState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an element with the given attributes and appends it to `parent`.
    pub fn element(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(node, name, value);
        }
        self.append_child(parent, node);
        node
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.state()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.state()
            .node(node)
            .map(|n| n.listeners.iter().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    pub fn scroll_requests(&self) -> Vec<NodeId> {
        self.state().scroll_requests.clone()
    }

    /// Elements currently allocated, attached or not, the body included.
    pub fn live_nodes(&self) -> usize {
        self.state().slots.iter().filter(|s| s.data.is_some()).count()
    }

    /// Slots ever allocated; removed elements hand theirs back for reuse.
    pub fn capacity(&self) -> usize {
        self.state().slots.len()
    }

    /// Connected elements carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let body = self.body();
        self.descendants(body)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> NodeId {
        self.state().body
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let state = self.state();
        let mut nodes = Vec::new();
        state.collect_descendants(state.body, &mut nodes);
        nodes.into_iter().find(|n| {
            state
                .node(*n)
                .and_then(|data| data.attributes.get("id"))
                .is_some_and(|v| v == id)
        })
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let state = self.state();
        let mut nodes = Vec::new();
        state.collect_descendants(node, &mut nodes);
        nodes
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.state().node(node).and_then(|n| n.parent)
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.state().node(node).map(|n| n.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let state = self.state();
        let data = state.node(node)?;
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        let mut state = self.state();
        let Some(data) = state.node_mut(node) else {
            return;
        };
        match name {
            "class" => {
                data.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "value" => {
                data.value = value.to_string();
                data.attributes.insert(name.to_string(), value.to_string());
            }
            _ => {
                data.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        let mut state = self.state();
        if let Some(data) = state.node_mut(node) {
            if name == "class" {
                data.classes.clear();
            } else {
                data.attributes.remove(name);
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.state()
            .node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        let mut state = self.state();
        if let Some(data) = state.node_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        let mut state = self.state();
        if let Some(data) = state.node_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.state()
            .node(node)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, node: NodeId, value: &str) {
        let mut state = self.state();
        if let Some(data) = state.node_mut(node) {
            data.value = value.to_string();
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.state()
            .node(node)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        let mut state = self.state();
        if let Some(data) = state.node_mut(node) {
            data.text = text.to_string();
        }
    }

    fn create_element(&self, tag: &str) -> NodeId {
        self.state().allocate(tag)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut state = self.state();
        if !state.can_adopt(parent, child) {
            tracing::warn!("⚠️ Refusing to append {:?} under {:?}", child, parent);
            return;
        }
        state.detach(child);
        if let Some(data) = state.node_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = state.node_mut(parent) {
            data.children.push(child);
        }
    }

    fn insert_first(&self, parent: NodeId, child: NodeId) {
        let mut state = self.state();
        if !state.can_adopt(parent, child) {
            tracing::warn!("⚠️ Refusing to insert {:?} under {:?}", child, parent);
            return;
        }
        state.detach(child);
        if let Some(data) = state.node_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = state.node_mut(parent) {
            data.children.insert(0, child);
        }
    }

    fn remove(&self, node: NodeId) {
        let released = {
            let mut state = self.state();
            if node == state.body || state.node(node).is_none() {
                return;
            }
            if let Some(focused) = state.focused {
                if state.is_ancestor_or_self(node, focused) {
                    state.focused = None;
                }
            }
            state.detach(node);
            state.release(node)
        };
        tracing::trace!("Released {} element(s) under {:?}", released.len(), node);
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let state = self.state();
        state.node(node).is_some() && state.is_ancestor_or_self(state.body, node)
    }

    fn focus(&self, node: NodeId) {
        let mut state = self.state();
        if state.node(node).is_some() {
            state.focused = Some(node);
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.state().focused
    }

    fn scroll_into_view(&self, node: NodeId) {
        let mut state = self.state();
        if state.node(node).is_some() {
            state.scroll_requests.push(node);
        }
    }

    fn add_listener(&self, node: NodeId, kind: EventKind, listener: Listener) {
        let mut state = self.state();
        if let Some(data) = state.node_mut(node) {
            data.listeners.push((kind, listener));
        }
    }

    fn dispatch(&self, node: NodeId, kind: EventKind) -> Event {
        // Listeners run without the lock so they can mutate the document.
        let listeners: Vec<Listener> = self
            .state()
            .node(node)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, l)| l.clone())
                    .collect()
            })
            .unwrap_or_default();

        let mut event = Event::new(kind, node);
        for listener in listeners {
            listener(&mut event);
        }
        event
    }
}
