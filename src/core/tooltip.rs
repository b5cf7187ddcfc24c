use crate::core::query::{select_all, Selector};
use crate::domain::model::{Event, EventKind, NodeId};
use crate::domain::ports::Document;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

static NEXT_TOOLTIP_ID: AtomicU64 = AtomicU64::new(1);

pub fn tooltip_selector() -> Selector {
    Selector::any().attr_eq("data-bs-toggle", "tooltip")
}

/// Turns `trigger` into a tooltip trigger and returns the tooltip element.
///
/// The trigger's `title` (or `data-bs-title`) moves to
/// `data-bs-original-title` so the native tooltip does not double up.
pub fn activate_tooltip(doc: Arc<dyn Document>, trigger: NodeId) -> NodeId {
    let title = doc
        .attribute(trigger, "data-bs-title")
        .or_else(|| doc.attribute(trigger, "title"))
        .unwrap_or_default();
    doc.set_attribute(trigger, "data-bs-original-title", &title);
    doc.remove_attribute(trigger, "title");

    let tip_id = format!("tooltip-{}", NEXT_TOOLTIP_ID.fetch_add(1, Ordering::Relaxed));
    let tip = doc.create_element("div");
    doc.set_attribute(tip, "id", &tip_id);
    doc.set_attribute(tip, "class", "tooltip bs-tooltip-auto");
    doc.set_attribute(tip, "role", "tooltip");
    doc.set_attribute(tip, "hidden", "");
    doc.set_text(tip, &title);
    doc.append_child(doc.body(), tip);

    let show_doc: Weak<dyn Document> = Arc::downgrade(&doc);
    let show = Arc::new(move |_: &mut Event| {
        let Some(show_doc) = show_doc.upgrade() else {
            return;
        };
        show_doc.remove_attribute(tip, "hidden");
        show_doc.add_class(tip, "show");
        show_doc.set_attribute(trigger, "aria-describedby", &tip_id);
    });
    let hide_doc: Weak<dyn Document> = Arc::downgrade(&doc);
    let hide = Arc::new(move |_: &mut Event| {
        let Some(hide_doc) = hide_doc.upgrade() else {
            return;
        };
        hide_doc.set_attribute(tip, "hidden", "");
        hide_doc.remove_class(tip, "show");
        hide_doc.remove_attribute(trigger, "aria-describedby");
    });

    doc.add_listener(trigger, EventKind::MouseEnter, show.clone());
    doc.add_listener(trigger, EventKind::Focus, show);
    doc.add_listener(trigger, EventKind::MouseLeave, hide.clone());
    doc.add_listener(trigger, EventKind::Blur, hide);

    tip
}

/// Activates every `[data-bs-toggle="tooltip"]` element on the page.
pub fn activate_tooltips(doc: Arc<dyn Document>) -> usize {
    let triggers = select_all(doc.as_ref(), doc.body(), &[tooltip_selector()]);
    for trigger in &triggers {
        activate_tooltip(doc.clone(), *trigger);
    }
    triggers.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryDocument;

    #[test]
    fn test_tooltip_shows_and_hides() {
        let doc = Arc::new(MemoryDocument::new());
        let trigger = doc.element(
            doc.body(),
            "span",
            &[("data-bs-toggle", "tooltip"), ("title", "Produto orgânico")],
        );

        let tip = activate_tooltip(doc.clone(), trigger);

        assert_eq!(doc.attribute(trigger, "title"), None);
        assert_eq!(
            doc.attribute(trigger, "data-bs-original-title").as_deref(),
            Some("Produto orgânico")
        );
        assert_eq!(doc.text(tip), "Produto orgânico");
        assert!(doc.attribute(tip, "hidden").is_some());

        doc.dispatch(trigger, EventKind::MouseEnter);
        assert!(doc.attribute(tip, "hidden").is_none());
        assert_eq!(doc.attribute(trigger, "aria-describedby"), doc.attribute(tip, "id"));

        doc.dispatch(trigger, EventKind::Blur);
        assert!(doc.attribute(tip, "hidden").is_some());
        assert!(doc.attribute(trigger, "aria-describedby").is_none());
    }

    #[test]
    fn test_activate_tooltips_counts_flagged_elements() {
        let doc = Arc::new(MemoryDocument::new());
        let body = doc.body();
        doc.element(body, "a", &[("data-bs-toggle", "tooltip"), ("data-bs-title", "Frete")]);
        doc.element(body, "a", &[("data-bs-toggle", "popover")]);
        doc.element(body, "i", &[("data-bs-toggle", "tooltip")]);

        assert_eq!(activate_tooltips(doc.clone()), 2);
    }
}
