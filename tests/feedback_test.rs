use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront_ui::{
    Document, EventKind, Host, ManualClock, MemoryClipboard, MemoryDocument, NoticeKind,
    ScriptedDialogs, StorefrontUi, TokioScheduler, UiConfig,
};

fn headless(clipboard: MemoryClipboard, config: &UiConfig) -> (Arc<MemoryDocument>, Arc<ManualClock>, Arc<MemoryClipboard>, StorefrontUi) {
    let doc = Arc::new(MemoryDocument::new());
    let clock = Arc::new(ManualClock::new());
    let clipboard = Arc::new(clipboard);
    let host = Host::new(
        doc.clone(),
        clock.clone(),
        clipboard.clone(),
        Arc::new(ScriptedDialogs::always(true)),
    );
    let ui = StorefrontUi::new(host, config).unwrap();
    (doc, clock, clipboard, ui)
}

#[tokio::test]
async fn test_copy_to_clipboard_shows_toast_that_expires() {
    let (doc, clock, clipboard, ui) = headless(MemoryClipboard::new(), &UiConfig::default());

    assert!(ui.copy_to_clipboard("CUPOM10").await);
    assert_eq!(clipboard.contents().as_deref(), Some("CUPOM10"));

    let toasts = doc.elements_with_class("toast-notification");
    assert_eq!(toasts.len(), 1);
    assert_eq!(doc.text(toasts[0]), "Copiado para a área de transferência!");

    clock.advance(Duration::from_millis(2999));
    assert_eq!(doc.elements_with_class("toast-notification").len(), 1);
    clock.advance(Duration::from_millis(1));
    assert!(doc.elements_with_class("toast-notification").is_empty());
}

#[tokio::test]
async fn test_rejected_clipboard_write_is_silent() {
    let (doc, clock, clipboard, ui) = headless(MemoryClipboard::denied(), &UiConfig::default());

    assert!(!ui.copy_to_clipboard("CUPOM10").await);

    assert_eq!(clipboard.contents(), None);
    assert!(doc.elements_with_class("toast-notification").is_empty());
    assert_eq!(clock.pending(), 0);
}

#[tokio::test]
async fn test_configured_texts_and_delays_are_used() {
    let config = UiConfig::from_toml_str(
        r#"
[locale]
tag = "en-US"

[timing]
toast_dismiss_ms = 1000
notification_dismiss_ms = 2000

[messages]
copy_feedback = "Link copied"
"#,
    )
    .unwrap();
    let (doc, clock, _, ui) = headless(MemoryClipboard::new(), &config);
    let container = doc.element(doc.body(), "div", &[("class", "container")]);

    assert!(ui.copy_to_clipboard("https://loja.example.com/p/7").await);
    let banner = ui.show_notification("Saved", NoticeKind::Warning).unwrap();
    assert_eq!(doc.parent(banner), Some(container));
    assert_eq!(doc.text(doc.elements_with_class("toast-notification")[0]), "Link copied");

    clock.advance(Duration::from_millis(1000));
    assert!(doc.elements_with_class("toast-notification").is_empty());
    assert!(doc.is_connected(banner));

    clock.advance(Duration::from_millis(1000));
    assert!(!doc.is_connected(banner));
    assert_eq!(ui.format_currency(1999.9), "$1,999.90");
}

#[test]
fn test_loading_indicator_round_trip_through_facade() {
    let (doc, _, _, ui) = headless(MemoryClipboard::new(), &UiConfig::default());

    let token = ui.show_loading(None);
    assert_eq!(doc.elements_with_class("spinner").len(), 1);
    ui.hide_loading(token);

    assert!(doc.elements_with_class("spinner").is_empty());
    assert_eq!(ui.feedback().hide_all_loading(), 0);
}

#[test]
fn test_facade_debounce_uses_host_clock() {
    let (_, clock, _, ui) = headless(MemoryClipboard::new(), &UiConfig::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let search = ui.debounce(Duration::from_millis(100), move |term: &'static str| {
        sink.lock().unwrap().push(term)
    });

    for term in ["b", "ba", "ban", "bana", "banana"] {
        search.call(term);
        clock.advance(Duration::from_millis(10));
    }
    clock.advance(Duration::from_millis(100));

    assert_eq!(*seen.lock().unwrap(), vec!["banana"]);
}

#[tokio::test]
async fn test_debounce_with_real_timers() {
    let scheduler = Arc::new(TokioScheduler::current().unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let debounced = storefront_ui::debounce(scheduler, Duration::from_millis(100), move |n: u32| {
        sink.lock().unwrap().push(n)
    });

    for n in 1..=5 {
        debounced.call(n);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(*seen.lock().unwrap(), vec![5]);
}

#[tokio::test]
async fn test_dismissed_feedback_hands_its_elements_back() {
    let (doc, clock, _, ui) = headless(MemoryClipboard::new(), &UiConfig::default());
    doc.element(doc.body(), "div", &[("class", "container")]);
    let baseline = doc.live_nodes();

    for round in 0..200 {
        let banner = ui
            .show_notification(&format!("Pedido {} recebido", round), NoticeKind::Success)
            .unwrap();
        assert!(ui.copy_to_clipboard("PIX-123").await);
        let token = ui.show_loading(None);
        ui.hide_loading(token);
        clock.advance(Duration::from_secs(5));
        assert!(!doc.is_connected(banner));
    }

    assert_eq!(doc.live_nodes(), baseline);
    assert!(doc.capacity() <= baseline + 4);
}

#[test]
fn test_closed_notification_drops_its_listener() {
    let (doc, _, _, ui) = headless(MemoryClipboard::new(), &UiConfig::default());
    doc.element(doc.body(), "div", &[("class", "container")]);
    let banner = ui.show_notification("Frete grátis", NoticeKind::Info).unwrap();
    let close = doc.children(banner)[0];
    assert_eq!(doc.listener_count(close, EventKind::Click), 1);

    doc.dispatch(close, EventKind::Click);

    assert!(!doc.is_connected(banner));
    assert_eq!(doc.listener_count(close, EventKind::Click), 0);
}

#[test]
fn test_wired_page_does_not_keep_document_alive() {
    let (doc, clock, _, ui) = headless(MemoryClipboard::new(), &UiConfig::default());
    let container = doc.element(doc.body(), "div", &[("class", "container")]);
    let form = doc.element(container, "form", &[]);
    doc.element(form, "input", &[("type", "tel")]);
    doc.element(form, "button", &[("class", "btn btn-danger")]);
    doc.element(
        container,
        "span",
        &[("data-bs-toggle", "tooltip"), ("title", "Orgânico")],
    );
    doc.element(container, "div", &[("class", "alert alert-info")]);
    ui.init_page();
    ui.show_notification("Bem-vindo", NoticeKind::Primary);

    let weak = Arc::downgrade(&doc);
    drop(ui);
    drop(doc);
    drop(clock);

    assert!(weak.upgrade().is_none());
}
