use crate::core::feedback::Feedback;
use crate::core::mask::mask_phone;
use crate::core::query::{select_all, select_first, Selector};
use crate::core::tooltip::activate_tooltips;
use crate::domain::model::{Event, EventKind, NodeId};
use crate::domain::ports::{Document, Host};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// What `init_page` wired up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub masked_inputs: usize,
    pub focused: Option<NodeId>,
    pub confirmations: usize,
    pub tooltips: usize,
    pub alerts_scheduled: usize,
}

/// One-shot wiring of page behavior, run when the host's document is ready.
pub struct PageInitializer {
    host: Host,
    feedback: Feedback,
    confirm_prompt: String,
    alert_dismiss: Duration,
}

impl PageInitializer {
    pub fn new(
        host: Host,
        feedback: Feedback,
        confirm_prompt: impl Into<String>,
        alert_dismiss: Duration,
    ) -> Self {
        Self {
            host,
            feedback,
            confirm_prompt: confirm_prompt.into(),
            alert_dismiss,
        }
    }

    pub fn init_page(&self) -> InitReport {
        let report = InitReport {
            masked_inputs: self.attach_phone_masks(),
            focused: self.focus_first_field(),
            confirmations: self.attach_confirmations(),
            tooltips: activate_tooltips(self.host.document.clone()),
            alerts_scheduled: self.schedule_alert_dismissal(),
        };
        tracing::info!(
            "🧩 Page ready: {} phone masks, {} confirmations, {} tooltips, {} alerts",
            report.masked_inputs,
            report.confirmations,
            report.tooltips,
            report.alerts_scheduled
        );
        report
    }

    fn attach_phone_masks(&self) -> usize {
        let doc = self.host.document.clone();
        let inputs = select_all(
            doc.as_ref(),
            doc.body(),
            &[Selector::tag("input").attr_eq("type", "tel")],
        );
        for input in &inputs {
            let document: Weak<dyn Document> = Arc::downgrade(&doc);
            doc.add_listener(
                *input,
                EventKind::Input,
                Arc::new(move |event: &mut Event| {
                    if let Some(document) = document.upgrade() {
                        mask_phone(document.as_ref(), event.target);
                    }
                }),
            );
        }
        inputs.len()
    }

    fn focus_first_field(&self) -> Option<NodeId> {
        let doc = self.host.document.as_ref();
        let first = select_first(
            doc,
            doc.body(),
            &[Selector::tag("input")
                .not_attr_eq("type", "hidden")
                .not_attr("readonly")
                .within(Selector::tag("form"))],
        )?;
        doc.focus(first);
        Some(first)
    }

    fn attach_confirmations(&self) -> usize {
        let doc = self.host.document.clone();
        let triggers = select_all(
            doc.as_ref(),
            doc.body(),
            &[
                Selector::any().class("btn-danger"),
                Selector::any().attr("data-confirm"),
            ],
        );
        for trigger in &triggers {
            let document: Weak<dyn Document> = Arc::downgrade(&doc);
            let dialogs = self.host.dialogs.clone();
            let fallback = self.confirm_prompt.clone();
            doc.add_listener(
                *trigger,
                EventKind::Click,
                Arc::new(move |event: &mut Event| {
                    // an empty data-confirm falls back to the default prompt
                    let message = document
                        .upgrade()
                        .and_then(|d| d.attribute(event.target, "data-confirm"))
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| fallback.clone());
                    if !dialogs.confirm(&message) {
                        tracing::debug!("User declined '{}'", message);
                        event.prevent_default();
                    }
                }),
            );
        }
        triggers.len()
    }

    fn schedule_alert_dismissal(&self) -> usize {
        let doc = self.host.document.as_ref();
        let alerts = select_all(
            doc,
            doc.body(),
            &[Selector::any().class("alert").not_class("alert-permanent")],
        );
        for alert in &alerts {
            self.feedback.dismiss_after(*alert, self.alert_dismiss);
        }
        alerts.len()
    }
}
