use crate::config::toml_config::UiConfig;
use crate::core::debounce::{debounce, Debouncer};
use crate::core::feedback::{Feedback, LoadingToken};
use crate::core::format::{DateInput, Formatter};
use crate::core::page::{InitReport, PageInitializer};
use crate::core::request::{RequestHelper, RequestOptions};
use crate::core::scroll::{scroll_into_view, ScrollTarget};
use crate::core::{form, mask};
use crate::domain::model::{NodeId, NoticeKind};
use crate::domain::ports::Host;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde_json::Value;
use std::time::Duration;

/// Every page helper, configured once for a host.
pub struct StorefrontUi {
    host: Host,
    formatter: Formatter,
    feedback: Feedback,
    requests: RequestHelper,
    page: PageInitializer,
}

impl StorefrontUi {
    pub fn new(host: Host, config: &UiConfig) -> Result<Self> {
        config.validate()?;

        let locale = config.resolved_locale()?;
        let formatter = Formatter::new(locale.clone(), config.utc_offset()?);
        let feedback = Feedback::new(
            host.clone(),
            config.timing.clone(),
            config.copy_feedback(&locale),
        );
        let requests = RequestHelper::new(feedback.clone(), config.request.clone())?;
        let page = PageInitializer::new(
            host.clone(),
            feedback.clone(),
            config.confirm_prompt(&locale),
            config.timing.alert_dismiss(),
        );

        tracing::debug!("StorefrontUi ready for locale {}", locale.tag);
        Ok(Self {
            host,
            formatter,
            feedback,
            requests,
            page,
        })
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn requests(&self) -> &RequestHelper {
        &self.requests
    }

    pub fn format_currency(&self, value: f64) -> String {
        self.formatter.format_currency(value)
    }

    pub fn format_date(&self, input: impl Into<DateInput>) -> String {
        self.formatter.format_date(input)
    }

    pub fn validate_form(&self, form_id: &str) -> bool {
        form::validate_form(self.host.document.as_ref(), form_id)
    }

    pub fn mask_phone(&self, input: NodeId) {
        mask::mask_phone(self.host.document.as_ref(), input)
    }

    /// Debouncer driven by the host's scheduler.
    pub fn debounce<A, F>(&self, wait: Duration, func: F) -> Debouncer<A>
    where
        A: Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        debounce(self.host.scheduler.clone(), wait, func)
    }

    pub fn show_loading(&self, target: Option<NodeId>) -> LoadingToken {
        self.feedback.show_loading(target)
    }

    pub fn hide_loading(&self, token: LoadingToken) {
        self.feedback.hide_loading(token)
    }

    pub fn show_notification(&self, message: &str, kind: NoticeKind) -> Option<NodeId> {
        self.feedback.show_notification(message, kind)
    }

    pub async fn copy_to_clipboard(&self, text: &str) -> bool {
        self.feedback.copy_to_clipboard(text).await
    }

    pub async fn make_request(&self, url: &str, options: RequestOptions) -> Result<Value> {
        self.requests.make_request(url, options).await
    }

    pub fn scroll_into_view<'a>(&self, target: impl Into<ScrollTarget<'a>>) -> bool {
        scroll_into_view(self.host.document.as_ref(), target)
    }

    /// Call once the host signals the document is ready.
    pub fn init_page(&self) -> InitReport {
        self.page.init_page()
    }
}
