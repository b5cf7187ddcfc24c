use crate::config::toml_config::{RequestConfig, StatusPolicy};
use crate::core::feedback::{Feedback, LoadingToken};
use crate::domain::model::NodeId;
use crate::utils::error::{Result, UiError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// Applied after the defaults, so they win on conflicts.
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Where to show the loading indicator; the body when `None`.
    pub loading_target: Option<NodeId>,
}

impl RequestOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn loading_target(mut self, target: NodeId) -> Self {
        self.loading_target = Some(target);
        self
    }
}

/// Hides the indicator however the request future ends, including when it
/// is dropped before completion.
struct LoadingGuard<'a> {
    feedback: &'a Feedback,
    token: Option<LoadingToken>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.feedback.hide_loading(token);
        }
    }
}

pub struct RequestHelper {
    client: Client,
    feedback: Feedback,
    config: RequestConfig,
}

impl RequestHelper {
    pub fn new(feedback: Feedback, config: RequestConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            feedback,
            config,
        })
    }

    /// Resolves `url` against `request.base_url` when it is relative.
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        let parsed = match &self.config.base_url {
            Some(base) => Url::parse(base).and_then(|base| base.join(url)),
            None => Url::parse(url),
        };
        parsed.map_err(|e| UiError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// JSON content type, then configured headers, then the caller's.
    pub fn merged_headers(&self, caller: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let configured = self.config.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()));
        let requested = caller.iter().map(|(n, v)| (n.as_str(), v.as_str()));
        for (name, value) in configured.chain(requested) {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| UiError::InvalidHeader {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| UiError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    /// Sends the request behind a loading indicator and parses the JSON body.
    ///
    /// Failures are logged and returned. Under the lenient status policy a
    /// non-2xx response with a JSON body is a success.
    pub async fn make_request(&self, url: &str, options: RequestOptions) -> Result<Value> {
        let _guard = LoadingGuard {
            feedback: &self.feedback,
            token: Some(self.feedback.show_loading(options.loading_target)),
        };

        let outcome = self.send(url, options).await;
        if let Err(e) = &outcome {
            tracing::error!("❌ Request to {} failed: {}", url, e);
        }
        outcome
    }

    async fn send(&self, url: &str, options: RequestOptions) -> Result<Value> {
        let target = self.resolve_url(url)?;
        let headers = self.merged_headers(&options.headers)?;

        tracing::debug!("📡 {} {}", options.method, target);
        let mut request = self
            .client
            .request(options.method, target.clone())
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Response status: {}", status);

        if self.config.status_policy == StatusPolicy::Strict && !status.is_success() {
            return Err(UiError::HttpStatus {
                status: status.as_u16(),
                url: target.to_string(),
            });
        }

        let text = response.text().await?;
        let data = serde_json::from_str(&text)?;
        Ok(data)
    }
}
