//! Transport-agnostic request descriptors and the executor seam.
//!
//! Adapters describe each network call as an [`AppRequest`] and hand it to
//! an injected [`RequestManager`]. Nothing else in the crate performs I/O,
//! so a host can swap in a test double, proxy or authenticated client
//! without touching adapter code.

mod http;
#[cfg(test)]
pub(crate) mod stub;

pub use http::{HttpConfig, HttpRequestManager};

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    /// Repeats the key once per value in the query string
    Multiple(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multiple(values)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent verbatim
    Text(String),
    /// Serialized, with a JSON content type unless one is already set
    Json(serde_json::Value),
}

/// Full description of one network call, without performing it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppRequest {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    /// Insertion-ordered query parameters
    pub params: Vec<(String, ParamValue)>,
    pub data: Option<RequestBody>,
}

impl AppRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            ..Default::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets a query parameter, replacing any previous value for `key`.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.data = Some(RequestBody::Json(value));
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.data = Some(RequestBody::Text(body.into()));
        self
    }

    /// Body to send, if any. GET requests never carry one.
    pub fn body(&self) -> Option<&RequestBody> {
        match self.method {
            Method::Get => None,
            _ => self.data.as_ref(),
        }
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    /// Headers to send, including the implied JSON content type.
    pub fn effective_headers(&self) -> BTreeMap<String, String> {
        let mut headers = self.headers.clone();
        if matches!(self.body(), Some(RequestBody::Json(_))) && !self.has_header("content-type") {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }

    /// URL with the percent-encoded query string appended.
    pub fn full_url(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.params {
            let key = urlencoding::encode(key);
            match value {
                ParamValue::Single(v) => pairs.push(format!("{}={}", key, urlencoding::encode(v))),
                ParamValue::Multiple(values) => {
                    for v in values {
                        pairs.push(format!("{}={}", key, urlencoding::encode(v)));
                    }
                }
            }
        }

        if pairs.is_empty() {
            return self.url.clone();
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, pairs.join("&"))
    }
}

/// What an executor returns for a completed call, whatever its status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub status: u16,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Turns a non-success status into [`Error::Transport`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Transport {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// The single seam through which all network I/O flows.
#[async_trait]
pub trait RequestManager: Send + Sync {
    async fn fetch(&self, request: AppRequest) -> Result<Response>;

    /// Fetches and returns the body text, failing on a non-success status.
    async fn fetch_text(&self, request: AppRequest) -> Result<String> {
        let response = self.fetch(request).await?.error_for_status()?;
        Ok(response.text())
    }
}
