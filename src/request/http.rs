use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AppRequest, Method, RequestBody, RequestManager, Response};
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub cookies: bool,
}

fn default_user_agent() -> String {
    concat!("mounter/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            cookies: true,
        }
    }
}

/// Default executor backed by reqwest.
///
/// Non-success statuses come back as ordinary [`Response`]s; callers decide
/// whether to treat them as failures.
#[derive(Clone)]
pub struct HttpRequestManager {
    client: reqwest::Client,
}

impl HttpRequestManager {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(config.cookies)
            .build()?;

        Ok(Self { client })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl RequestManager for HttpRequestManager {
    async fn fetch(&self, request: AppRequest) -> Result<Response> {
        let url = request.full_url();
        debug!(method = request.method.as_str(), url = %url, "Fetching");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url);

        for (name, value) in request.effective_headers() {
            builder = builder.header(name, value);
        }

        match request.body() {
            Some(RequestBody::Text(body)) => builder = builder.body(body.clone()),
            Some(RequestBody::Json(value)) => builder = builder.body(serde_json::to_vec(value)?),
            None => {}
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(status, url = %final_url, bytes = body.len(), "Fetched");

        Ok(Response {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}
