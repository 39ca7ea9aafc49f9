use std::sync::Mutex;

use async_trait::async_trait;

use super::{AppRequest, RequestManager, Response};
use crate::error::Result;

/// Serves canned bodies keyed by URL and records every request it sees.
///
/// Routes are matched against [`AppRequest::full_url`]; the longest
/// matching prefix wins. Unmatched requests get a 404.
#[derive(Default)]
pub struct StubRequestManager {
    routes: Vec<(String, u16, String)>,
    seen: Mutex<Vec<AppRequest>>,
}

impl StubRequestManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url_prefix: &str, body: &str) -> Self {
        self.routes.push((url_prefix.to_string(), 200, body.to_string()));
        self
    }

    pub fn route_status(mut self, url_prefix: &str, status: u16) -> Self {
        self.routes.push((url_prefix.to_string(), status, String::new()));
        self
    }

    pub fn requests(&self) -> Vec<AppRequest> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RequestManager for StubRequestManager {
    async fn fetch(&self, request: AppRequest) -> Result<Response> {
        let url = request.full_url();
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request);
        }

        let matched = self
            .routes
            .iter()
            .filter(|(prefix, _, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _, _)| prefix.len());

        Ok(match matched {
            Some((_, status, body)) => Response {
                status: *status,
                url,
                body: body.clone().into_bytes(),
                ..Default::default()
            },
            None => Response {
                status: 404,
                url,
                ..Default::default()
            },
        })
    }
}
