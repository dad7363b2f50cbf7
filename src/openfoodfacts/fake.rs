//! Fake HTTP client for testing.
//!
//! Returns canned responses matched by URL substring, so the resolver and
//! search adapter can be exercised without network access.

use async_trait::async_trait;
use std::sync::{Mutex, RwLock};

use super::http::{HttpClient, HttpResponse, TransportError};

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Failure(String),
}

/// A fake HTTP client.
///
/// Routes are checked in registration order; the first whose pattern is a
/// substring of the requested URL answers. Unmatched URLs fail as a
/// connection error. Every requested URL is recorded.
#[derive(Debug, Default)]
pub struct FakeClient {
    routes: RwLock<Vec<(String, Reply)>>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer URLs containing `url_contains` with the given status and body.
    pub fn with_response(self, url_contains: &str, status: u16, body: &str) -> Self {
        self.add_route(url_contains, Reply::Response(HttpResponse::new(status, body)));
        self
    }

    /// Fail URLs containing `url_contains` before any response arrives.
    pub fn with_failure(self, url_contains: &str, reason: &str) -> Self {
        self.add_route(url_contains, Reply::Failure(reason.to_string()));
        self
    }

    fn add_route(&self, url_contains: &str, reply: Reply) {
        if let Ok(mut routes) = self.routes.write() {
            routes.push((url_contains.to_string(), reply));
        }
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpClient for FakeClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let reply = self.routes.read().ok().and_then(|routes| {
            routes
                .iter()
                .find(|(pattern, _)| url.contains(pattern.as_str()))
                .map(|(_, reply)| reply.clone())
        });

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(reason)) => Err(TransportError::Connection(reason)),
            None => Err(TransportError::Connection(format!(
                "no canned response for {}",
                url
            ))),
        }
    }
}
