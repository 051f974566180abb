//! Transport interface
//!
//! The REST client only ever needs "GET this fully-qualified URL and give me
//! the response". Signing, TLS and sockets live behind this trait so the
//! request builders and the chain aggregator can be driven by a scripted
//! transport in tests.

use crate::errors::{MarketError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Authenticated HTTP transport
///
/// Futures are `?Send`: the client runs on a single-threaded monoio
/// runtime and never moves requests across threads.
#[async_trait(?Send)]
pub trait Transport {
    /// Issue a signed GET request. Non-2xx statuses are returned as a
    /// response, not an error; callers decide via [`MarketResponse::error_for_status`].
    async fn get(&self, url: &str) -> Result<MarketResponse>;
}

/// Status and body of one API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketResponse {
    pub status: u16,
    pub body: String,
}

impl MarketResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 OK with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Raw text body
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Turn a non-2xx status into [`MarketError::HttpError`]
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(MarketError::HttpError(self.status, self.body))
        }
    }
}
