//! OAuth-signed HTTPS transport

use crate::errors::Result;
use crate::etrade::auth::{EtradeCredentials, OAuthSigner};
use crate::http::HttpsClient;
use crate::traits::{MarketResponse, Transport};
use async_trait::async_trait;
use tracing::debug;

/// Production [`Transport`]: signs each GET with OAuth 1.0a and sends it
/// over a fresh TLS connection
pub struct OAuthSession {
    https: HttpsClient,
    signer: OAuthSigner,
}

impl OAuthSession {
    pub fn new(credentials: EtradeCredentials) -> Result<Self> {
        Ok(Self {
            https: HttpsClient::new()?,
            signer: OAuthSigner::new(credentials)?,
        })
    }

    pub fn signer(&self) -> &OAuthSigner {
        &self.signer
    }
}

#[async_trait(?Send)]
impl Transport for OAuthSession {
    async fn get(&self, url: &str) -> Result<MarketResponse> {
        let authorization = self.signer.authorization_header("GET", url)?;
        let response = self
            .https
            .get(url, &[("Authorization", authorization)])
            .await?;

        debug!("📨 {} -> HTTP {}", url, response.status);
        Ok(MarketResponse::new(response.status, response.body))
    }
}
