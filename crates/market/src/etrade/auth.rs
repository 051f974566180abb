//! E*TRADE OAuth 1.0a request signing
//!
//! Every market data call carries an `Authorization: OAuth ...` header
//! signed with HMAC-SHA1 over the request method, the base URL and the
//! sorted, percent-encoded union of query and protocol parameters.
//! Obtaining the access token itself (the three-legged flow) happens
//! elsewhere; this module only signs with an existing one.

use crate::errors::{MarketError, Result};
use etrade_core::prelude::*;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::debug;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// OAuth consumer and access-token credentials
#[derive(Clone, PartialEq, Eq)]
pub struct EtradeCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub oauth_token: String,
    pub oauth_token_secret: String,
}

impl std::fmt::Debug for EtradeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtradeCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .field("oauth_token", &self.oauth_token)
            .field("oauth_token_secret", &"***")
            .finish()
    }
}

impl EtradeCredentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            oauth_token: oauth_token.into(),
            oauth_token_secret: oauth_token_secret.into(),
        }
    }

    /// Load credentials from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            env_var("ETRADE_CONSUMER_KEY")?,
            env_var("ETRADE_CONSUMER_SECRET")?,
            env_var("ETRADE_OAUTH_TOKEN")?,
            env_var("ETRADE_OAUTH_TOKEN_SECRET")?,
        ))
    }

    /// All four parts present
    pub fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty()
            && !self.consumer_secret.is_empty()
            && !self.oauth_token.is_empty()
            && !self.oauth_token_secret.is_empty()
    }
}

pub(crate) fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| MarketError::MissingCredentials(name.to_string()))
}

/// OAuth 1.0a request signer
pub struct OAuthSigner {
    credentials: EtradeCredentials,
}

impl OAuthSigner {
    pub fn new(credentials: EtradeCredentials) -> Result<Self> {
        if !credentials.is_valid() {
            return Err(MarketError::InvalidCredentials);
        }

        Ok(Self { credentials })
    }

    pub fn consumer_key(&self) -> &str {
        &self.credentials.consumer_key
    }

    /// `Authorization` header value for a request, with a fresh nonce and
    /// the current time
    pub fn authorization_header(&self, method: &str, url: &str) -> Result<String> {
        self.sign_with(method, url, &generate_nonce(), unix_seconds())
    }

    /// Deterministic form of [`authorization_header`](Self::authorization_header)
    pub fn sign_with(&self, method: &str, url: &str, nonce: &str, timestamp: u64) -> Result<String> {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let base_string = signature_base_string(method, url, &oauth_params)?;
        let signature = self.create_signature(&base_string)?;
        oauth_params.push(("oauth_signature", signature));
        oauth_params.sort();

        debug!("🔐 Signed request: {} {}", method, url);

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }

    fn oauth_params(&self, nonce: &str, timestamp: u64) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.consumer_key.clone()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.oauth_token.clone()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ]
    }

    /// Base64 HMAC-SHA1 of the base string, keyed by both secrets
    pub(crate) fn create_signature(&self, base_string: &str) -> Result<String> {
        let key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.oauth_token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| MarketError::SigningError(format!("HMAC setup failed: {e}")))?;

        mac.update(base_string.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&encoded-base-url&encoded-parameter-string`
pub fn signature_base_string(
    method: &str,
    url: &str,
    oauth_params: &[(&'static str, String)],
) -> Result<String> {
    let parsed = Url::parse(url)?;
    let base_url = format!("{}{}", parsed.origin().ascii_serialization(), parsed.path());

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
        .chain(
            oauth_params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    params.sort();

    let param_string = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_url),
        percent_encode(&param_string)
    ))
}

/// RFC 3986 percent-encoding (unreserved characters pass through)
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
