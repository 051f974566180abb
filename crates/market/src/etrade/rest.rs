//! E*TRADE market data REST client
//!
//! - Single-threaded async with monoio; requests are issued one at a time
//! - Every round-trip timed with `PerfTimer`
//! - Request URLs and response bodies logged at `debug`

use crate::decode::{self, MarketPayload};
use crate::errors::{MarketError, Result};
use crate::etrade::auth::{env_var, EtradeCredentials};
use crate::etrade::endpoints::MarketEndpoints;
use crate::etrade::session::OAuthSession;
use crate::etrade::types::{OptionChainParams, QuoteParams};
use crate::traits::Transport;
use crate::types::{
    ExpirationDate, ExpirationDateList, LookupResponse, OptionChainPage, QuoteResponse,
    ResponseFormat,
};
use etrade_core::prelude::*;
use etrade_core::{log_error, log_request};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const SANDBOX_BASE_URL: &str = "https://apisb.etrade.com/v1/market/";
pub const PRODUCTION_BASE_URL: &str = "https://api.etrade.com/v1/market/";

/// Market data client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub oauth_token: String,
    pub oauth_token_secret: String,
    pub base_url: String,
    pub sandbox: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            oauth_token: String::new(),
            oauth_token_secret: String::new(),
            base_url: SANDBOX_BASE_URL.to_string(),
            sandbox: true,
        }
    }
}

impl MarketConfig {
    pub fn sandbox() -> Self {
        Self::default()
    }

    pub fn production() -> Self {
        Self {
            base_url: PRODUCTION_BASE_URL.to_string(),
            sandbox: false,
            ..Default::default()
        }
    }

    /// Sandbox or production according to `ETRADE_SANDBOX` (default sandbox),
    /// with credentials from the environment
    pub fn from_env() -> Result<Self> {
        let sandbox = match std::env::var("ETRADE_SANDBOX") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => true,
        };

        let config = if sandbox { Self::sandbox() } else { Self::production() };
        config.with_env_credentials()
    }

    pub fn with_credentials(
        mut self,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_token_secret: impl Into<String>,
    ) -> Self {
        self.consumer_key = consumer_key.into();
        self.consumer_secret = consumer_secret.into();
        self.oauth_token = oauth_token.into();
        self.oauth_token_secret = oauth_token_secret.into();
        self
    }

    pub fn with_env_credentials(mut self) -> Result<Self> {
        self.consumer_key = env_var("ETRADE_CONSUMER_KEY")?;
        self.consumer_secret = env_var("ETRADE_CONSUMER_SECRET")?;
        self.oauth_token = env_var("ETRADE_OAUTH_TOKEN")?;
        self.oauth_token_secret = env_var("ETRADE_OAUTH_TOKEN_SECRET")?;
        Ok(self)
    }

    /// Point at another host (a local stub, a proxy)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn credentials(&self) -> EtradeCredentials {
        EtradeCredentials::new(
            self.consumer_key.clone(),
            self.consumer_secret.clone(),
            self.oauth_token.clone(),
            self.oauth_token_secret.clone(),
        )
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(MarketError::ConfigurationError(format!(
            "ETRADE_SANDBOX must be true or false, got '{other}'"
        ))),
    }
}

/// E*TRADE market data client
pub struct MarketClient<T = OAuthSession> {
    config: MarketConfig,
    endpoints: MarketEndpoints,
    transport: T,
}

impl MarketClient<OAuthSession> {
    /// Client backed by an OAuth-signed HTTPS session
    pub fn new(config: MarketConfig) -> Result<Self> {
        let transport = OAuthSession::new(config.credentials())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> MarketClient<T> {
    pub fn with_transport(config: MarketConfig, transport: T) -> Result<Self> {
        let endpoints = MarketEndpoints::new(&config.base_url)?;

        info!("🔗 E*TRADE market client created");
        info!("   Sandbox: {}", config.sandbox);
        info!("   Base URL: {}", endpoints.base_url());

        Ok(Self {
            config,
            endpoints,
            transport,
        })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &MarketEndpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up products by symbol or company name
    pub async fn look_up_product(&self, search: &str, format: ResponseFormat) -> Result<LookupResponse> {
        let url = self.endpoints.lookup(search, format)?;
        self.fetch("lookup", &url, format).await
    }

    /// Quotes for up to 25 symbols. Extra symbols are dropped with a `warn!`;
    /// use [`MarketEndpoints::quote`] to inspect the truncation directly.
    pub async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse> {
        let request = self.endpoints.quote(params)?;
        self.fetch("quote", &request.url, params.format).await
    }

    /// One page of option chain data, always requested as XML
    pub async fn get_option_chains(&self, params: &OptionChainParams) -> Result<OptionChainPage> {
        let url = self.endpoints.option_chains(params)?;
        self.fetch("optionchains", &url, ResponseFormat::Xml).await
    }

    /// All expiration dates for an underlier, in vendor order
    pub async fn get_option_expire_date(&self, underlier: &str) -> Result<Vec<ExpirationDate>> {
        let url = self.endpoints.option_expire_date(underlier)?;
        let list: ExpirationDateList = self
            .fetch("optionexpiredate", &url, ResponseFormat::Xml)
            .await?;

        let dates = list
            .dates()
            .inspect_err(|e| {
                log_error!(format!("optionexpiredate for {underlier}"), e);
            })?;
        debug!("📅 {} expiration dates for {}", dates.len(), underlier);
        Ok(dates)
    }

    /// GET, check status, decode. Every failure is logged with the endpoint
    /// and URL before it propagates.
    pub(crate) async fn fetch<P: MarketPayload>(
        &self,
        endpoint: &str,
        url: &str,
        format: ResponseFormat,
    ) -> Result<P> {
        let _timer = PerfTimer::start(format!("etrade_{endpoint}"));
        log_request!(endpoint, url);

        let log_failure = |e: &MarketError| {
            log_error!(format!("{endpoint} {url}"), e);
        };

        let response = self.transport.get(url).await.inspect_err(log_failure)?;
        debug!("{}", response.text());
        let response = response.error_for_status().inspect_err(log_failure)?;

        decode::parse(response.text(), format).inspect_err(log_failure)
    }
}

impl<T> std::fmt::Display for MarketClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Use development environment: {}", self.config.sandbox)?;
        write!(f, "base URL: {}", self.endpoints.base_url())
    }
}
