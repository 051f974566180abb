//! Synchronous facade over [`MarketClient`]
//!
//! Each call builds a monoio runtime, drives the request to completion and
//! returns. Nothing runs between calls.

use crate::errors::Result;
use crate::etrade::rest::{MarketClient, MarketConfig};
use crate::etrade::session::OAuthSession;
use crate::etrade::types::{OptionChainParams, QuoteParams};
use crate::traits::Transport;
use crate::types::{
    AggregatedChainResult, ExpirationDate, LookupResponse, OptionChainPage, QuoteResponse,
    ResponseFormat,
};
use etrade_core::block_on;

/// Blocking E*TRADE market data client
pub struct BlockingMarketClient<T = OAuthSession> {
    inner: MarketClient<T>,
}

impl BlockingMarketClient<OAuthSession> {
    pub fn new(config: MarketConfig) -> Result<Self> {
        Ok(Self {
            inner: MarketClient::new(config)?,
        })
    }
}

impl<T: Transport> BlockingMarketClient<T> {
    pub fn with_transport(config: MarketConfig, transport: T) -> Result<Self> {
        Ok(Self {
            inner: MarketClient::with_transport(config, transport)?,
        })
    }

    pub fn from_async(inner: MarketClient<T>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &MarketClient<T> {
        &self.inner
    }

    pub fn look_up_product(&self, search: &str, format: ResponseFormat) -> Result<LookupResponse> {
        block_on(self.inner.look_up_product(search, format))?
    }

    pub fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse> {
        block_on(self.inner.get_quote(params))?
    }

    pub fn get_option_chains(&self, params: &OptionChainParams) -> Result<OptionChainPage> {
        block_on(self.inner.get_option_chains(params))?
    }

    pub fn get_option_expire_date(&self, underlier: &str) -> Result<Vec<ExpirationDate>> {
        block_on(self.inner.get_option_expire_date(underlier))?
    }

    pub fn get_all_option_chains(&self, underlier: &str) -> Result<AggregatedChainResult> {
        block_on(self.inner.get_all_option_chains(underlier))?
    }
}

impl<T> std::fmt::Display for BlockingMarketClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}
