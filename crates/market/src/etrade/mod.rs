//! E*TRADE market data integration
//!
//! Product lookup, quotes, option chains and option expiration dates over
//! OAuth 1.0a signed HTTPS, plus a whole-chain aggregator that walks every
//! expiration date of an underlier.

pub mod auth;
pub mod blocking;
pub mod chains;
pub mod endpoints;
pub mod rest;
pub mod session;
pub mod types;

// Re-export types from submodules
pub use auth::{EtradeCredentials, OAuthSigner};
pub use blocking::BlockingMarketClient;
pub use chains::flatten_pairs;
pub use endpoints::{MarketEndpoints, RequestUrl, RequestWarning, MAX_QUOTE_SYMBOLS};
pub use rest::{MarketClient, MarketConfig, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use session::OAuthSession;
pub use types::*;
