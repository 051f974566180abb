//! # etrade-market
//!
//! Client for the E*TRADE market data API.
//!
//! ## Architecture
//!
//! - **monoio-based HTTPS client** - single-threaded async, one request at a time
//! - **OAuth 1.0a signing** - HMAC-SHA1 `Authorization` headers
//! - **Typed responses** - XML and JSON bodies decode into the same structs
//! - **Pluggable transport** - request building and chain aggregation run
//!   against any [`Transport`]
//!
//! ```no_run
//! use etrade_market::prelude::*;
//!
//! # fn main() -> etrade_market::Result<()> {
//! let config = MarketConfig::sandbox().with_env_credentials()?;
//! let client = BlockingMarketClient::new(config)?;
//! let chains = client.get_all_option_chains("AAPL")?;
//! for (expiry, contracts) in &chains {
//!     println!("{expiry}: {} contracts", contracts.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod decode;
pub mod errors;
pub mod etrade;
pub mod http;
pub mod traits;
pub mod types;

// Re-export main types
pub use decode::{parse, parse_json, parse_xml, MarketPayload};
pub use errors::{MarketError, Result};
pub use etrade::{BlockingMarketClient, MarketClient, MarketConfig};
pub use http::{HttpResponse, HttpsClient};
pub use traits::{MarketResponse, Transport};
pub use types::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::{MarketError, Result};
    pub use crate::etrade::*;
    pub use crate::traits::{MarketResponse, Transport};
    pub use crate::types::*;
    pub use etrade_core::prelude::*;
}
