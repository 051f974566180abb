//! # etrade-core
//!
//! Runtime, logging and timing primitives shared by the E*TRADE market data
//! client.
//!
//! - **Single-threaded async with monoio** - every request is driven to
//!   completion before the next one starts
//! - **Unified logging** - `tracing` with an `EnvFilter` driven subscriber
//! - **Precision timing** - per-request latency measurement
//! - **Nonce generation** - `nanoid` based identifiers for request signing

pub mod runtime;
pub mod timing;
pub mod logging;
pub mod id_gen;

// Re-export commonly used items
pub use runtime::{block_on, RuntimeError};
pub use timing::{nanos, unix_seconds, PerfTimer, Timestamp};
pub use logging::init_logging;
pub use id_gen::{generate_id, generate_nonce};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::runtime::{block_on, RuntimeError};
    pub use crate::timing::{nanos, unix_seconds, PerfTimer, Timestamp};
    pub use crate::id_gen::{generate_id, generate_nonce};
    pub use crate::logging::init_logging;

    // Common external types
    pub use monoio;
    pub use chrono::{DateTime, NaiveDate, Utc};
}
