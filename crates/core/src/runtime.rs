//! Blocking entry point onto a monoio runtime
//!
//! The market data client is async internally (monoio, single-threaded)
//! but its contract is synchronous: each call runs to completion before the
//! caller continues. `block_on` builds a fresh runtime for one future and
//! drives it, preferring io_uring and falling back to the legacy driver
//! where io_uring is unavailable.

use monoio::{FusionDriver, RuntimeBuilder};
use std::future::Future;
use thiserror::Error;
use tracing::debug;

/// The runtime could not be created
#[derive(Error, Debug)]
#[error("failed to build monoio runtime: {0}")]
pub struct RuntimeError(#[from] pub std::io::Error);

/// Run a future to completion on a new single-threaded runtime
pub fn block_on<F>(future: F) -> Result<F::Output, RuntimeError>
where
    F: Future,
{
    let mut runtime = RuntimeBuilder::<FusionDriver>::new().build()?;
    debug!("▶️  monoio runtime started");
    Ok(runtime.block_on(future))
}
