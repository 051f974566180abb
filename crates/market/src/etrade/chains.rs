//! Whole-chain aggregation across every expiration date

use crate::errors::{MarketError, Result};
use crate::etrade::rest::MarketClient;
use crate::etrade::types::OptionChainParams;
use crate::traits::Transport;
use crate::types::{AggregatedChainResult, OptionChainEntry, OptionPair};
use etrade_core::log_error;
use etrade_core::prelude::*;

use tracing::{debug, info};

impl<T: Transport> MarketClient<T> {
    /// Fetch the full option chain for `underlier`, keyed by expiration date.
    ///
    /// One expiration-date request, then one chain request per date, strictly
    /// in sequence. The first failure aborts the whole aggregation and no
    /// partial result is returned.
    pub async fn get_all_option_chains(&self, underlier: &str) -> Result<AggregatedChainResult> {
        let _timer = PerfTimer::start(format!("etrade_all_option_chains_{underlier}"));

        let run = generate_id();

        let expiration_dates = self.get_option_expire_date(underlier).await?;
        info!("🔗 [{}] {} has {} expiration dates", run, underlier, expiration_dates.len());

        let mut chains = AggregatedChainResult::new();
        for expiry in expiration_dates {
            if chains.contains_key(&expiry) {
                debug!("[{}] Skipping repeated expiration {} for {}", run, expiry, underlier);
                continue;
            }

            let params = OptionChainParams::new(underlier).with_expiry_date(expiry);
            let page = self.get_option_chains(&params).await?;

            let entries = flatten_pairs(page.option_pairs).inspect_err(|e| {
                log_error!(format!("optionchains for {underlier} {expiry}"), e);
            })?;
            debug!("📊 [{}] {} {}: {} contracts", run, underlier, expiry, entries.len());

            chains.insert(expiry, entries);
        }

        info!("✅ [{}] {} chains for {} assembled", run, chains.len(), underlier);
        Ok(chains)
    }
}

/// All puts in vendor order, then all calls in vendor order
pub fn flatten_pairs(pairs: Vec<OptionPair>) -> Result<Vec<OptionChainEntry>> {
    let mut puts = Vec::with_capacity(pairs.len() * 2);
    let mut calls = Vec::with_capacity(pairs.len());

    for (index, pair) in pairs.into_iter().enumerate() {
        let put = pair
            .put
            .ok_or_else(|| MarketError::parse("optionchains", format!("OptionPair {index} has no Put")))?;
        let call = pair
            .call
            .ok_or_else(|| MarketError::parse("optionchains", format!("OptionPair {index} has no Call")))?;
        puts.push(put);
        calls.push(call);
    }

    puts.append(&mut calls);
    Ok(puts)
}
