//! Request URL builders for the market data endpoints
//!
//! Pure functions of their parameters: no I/O, no signing. Symbols are
//! passed through as given. Query parameters appear in a fixed order and
//! optional parameters that were not supplied are omitted entirely.

use crate::errors::{MarketError, Result};
use crate::etrade::types::{OptionChainParams, QuoteParams};
use crate::types::ResponseFormat;
use chrono::Datelike;
use tracing::warn;
use url::Url;

/// Most symbols a single quote request accepts
pub const MAX_QUOTE_SYMBOLS: usize = 25;

/// Non-fatal adjustment made while building a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestWarning {
    /// The symbol list was cut down to [`MAX_QUOTE_SYMBOLS`]
    SymbolsTruncated { requested: usize, used: usize },
}

impl std::fmt::Display for RequestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestWarning::SymbolsTruncated { requested, used } => write!(
                f,
                "{requested} symbols requested, only the first {used} are sent"
            ),
        }
    }
}

/// A built request URL plus any warnings raised while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub url: String,
    pub warnings: Vec<RequestWarning>,
}

/// URL builder rooted at a market data base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketEndpoints {
    base_url: String,
}

impl MarketEndpoints {
    /// `base_url` must be an absolute http(s) URL; a trailing `/` is added
    /// when missing.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "https" | "http") {
            return Err(MarketError::InvalidUrl(format!(
                "unsupported scheme in base URL: {base_url}"
            )));
        }

        let mut base_url = parsed.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `lookup/{search}`; the search text is free-form and is percent-encoded
    pub fn lookup(&self, search: &str, format: ResponseFormat) -> Result<String> {
        if search.trim().is_empty() {
            return Err(MarketError::invalid_parameter(
                "search",
                search,
                "a non-empty search string",
            ));
        }

        Ok(format!(
            "{}lookup/{}{}",
            self.base_url,
            urlencoding::encode(search),
            format.path_suffix()
        ))
    }

    /// `quote/{sym1,sym2,...}`
    pub fn quote(&self, params: &QuoteParams) -> Result<RequestUrl> {
        if params.symbols.is_empty() {
            return Err(MarketError::invalid_parameter(
                "symbols",
                "",
                "at least one symbol",
            ));
        }
        for symbol in &params.symbols {
            check_symbol("symbols", symbol)?;
        }

        let mut warnings = Vec::new();
        let symbols = if params.symbols.len() > MAX_QUOTE_SYMBOLS {
            warn!(
                "⚠️ get_quote called with {} symbols, only the first {} are used",
                params.symbols.len(),
                MAX_QUOTE_SYMBOLS
            );
            warnings.push(RequestWarning::SymbolsTruncated {
                requested: params.symbols.len(),
                used: MAX_QUOTE_SYMBOLS,
            });
            &params.symbols[..MAX_QUOTE_SYMBOLS]
        } else {
            &params.symbols[..]
        };

        let mut query = QueryBuilder::default();
        if let Some(flag) = params.detail_flag {
            query.push("detailflag", flag.as_query_value());
        }
        if params.require_earnings_date == Some(true) {
            query.push("requireEarningsDate", "true");
        }
        if let Some(skip) = params.skip_mini_options_check {
            query.push("skipMiniOptionsCheck", bool_value(skip));
        }

        let url = format!(
            "{}quote/{}{}{}",
            self.base_url,
            symbols.join(","),
            params.format.path_suffix(),
            query.finish()
        );

        Ok(RequestUrl { url, warnings })
    }

    /// `optionchains?symbol=...`. Always XML.
    pub fn option_chains(&self, params: &OptionChainParams) -> Result<String> {
        check_symbol("symbol", &params.symbol)?;

        let mut query = QueryBuilder::default();
        query.push("symbol", &params.symbol);

        if let Some(date) = params.expiry_date {
            query.push("expiryDay", &format!("{:02}", date.day()));
            query.push("expiryMonth", &format!("{:02}", date.month()));
            query.push("expiryYear", &format!("{:04}", date.year()));
        }
        if let Some(strike) = params.strike_price_near {
            if !strike.is_finite() || strike < 0.0 {
                return Err(MarketError::invalid_parameter(
                    "strike_price_near",
                    strike.to_string(),
                    "a finite, non-negative price",
                ));
            }
            query.push("strikePriceNear", &format!("{strike:.2}"));
        }
        if let Some(chain_type) = params.chain_type {
            query.push("chainType", &chain_type.to_string());
        }
        if let Some(category) = params.option_category {
            query.push("optionCategory", &category.to_string());
        }
        if let Some(price_type) = params.price_type {
            query.push("priceType", &price_type.to_string());
        }
        if let Some(skip) = params.skip_adjusted {
            query.push("skipAdjusted", bool_value(skip));
        }
        if let Some(count) = params.no_of_strikes {
            if count == 0 {
                return Err(MarketError::invalid_parameter(
                    "no_of_strikes",
                    "0",
                    "a positive strike count",
                ));
            }
            query.push("noOfStrikes", &count.to_string());
        }

        Ok(format!("{}optionchains{}", self.base_url, query.finish()))
    }

    /// `optionexpiredate?symbol=...&expiryType=ALL`. Always XML.
    pub fn option_expire_date(&self, underlier: &str) -> Result<String> {
        check_symbol("underlier", underlier)?;
        Ok(format!(
            "{}optionexpiredate?symbol={}&expiryType=ALL",
            self.base_url, underlier
        ))
    }
}

/// Rejects symbols that would change the shape of the URL
fn check_symbol(name: &'static str, symbol: &str) -> Result<()> {
    let malformed = symbol.is_empty()
        || symbol
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '&' | ',' | '='));

    if malformed {
        return Err(MarketError::invalid_parameter(
            name,
            symbol,
            "a non-empty symbol without whitespace or URL delimiters",
        ));
    }
    Ok(())
}

fn bool_value(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[derive(Default)]
struct QueryBuilder {
    pairs: Vec<String>,
}

impl QueryBuilder {
    fn push(&mut self, key: &str, value: &str) {
        self.pairs.push(format!("{key}={value}"));
    }

    fn finish(self) -> String {
        if self.pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", self.pairs.join("&"))
        }
    }
}
