//! E*TRADE request parameters
//!
//! Every enumerated query parameter is a closed enum. Parsing from a string
//! (`"put".parse::<ChainType>()`) is the only place an unknown value can
//! enter, and it fails with [`MarketError::InvalidParameter`]. Names are
//! matched exactly, lowercase.

use crate::errors::{MarketError, Result};
use crate::types::ResponseFormat;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which detail block a quote returns (`detailflag`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailFlag {
    Fundamental,
    Intraday,
    Options,
    Week52,
    All,
    MfDetail,
}

impl DetailFlag {
    pub const ALL_FLAGS: [DetailFlag; 6] = [
        DetailFlag::Fundamental,
        DetailFlag::Intraday,
        DetailFlag::Options,
        DetailFlag::Week52,
        DetailFlag::All,
        DetailFlag::MfDetail,
    ];

    /// Lowercase parameter name as accepted by `from_str`
    pub fn name(&self) -> &'static str {
        match self {
            DetailFlag::Fundamental => "fundamental",
            DetailFlag::Intraday => "intraday",
            DetailFlag::Options => "options",
            DetailFlag::Week52 => "week_52",
            DetailFlag::All => "all",
            DetailFlag::MfDetail => "mf_detail",
        }
    }

    /// Value sent on the wire
    pub fn as_query_value(&self) -> &'static str {
        match self {
            DetailFlag::Fundamental => "FUNDAMENTAL",
            DetailFlag::Intraday => "INTRADAY",
            DetailFlag::Options => "OPTIONS",
            DetailFlag::Week52 => "WEEK_52",
            DetailFlag::All => "ALL",
            DetailFlag::MfDetail => "MF_DETAIL",
        }
    }
}

impl std::fmt::Display for DetailFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl FromStr for DetailFlag {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        DetailFlag::ALL_FLAGS
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| {
                MarketError::invalid_parameter(
                    "detail_flag",
                    s,
                    "fundamental, intraday, options, week_52, all, mf_detail",
                )
            })
    }
}

/// Which side(s) of the chain to return (`chainType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainType {
    Put,
    Call,
    CallPut,
}

impl std::fmt::Display for ChainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainType::Put => write!(f, "PUT"),
            ChainType::Call => write!(f, "CALL"),
            ChainType::CallPut => write!(f, "CALLPUT"),
        }
    }
}

impl FromStr for ChainType {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "put" => Ok(ChainType::Put),
            "call" => Ok(ChainType::Call),
            "callput" => Ok(ChainType::CallPut),
            _ => Err(MarketError::invalid_parameter("chain_type", s, "put, call, callput")),
        }
    }
}

/// Contract size category (`optionCategory`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionCategory {
    Standard,
    All,
    Mini,
}

impl std::fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionCategory::Standard => write!(f, "STANDARD"),
            OptionCategory::All => write!(f, "ALL"),
            OptionCategory::Mini => write!(f, "MINI"),
        }
    }
}

impl FromStr for OptionCategory {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(OptionCategory::Standard),
            "all" => Ok(OptionCategory::All),
            "mini" => Ok(OptionCategory::Mini),
            _ => Err(MarketError::invalid_parameter("option_category", s, "standard, all, mini")),
        }
    }
}

/// Strike window (`priceType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceType {
    /// Strikes near the money
    AtTheMoneyNear,
    All,
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceType::AtTheMoneyNear => write!(f, "ATMN"),
            PriceType::All => write!(f, "ALL"),
        }
    }
}

impl FromStr for PriceType {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "atmn" => Ok(PriceType::AtTheMoneyNear),
            "all" => Ok(PriceType::All),
            _ => Err(MarketError::invalid_parameter("price_type", s, "atmn, all")),
        }
    }
}

/// Parameters for `quote/{symbols}`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteParams {
    pub symbols: Vec<String>,
    pub detail_flag: Option<DetailFlag>,
    pub require_earnings_date: Option<bool>,
    pub skip_mini_options_check: Option<bool>,
    pub format: ResponseFormat,
}

impl QuoteParams {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_detail_flag(mut self, detail_flag: DetailFlag) -> Self {
        self.detail_flag = Some(detail_flag);
        self
    }

    pub fn with_require_earnings_date(mut self, require: bool) -> Self {
        self.require_earnings_date = Some(require);
        self
    }

    pub fn with_skip_mini_options_check(mut self, skip: bool) -> Self {
        self.skip_mini_options_check = Some(skip);
        self
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }
}

/// Parameters for `optionchains`. Anything left `None` is omitted and the
/// vendor default applies; without an expiry date the nearest upcoming
/// expiration is returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionChainParams {
    pub symbol: String,
    pub expiry_date: Option<NaiveDate>,
    pub skip_adjusted: Option<bool>,
    pub chain_type: Option<ChainType>,
    pub strike_price_near: Option<f64>,
    pub no_of_strikes: Option<u32>,
    pub option_category: Option<OptionCategory>,
    pub price_type: Option<PriceType>,
}

impl OptionChainParams {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn with_expiry_date(mut self, expiry_date: impl Into<NaiveDate>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    pub fn with_skip_adjusted(mut self, skip: bool) -> Self {
        self.skip_adjusted = Some(skip);
        self
    }

    pub fn with_chain_type(mut self, chain_type: ChainType) -> Self {
        self.chain_type = Some(chain_type);
        self
    }

    pub fn with_strike_price_near(mut self, strike: f64) -> Self {
        self.strike_price_near = Some(strike);
        self
    }

    pub fn with_no_of_strikes(mut self, count: u32) -> Self {
        self.no_of_strikes = Some(count);
        self
    }

    pub fn with_option_category(mut self, category: OptionCategory) -> Self {
        self.option_category = Some(category);
        self
    }

    pub fn with_price_type(mut self, price_type: PriceType) -> Self {
        self.price_type = Some(price_type);
        self
    }
}
