//! Typed market data payloads
//!
//! Each endpoint decodes into an explicit struct rather than a generic tree.
//! Field names follow the vendor's element/key names through serde renames,
//! so one struct serves both the XML and the JSON variant of an endpoint.
//! Everything the vendor may omit is an `Option`.

use crate::errors::{MarketError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Wire format requested from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Xml,
    Json,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Xml => "xml",
            ResponseFormat::Json => "json",
        }
    }

    /// Path suffix selecting this format
    pub fn path_suffix(&self) -> &'static str {
        match self {
            ResponseFormat::Xml => "",
            ResponseFormat::Json => ".json",
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = MarketError;

    /// Case-insensitive: "xml", "XML" and "Json" are all accepted
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(ResponseFormat::Xml),
            "json" => Ok(ResponseFormat::Json),
            _ => Err(MarketError::invalid_parameter("resp_format", s, "xml, json")),
        }
    }
}

// ---------------------------------------------------------------------------
// Expiration dates
// ---------------------------------------------------------------------------

/// Calendar date on which an option contract expires.
///
/// Only ever built from the expiration-date endpoint's response; there is no
/// public constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExpirationDate(NaiveDate);

impl ExpirationDate {
    pub(crate) fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl std::fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl PartialEq<NaiveDate> for ExpirationDate {
    fn eq(&self, other: &NaiveDate) -> bool {
        self.0 == *other
    }
}

impl From<ExpirationDate> for NaiveDate {
    fn from(date: ExpirationDate) -> Self {
        date.0
    }
}

/// `OptionExpireDateResponse`. A response without any `ExpirationDate`
/// does not decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpirationDateList {
    #[serde(rename = "ExpirationDate")]
    pub expiration_dates: Vec<ExpirationDateRecord>,
}

/// One `ExpirationDate` element as sent by the vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationDateRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// WEEKLY, MONTHLY, QUARTERLY, ...
    #[serde(rename = "expiryType", default)]
    pub expiry_type: Option<String>,
}

impl ExpirationDateRecord {
    pub fn to_expiration_date(&self) -> Result<ExpirationDate> {
        ExpirationDate::from_ymd(self.year, self.month, self.day).ok_or_else(|| {
            MarketError::parse(
                "optionexpiredate",
                format!(
                    "invalid expiration date {:04}-{:02}-{:02}",
                    self.year, self.month, self.day
                ),
            )
        })
    }
}

impl ExpirationDateList {
    /// Expiration dates in vendor order
    pub fn dates(&self) -> Result<Vec<ExpirationDate>> {
        self.expiration_dates
            .iter()
            .map(ExpirationDateRecord::to_expiration_date)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Option chains
// ---------------------------------------------------------------------------

/// A single Put or Call contract (`OptionDetails`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionChainEntry {
    pub option_category: Option<String>,
    pub option_root_symbol: Option<String>,
    pub time_stamp: Option<i64>,
    pub adjusted_flag: Option<bool>,
    pub display_symbol: Option<String>,
    pub option_type: Option<String>,
    pub strike_price: Option<f64>,
    pub symbol: Option<String>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub bid_size: Option<i64>,
    pub ask_size: Option<i64>,
    pub in_the_money: Option<String>,
    pub volume: Option<i64>,
    pub open_interest: Option<i64>,
    pub net_change: Option<f64>,
    pub last_price: Option<f64>,
    pub quote_detail: Option<String>,
    pub osi_key: Option<String>,
    #[serde(rename = "OptionGreeks")]
    pub option_greeks: Option<OptionGreeks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionGreeks {
    pub rho: Option<f64>,
    pub vega: Option<f64>,
    pub theta: Option<f64>,
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub iv: Option<f64>,
    pub current_value: Option<bool>,
}

/// Put and Call at one strike. Either side is absent when the request
/// filtered by chain type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionPair {
    #[serde(rename = "Put", default)]
    pub put: Option<OptionChainEntry>,
    #[serde(rename = "Call", default)]
    pub call: Option<OptionChainEntry>,
}

/// `OptionChainResponse`. `OptionPair` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainPage {
    #[serde(rename = "OptionPair")]
    pub option_pairs: Vec<OptionPair>,
    #[serde(default)]
    pub time_stamp: Option<i64>,
    #[serde(default)]
    pub quote_type: Option<String>,
    #[serde(default)]
    pub near_price: Option<f64>,
    #[serde(rename = "SelectedED", default)]
    pub selected_expiration: Option<SelectedExpiration>,
}

/// Expiration the vendor actually served (`SelectedED`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedExpiration {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub day: Option<u32>,
}

/// Every Put then every Call of every expiration, keyed by expiration date
pub type AggregatedChainResult = BTreeMap<ExpirationDate, Vec<OptionChainEntry>>;

// ---------------------------------------------------------------------------
// Product lookup
// ---------------------------------------------------------------------------

/// `LookupResponse`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(rename = "Data", default)]
    pub data: Vec<LookupEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupEntry {
    pub symbol: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// `QuoteResponse`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "QuoteData", default)]
    pub quote_data: Vec<QuoteData>,
    #[serde(rename = "Messages", default)]
    pub messages: Option<Messages>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(rename = "Message", default)]
    pub message: Vec<Message>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub description: Option<String>,
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteData {
    pub date_time: Option<String>,
    #[serde(rename = "dateTimeUTC")]
    pub date_time_utc: Option<i64>,
    pub quote_status: Option<String>,
    pub ah_flag: Option<String>,
    pub error_message: Option<String>,
    pub has_mini_options: Option<bool>,
    #[serde(rename = "Product")]
    pub product: Option<Product>,
    #[serde(rename = "All")]
    pub all: Option<AllQuoteDetails>,
    #[serde(rename = "Fundamental")]
    pub fundamental: Option<FundamentalQuoteDetails>,
    #[serde(rename = "Intraday")]
    pub intraday: Option<IntradayQuoteDetails>,
    #[serde(rename = "Option")]
    pub option: Option<OptionQuoteDetails>,
    #[serde(rename = "Week52")]
    pub week52: Option<Week52QuoteDetails>,
    #[serde(rename = "MutualFund")]
    pub mutual_fund: Option<MutualFundQuoteDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub symbol: Option<String>,
    pub security_type: Option<String>,
    pub exchange: Option<String>,
}

/// Detail block for `detailflag=ALL` (the vendor default)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllQuoteDetails {
    pub adjusted_flag: Option<bool>,
    pub ask: Option<f64>,
    pub ask_size: Option<i64>,
    pub bid: Option<f64>,
    pub bid_size: Option<i64>,
    pub beta: Option<f64>,
    pub change_close: Option<f64>,
    pub change_close_percentage: Option<f64>,
    pub company_name: Option<String>,
    pub days_to_expiration: Option<i64>,
    pub dir_last: Option<String>,
    pub dividend: Option<f64>,
    pub eps: Option<f64>,
    pub est_earnings: Option<f64>,
    pub ex_dividend_date: Option<i64>,
    pub high: Option<f64>,
    pub high52: Option<f64>,
    pub last_trade: Option<f64>,
    pub low: Option<f64>,
    pub low52: Option<f64>,
    pub market_cap: Option<f64>,
    pub next_earning_date: Option<String>,
    pub open: Option<f64>,
    pub open_interest: Option<i64>,
    pub pe: Option<f64>,
    pub previous_close: Option<f64>,
    pub primary_exchange: Option<String>,
    pub shares_outstanding: Option<f64>,
    pub symbol_description: Option<String>,
    pub total_volume: Option<i64>,
    pub week52_low_date: Option<i64>,
    pub week52_hi_date: Option<i64>,
    #[serde(rename = "yield")]
    pub dividend_yield: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundamentalQuoteDetails {
    pub company_name: Option<String>,
    pub eps: Option<f64>,
    pub est_earnings: Option<f64>,
    pub high52: Option<f64>,
    pub last_trade: Option<f64>,
    pub low52: Option<f64>,
    pub symbol_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntradayQuoteDetails {
    pub ask: Option<f64>,
    pub bid: Option<f64>,
    pub change_close: Option<f64>,
    pub change_close_percentage: Option<f64>,
    pub company_name: Option<String>,
    pub high: Option<f64>,
    pub last_trade: Option<f64>,
    pub low: Option<f64>,
    pub total_volume: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionQuoteDetails {
    pub ask: Option<f64>,
    pub ask_size: Option<i64>,
    pub bid: Option<f64>,
    pub bid_size: Option<i64>,
    pub company_name: Option<String>,
    pub days_to_expiration: Option<i64>,
    pub last_trade: Option<f64>,
    pub open_interest: Option<i64>,
    pub option_previous_bid_price: Option<f64>,
    pub option_previous_ask_price: Option<f64>,
    pub osi_key: Option<String>,
    pub intrinsic_value: Option<f64>,
    pub time_premium: Option<f64>,
    pub option_multiplier: Option<f64>,
    pub contract_size: Option<f64>,
    pub symbol_description: Option<String>,
    #[serde(rename = "OptionGreeks")]
    pub option_greeks: Option<OptionGreeks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Week52QuoteDetails {
    pub company_name: Option<String>,
    pub high52: Option<f64>,
    pub last_trade: Option<f64>,
    pub low52: Option<f64>,
    pub perf12_months: Option<f64>,
    pub previous_close: Option<f64>,
    pub symbol_description: Option<String>,
    pub total_volume: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MutualFundQuoteDetails {
    pub symbol_description: Option<String>,
    pub cusip: Option<String>,
    pub change_close: Option<f64>,
    pub previous_close: Option<f64>,
    pub net_asset_value: Option<f64>,
    pub public_offer_price: Option<f64>,
    pub fund_family: Option<String>,
}
