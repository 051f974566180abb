//! Response normalizer
//!
//! XML bodies look like `<LookupResponse><Data>..</Data><Data>..</Data></LookupResponse>`
//! and JSON bodies like `{"LookupResponse": {"Data": [..]}}`. Both decode into
//! the same payload struct: XML through quick-xml (the root element's
//! content maps onto the struct, repeated elements onto `Vec`s), JSON
//! through serde_json after unwrapping the root key.

use crate::errors::{MarketError, Result};
use crate::types::{
    ExpirationDateList, LookupResponse, OptionChainPage, QuoteResponse, ResponseFormat,
};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;

/// A payload returned by one market data endpoint
pub trait MarketPayload: DeserializeOwned {
    /// Vendor root element / root JSON key
    const ROOT: &'static str;
}

impl MarketPayload for LookupResponse {
    const ROOT: &'static str = "LookupResponse";
}

impl MarketPayload for QuoteResponse {
    const ROOT: &'static str = "QuoteResponse";
}

impl MarketPayload for OptionChainPage {
    const ROOT: &'static str = "OptionChainResponse";
}

impl MarketPayload for ExpirationDateList {
    const ROOT: &'static str = "OptionExpireDateResponse";
}

/// Decode an XML body. The document element must be `P::ROOT`.
pub fn parse_xml<P: MarketPayload>(text: &str) -> Result<P> {
    match root_element(text) {
        Some(root) if root == P::ROOT => {}
        Some(root) => {
            return Err(MarketError::parse(
                P::ROOT,
                format!("unexpected root element '{root}'"),
            ));
        }
        None => return Err(MarketError::parse(P::ROOT, "no root element")),
    }

    quick_xml::de::from_str(text).map_err(|e| MarketError::parse(P::ROOT, e))
}

/// Name of the document element, skipping the prolog
fn root_element(text: &str) -> Option<String> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::DocType(_) | Event::PI(_)) => {}
            Ok(Event::Text(t)) if t.iter().all(u8::is_ascii_whitespace) => {}
            _ => return None,
        }
    }
}

/// Decode a JSON body, unwrapping the `{ROOT: ...}` envelope
pub fn parse_json<P: MarketPayload>(text: &str) -> Result<P> {
    let mut envelope: serde_json::Value =
        serde_json::from_str(text).map_err(|e| MarketError::parse(P::ROOT, e))?;

    let payload = envelope
        .get_mut(P::ROOT)
        .map(serde_json::Value::take)
        .ok_or_else(|| MarketError::parse(P::ROOT, format!("missing root key '{}'", P::ROOT)))?;

    serde_json::from_value(payload).map_err(|e| MarketError::parse(P::ROOT, e))
}

/// Decode a body in the given format
pub fn parse<P: MarketPayload>(text: &str, format: ResponseFormat) -> Result<P> {
    match format {
        ResponseFormat::Xml => parse_xml(text),
        ResponseFormat::Json => parse_json(text),
    }
}
