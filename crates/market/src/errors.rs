//! Market data error types
//!
//! Every failure surfaces to the immediate caller unchanged: there is no
//! retry, no fallback endpoint and no placeholder result.

use thiserror::Error;

/// Result type for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Market data operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// An enumerated parameter outside its closed set of legal values.
    /// Raised while building a request, before any network call.
    #[error("invalid {name} '{value}': expected one of {expected}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Non-success HTTP status from the API
    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    /// Malformed or unexpected XML/JSON in a response
    #[error("failed to parse {context} response: {message}")]
    ParseError { context: String, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl MarketError {
    pub fn invalid_parameter(
        name: &'static str,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
            expected,
        }
    }

    pub fn parse(context: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::ParseError {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::HttpError(..))
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// HTTP status carried by a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse("JSON", err)
    }
}

impl From<quick_xml::DeError> for MarketError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::parse("XML", err)
    }
}

impl From<url::ParseError> for MarketError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for MarketError {
    fn from(err: std::io::Error) -> Self {
        Self::NetworkError(err.to_string())
    }
}

impl From<etrade_core::RuntimeError> for MarketError {
    fn from(err: etrade_core::RuntimeError) -> Self {
        Self::RuntimeError(err.to_string())
    }
}
