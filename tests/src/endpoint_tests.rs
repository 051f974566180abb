//! Request URL builder tests
//!
//! Query ordering, optional-parameter omission, enum validation and the
//! 25-symbol quote limit, with properties over arbitrary inputs.

use chrono::NaiveDate;
use etrade_market::prelude::*;
use proptest::prelude::*;
use rstest::*;

// ============================================================================
// FIXTURES
// ============================================================================

#[fixture]
fn sandbox() -> MarketEndpoints {
    MarketEndpoints::new(SANDBOX_BASE_URL).unwrap()
}

#[fixture]
fn production() -> MarketEndpoints {
    MarketEndpoints::new(PRODUCTION_BASE_URL).unwrap()
}

// ============================================================================
// LOOKUP
// ============================================================================

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[rstest]
    #[case("xml", "https://apisb.etrade.com/v1/market/lookup/AAPL")]
    #[case("XML", "https://apisb.etrade.com/v1/market/lookup/AAPL")]
    #[case("json", "https://apisb.etrade.com/v1/market/lookup/AAPL.json")]
    #[case("JSON", "https://apisb.etrade.com/v1/market/lookup/AAPL.json")]
    fn test_lookup_format_suffix(sandbox: MarketEndpoints, #[case] format: &str, #[case] expected: &str) {
        let format: ResponseFormat = format.parse().unwrap();
        assert_eq!(sandbox.lookup("AAPL", format).unwrap(), expected);
    }

    #[rstest]
    fn test_lookup_production_host(production: MarketEndpoints) {
        assert_eq!(
            production.lookup("MSFT", ResponseFormat::Xml).unwrap(),
            "https://api.etrade.com/v1/market/lookup/MSFT"
        );
    }

    #[rstest]
    #[case("csv")]
    #[case("")]
    fn test_lookup_rejects_unknown_format(#[case] format: &str) {
        let err = format.parse::<ResponseFormat>().unwrap_err();
        assert!(err.is_parameter_error());
    }
}

// ============================================================================
// QUOTES
// ============================================================================

#[cfg(test)]
mod quote_tests {
    use super::*;

    #[rstest]
    fn test_quote_without_options(sandbox: MarketEndpoints) {
        let request = sandbox.quote(&QuoteParams::new(["GOOG", "AAPL", "MSFT"])).unwrap();
        assert_eq!(
            request.url,
            "https://apisb.etrade.com/v1/market/quote/GOOG,AAPL,MSFT"
        );
    }

    #[rstest]
    fn test_quote_all_options(sandbox: MarketEndpoints) {
        let params = QuoteParams::new(["GOOG"])
            .with_detail_flag("mf_detail".parse().unwrap())
            .with_require_earnings_date(true)
            .with_skip_mini_options_check(true)
            .with_format(ResponseFormat::Json);

        assert_eq!(
            sandbox.quote(&params).unwrap().url,
            "https://apisb.etrade.com/v1/market/quote/GOOG.json?detailflag=MF_DETAIL&requireEarningsDate=true&skipMiniOptionsCheck=true"
        );
    }

    #[rstest]
    fn test_quote_skip_mini_false_is_serialized(sandbox: MarketEndpoints) {
        let params = QuoteParams::new(["GOOG"]).with_skip_mini_options_check(false);
        assert_eq!(
            sandbox.quote(&params).unwrap().url,
            "https://apisb.etrade.com/v1/market/quote/GOOG?skipMiniOptionsCheck=false"
        );
    }

    #[rstest]
    fn test_quote_thirty_symbols(sandbox: MarketEndpoints) {
        let symbols: Vec<String> = (1..=30).map(|i| format!("SYM{i:02}")).collect();
        let request = sandbox.quote(&QuoteParams::new(symbols.clone())).unwrap();

        let path = request.url.trim_start_matches("https://apisb.etrade.com/v1/market/quote/");
        let sent: Vec<&str> = path.split(',').collect();
        assert_eq!(sent.len(), 25);
        assert_eq!(sent, symbols[..25].iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(request.warnings.len(), 1);
        assert_eq!(
            request.warnings[0],
            RequestWarning::SymbolsTruncated { requested: 30, used: 25 }
        );
    }

    #[rstest]
    fn test_quote_empty_symbols(sandbox: MarketEndpoints) {
        let err = sandbox.quote(&QuoteParams::new(Vec::<String>::new())).unwrap_err();
        assert!(matches!(err, MarketError::InvalidParameter { name: "symbols", .. }));
    }

    #[rstest]
    #[case("week52")]
    #[case("everything")]
    #[case("WEEK 52")]
    fn test_invalid_detail_flag(#[case] flag: &str) {
        let err = flag.parse::<DetailFlag>().unwrap_err();
        assert!(matches!(err, MarketError::InvalidParameter { name: "detail_flag", .. }));
    }
}

// ============================================================================
// OPTION CHAINS AND EXPIRATION DATES
// ============================================================================

#[cfg(test)]
mod option_chain_tests {
    use super::*;

    #[rstest]
    fn test_strike_price_two_decimals(sandbox: MarketEndpoints) {
        let params = OptionChainParams::new("AAPL").with_strike_price_near(123.4);
        let url = sandbox.option_chains(&params).unwrap();
        assert!(url.contains("strikePriceNear=123.40"), "{url}");
    }

    #[rstest]
    fn test_expiry_fields_zero_padded(sandbox: MarketEndpoints) {
        let params = OptionChainParams::new("AAPL")
            .with_expiry_date(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(
            sandbox.option_chains(&params).unwrap(),
            "https://apisb.etrade.com/v1/market/optionchains?symbol=AAPL&expiryDay=03&expiryMonth=01&expiryYear=2025"
        );
    }

    #[rstest]
    fn test_no_of_strikes_is_a_count(sandbox: MarketEndpoints) {
        let params = OptionChainParams::new("AAPL").with_no_of_strikes(5);
        assert_eq!(
            sandbox.option_chains(&params).unwrap(),
            "https://apisb.etrade.com/v1/market/optionchains?symbol=AAPL&noOfStrikes=5"
        );
    }

    #[rstest]
    fn test_parsed_filters(
        sandbox: MarketEndpoints,
        #[values("put", "call", "callput")] chain_type: &str,
        #[values("standard", "all", "mini")] category: &str,
    ) {
        let params = OptionChainParams::new("SPY")
            .with_chain_type(chain_type.parse().unwrap())
            .with_option_category(category.parse().unwrap());
        let url = sandbox.option_chains(&params).unwrap();

        assert!(url.contains(&format!("chainType={}", chain_type.to_uppercase())));
        assert!(url.contains(&format!("optionCategory={}", category.to_uppercase())));
        assert!(url.find("chainType").unwrap() < url.find("optionCategory").unwrap());
    }

    #[rstest]
    #[case("straddle")]
    #[case("CallPut")]
    #[case("")]
    fn test_invalid_chain_type(#[case] value: &str) {
        assert!(value.parse::<ChainType>().unwrap_err().is_parameter_error());
    }

    #[rstest]
    fn test_expire_date_url(production: MarketEndpoints) {
        assert_eq!(
            production.option_expire_date("GOOG").unwrap(),
            "https://api.etrade.com/v1/market/optionexpiredate?symbol=GOOG&expiryType=ALL"
        );
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn endpoints() -> MarketEndpoints {
        MarketEndpoints::new(SANDBOX_BASE_URL).unwrap()
    }

    proptest! {
        #[test]
        fn quote_keeps_first_25_in_order(symbols in prop::collection::vec("[A-Z]{1,5}", 1..60)) {
            let request = endpoints().quote(&QuoteParams::new(symbols.clone())).unwrap();
            let path = request.url.trim_start_matches("https://apisb.etrade.com/v1/market/quote/");
            let sent: Vec<String> = path.split(',').map(str::to_string).collect();

            let expected = symbols.len().min(MAX_QUOTE_SYMBOLS);
            prop_assert_eq!(&sent[..], &symbols[..expected]);
            prop_assert_eq!(request.warnings.len(), usize::from(symbols.len() > MAX_QUOTE_SYMBOLS));
        }

        #[test]
        fn strike_price_always_two_decimals(strike in 0.0f64..100_000.0) {
            let url = endpoints()
                .option_chains(&OptionChainParams::new("SPY").with_strike_price_near(strike))
                .unwrap();
            let value = url.split("strikePriceNear=").nth(1).unwrap();
            let decimals = value.split('.').nth(1).unwrap();
            prop_assert_eq!(decimals.len(), 2);
        }

        #[test]
        fn expiry_fields_round_trip(days in 0i64..20_000) {
            let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(days);
            let url = endpoints()
                .option_chains(&OptionChainParams::new("SPY").with_expiry_date(date))
                .unwrap();

            let expected = format!(
                "expiryDay={}&expiryMonth={}&expiryYear={}",
                date.format("%d"),
                date.format("%m"),
                date.format("%Y")
            );
            prop_assert!(url.contains(&expected), "{}", url);
        }

        #[test]
        fn lookup_never_leaks_raw_spaces(search in "[a-zA-Z ]{1,20}") {
            prop_assume!(!search.trim().is_empty());
            let url = endpoints().lookup(&search, ResponseFormat::Xml).unwrap();
            prop_assert!(!url.contains(' '));
        }
    }
}
