//! Response decoding through the client, both formats

use etrade_market::prelude::*;
use etrade_market::{parse, parse_json, parse_xml};
use etrade_tests::fixtures::{LOOKUP_XML, QUOTE_JSON, QUOTE_XML, chain_xml};
use etrade_tests::{scripted_client, ScriptedTransport};
use rstest::*;

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[monoio::test]
    async fn test_lookup_xml() {
        let client = scripted_client(ScriptedTransport::new().respond_ok(LOOKUP_XML));
        let lookup = client.look_up_product("alphabet", ResponseFormat::Xml).await.unwrap();

        assert_eq!(lookup.data.len(), 2);
        assert_eq!(lookup.data[1].symbol.as_deref(), Some("GOOGL"));
        assert_eq!(lookup.data[1].product_type.as_deref(), Some("EQUITY"));
        assert_eq!(
            client.transport().requests(),
            vec!["https://apisb.etrade.com/v1/market/lookup/alphabet".to_string()]
        );
    }

    #[monoio::test]
    async fn test_lookup_json_requests_json_path() {
        let body = r#"{"LookupResponse":{"Data":[{"symbol":"MSFT","description":"MICROSOFT CORP COM","type":"EQUITY"}]}}"#;
        let client = scripted_client(ScriptedTransport::new().respond_ok(body));
        let lookup = client.look_up_product("MSFT", ResponseFormat::Json).await.unwrap();

        assert_eq!(lookup.data[0].description.as_deref(), Some("MICROSOFT CORP COM"));
        assert!(client.transport().requests()[0].ends_with("lookup/MSFT.json"));
    }

    #[monoio::test]
    async fn test_error_status_is_not_decoded() {
        let transport = ScriptedTransport::new().respond(MarketResponse::new(
            401,
            "<Error><message>oauth_problem=token_rejected</message></Error>",
        ));
        let client = scripted_client(transport);

        let err = client.look_up_product("GOOG", ResponseFormat::Xml).await.unwrap_err();
        assert!(err.is_transport_error());
        assert_eq!(err.status(), Some(401));
    }
}

#[cfg(test)]
mod quote_tests {
    use super::*;

    #[monoio::test]
    async fn test_quote_json() {
        let client = scripted_client(ScriptedTransport::new().respond_ok(QUOTE_JSON));
        let params = QuoteParams::new(["GOOG"]).with_format(ResponseFormat::Json);
        let quotes = client.get_quote(&params).await.unwrap();

        let quote = &quotes.quote_data[0];
        assert_eq!(quote.quote_status.as_deref(), Some("DELAYED"));
        assert_eq!(quote.product.as_ref().unwrap().symbol.as_deref(), Some("GOOG"));
        let all = quote.all.as_ref().unwrap();
        assert_eq!(all.last_trade, Some(1175.74));
        assert_eq!(all.dividend_yield, Some(0.0));
        assert!(quotes.messages.is_none());
    }

    #[monoio::test]
    async fn test_quote_xml_with_messages() {
        let client = scripted_client(ScriptedTransport::new().respond_ok(QUOTE_XML));
        let params = QuoteParams::new(["AAPL", "XYZ"]).with_detail_flag(DetailFlag::Intraday);
        let quotes = client.get_quote(&params).await.unwrap();

        assert_eq!(quotes.quote_data.len(), 1);
        let intraday = quotes.quote_data[0].intraday.as_ref().unwrap();
        assert_eq!(intraday.company_name.as_deref(), Some("APPLE INC COM"));
        assert_eq!(intraday.total_volume, Some(21_434_012));

        let messages = quotes.messages.unwrap().message;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].code, Some(1002));
        assert_eq!(
            client.transport().requests(),
            vec!["https://apisb.etrade.com/v1/market/quote/AAPL,XYZ?detailflag=INTRADAY".to_string()]
        );
    }

    #[monoio::test]
    async fn test_invalid_quote_params_never_hit_the_network() {
        let client = scripted_client(ScriptedTransport::new());
        let err = client.get_quote(&QuoteParams::new(Vec::<String>::new())).await.unwrap_err();

        assert!(err.is_parameter_error());
        assert!(client.transport().requests().is_empty());
    }
}

#[cfg(test)]
mod normalizer_tests {
    use super::*;

    #[test]
    fn test_chain_page_metadata() {
        let page: OptionChainPage = parse_xml(&chain_xml(&[("P1", "C1")])).unwrap();

        assert_eq!(page.option_pairs.len(), 1);
        assert_eq!(page.quote_type.as_deref(), Some("DELAYED"));
        assert_eq!(page.near_price, Some(170.5));
        let selected = page.selected_expiration.unwrap();
        assert_eq!((selected.year, selected.month, selected.day), (Some(2024), Some(3), Some(8)));
    }

    #[rstest]
    #[case(ResponseFormat::Xml, LOOKUP_XML)]
    #[case(ResponseFormat::Json, r#"{"LookupResponse":{"Data":[{"symbol":"GOOG"},{"symbol":"GOOGL"}]}}"#)]
    fn test_formats_agree_on_shape(#[case] format: ResponseFormat, #[case] body: &str) {
        let lookup: LookupResponse = parse(body, format).unwrap();
        let symbols: Vec<_> = lookup.data.iter().filter_map(|d| d.symbol.as_deref()).collect();
        assert_eq!(symbols, vec!["GOOG", "GOOGL"]);
    }

    #[rstest]
    #[case("{not json")]
    #[case(r#"{"QuoteResponse":{"QuoteData":"oops"}}"#)]
    fn test_bad_json_is_parse_error(#[case] body: &str) {
        let err = parse_json::<QuoteResponse>(body).unwrap_err();
        assert!(err.is_parse_error());
    }
}
