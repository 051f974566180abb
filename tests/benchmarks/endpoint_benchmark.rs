//! Benchmarks for the CPU-bound parts of a market data call
//!
//! - Request URL building
//! - OAuth 1.0a signing
//! - XML option chain decoding and put/call flattening

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use etrade_market::prelude::*;
use etrade_market::parse_xml;
use etrade_tests::fixtures::chain_xml;

fn bench_url_building(c: &mut Criterion) {
    let endpoints = MarketEndpoints::new(SANDBOX_BASE_URL).unwrap();
    let quote = QuoteParams::new((0..25).map(|i| format!("SYM{i}")))
        .with_detail_flag(DetailFlag::All)
        .with_skip_mini_options_check(true);
    let chain = OptionChainParams::new("AAPL")
        .with_expiry_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        .with_strike_price_near(170.0)
        .with_chain_type(ChainType::CallPut)
        .with_no_of_strikes(20);

    let mut group = c.benchmark_group("url_building");
    group.bench_function("quote_25_symbols", |b| {
        b.iter(|| endpoints.quote(black_box(&quote)).unwrap())
    });
    group.bench_function("option_chains", |b| {
        b.iter(|| endpoints.option_chains(black_box(&chain)).unwrap())
    });
    group.finish();
}

fn bench_signing(c: &mut Criterion) {
    let signer = OAuthSigner::new(EtradeCredentials::new("ck", "cs", "tok", "ts")).unwrap();
    let url = "https://apisb.etrade.com/v1/market/optionchains?symbol=AAPL&expiryDay=15&expiryMonth=03&expiryYear=2024";

    c.bench_function("oauth_sign", |b| {
        b.iter(|| signer.sign_with("GET", black_box(url), "nonce", 1_700_000_000).unwrap())
    });
}

fn bench_chain_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_decoding");

    for strikes in [10usize, 50, 200] {
        let symbols: Vec<(String, String)> = (0..strikes)
            .map(|i| (format!("P{i}"), format!("C{i}")))
            .collect();
        let pairs: Vec<(&str, &str)> = symbols.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        let body = chain_xml(&pairs);

        group.bench_with_input(BenchmarkId::new("parse_and_flatten", strikes), &body, |b, body| {
            b.iter(|| {
                let page: OptionChainPage = parse_xml(black_box(body)).unwrap();
                flatten_pairs(page.option_pairs).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_url_building, bench_signing, bench_chain_decoding);
criterion_main!(benches);
