//! Check E*TRADE credentials and connectivity
//!
//! 1. Loads credentials from .env
//! 2. Verifies all four OAuth values are present
//! 3. Performs one signed product lookup

use etrade_market::prelude::*;
use std::env;

#[monoio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("🚀 E*TRADE Credentials Test");
    println!("===========================");

    dotenv::dotenv().ok();

    let config = match MarketConfig::from_env() {
        Ok(config) => config,
        Err(MarketError::MissingCredentials(var)) => {
            eprintln!("❌ ERROR: {var} not found in environment or .env file");
            eprintln!("   Set ETRADE_CONSUMER_KEY, ETRADE_CONSUMER_SECRET,");
            eprintln!("   ETRADE_OAUTH_TOKEN and ETRADE_OAUTH_TOKEN_SECRET.");
            return Err(MarketError::MissingCredentials(var).into());
        }
        Err(e) => return Err(e.into()),
    };

    let key = &config.consumer_key;
    let shown: String = key.chars().take(6).collect();
    println!("✅ Environment variables loaded");
    println!("   Consumer key: {shown}...");
    println!(
        "   Sandbox: {} ({})",
        config.sandbox,
        env::var("ETRADE_SANDBOX").unwrap_or_else(|_| "unset".to_string())
    );
    println!();

    if !config.credentials().is_valid() {
        eprintln!("❌ ERROR: one or more credentials are empty");
        return Err(MarketError::InvalidCredentials.into());
    }

    let client = MarketClient::new(config)?;
    println!("{client}");
    println!();

    println!("🔗 Testing signed request...");
    let timer = PerfTimer::start("credentials_lookup");
    match client.look_up_product("GOOG", ResponseFormat::Json).await {
        Ok(lookup) => {
            println!("✅ Lookup succeeded in {}ms, {} results", timer.elapsed_millis(), lookup.data.len());
        }
        Err(e) if e.status() == Some(401) => {
            eprintln!("❌ Authorization rejected: the access token may have expired");
            return Err(e.into());
        }
        Err(e) => {
            eprintln!("❌ Lookup failed: {e}");
            return Err(e.into());
        }
    }

    println!();
    println!("🎉 Credentials are working");
    Ok(())
}
