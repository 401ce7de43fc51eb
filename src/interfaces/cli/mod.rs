/// CLI Interface Module
///
/// Command-line entry point for the exchange engine. The engine itself is a
/// pure synchronous state machine with no networking, so the binary runs a
/// scripted demo session against it: register an asset, fund a few accounts,
/// rest limit orders and sweep them with market orders, printing book and
/// balance snapshots along the way.
///
/// ## Responsibilities
/// - Parse command-line arguments
/// - Initialize logging
/// - Drive the demo session and render its results

use crate::application::Exchange;
use crate::domain::asset::{AccountId, AssetAddress, Side, Ticker, BASE_TICKER};
use crate::domain::registry::AssetRegistry;
use crate::interfaces::tools::MockToken;
use clap::Parser;
use std::sync::Arc;

/// Exchange engine command-line configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "dex-engine")]
#[command(version = "0.1.0")]
#[command(about = "Custodial exchange ledger and matching engine", long_about = None)]
pub struct CliConfig {
    /// Ticker used for the demo asset
    #[arg(short, long, default_value = "USDT")]
    pub ticker: String,

    /// Render book and balance snapshots as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Log level
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,
}

/// Runs the CLI application
///
/// Parses command-line arguments, wires up an exchange with one registered
/// demo asset and walks it through a limit/market order session.
pub fn run() {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    let owner = AccountId(0);
    let buyer = AccountId(1);
    let seller = AccountId(2);

    let ticker = match Ticker::try_new(&config.ticker) {
        Ok(ticker) => ticker,
        Err(reason) => {
            eprintln!("invalid ticker {:?}: {}", config.ticker, reason);
            std::process::exit(1);
        }
    };

    let mut exchange = Exchange::new(AssetRegistry::new(owner));
    let token = Arc::new(MockToken::new(AssetAddress(0xdada)));
    token.mint(seller, 500);

    if let Err(err) = session(&mut exchange, token, ticker, owner, buyer, seller) {
        eprintln!("demo session failed: {err}");
        std::process::exit(1);
    }

    render(&exchange, ticker, &[buyer, seller], config.json);
}

fn session(
    exchange: &mut Exchange,
    token: Arc<MockToken>,
    ticker: Ticker,
    owner: AccountId,
    buyer: AccountId,
    seller: AccountId,
) -> Result<(), crate::shared::ExchangeError> {
    exchange.register_asset(ticker, token, owner)?;
    exchange.deposit(ticker, 100, seller)?;
    exchange.deposit_base(100, buyer)?;

    // Three resting bids at increasing prices, then a market sell that takes
    // the best bid only, leaving two on the book.
    exchange.place_limit_order(ticker, Side::Buy, 1, 1, buyer)?;
    exchange.place_limit_order(ticker, Side::Buy, 2, 11, buyer)?;
    exchange.place_limit_order(ticker, Side::Buy, 3, 21, buyer)?;

    let fills = exchange.place_market_order(ticker, Side::Sell, 3, seller)?;
    for fill in &fills {
        tracing::info!(price = fill.price, amount = fill.amount, "demo fill");
    }
    Ok(())
}

fn render(exchange: &Exchange, ticker: Ticker, accounts: &[AccountId], json: bool) {
    for side in [Side::Buy, Side::Sell] {
        let book = exchange.order_book(ticker, side);
        if json {
            match serde_json::to_string_pretty(&book) {
                Ok(rendered) => println!("{rendered}"),
                Err(err) => eprintln!("snapshot serialization failed: {err}"),
            }
        } else {
            println!("{ticker} {side} book ({} orders):", book.len());
            for order in &book {
                println!(
                    "  #{} {} {} @ {} ({} open)",
                    order.id,
                    order.owner,
                    order.amount,
                    order.price,
                    order.remaining()
                );
            }
        }
    }

    for &account in accounts {
        println!(
            "{account}: {} {BASE_TICKER}, {} {ticker}",
            exchange.balance_of(account, BASE_TICKER),
            exchange.balance_of(account, ticker)
        );
    }
}

/// Initializes the logging system
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
