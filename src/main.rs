/// Main entry point for the exchange engine application
///
/// This serves as a thin wrapper that delegates to the interfaces layer.
/// The actual application logic is implemented in `interfaces::cli`.

use dex_engine::interfaces::cli;

fn main() {
    cli::run();
}
