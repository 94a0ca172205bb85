mod api;
mod config;
mod models;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("Usage: vytratui [API_BASE_URL]");
        println!("  API_BASE_URL defaults to $VYTRATUI_API_URL, then {}", config::DEFAULT_API_URL);
        return Ok(());
    }

    let config = config::Config::resolve(args.get(1).cloned());
    config::init_logging()?;
    tracing::info!(base_url = %config.base_url, "starting vytratui");

    let client = api::ApiClient::new(&config.base_url)?;
    run::as_tui(client)
}
