// Entrypoint for the publisher CLI.
// - Keeps `main` small: read config, wire the store, API client and
//   terminal prompter together, then dispatch the requested action.
// - Returns `anyhow::Result` so any failure prints and exits non-zero.

use clap::Parser;
use publisher_cli::{
    api::ApiClient, config::Config, publisher::dispatch, publisher::PublisherManager,
    store::PublisherStore, ui::TerminalPrompter,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "publisher-cli")]
#[command(about = "Manage publisher credentials for the package gallery")]
#[command(version)]
struct Cli {
    /// One of create, delete, login, logout, verify-pat; anything else lists publishers
    #[arg(default_value = "list")]
    action: String,

    /// Publisher name the action applies to
    publisher: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let store = PublisherStore::new(&config.store_path);
    let api = ApiClient::new(&config.gallery_url)?;
    let mut manager = PublisherManager::new(store, api, TerminalPrompter);

    dispatch(&mut manager, &cli.action, cli.publisher.as_deref())?;
    Ok(())
}
