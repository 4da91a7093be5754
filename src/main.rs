use anyhow::Context;
use futures_util::future;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mygate_keeper::{
    banner::BANNER,
    config::KeeperConfig,
    input::read_lines,
    orchestrator::Orchestrator,
    types::{ProxyAddr, Token},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("{BANNER}");

    let config = KeeperConfig::load().context("failed to load configuration")?;

    let tokens: Vec<Token> = read_lines(&config.tokens_file)
        .into_iter()
        .map(Token::new)
        .collect();
    anyhow::ensure!(
        !tokens.is_empty(),
        "no credentials found in {}",
        config.tokens_file.display()
    );

    let proxies: Vec<ProxyAddr> = read_lines(&config.proxies_file)
        .into_iter()
        .map(ProxyAddr::new)
        .collect();

    info!(
        accounts = tokens.len(),
        proxies = proxies.len(),
        "starting keeper"
    );

    let running = Orchestrator::new(config, tokens, proxies).run().await;
    info!("all account connections established, leaving the keeper running");

    // The keeper runs until killed; sessions and pollers never finish on
    // their own.
    future::join_all(running.tasks).await;
    Ok(())
}
