use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use serpscout::{
    configuration::get_configuration,
    services::{EmailExtractor, RankPolicies, ResponseCache, SerperClient},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let cache = Arc::new(ResponseCache::new(
        configuration.cache.ttl(),
        configuration.cache.max_entries,
    ));
    let serper_client = SerperClient::new(
        configuration.provider.base_url.as_str(),
        configuration.provider.timeout(),
        cache,
    )
    .context("Failed to build provider client.")?;
    let email_extractor = EmailExtractor::new(
        configuration.scraper.timeout(),
        &configuration.scraper.user_agent,
    )
    .context("Failed to build page fetcher.")?;

    let rank_policies = RankPolicies::from_settings(&configuration.search)
        .context("Invalid search settings.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on {}", address);

    run(
        listener,
        configuration,
        serper_client,
        email_extractor,
        rank_policies,
    )?
        .await
        .context("Server stopped with an error.")
}
