#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod config;
mod dazeus;
mod date;
mod error;
mod fetch;
mod noms;
mod parse;
mod supplier;

use chrono_tz::Tz;
use clap::Parser;

use crate::{
    config::Config,
    dazeus::{DaZeus, Stream},
    fetch::{make_client, HttpMenuFetcher, MenuFetcher, Sources},
    noms::NomsHandler,
    supplier::Registry,
};

pub use error::Result;

const COMMAND: &str = "noms";

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Answers commands one at a time until the core hangs up or we are interrupted.
async fn listen<S: Stream, F: MenuFetcher>(
    dazeus: &mut DaZeus<S>,
    handler: &NomsHandler<F>,
    tz: Tz,
) -> Result<()> {
    loop {
        let event = tokio::select! {
            event = dazeus.next_command() => event?,
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, shutting down");
                return Ok(());
            }
        };
        let Some(event) = event else {
            log::warn!("DaZeus closed the connection");
            return Ok(());
        };
        if event.command != COMMAND {
            log::debug!("Ignoring command {:?}", event.command);
            continue;
        }

        log::info!(
            "{} asked for noms in {}: {:?}",
            event.sender,
            event.channel,
            event.args
        );
        let args: Vec<&str> = event.args.iter().map(String::as_str).collect();
        let now = date::now_in(tz);
        let outcome = handler.handle(&args, now).await;
        for line in outcome.into_replies() {
            dazeus.reply(&event, &line).await?;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    pretty_env_logger::formatted_builder()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();
    log::debug!("{config:?}");

    let registry = Registry::new(&config.decommissioned);
    let fetcher = HttpMenuFetcher::new(make_client(config.timeout())?, Sources::new()?);
    let handler = NomsHandler::new(registry, fetcher);

    let mut dazeus = DaZeus::connect(&config.address).await?;
    dazeus.subscribe_command(COMMAND).await?;
    listen(&mut dazeus, &handler, config.timezone).await?;
    Ok(())
}
