mod auction;
mod clock;
mod config;
mod event;
mod event_log;
mod favourites;
mod filter;
mod listing;
mod options;
mod service;
mod vehicle;

use crate::clock::Clock;
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = config::Config::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();
    info!("running listing with\n{}", config);

    let catalog = Arc::new(vehicle::Catalog::load(&config.dataset)?);
    if catalog.is_empty() {
        warn!(dataset = %config.dataset.display(), "catalog is empty");
    }
    info!(vehicles = catalog.len(), "catalog loaded");

    let (event_writer, event_reader) = event_log::new_in_memory_shared();
    let view_store = service::ViewStore::new_shared();
    let clock = clock::TickingClock::new_shared(Arc::new(clock::SystemClock));
    let classifier = auction::CountdownClassifier::new(config.auction_offset()?);

    let svc_ctr = service::ServiceControl::new();

    ctrlc::set_handler({
        let svc_ctr = svc_ctr.clone();
        move || {
            eprintln!("Stopping all services...");
            svc_ctr.stop_all();
        }
    })?;

    let listing = listing::ListingState::new(catalog, classifier, clock.now());

    for handle in vec![
        svc_ctr.spawn_log_follower(
            service::ListingService::new(listing, view_store.clone()),
            event_reader,
        ),
        svc_ctr.spawn_loop(service::ClockTicker::new(
            clock,
            config.tick_interval(),
            event_writer.clone(),
        )),
        svc_ctr.spawn_loop(service::Ui::new(
            config.bind_address,
            event_writer,
            view_store,
        )?),
    ] {
        handle.join()?
    }

    Ok(())
}
