//! Guest Desk operator entry point.
//!
//! Loads configuration, opens the ticket store, and prints the unresolved
//! backlog. The chat gateway embeds the library, wires its own
//! `MessageGateway` adapter, and feeds `InboundEvent`s to the dispatcher;
//! this binary exists for operators to check the desk from a shell.

use std::error::Error;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use guest_desk::adapters::storage::FileTicketStore;
use guest_desk::application::PendingReport;
use guest_desk::config::AppConfig;
use guest_desk::ports::TicketStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "guest desk startup failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let store = FileTicketStore::open(&config.storage.db_path).await?;
    let pending = store.list_unresolved().await?;
    info!(
        open_tickets = pending.len(),
        path = %config.storage.db_path.display(),
        "ticket store ready"
    );

    println!("{}", PendingReport::new(pending).render());
    Ok(())
}
