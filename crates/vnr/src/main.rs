use std::sync::Arc;

use vnr_core::{config::Config, report::Reporter};
use vnr_ipinfo::IpInfoClient;
use vnr_telegram::TelegramNotifier;
use vnr_vnstat::VnstatClient;

/// Meant to be run from cron: every failure prints one line to stdout and the
/// process still exits 0.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = vnr_core::logging::init("vnr") {
        eprintln!("{e}");
    }

    if let Err(e) = run().await {
        tracing::debug!(error = ?e, "report run failed");
        println!("{e}");
    }
}

async fn run() -> vnr_core::Result<()> {
    let cfg = Config::load()?;
    tracing::debug!(?cfg, "config loaded");

    let reporter = Reporter::new(
        Arc::new(VnstatClient::new()),
        Arc::new(IpInfoClient::new()?),
        Arc::new(TelegramNotifier::new(cfg.telegram_bot_token.clone())?),
    );

    reporter.run(&cfg).await?;
    Ok(())
}
