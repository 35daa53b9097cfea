//! The report pipeline: usage -> location -> render -> deliver.

use std::sync::Arc;

use crate::{
    config::Config,
    errors::Error,
    formatting::render_message,
    ports::{LocationSource, Notifier, UsageSource},
    Result,
};

pub const STAGE_USAGE: &str = "vnstat";
pub const STAGE_LOCATION: &str = "IP info";
pub const STAGE_DELIVERY: &str = "Telegram";

#[derive(Clone)]
pub struct Reporter {
    usage: Arc<dyn UsageSource>,
    location: Arc<dyn LocationSource>,
    notifier: Arc<dyn Notifier>,
}

impl Reporter {
    pub fn new(
        usage: Arc<dyn UsageSource>,
        location: Arc<dyn LocationSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            usage,
            location,
            notifier,
        }
    }

    /// Run one report and return the delivered text.
    pub async fn run(&self, cfg: &Config) -> Result<String> {
        let usage = self
            .usage
            .monthly_usage(&cfg.interface)
            .await
            .map_err(|e| Error::stage(STAGE_USAGE, e))?;
        tracing::info!(
            interface = %usage.interface,
            period = %usage.period,
            rx = usage.rx_bytes,
            tx = usage.tx_bytes,
            "collected usage"
        );

        let location = self
            .location
            .lookup()
            .await
            .map_err(|e| Error::stage(STAGE_LOCATION, e))?;
        tracing::debug!(ip = %location.ip, country = %location.country, "resolved location");

        let text = render_message(&usage, &location, cfg.limit_gib);

        self.notifier
            .send_text(&cfg.telegram_chat_id, &text)
            .await
            .map_err(|e| Error::stage(STAGE_DELIVERY, e))?;
        tracing::info!(chat_id = %cfg.telegram_chat_id, "report delivered");

        Ok(text)
    }
}
