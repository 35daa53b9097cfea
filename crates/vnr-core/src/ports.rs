use async_trait::async_trait;

use crate::{
    domain::{LocationInfo, UsageReport},
    Result,
};

/// Source of monthly traffic counters (vnstat today).
#[async_trait]
pub trait UsageSource: Send + Sync {
    async fn monthly_usage(&self, interface: &str) -> Result<UsageReport>;
}

/// Public IP geolocation lookup.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn lookup(&self) -> Result<LocationInfo>;
}

/// Outbound text delivery to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()>;
}
