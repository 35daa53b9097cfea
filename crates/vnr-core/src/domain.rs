/// Current-month traffic counters for one interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageReport {
    pub interface: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    /// e.g. `"March 2024"`.
    pub period: String,
}

impl UsageReport {
    pub fn total_bytes(&self) -> u64 {
        self.rx_bytes.saturating_add(self.tx_bytes)
    }
}

/// Public IP + geolocation as reported by the lookup service.
///
/// `ip` is empty when the service returned no IPv4 address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationInfo {
    pub ip: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub org: String,
}
