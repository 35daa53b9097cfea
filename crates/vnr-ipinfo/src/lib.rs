//! ipinfo.io adapter (public IP geolocation).
//!
//! The lookup is made over IPv4 only: the client binds `0.0.0.0` as its local
//! address, so dual-stack hosts never dial the service over IPv6.

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use serde::Deserialize;

use vnr_core::{domain::LocationInfo, errors::Error, ports::LocationSource, Result};

pub const DEFAULT_BASE_URL: &str = "https://ipinfo.io";

/// ipinfo.io answers curl-like clients with plain JSON.
pub const USER_AGENT: &str = "curl/7.81.0";

#[derive(Clone, Debug)]
pub struct IpInfoClient {
    base_url: String,
    http: reqwest::Client,
}

impl IpInfoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .build()
            .map_err(|e| Error::External(format!("ipinfo client build error: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpInfoResponse {
    ip: String,
    city: String,
    region: String,
    country: String,
    org: String,
}

impl From<IpInfoResponse> for LocationInfo {
    fn from(r: IpInfoResponse) -> Self {
        Self {
            ip: ipv4_only(r.ip),
            city: r.city,
            region: r.region,
            country: r.country,
            org: r.org,
        }
    }
}

/// Blank out a genuine IPv6 address. IPv4, IPv4-mapped IPv6 and unparsable
/// strings are kept verbatim.
pub fn ipv4_only(ip: String) -> String {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) if v6.to_ipv4_mapped().is_none() => {
            tracing::warn!(%ip, "ipinfo returned an IPv6 address over IPv4; dropping it");
            String::new()
        }
        _ => ip,
    }
}

#[async_trait]
impl LocationSource for IpInfoClient {
    async fn lookup(&self) -> Result<LocationInfo> {
        let resp = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| Error::External(format!("ipinfo request error: {e}")))?;

        // Error replies are still JSON; they decode to an empty location.
        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "ipinfo returned an error status");
        }

        let body: IpInfoResponse = resp
            .json()
            .await
            .map_err(|e| Error::External(format!("ipinfo json error: {e}")))?;

        Ok(body.into())
    }
}
