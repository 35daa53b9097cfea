//! vnstat adapter (usage source).
//!
//! Runs `vnstat -i <iface> --json m 1` and reads the newest monthly record.

use std::{path::PathBuf, process::Stdio};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use vnr_core::{domain::UsageReport, errors::Error, ports::UsageSource, Result};

const STDERR_TAIL_MAX_BYTES: usize = 512;

#[derive(Clone, Debug)]
pub struct VnstatClient {
    program: PathBuf,
}

impl Default for VnstatClient {
    fn default() -> Self {
        Self::new()
    }
}

impl VnstatClient {
    pub fn new() -> Self {
        Self::with_program("vnstat")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(interface: &str) -> [&str; 5] {
        ["-i", interface, "--json", "m", "1"]
    }
}

#[async_trait]
impl UsageSource for VnstatClient {
    async fn monthly_usage(&self, interface: &str) -> Result<UsageReport> {
        tracing::debug!(program = %self.program.display(), interface, "running vnstat");

        let out = Command::new(&self.program)
            .args(Self::args(interface))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(Error::Vnstat(format!(
                "{} {}",
                out.status,
                stderr_tail(&stderr)
            )
            .trim_end()
            .to_string()));
        }

        parse_monthly_report(&out.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct VnstatOutput {
    #[serde(default)]
    interfaces: Vec<VnstatInterface>,
}

#[derive(Debug, Deserialize)]
struct VnstatInterface {
    name: String,
    traffic: VnstatTraffic,
}

#[derive(Debug, Deserialize)]
struct VnstatTraffic {
    #[serde(default)]
    month: Vec<VnstatMonth>,
}

#[derive(Debug, Deserialize)]
struct VnstatMonth {
    date: VnstatDate,
    rx: u64,
    tx: u64,
}

#[derive(Debug, Deserialize)]
struct VnstatDate {
    year: i32,
    month: u32,
}

/// Parse `vnstat --json m` output, taking the first interface and its first month.
pub fn parse_monthly_report(stdout: &[u8]) -> Result<UsageReport> {
    let data: VnstatOutput = serde_json::from_slice(stdout)?;

    let iface = data
        .interfaces
        .into_iter()
        .next()
        .ok_or_else(|| Error::Vnstat("invalid vnstat output: no interfaces".to_string()))?;
    let month = iface.traffic.month.into_iter().next().ok_or_else(|| {
        Error::Vnstat(format!(
            "invalid vnstat output: no monthly data for {}",
            iface.name
        ))
    })?;

    Ok(UsageReport {
        interface: iface.name,
        rx_bytes: month.rx,
        tx_bytes: month.tx,
        period: period_label(month.date.year, month.date.month)?,
    })
}

/// `(2024, 3)` -> `"March 2024"`.
pub fn period_label(year: i32, month: u32) -> Result<String> {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .ok_or_else(|| Error::Vnstat(format!("invalid vnstat output: month {month}")))?;
    Ok(format!("{} {year:04}", name.name()))
}

fn stderr_tail(stderr: &str) -> &str {
    let s = stderr.trim();
    if s.len() <= STDERR_TAIL_MAX_BYTES {
        return s;
    }
    let mut start = s.len() - STDERR_TAIL_MAX_BYTES;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
