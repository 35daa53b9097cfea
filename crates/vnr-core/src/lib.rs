//! Core domain + application logic for the vnstat usage reporter.
//!
//! This crate is intentionally adapter-agnostic. vnstat / ipinfo.io / Telegram
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod ports;
pub mod report;

pub use errors::{Error, Result};
