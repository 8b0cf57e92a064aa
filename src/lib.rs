//! Deterministic day-ahead power price simulation and battery arbitrage.
//!
//! The engine fingerprints a block-level market history, scores a fixed
//! panel of forecasting models against it, projects the back-test winner
//! forward with time-of-day shape and a confidence band, and maps each
//! forecast day's charge/discharge windows.

pub mod arbitrage;
pub mod bess;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod forecast;
pub mod ingest;
pub mod model;
pub mod panel;
pub mod rng;
pub mod stats;
