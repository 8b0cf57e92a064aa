pub mod arbitrage;
pub mod forecast;
pub mod metrics;
pub mod point;
pub mod simulation;
