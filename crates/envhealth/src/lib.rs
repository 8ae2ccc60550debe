//! Environmental health reports for US locations, built from federal air,
//! water, toxic-release, health-outcome, and natural-hazard data.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
