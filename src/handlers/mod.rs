//! HTTP handler modules.
//! Used by: server.

pub mod device_share;
pub mod health;
pub mod kpis;
pub mod metrics;
pub mod query;
pub mod revenue;
pub mod signups;
pub mod traffic;
