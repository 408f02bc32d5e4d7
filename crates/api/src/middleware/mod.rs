//! Access-control extractors.
//!
//! - [`monitor_key::RequireMonitorKey`] -- Requires the configured monitoring
//!   key in the `x-api-key` header.

pub mod monitor_key;
