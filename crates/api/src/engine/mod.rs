//! Request-scoped orchestration on top of the pure scheduling logic.
//!
//! - [`snapshot`] loads a device's stored schedule and playlist contents.
//! - [`poll`] runs the device poll through its typed stages.
//! - [`exhibition`] records playback-completion reports.
//! - [`schedule_check`] builds the schedule diagnostic for a device.
//! - [`status`] derives connection status for monitoring.

pub mod exhibition;
pub mod poll;
pub mod schedule_check;
pub mod snapshot;
pub mod status;
