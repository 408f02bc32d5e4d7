//! Domain logic for the display-fleet playback service.
//!
//! This crate has no database or HTTP dependencies. Everything here works on
//! data the caller has already loaded, which keeps the scheduling rules
//! deterministic and unit-testable.

pub mod connection;
pub mod content;
pub mod corporate;
pub mod error;
pub mod exhibition;
pub mod feeds;
pub mod media;
pub mod operating_hours;
pub mod poll;
pub mod quota;
pub mod schedule;
pub mod time_window;
pub mod types;
