//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Conversions into the `vitrine_core` types the engine works on

pub mod corporate;
pub mod device;
pub mod exhibition;
pub mod media;
pub mod operating_window;
pub mod playlist;
pub mod quota;
pub mod schedule;
pub mod tracking;
