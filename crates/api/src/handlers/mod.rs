pub mod device;
pub mod monitoring;
pub mod tracking;
