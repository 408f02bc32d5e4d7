use std::sync::Arc;

use chrono::Utc;
use vitrine_core::corporate::CorporateContentResolver;
use vitrine_core::types::Moment;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is a pool handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitrine_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolves corporate panels during content assembly.
    pub corporate: Arc<dyn CorporateContentResolver>,
}

impl AppState {
    /// The current instant, with venue-local wall-clock time.
    pub fn now(&self) -> Moment {
        Moment::at_offset(Utc::now(), self.config.display_offset)
    }
}
