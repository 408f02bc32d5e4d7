//! Corporate content model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::corporate::{CorporateContent, CorporateFilter, CorporateKind};
use vitrine_core::error::CoreError;
use vitrine_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CorporateContentRow {
    pub id: DbId,
    pub title: String,
    pub kind: String,
    pub duration_secs: i32,
    pub filter_config: serde_json::Value,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CorporateContentRow {
    pub fn to_domain(&self) -> Result<CorporateContent, CoreError> {
        corporate_content(
            self.id,
            &self.title,
            &self.kind,
            self.duration_secs,
            &self.filter_config,
            self.active,
        )
    }
}

pub(crate) fn corporate_content(
    id: DbId,
    title: &str,
    kind: &str,
    duration_secs: i32,
    filter_config: &serde_json::Value,
    active: bool,
) -> Result<CorporateContent, CoreError> {
    Ok(CorporateContent {
        id,
        title: title.to_string(),
        kind: CorporateKind::from_str_value(kind).map_err(CoreError::Internal)?,
        duration_secs,
        active,
        filter: CorporateFilter::from_json(filter_config).map_err(CoreError::Internal)?,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCorporateContent {
    pub title: String,
    pub kind: CorporateKind,
    pub duration_secs: i32,
    pub filter_config: Option<serde_json::Value>,
    pub active: Option<bool>,
}
