//! Evidence entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supporting evidence linked from a data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique identifier
    pub id: String,
    /// Data point this evidence supports
    pub data_point_id: String,
    /// Short title
    pub title: String,
    /// Pointer to the underlying document or record
    pub reference: String,
    /// When the evidence was attached
    pub created_at: DateTime<Utc>,
}

impl Evidence {
    /// Create evidence for a data point
    pub fn new(
        data_point_id: impl Into<String>,
        title: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            data_point_id: data_point_id.into(),
            title: title.into(),
            reference: reference.into(),
            created_at: Utc::now(),
        }
    }
}
