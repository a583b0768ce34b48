//! A minimal record type for tests and examples.

use serde::{Deserialize, Serialize};

use crate::types::RecordStatus;

/// A card brand reduced to the fields list views care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, crate::Record)]
#[record(resource = "brands")]
pub struct Brand {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Display name, searchable and sortable.
    #[record(search, sort)]
    pub descricao: String,
    /// Active flag.
    #[record(status, sort)]
    pub status: RecordStatus,
}

impl Brand {
    /// Creates a brand.
    pub fn new(id: u64, descricao: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            id,
            descricao: descricao.into(),
            status,
        }
    }
}

/// `count` active brands with ids `1..=count` named `"Bandeira {id}"`.
pub fn brands(count: u64) -> Vec<Brand> {
    (1..=count)
        .map(|id| Brand::new(id, format!("Bandeira {id}"), RecordStatus::Active))
        .collect()
}
