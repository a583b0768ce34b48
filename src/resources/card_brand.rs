//! Card brands accepted at the register.

use serde::{Deserialize, Serialize};

use super::{sample_rng, sample_status};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{Column, RowActions, TableProjection};
use crate::types::RecordStatus;

/// A card brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "bandeiras-cartao")]
pub struct CardBrand {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Brand name.
    #[record(search, sort)]
    pub descricao: String,
    /// Whether the brand is offered at checkout.
    #[record(status, sort)]
    pub status: RecordStatus,
}

impl CardBrand {
    /// Creates a card brand.
    pub fn new(id: u64, descricao: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            id,
            descricao: descricao.into(),
            status,
        }
    }
}

/// Columns of the card brand list.
pub fn columns(actions: RowActions<CardBrand>) -> TableProjection<CardBrand> {
    TableProjection::new(vec![
        Column::integer("id", "Código", |b: &CardBrand| b.id as i64),
        Column::text("descricao", "Descrição", |b: &CardBrand| b.descricao.clone()),
        Column::status("status", "Situação"),
        Column::actions(actions),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("descricao", "description")
        .with("status", "status")
}

const NAMES: [&str; 15] = [
    "Visa",
    "Mastercard",
    "Elo",
    "American Express",
    "Hipercard",
    "Diners Club",
    "Cabal",
    "Sorocred",
    "Banescard",
    "Goodcard",
    "JCB",
    "Discover",
    "Aura",
    "Credsystem",
    "Verdecard",
];

/// `count` brands with ids from 1; the well-known names come first.
pub fn sample(count: u64) -> Vec<CardBrand> {
    let mut rng = sample_rng(CardBrand::RESOURCE);
    (1..=count)
        .map(|id| {
            let name = usize::try_from(id - 1)
                .ok()
                .and_then(|index| NAMES.get(index))
                .map_or_else(|| format!("Bandeira {id}"), |name| (*name).to_string());
            CardBrand::new(id, name, sample_status(&mut rng))
        })
        .collect()
}
