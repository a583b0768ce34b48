//! Product groups, the top level of the catalogue.

use serde::{Deserialize, Serialize};

use super::{sample_rng, sample_status};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{Column, RowActions, TableProjection};
use crate::types::RecordStatus;

/// A product group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "grupos-produto")]
pub struct ProductGroup {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Short code printed on labels.
    #[record(search, sort)]
    pub codigo: String,
    /// Group name.
    #[record(search, sort)]
    pub descricao: String,
    /// Whether products can be filed under the group.
    #[record(status, sort)]
    pub status: RecordStatus,
}

/// Columns of the product group list.
pub fn columns(actions: RowActions<ProductGroup>) -> TableProjection<ProductGroup> {
    TableProjection::new(vec![
        Column::text("codigo", "Código", |g: &ProductGroup| g.codigo.clone()),
        Column::text("descricao", "Descrição", |g: &ProductGroup| g.descricao.clone()),
        Column::status("status", "Situação"),
        Column::actions(actions),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("codigo", "code")
        .with("descricao", "description")
}

const GROUPS: [&str; 12] = [
    "Filtros",
    "Lubrificantes",
    "Freios",
    "Suspensão",
    "Elétrica",
    "Iluminação",
    "Arrefecimento",
    "Ignição",
    "Correias",
    "Pneus",
    "Acessórios",
    "Ferramentas",
];

/// `count` groups with ids from 1 and codes `G001`, `G002`, ...
pub fn sample(count: u64) -> Vec<ProductGroup> {
    let mut rng = sample_rng(ProductGroup::RESOURCE);
    (1..=count)
        .map(|id| {
            let base = GROUPS[(id as usize - 1) % GROUPS.len()];
            let round = (id as usize - 1) / GROUPS.len();
            let descricao = if round == 0 {
                base.to_string()
            } else {
                format!("{base} {}", round + 1)
            };
            ProductGroup {
                id,
                codigo: format!("G{id:03}"),
                descricao,
                status: sample_status(&mut rng),
            }
        })
        .collect()
}
