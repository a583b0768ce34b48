//! Product areas, subdivisions of a product group.

use serde::{Deserialize, Serialize};

use super::product_group;
use super::{sample_rng, sample_status};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{Column, RowActions, TableProjection};
use crate::types::RecordStatus;

/// A product area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "areas-produto")]
pub struct ProductArea {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Area name.
    #[record(search, sort)]
    pub descricao: String,
    /// Identifier of the parent group.
    pub grupo_id: u64,
    /// Name of the parent group, denormalized by the backend for listing.
    #[record(search, sort)]
    pub grupo: String,
    /// Whether products can be filed under the area.
    #[record(status, sort)]
    pub status: RecordStatus,
}

/// Columns of the product area list.
pub fn columns(actions: RowActions<ProductArea>) -> TableProjection<ProductArea> {
    TableProjection::new(vec![
        Column::integer("id", "Código", |a: &ProductArea| a.id as i64),
        Column::text("descricao", "Descrição", |a: &ProductArea| a.descricao.clone()),
        Column::text("grupo", "Grupo", |a: &ProductArea| a.grupo.clone()),
        Column::status("status", "Situação"),
        Column::actions(actions),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("descricao", "description")
        .with("grupo_id", "groupId")
}

const AREAS: [&str; 6] = ["Linha Leve", "Linha Pesada", "Motos", "Agrícola", "Náutica", "Universal"];

/// `count` areas with ids from 1, spread over the sample product groups.
pub fn sample(count: u64) -> Vec<ProductArea> {
    let groups = product_group::sample(12);
    let mut rng = sample_rng(ProductArea::RESOURCE);
    (1..=count)
        .map(|id| {
            let group = &groups[rng.usize(..groups.len())];
            let area = AREAS[rng.usize(..AREAS.len())];
            ProductArea {
                id,
                descricao: format!("{} {}", group.descricao, area),
                grupo_id: group.id,
                grupo: group.descricao.clone(),
                status: sample_status(&mut rng),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::paginate;
    use crate::{QueryParams, SortDirection};

    #[test]
    fn test_sample_points_at_existing_groups() {
        let groups = product_group::sample(12);
        for area in sample(25) {
            let group = groups.iter().find(|g| g.id == area.grupo_id);
            assert_eq!(group.map(|g| g.descricao.as_str()), Some(area.grupo.as_str()));
            assert!(area.descricao.starts_with(&area.grupo));
        }
    }

    #[test]
    fn test_sort_by_group_is_stable() {
        let areas = sample(25);
        let page = paginate(
            &areas,
            &QueryParams::new()
                .with_page_size(25)
                .with_sort("grupo", SortDirection::Asc),
        );

        for pair in page.items.windows(2) {
            assert!(pair[0].grupo.to_lowercase() <= pair[1].grupo.to_lowercase());
            if pair[0].grupo == pair[1].grupo {
                assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
