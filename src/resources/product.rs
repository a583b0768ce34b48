//! Catalogue products.
//!
//! The product endpoint predates the shared status encoding and still sends
//! a boolean `ativo` flag; the record maps it onto [`RecordStatus`](crate::RecordStatus) through
//! its status field.

use serde::{Deserialize, Serialize};

use super::{pick, product_group, sample_amount, sample_rng};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{Align, Cell, Column, RowActions, TableProjection};

/// A product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "produtos")]
pub struct Product {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Internal code, also printed as barcode text.
    #[record(search, sort)]
    pub codigo: String,
    /// Description.
    #[record(search, sort)]
    pub descricao: String,
    /// Product group name.
    #[record(search, sort)]
    pub grupo: String,
    /// Unit of sale, e.g. `"UN"` or `"L"`.
    pub unidade: String,
    /// Unit price in reais.
    #[record(sort)]
    pub preco: f64,
    /// Quantity on hand.
    #[record(sort)]
    pub estoque: f64,
    /// Active flag.
    #[record(status, sort)]
    pub ativo: bool,
}

/// Columns of the product list.
pub fn columns(actions: RowActions<Product>) -> TableProjection<Product> {
    TableProjection::new(vec![
        Column::text("codigo", "Código", |p: &Product| p.codigo.clone()),
        Column::text("descricao", "Descrição", |p: &Product| p.descricao.clone()),
        Column::text("grupo", "Grupo", |p: &Product| p.grupo.clone()),
        Column::text("unidade", "Un.", |p: &Product| p.unidade.clone()).with_align(Align::Center),
        Column::money("preco", "Preço", |p: &Product| p.preco),
        Column::new("estoque", "Estoque", |p: &Product| Cell::Decimal(p.estoque))
            .with_align(Align::Right),
        Column::status("ativo", "Situação"),
        Column::actions(actions),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("codigo", "code")
        .with("descricao", "description")
        .with("grupo_id", "group")
        .with("unidade", "unit")
        .with("preco", "price")
        .with("estoque", "stock")
}

const ITEMS: [(&str, &str); 10] = [
    ("Filtro de Óleo", "UN"),
    ("Óleo Motor 5W30", "L"),
    ("Pastilha de Freio", "JG"),
    ("Amortecedor", "UN"),
    ("Bateria 60Ah", "UN"),
    ("Lâmpada Farol", "UN"),
    ("Fluido de Arrefecimento", "L"),
    ("Vela de Ignição", "UN"),
    ("Correia Poly-V", "UN"),
    ("Pneu Aro 14", "UN"),
];

const BRANDS: [&str; 6] = ["Bosch", "Mahle", "Cofap", "Moura", "NGK", "Tecfil"];

/// `count` products with ids from 1 and codes `P00001`, `P00002`, ...
pub fn sample(count: u64) -> Vec<Product> {
    let groups = product_group::sample(12);
    let mut rng = sample_rng(Product::RESOURCE);
    (1..=count)
        .map(|id| {
            let (item, unidade) = ITEMS[rng.usize(..ITEMS.len())];
            Product {
                id,
                codigo: format!("P{id:05}"),
                descricao: format!("{} {}", item, pick(&mut rng, &BRANDS)),
                grupo: groups[rng.usize(..groups.len())].descricao.clone(),
                unidade: unidade.to_string(),
                preco: sample_amount(&mut rng, 5, 900),
                estoque: f64::from(rng.u32(..500)),
                ativo: rng.u8(..10) != 0,
            }
        })
        .collect()
}
