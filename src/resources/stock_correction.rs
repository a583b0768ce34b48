//! Manual stock corrections (inventory counts, losses, returns).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{pick, sample_date, sample_rng};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{ActionKind, Align, Cell, Column, RowActions, TableProjection};

/// A stock correction. Corrections have no active/inactive status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "correcoes-estoque")]
pub struct StockCorrection {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Date the correction was posted.
    #[record(sort)]
    pub data: NaiveDate,
    /// Product description.
    #[record(search, sort)]
    pub produto: String,
    /// Signed quantity; negative values take stock out.
    #[record(sort)]
    pub quantidade: f64,
    /// Reason given by the operator.
    #[record(search)]
    pub motivo: String,
    /// Operator login.
    #[record(search, sort)]
    pub usuario: String,
}

/// Columns of the stock correction list.
///
/// Corrections are immutable once posted, so the edit callback of
/// `actions` is dropped.
pub fn columns(actions: RowActions<StockCorrection>) -> TableProjection<StockCorrection> {
    TableProjection::new(vec![
        Column::integer("id", "Código", |c: &StockCorrection| c.id as i64),
        Column::new("data", "Data", |c: &StockCorrection| c.data.into()),
        Column::text("produto", "Produto", |c: &StockCorrection| c.produto.clone()),
        Column::new("quantidade", "Quantidade", |c: &StockCorrection| {
            Cell::Decimal(c.quantidade)
        })
        .with_align(Align::Right),
        Column::text("motivo", "Motivo", |c: &StockCorrection| c.motivo.clone()),
        Column::text("usuario", "Usuário", |c: &StockCorrection| c.usuario.clone()),
        Column::actions(actions.without(ActionKind::Edit)),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("produto_id", "product")
        .with("quantidade", "quantity")
        .with("motivo", "reason")
        .with("data", "date")
}

const PRODUCTS: [&str; 8] = [
    "Filtro de Óleo FO-120",
    "Óleo 5W30 Sintético 1L",
    "Pastilha de Freio Dianteira",
    "Lâmpada H4 12V",
    "Correia Dentada 137 Dentes",
    "Vela de Ignição Iridium",
    "Amortecedor Traseiro",
    "Aditivo Radiador 1L",
];

const REASONS: [&str; 5] = [
    "Inventário",
    "Avaria",
    "Devolução de cliente",
    "Uso interno",
    "Ajuste de lançamento",
];

const USERS: [&str; 4] = ["mariana", "joao.pedro", "caixa01", "estoque"];

/// `count` corrections with ids from 1, posted during 2024.
pub fn sample(count: u64) -> Vec<StockCorrection> {
    let mut rng = sample_rng(StockCorrection::RESOURCE);
    (1..=count)
        .map(|id| {
            let magnitude = f64::from(rng.u32(1..=48));
            let quantidade = if rng.bool() { magnitude } else { -magnitude };
            StockCorrection {
                id,
                data: sample_date(&mut rng),
                produto: pick(&mut rng, &PRODUCTS).to_string(),
                quantidade,
                motivo: pick(&mut rng, &REASONS).to_string(),
                usuario: pick(&mut rng, &USERS).to_string(),
            }
        })
        .collect()
}
