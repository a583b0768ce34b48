//! Payment forms offered at checkout.

use serde::{Deserialize, Serialize};

use super::{pick, sample_rng, sample_status};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{Align, Cell, Column, RowActions, TableProjection};
use crate::types::RecordStatus;

/// A payment form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "formas-pagamento")]
pub struct PaymentForm {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Name shown to the cashier.
    #[record(search, sort)]
    pub descricao: String,
    /// Kind of payment, e.g. `"Pix"` or `"Cartão de Crédito"`.
    #[record(search, sort)]
    pub tipo: String,
    /// Maximum instalments; 1 for cash-like forms.
    #[record(sort)]
    pub parcelas_max: u32,
    /// Fee charged by the acquirer, in percent.
    #[serde(default)]
    pub taxa: Option<f64>,
    /// Whether the form is offered at checkout.
    #[record(status, sort)]
    pub status: RecordStatus,
}

/// Columns of the payment form list.
pub fn columns(actions: RowActions<PaymentForm>) -> TableProjection<PaymentForm> {
    TableProjection::new(vec![
        Column::integer("id", "Código", |p: &PaymentForm| p.id as i64),
        Column::text("descricao", "Descrição", |p: &PaymentForm| p.descricao.clone()),
        Column::text("tipo", "Tipo", |p: &PaymentForm| p.tipo.clone()),
        Column::integer("parcelas_max", "Parcelas", |p: &PaymentForm| {
            i64::from(p.parcelas_max)
        }),
        Column::new("taxa", "Taxa (%)", |p: &PaymentForm| {
            p.taxa.map_or(Cell::Empty, Cell::Decimal)
        })
        .with_align(Align::Right),
        Column::status("status", "Situação"),
        Column::actions(actions),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("descricao", "description")
        .with("tipo", "kind")
        .with("parcelas_max", "maxInstallments")
        .with("taxa", "fee")
}

const KINDS: [(&str, u32); 5] = [
    ("Dinheiro", 1),
    ("Pix", 1),
    ("Cartão de Débito", 1),
    ("Cartão de Crédito", 12),
    ("Boleto", 3),
];

const LABELS: [&str; 4] = ["Balcão", "Loja Virtual", "Televendas", "Oficina"];

/// `count` payment forms with ids from 1.
pub fn sample(count: u64) -> Vec<PaymentForm> {
    let mut rng = sample_rng(PaymentForm::RESOURCE);
    (1..=count)
        .map(|id| {
            let (tipo, max) = KINDS[rng.usize(..KINDS.len())];
            let parcelas_max = if max > 1 { rng.u32(2..=max) } else { 1 };
            let taxa = (tipo != "Dinheiro").then(|| f64::from(rng.u32(50..=499)) / 100.0);
            PaymentForm {
                id,
                descricao: format!("{} {}", tipo, pick(&mut rng, &LABELS)),
                tipo: tipo.to_string(),
                parcelas_max,
                taxa,
                status: sample_status(&mut rng),
            }
        })
        .collect()
}
