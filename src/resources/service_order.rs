//! Workshop service orders.
//!
//! Orders move through their own workflow instead of the active/inactive
//! flag, so they carry an [`OrderSituation`] and no record status.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{pick, sample_amount, sample_date, sample_rng, vehicle};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{ActionKind, Align, Cell, Column, RowActions, TableProjection};
use crate::types::{IntoSortKey, SearchField, SortKey};

/// Where an order is in the workshop workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSituation {
    /// Received, not started.
    #[serde(rename = "Aberta")]
    Open,
    /// Being worked on.
    #[serde(rename = "Em andamento")]
    InProgress,
    /// Finished and invoiced.
    #[serde(rename = "Concluída")]
    Done,
    /// Cancelled before completion.
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl OrderSituation {
    /// Every situation, in workflow order.
    pub const ALL: [OrderSituation; 4] = [
        OrderSituation::Open,
        OrderSituation::InProgress,
        OrderSituation::Done,
        OrderSituation::Cancelled,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderSituation::Open => "Aberta",
            OrderSituation::InProgress => "Em andamento",
            OrderSituation::Done => "Concluída",
            OrderSituation::Cancelled => "Cancelada",
        }
    }

    /// Returns `true` while the order can still be edited.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderSituation::Open | OrderSituation::InProgress)
    }
}

impl fmt::Display for OrderSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Sorted by position in the workflow, not alphabetically.
impl IntoSortKey for OrderSituation {
    fn sort_key(&self) -> SortKey {
        let position = OrderSituation::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default();
        SortKey::Integer(position as i64)
    }
}

impl SearchField for OrderSituation {
    fn contains_lowercase(&self, needle_lowercase: &str) -> bool {
        self.label().contains_lowercase(needle_lowercase)
    }
}

/// A service order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "ordens-servico")]
pub struct ServiceOrder {
    /// Order number.
    #[record(id, search, sort)]
    pub id: u64,
    /// Customer name.
    #[record(search, sort)]
    pub cliente: String,
    /// Plate of the vehicle being serviced; counter sales have none.
    #[record(search, sort)]
    pub placa: Option<String>,
    /// Opening date.
    #[record(sort)]
    pub abertura: NaiveDate,
    /// Parts plus labour, in reais.
    #[record(sort)]
    pub valor_total: f64,
    /// Workflow position.
    #[record(search, sort)]
    pub situacao: OrderSituation,
}

/// Columns of the service order list.
///
/// Edit and delete are only offered while the order is open.
pub fn columns(actions: RowActions<ServiceOrder>) -> TableProjection<ServiceOrder> {
    let closed = actions
        .clone()
        .without(ActionKind::Edit)
        .without(ActionKind::Delete);
    TableProjection::new(vec![
        Column::integer("id", "Nº", |o: &ServiceOrder| o.id as i64),
        Column::text("cliente", "Cliente", |o: &ServiceOrder| o.cliente.clone()),
        Column::new("placa", "Placa", |o: &ServiceOrder| o.placa.clone().into()),
        Column::new("abertura", "Abertura", |o: &ServiceOrder| o.abertura.into()),
        Column::money("valor_total", "Total", |o: &ServiceOrder| o.valor_total),
        Column::text("situacao", "Situação", |o: &ServiceOrder| o.situacao.to_string())
            .with_align(Align::Center),
        Column::new("acoes", "Ações", move |o: &ServiceOrder| {
            let offered = if o.situacao.is_open() { &actions } else { &closed };
            let available = offered.available(o);
            if available.is_empty() {
                Cell::Empty
            } else {
                Cell::Actions(available)
            }
        })
        .with_align(Align::Center)
        .not_sortable(),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("cliente_id", "customer")
        .with("veiculo_id", "vehicle")
        .with("abertura", "openedOn")
        .with("situacao", "situation")
}

const CUSTOMERS: [&str; 8] = [
    "Auto Peças Central",
    "Transportes Rio Claro",
    "Ana Souza",
    "Bruno Lima",
    "Carla Mendes",
    "Frota Municipal",
    "Diego Rocha",
    "Locadora Express",
];

/// `count` orders numbered from 1. Most point at a sample vehicle.
pub fn sample(count: u64) -> Vec<ServiceOrder> {
    let vehicles = vehicle::sample(20);
    let mut rng = sample_rng(ServiceOrder::RESOURCE);
    (1..=count)
        .map(|id| {
            let placa = (rng.u8(..4) != 0)
                .then(|| vehicles[rng.usize(..vehicles.len())].placa.clone());
            ServiceOrder {
                id,
                cliente: pick(&mut rng, &CUSTOMERS).to_string(),
                placa,
                abertura: sample_date(&mut rng),
                valor_total: sample_amount(&mut rng, 80, 6_000),
                situacao: OrderSituation::ALL[rng.usize(..OrderSituation::ALL.len())],
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::paginate::paginate;
    use crate::{QueryParams, SortDirection};

    fn order(situacao: OrderSituation) -> ServiceOrder {
        ServiceOrder {
            id: 1042,
            cliente: "Frota Municipal".into(),
            placa: None,
            abertura: NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            valor_total: 1520.0,
            situacao,
        }
    }

    fn all_actions() -> RowActions<ServiceOrder> {
        RowActions::new()
            .on_view(|_: &ServiceOrder| {})
            .on_edit(|_: &ServiceOrder| {})
            .on_delete(|_: &ServiceOrder| {})
    }

    #[test]
    fn test_closed_orders_are_read_only() {
        let table = columns(all_actions());
        let open = table.project_row(&order(OrderSituation::InProgress));
        let done = table.project_row(&order(OrderSituation::Done));

        assert_eq!(open.cells[6].to_string(), "Visualizar | Editar | Excluir");
        assert_eq!(done.cells[6].to_string(), "Visualizar");
    }

    #[test]
    fn test_row_formatting() {
        let row = columns(RowActions::new()).project_row(&order(OrderSituation::Open));
        let texts: Vec<String> = row.cells.iter().map(ToString::to_string).collect();
        assert_eq!(
            texts,
            ["1.042", "Frota Municipal", "", "05/11/2024", "R$ 1.520,00", "Aberta", ""]
        );
    }

    #[test]
    fn test_situation_sorts_by_workflow() {
        let orders: Vec<ServiceOrder> = [
            OrderSituation::Cancelled,
            OrderSituation::Open,
            OrderSituation::Done,
            OrderSituation::InProgress,
        ]
        .into_iter()
        .map(order)
        .collect();
        let page = paginate(
            &orders,
            &QueryParams::new().with_sort("situacao", SortDirection::Asc),
        );
        let situations: Vec<OrderSituation> = page.items.iter().map(|o| o.situacao).collect();
        assert_eq!(situations, OrderSituation::ALL);
    }

    #[test]
    fn test_search_by_number_or_situation() {
        let orders = vec![order(OrderSituation::Open)];
        assert_eq!(paginate(&orders, &QueryParams::new().with_search("1042")).len(), 1);
        assert_eq!(paginate(&orders, &QueryParams::new().with_search("aberta")).len(), 1);
        assert_eq!(paginate(&orders, &QueryParams::new().with_search("cancel")).len(), 0);
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&OrderSituation::InProgress).unwrap();
        assert_eq!(json, r#""Em andamento""#);
        let parsed: OrderSituation = serde_json::from_str(r#""Concluída""#).unwrap();
        assert_eq!(parsed, OrderSituation::Done);
    }
}
