//! Customer vehicles served by the workshop.

use serde::{Deserialize, Serialize};

use super::{pick, sample_rng, sample_status};
use crate::Record;
use crate::forms::FieldMap;
use crate::projection::{Column, RowActions, TableProjection};
use crate::types::RecordStatus;

/// A vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(resource = "veiculos")]
pub struct Vehicle {
    /// Identifier.
    #[record(id, sort)]
    pub id: u64,
    /// Licence plate, Mercosul or legacy format.
    #[record(search, sort)]
    pub placa: String,
    /// Manufacturer.
    #[record(search, sort)]
    pub marca: String,
    /// Model.
    #[record(search, sort)]
    pub modelo: String,
    /// Model year.
    #[record(sort)]
    pub ano: u16,
    /// Owner's name.
    #[record(search)]
    pub proprietario: Option<String>,
    /// Whether the vehicle can be picked for new service orders.
    #[record(status)]
    pub status: RecordStatus,
}

/// Columns of the vehicle list.
pub fn columns(actions: RowActions<Vehicle>) -> TableProjection<Vehicle> {
    TableProjection::new(vec![
        Column::text("placa", "Placa", |v: &Vehicle| v.placa.clone()),
        Column::text("marca", "Marca", |v: &Vehicle| v.marca.clone()),
        Column::text("modelo", "Modelo", |v: &Vehicle| v.modelo.clone()),
        Column::integer("ano", "Ano", |v: &Vehicle| i64::from(v.ano)),
        Column::new("proprietario", "Proprietário", |v: &Vehicle| {
            v.proprietario.clone().into()
        }),
        Column::status("status", "Situação"),
        Column::actions(actions),
    ])
}

/// Backend to form field names.
pub fn field_map() -> FieldMap {
    FieldMap::new()
        .with("placa", "plate")
        .with("marca", "make")
        .with("modelo", "model")
        .with("ano", "year")
        .with("proprietario", "owner")
}

const MODELS: [(&str, &str); 8] = [
    ("Volkswagen", "Gol"),
    ("Fiat", "Strada"),
    ("Chevrolet", "Onix"),
    ("Toyota", "Hilux"),
    ("Ford", "Ranger"),
    ("Hyundai", "HB20"),
    ("Renault", "Kwid"),
    ("Honda", "CG 160"),
];

const OWNERS: [&str; 6] = [
    "Ana Souza",
    "Bruno Lima",
    "Carla Mendes",
    "Diego Rocha",
    "Elaine Costa",
    "Fábio Alves",
];

/// Builds a Mercosul plate such as `ABC1D23`.
fn sample_plate(rng: &mut fastrand::Rng) -> String {
    let mut plate = String::with_capacity(7);
    for _ in 0..3 {
        plate.push(rng.uppercase());
    }
    plate.push(char::from(b'0' + rng.u8(..10)));
    plate.push(rng.uppercase());
    for _ in 0..2 {
        plate.push(char::from(b'0' + rng.u8(..10)));
    }
    plate
}

/// `count` vehicles with ids from 1. About a third have no owner on file.
pub fn sample(count: u64) -> Vec<Vehicle> {
    let mut rng = sample_rng(Vehicle::RESOURCE);
    (1..=count)
        .map(|id| {
            let (marca, modelo) = MODELS[rng.usize(..MODELS.len())];
            let proprietario = (rng.u8(..3) != 0).then(|| pick(&mut rng, &OWNERS).to_string());
            Vehicle {
                id,
                placa: sample_plate(&mut rng),
                marca: marca.to_string(),
                modelo: modelo.to_string(),
                ano: rng.u16(2005..=2025),
                proprietario,
                status: sample_status(&mut rng),
            }
        })
        .collect()
}
