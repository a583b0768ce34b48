//! Back-office resources.
//!
//! Each module holds one record type as the backend serves it, the columns
//! of its list screen, the translation of its validation errors onto form
//! fields, and a deterministic sample dataset for in-memory clients.
//!
//! | Module | Record | REST path |
//! |---|---|---|
//! | [`card_brand`] | [`CardBrand`] | `bandeiras-cartao` |
//! | [`payment_form`] | [`PaymentForm`] | `formas-pagamento` |
//! | [`product_group`] | [`ProductGroup`] | `grupos-produto` |
//! | [`product_area`] | [`ProductArea`] | `areas-produto` |
//! | [`vehicle`] | [`Vehicle`] | `veiculos` |
//! | [`stock_correction`] | [`StockCorrection`] | `correcoes-estoque` |
//! | [`product`] | [`Product`] | `produtos` |
//! | [`service_order`] | [`ServiceOrder`] | `ordens-servico` |

pub mod card_brand;
pub mod payment_form;
pub mod product;
pub mod product_area;
pub mod product_group;
pub mod service_order;
pub mod stock_correction;
pub mod vehicle;

pub use card_brand::CardBrand;
pub use payment_form::PaymentForm;
pub use product::Product;
pub use product_area::ProductArea;
pub use product_group::ProductGroup;
pub use service_order::{OrderSituation, ServiceOrder};
pub use stock_correction::StockCorrection;
pub use vehicle::Vehicle;

use chrono::NaiveDate;

use crate::types::RecordStatus;

// ============================================================================
// Sample data helpers
// ============================================================================

/// Random source for a resource's sample dataset.
///
/// Seeded from the resource name so every run yields the same records.
pub(crate) fn sample_rng(resource: &str) -> fastrand::Rng {
    let seed = resource
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        });
    fastrand::Rng::with_seed(seed)
}

pub(crate) fn pick<'a>(rng: &mut fastrand::Rng, values: &[&'a str]) -> &'a str {
    if values.is_empty() {
        return "";
    }
    values[rng.usize(..values.len())]
}

/// Mostly active, one in five inactive.
pub(crate) fn sample_status(rng: &mut fastrand::Rng) -> RecordStatus {
    RecordStatus::from_active(rng.u8(..5) != 0)
}

/// Amount between `min` and `max` reais, in whole cents.
pub(crate) fn sample_amount(rng: &mut fastrand::Rng, min: u32, max: u32) -> f64 {
    f64::from(rng.u32(min * 100..=max * 100)) / 100.0
}

/// A date within the year after 2024-01-01.
pub(crate) fn sample_date(rng: &mut fastrand::Rng) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    base.checked_add_days(chrono::Days::new(rng.u64(..366)))
        .unwrap_or(base)
}
