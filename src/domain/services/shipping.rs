//! Shipping cost calculator
//!
//! Air tiers are billed per kilogram, sea tiers per cubic meter. Rates are
//! fixed FCFA constants.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::services::currency::to_whole_fcfa;
use crate::domain::value_objects::{RateEntry, ShippingMode};

/// Flat fee added to every shipment. Zero in the current tables.
pub const BASE_COST: f64 = 0.0;

pub const SHIPPING_RATES: [(ShippingMode, RateEntry); 4] = [
    (ShippingMode::AirRapide, RateEntry::by_weight(17_000.0, 10, 17)),
    (ShippingMode::AirExpress, RateEntry::by_weight(27_000.0, 3, 8)),
    (ShippingMode::SeaNoMotor, RateEntry::by_volume(220_000.0, 40, 70)),
    (ShippingMode::SeaWithMotor, RateEntry::by_volume(260_000.0, 40, 70)),
];

pub fn rate_for(mode: ShippingMode) -> RateEntry {
    match mode {
        ShippingMode::AirRapide => SHIPPING_RATES[0].1,
        ShippingMode::AirExpress => SHIPPING_RATES[1].1,
        ShippingMode::SeaNoMotor => SHIPPING_RATES[2].1,
        ShippingMode::SeaWithMotor => SHIPPING_RATES[3].1,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingCalculation {
    pub weight_cost: f64,
    pub volume_cost: f64,
    pub base_cost: f64,
    pub total: f64,
    pub total_fcfa: i64,
    pub mode: ShippingMode,
    pub delivery_days: String,
}

/// Prices a shipment of `weight_kg` / `volume_m3` under `mode`.
///
/// Only the dimension the mode is billed on contributes; the other cost is
/// always zero. Inputs are not validated.
pub fn calculate_shipping_cost(weight_kg: f64, volume_m3: f64, mode: ShippingMode) -> ShippingCalculation {
    let rate = rate_for(mode);
    let (weight_cost, volume_cost) = if mode.is_air() {
        (weight_kg * rate.per_kg, 0.0)
    } else {
        (0.0, volume_m3 * rate.per_m3)
    };
    let total = weight_cost + volume_cost + BASE_COST;
    debug!(%mode, weight_kg, volume_m3, total, "computed shipping cost");

    ShippingCalculation {
        weight_cost,
        volume_cost,
        base_cost: BASE_COST,
        total,
        total_fcfa: to_whole_fcfa(total),
        mode,
        delivery_days: rate.delivery_days(),
    }
}

/// Same as [`calculate_shipping_cost`] for a raw mode identifier; unknown or
/// missing identifiers are priced as fast-air.
pub fn calculate_shipping_cost_lenient(weight_kg: f64, volume_m3: f64, mode: Option<&str>) -> ShippingCalculation {
    calculate_shipping_cost(weight_kg, volume_m3, ShippingMode::resolve(mode))
}
