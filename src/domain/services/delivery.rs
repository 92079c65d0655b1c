//! Delivery date estimates.
//!
//! Uses its own three-tier delay table, which does not match the delivery
//! windows of the shipping rate table.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::domain::value_objects::DeliveryMethod;

/// `(min_days, max_days)` per delivery method.
pub fn delay_range(method: DeliveryMethod) -> (u32, u32) {
    match method {
        DeliveryMethod::Maritime => (45, 60),
        DeliveryMethod::Air => (7, 15),
        DeliveryMethod::Express => (3, 7),
    }
}

/// Days added to the order date: the maximum, or the midpoint rounded half up.
pub fn delay_days(method: DeliveryMethod, use_max_delay: bool) -> u32 {
    let (min, max) = delay_range(method);
    if use_max_delay { max } else { (min + max + 1) / 2 }
}

pub fn calculate_estimated_delivery(
    order_date: DateTime<Utc>,
    method: DeliveryMethod,
    use_max_delay: bool,
) -> DateTime<Utc> {
    let days = delay_days(method, use_max_delay);
    debug!(%method, days, use_max_delay, "estimating delivery");
    order_date + Duration::days(i64::from(days))
}

/// Conservative estimate (maximum delay).
pub fn estimated_delivery(order_date: DateTime<Utc>, method: DeliveryMethod) -> DateTime<Utc> {
    calculate_estimated_delivery(order_date, method, true)
}
