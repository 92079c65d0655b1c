//! Display order codes, `KA-225-` + six digits.
//!
//! Digits are the last three of the millisecond clock followed by a random
//! draw in `0..=999`. Two calls can collide; uniqueness is enforced by
//! [`crate::OrderCodeRegistry`].

use chrono::Utc;
use rand::Rng;

use crate::domain::value_objects::OrderCode;

pub const ORDER_CODE_PREFIX: &str = "KA-225-";

pub fn order_code_from_parts(timestamp_ms: i64, draw: u16) -> OrderCode {
    let code = format!("{ORDER_CODE_PREFIX}{:03}{:03}", timestamp_ms.rem_euclid(1000), draw % 1000);
    OrderCode(code)
}

pub fn generate_order_code() -> OrderCode {
    let draw = rand::thread_rng().gen_range(0..=999);
    order_code_from_parts(Utc::now().timestamp_millis(), draw)
}
