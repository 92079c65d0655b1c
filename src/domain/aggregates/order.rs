//! Order Aggregate
//!
//! A placed order ties a display code to the quote the customer accepted.
//! Display codes are short and collide easily, so they are issued through
//! [`OrderCodeRegistry`], which retries until it finds an unused one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::aggregates::cart::CartQuote;
use crate::domain::services::delivery::estimated_delivery;
use crate::domain::services::order_code::generate_order_code;
use crate::domain::value_objects::{DeliveryMethod, OrderCode};
use crate::{LogisticsError, Result};

pub const DEFAULT_CODE_ATTEMPTS: u32 = 16;
pub const DEFAULT_CODE_CAPACITY: usize = 100_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub code: OrderCode,
    pub quote: CartQuote,
    pub delivery_method: Option<DeliveryMethod>,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn place(code: OrderCode, quote: CartQuote, delivery_method: Option<DeliveryMethod>) -> Self {
        let placed_at = Utc::now();
        let order = Self {
            id: Uuid::now_v7(),
            code,
            estimated_delivery: delivery_method.map(|m| estimated_delivery(placed_at, m)),
            delivery_method,
            quote,
            placed_at,
        };
        info!(order_id = %order.id, code = %order.code, total = order.quote.grand_total_fcfa, "order placed");
        order
    }

    pub fn due_now_fcfa(&self) -> i64 { self.quote.due_now_fcfa }
    pub fn due_on_delivery_fcfa(&self) -> i64 { self.quote.due_on_delivery_fcfa }
}

/// In-process memory of recently issued order codes.
///
/// The code space holds 10^6 values, so only the last `capacity` codes are
/// remembered; older ones are forgotten first-in first-out and may be issued
/// again. Codes are display references and the order's UUID stays the key.
#[derive(Debug)]
pub struct OrderCodeRegistry {
    issued: Mutex<IssuedCodes>,
    max_attempts: u32,
    capacity: usize,
}

#[derive(Debug, Default)]
struct IssuedCodes {
    set: HashSet<OrderCode>,
    order: VecDeque<OrderCode>,
}

impl OrderCodeRegistry {
    pub fn new(max_attempts: u32) -> Self { Self::with_capacity(max_attempts, DEFAULT_CODE_CAPACITY) }

    pub fn with_capacity(max_attempts: u32, capacity: usize) -> Self {
        Self { issued: Mutex::new(IssuedCodes::default()), max_attempts: max_attempts.max(1), capacity: capacity.max(1) }
    }

    pub fn max_attempts(&self) -> u32 { self.max_attempts }
    pub fn capacity(&self) -> usize { self.capacity }

    pub fn issue(&self) -> Result<OrderCode> { self.issue_with(generate_order_code) }

    /// Draws codes from `generate` until one is not currently remembered.
    pub fn issue_with(&self, mut generate: impl FnMut() -> OrderCode) -> Result<OrderCode> {
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
        for attempt in 1..=self.max_attempts {
            let code = generate();
            if issued.set.insert(code.clone()) {
                issued.order.push_back(code.clone());
                while issued.order.len() > self.capacity {
                    if let Some(oldest) = issued.order.pop_front() {
                        issued.set.remove(&oldest);
                    }
                }
                return Ok(code);
            }
            warn!(%code, attempt, "order code collision, retrying");
        }
        Err(LogisticsError::OrderCodeExhausted { attempts: self.max_attempts })
    }

    pub fn contains(&self, code: &OrderCode) -> bool {
        self.issued.lock().unwrap_or_else(PoisonError::into_inner).set.contains(code)
    }

    pub fn len(&self) -> usize { self.issued.lock().unwrap_or_else(PoisonError::into_inner).set.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Default for OrderCodeRegistry {
    fn default() -> Self { Self::new(DEFAULT_CODE_ATTEMPTS) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::order_code::order_code_from_parts;

    #[test]
    fn test_issue_unique_codes() {
        let registry = OrderCodeRegistry::default();
        let a = registry.issue().unwrap();
        let b = registry.issue().unwrap();
        assert_ne!(a, b);
        assert!(registry.contains(&a));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_retry_on_collision() {
        let registry = OrderCodeRegistry::new(4);
        let mut draws = [1_u16, 1, 1, 2].into_iter();
        let mut next = || order_code_from_parts(0, draws.next().unwrap());
        assert_eq!(registry.issue_with(&mut next).unwrap().as_str(), "KA-225-000001");
        assert_eq!(registry.issue_with(&mut next).unwrap().as_str(), "KA-225-000002");
    }

    #[test]
    fn test_exhaustion() {
        let registry = OrderCodeRegistry::new(3);
        registry.issue_with(|| order_code_from_parts(0, 5)).unwrap();
        assert_eq!(
            registry.issue_with(|| order_code_from_parts(0, 5)),
            Err(LogisticsError::OrderCodeExhausted { attempts: 3 })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_oldest_codes_are_forgotten() {
        let registry = OrderCodeRegistry::with_capacity(2, 2);
        for draw in [1_u16, 2, 3] {
            registry.issue_with(|| order_code_from_parts(0, draw)).unwrap();
        }
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains(&order_code_from_parts(0, 1)));
        assert!(registry.contains(&order_code_from_parts(0, 3)));
        // a forgotten code can be handed out again
        assert!(registry.issue_with(|| order_code_from_parts(0, 1)).is_ok());
        assert!(!registry.contains(&order_code_from_parts(0, 2)));
    }

    #[test]
    fn test_place_order() {
        let code = order_code_from_parts(42, 42);
        let order = Order::place(code.clone(), CartQuote::default(), Some(DeliveryMethod::Air));
        assert_eq!(order.code, code);
        assert_eq!(order.estimated_delivery, Some(order.placed_at + chrono::Duration::days(15)));
        assert!(Order::place(code, CartQuote::default(), None).estimated_delivery.is_none());
    }
}
