//! Value Objects for logistics pricing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::domain::services::order_code::ORDER_CODE_PREFIX;
use crate::LogisticsError;

/// Transport tier chosen by the customer.
///
/// Air tiers are priced by weight, sea tiers by volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMode {
    #[default]
    AirRapide,
    AirExpress,
    SeaNoMotor,
    SeaWithMotor,
}

impl ShippingMode {
    pub const ALL: [ShippingMode; 4] = [Self::AirRapide, Self::AirExpress, Self::SeaNoMotor, Self::SeaWithMotor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AirRapide => "air_rapide",
            Self::AirExpress => "air_express",
            Self::SeaNoMotor => "sea_no_motor",
            Self::SeaWithMotor => "sea_with_motor",
        }
    }

    pub fn is_air(&self) -> bool { matches!(self, Self::AirRapide | Self::AirExpress) }

    /// Resolves a raw mode the way the storefront always has: anything
    /// unrecognized (or nothing at all) becomes fast-air.
    ///
    /// An unrecognized value is logged at `warn` since it usually means the
    /// caller sent a stale or misspelled identifier.
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            debug!("no shipping mode supplied, using {}", Self::default());
            return Self::default();
        };
        raw.parse().unwrap_or_else(|_| {
            warn!(requested = raw, fallback = %Self::default(), "unknown shipping mode, falling back");
            Self::default()
        })
    }
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ShippingMode {
    type Err = LogisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| LogisticsError::UnknownShippingMode(s.to_string()))
    }
}

/// One row of the four-tier shipping rate table (amounts in FCFA).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub per_kg: f64,
    pub per_m3: f64,
    pub min_days: u32,
    pub max_days: u32,
}

impl RateEntry {
    pub const fn by_weight(per_kg: f64, min_days: u32, max_days: u32) -> Self {
        Self { per_kg, per_m3: 0.0, min_days, max_days }
    }

    pub const fn by_volume(per_m3: f64, min_days: u32, max_days: u32) -> Self {
        Self { per_kg: 0.0, per_m3, min_days, max_days }
    }

    pub fn delivery_days(&self) -> String { format!("{}-{} jours", self.min_days, self.max_days) }
}

/// Three-tier delivery table used for date estimates. Independent of
/// [`ShippingMode`]; the two tables do not agree on delivery windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    Maritime,
    Air,
    Express,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self { Self::Maritime => "maritime", Self::Air => "air", Self::Express => "express" }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DeliveryMethod {
    type Err = LogisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maritime" => Ok(Self::Maritime),
            "air" => Ok(Self::Air),
            "express" => Ok(Self::Express),
            other => Err(LogisticsError::UnknownDeliveryMethod(other.to_string())),
        }
    }
}

/// How a cart line is paid: all at checkout, or products now and shipping on delivery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    Immediate,
    Split,
}

impl FromStr for PaymentMode {
    type Err = LogisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "immediate" => Ok(Self::Immediate),
            "split" => Ok(Self::Split),
            other => Err(LogisticsError::UnknownPaymentMode(other.to_string())),
        }
    }
}

/// Human-facing order reference, `KA-225-` followed by six digits.
///
/// Not unique by construction; see [`crate::OrderCodeRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderCode(pub(crate) String);

impl OrderCode {
    pub fn new(value: impl Into<String>) -> Result<Self, LogisticsError> {
        let value = value.into().trim().to_uppercase();
        let digits = value.strip_prefix(ORDER_CODE_PREFIX).unwrap_or_default();
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LogisticsError::InvalidOrderCode(value));
        }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn digits(&self) -> &str { &self.0[ORDER_CODE_PREFIX.len()..] }
}

impl fmt::Display for OrderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<String> for OrderCode {
    type Error = LogisticsError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<OrderCode> for String {
    fn from(code: OrderCode) -> Self { code.0 }
}
