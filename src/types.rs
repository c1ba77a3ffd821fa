use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub use rust_decimal::Decimal;

/// Exchange account identifier, also used as the settlement-layer position id.
pub type AccountId = u64;

#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
    #[serde(other)]
    Unknown,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    #[serde(other)]
    Unknown,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    GoodTilCancel,
    FillOrKill,
    ImmediateOrCancel,
    PostOnly,
    #[serde(other)]
    Unknown,
}

impl TimeInForce {
    /// Time-in-force used when an order does not name one.
    #[must_use]
    pub const fn default_for(order_type: OrderType) -> Option<TimeInForce> {
        match order_type {
            OrderType::Market => Some(TimeInForce::ImmediateOrCancel),
            OrderType::Limit => Some(TimeInForce::GoodTilCancel),
            OrderType::Unknown => None,
        }
    }
}
