use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{OrderType, Side, TimeInForce};

/// Which orders to cancel. The first populated selector wins, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CancelOrderParams {
    pub order_id: Option<String>,
    pub client_order_id: Option<String>,
    /// Cancels every open order of the contract.
    pub contract_id: Option<String>,
}

impl CancelOrderParams {
    #[must_use]
    pub fn by_order_id<S: Into<String>>(order_id: S) -> Self {
        Self {
            order_id: Some(order_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_client_order_id<S: Into<String>>(client_order_id: S) -> Self {
        Self {
            client_order_id: Some(client_order_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn all_for_contract<S: Into<String>>(contract_id: S) -> Self {
        Self {
            contract_id: Some(contract_id.into()),
            ..Self::default()
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderData {
    pub order_id: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderData {
    /// Cancel outcome keyed by order id.
    #[serde(default)]
    pub cancel_result_map: HashMap<String, String>,
}

/// An order as reported by the exchange.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub account_id: String,
    pub contract_id: String,
    pub side: Side,
    pub price: String,
    pub size: String,
    pub client_order_id: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub expire_time: String,
    #[serde(default)]
    pub cum_fill_size: String,
    #[serde(default)]
    pub cum_fill_value: String,
    #[serde(default)]
    pub created_time: String,
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxOrderSize {
    pub max_buy_size: String,
    pub max_sell_size: String,
    #[serde(default)]
    pub ask1_price: String,
    #[serde(default)]
    pub bid1_price: String,
}
