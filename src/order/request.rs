use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::error::Error;
use crate::order::commitment::QuantizedOrder;
use crate::signer::L2Signature;
use crate::types::{AccountId, OrderType, Side, TimeInForce};
use crate::{Result, TimestampMs};

/// An order as the caller describes it, before any settlement-layer derivation.
///
/// `price` and `size` are kept as the caller's decimal strings and transmitted verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct OrderIntent {
    pub contract_id: String,
    pub side: Side,
    pub order_type: OrderType,
    pub price: String,
    pub size: String,
    /// `None` picks the default for `order_type`.
    pub time_in_force: Option<TimeInForce>,
    #[builder(default)]
    pub reduce_only: bool,
    /// Determines the settlement nonce. Reusing an id reproduces the same signed order.
    #[builder(default = new_client_order_id())]
    pub client_order_id: String,
    pub expire_time: DateTime<Utc>,
}

impl OrderIntent {
    pub fn resolved_time_in_force(&self) -> Result<TimeInForce> {
        self.time_in_force
            .or_else(|| TimeInForce::default_for(self.order_type))
            .ok_or_else(|| {
                Error::validation(format!(
                    "time in force is required for order type {}",
                    self.order_type
                ))
            })
    }
}

#[must_use]
pub fn new_client_order_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Body of `POST /api/v1/private/order/createOrder`.
#[serde_as]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde_as(as = "DisplayFromStr")]
    pub account_id: AccountId,
    pub contract_id: String,
    pub price: String,
    pub size: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    pub time_in_force: TimeInForce,
    pub client_order_id: String,
    #[serde_as(as = "DisplayFromStr")]
    pub expire_time: TimestampMs,
    #[serde_as(as = "DisplayFromStr")]
    pub l2_nonce: u32,
    pub l2_signature: String,
    #[serde_as(as = "DisplayFromStr")]
    pub l2_expire_time: TimestampMs,
    pub l2_value: String,
    pub l2_size: String,
    pub l2_limit_fee: String,
    pub reduce_only: bool,
}

/// Combines an intent, its quantized form and the signature into the wire payload.
#[must_use]
pub fn assemble_order_request(
    intent: &OrderIntent,
    quantized: &QuantizedOrder,
    account_id: AccountId,
    signature: &L2Signature,
) -> CreateOrderRequest {
    CreateOrderRequest {
        account_id,
        contract_id: intent.contract_id.clone(),
        price: intent.price.clone(),
        size: intent.size.clone(),
        order_type: intent.order_type,
        side: intent.side,
        time_in_force: quantized.time_in_force,
        client_order_id: intent.client_order_id.clone(),
        expire_time: quantized.expiry.expire_time_ms(),
        l2_nonce: quantized.nonce,
        l2_signature: signature.to_wire(),
        l2_expire_time: quantized.expiry.l2_expire_time_ms(),
        l2_value: quantized.amounts.notional_value.normalize().to_string(),
        l2_size: intent.size.clone(),
        l2_limit_fee: quantized.amounts.limit_fee.normalize().to_string(),
        reduce_only: intent.reduce_only,
    }
}
