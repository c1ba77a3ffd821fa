//! Order commitment and submission.
//!
//! An order flows through these stages:
//! - quantize decimal terms into settlement-layer integers ([`quantize`])
//! - derive the nonce and expiry bucket ([`nonce`])
//! - hash the ordered commitment ([`hash`])
//! - sign and assemble the wire payload ([`request`]), then submit it ([`OrderClient`])

mod client;
mod commitment;
mod config;
pub mod hash;
pub mod nonce;
mod policy;
pub mod quantize;
mod request;
mod types;

pub use client::OrderClient;
pub use commitment::{OrderCommitment, QuantizedOrder, build_order_commitment};
pub use config::{ClientConfig, RawSigningConfig};
pub use hash::{Commitment, MessageHash};
pub use nonce::{L2Expiry, nonce_from_client_order_id};
pub use policy::{FeeRatePolicy, OrderPolicies};
pub use quantize::{Amounts, AssetResolution, DEFAULT_TAKER_FEE_RATE};
pub use request::{CreateOrderRequest, OrderIntent, assemble_order_request, new_client_order_id};
pub use types::{CancelOrderData, CancelOrderParams, CreateOrderData, MaxOrderSize, Order};
