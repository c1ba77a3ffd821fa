#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod error;
pub mod metadata;
pub mod order;
pub mod response;
pub mod signer;
pub mod transport;
pub mod types;

pub use order::{
    CancelOrderParams, ClientConfig, FeeRatePolicy, OrderClient, OrderCommitment, OrderIntent,
    OrderPolicies, RawSigningConfig, assemble_order_request, build_order_commitment,
};
pub use signer::{L2Signature, Signer, StarkSigner};
pub use transport::{HttpTransport, Transport};

pub type Result<T> = std::result::Result<T, error::Error>;

/// Unix timestamp in milliseconds, the unit every exchange timestamp is expressed in.
pub type TimestampMs = i64;
