//! Settlement-layer order hash.
//!
//! A perpetual limit order is committed to as a chain of Pedersen hashes:
//!
//! ```text
//! h = H(H(H(asset_sell, asset_buy), asset_fee), packed_amounts)
//! h = H(h, packed_order)
//! ```
//!
//! where `packed_amounts = amount_sell ‖ amount_buy ‖ max_fee ‖ nonce` (64/64/64/32 bits) and
//! `packed_order = LIMIT_ORDER_WITH_FEES ‖ position ‖ position ‖ position ‖ expiration_hour`
//! (64/64/64/32 bits, then 17 bits of padding). Which asset is sold depends on the side.

use std::fmt;

use starknet_crypto::{Felt, pedersen_hash};

use crate::Result;
use crate::error::Error;
use crate::types::AccountId;

const LIMIT_ORDER_WITH_FEES: u64 = 3;
const PADDING_BITS: u32 = 17;

/// Field element signed to authorize an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageHash(Felt);

impl MessageHash {
    #[must_use]
    pub const fn as_felt(&self) -> &Felt {
        &self.0
    }

}

impl From<Felt> for MessageHash {
    fn from(value: Felt) -> Self {
        Self(value)
    }
}

impl fmt::Display for MessageHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_fixed_hex_string())
    }
}

/// Parses a settlement-layer asset id (hex, `0x`-prefixed).
pub fn parse_asset_id(asset_id: &str) -> Result<Felt> {
    Felt::from_hex(asset_id)
        .map_err(|e| Error::validation(format!("invalid asset id `{asset_id}`: {e}")))
}

/// The exact tuple an order hash commits to, in hashing order.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commitment {
    pub synthetic_asset_id: Felt,
    pub collateral_asset_id: Felt,
    /// Always the quote coin, same as `collateral_asset_id`.
    pub fee_asset_id: Felt,
    pub is_buying_synthetic: bool,
    pub amount_synthetic: u64,
    pub amount_collateral: u64,
    pub max_amount_fee: u64,
    pub nonce: u32,
    pub position_id: AccountId,
    pub expiration_hour: u32,
}

impl Commitment {
    /// Builds a commitment for a contract's synthetic asset quoted in `quote_asset_id`.
    ///
    /// The quote asset is used both as collateral and as fee asset.
    #[expect(clippy::too_many_arguments, reason = "mirrors the hashed tuple")]
    pub fn new(
        synthetic_asset_id: &str,
        quote_asset_id: &str,
        is_buying_synthetic: bool,
        amount_synthetic: u64,
        amount_collateral: u64,
        max_amount_fee: u64,
        nonce: u32,
        position_id: AccountId,
        expiration_hour: u32,
    ) -> Result<Self> {
        let synthetic_asset_id = parse_asset_id(synthetic_asset_id)?;
        let quote_asset_id = parse_asset_id(quote_asset_id)?;

        Ok(Self {
            synthetic_asset_id,
            collateral_asset_id: quote_asset_id,
            fee_asset_id: quote_asset_id,
            is_buying_synthetic,
            amount_synthetic,
            amount_collateral,
            max_amount_fee,
            nonce,
            position_id,
            expiration_hour,
        })
    }

    #[must_use]
    pub fn hash(&self) -> MessageHash {
        let (asset_sell, asset_buy, amount_sell, amount_buy) = if self.is_buying_synthetic {
            (
                self.collateral_asset_id,
                self.synthetic_asset_id,
                self.amount_collateral,
                self.amount_synthetic,
            )
        } else {
            (
                self.synthetic_asset_id,
                self.collateral_asset_id,
                self.amount_synthetic,
                self.amount_collateral,
            )
        };

        let mut msg = pedersen_hash(&asset_sell, &asset_buy);
        msg = pedersen_hash(&msg, &self.fee_asset_id);
        msg = pedersen_hash(
            &msg,
            &pack_amounts(amount_sell, amount_buy, self.max_amount_fee, self.nonce),
        );
        msg = pedersen_hash(
            &msg,
            &pack_order(self.position_id, self.expiration_hour),
        );

        MessageHash(msg)
    }
}

fn shift_add(acc: Felt, bits: u32, value: Felt) -> Felt {
    acc * Felt::from(1_u128 << bits) + value
}

fn pack_amounts(amount_sell: u64, amount_buy: u64, max_amount_fee: u64, nonce: u32) -> Felt {
    let packed = Felt::from(amount_sell);
    let packed = shift_add(packed, 64, Felt::from(amount_buy));
    let packed = shift_add(packed, 64, Felt::from(max_amount_fee));
    shift_add(packed, 32, Felt::from(nonce))
}

fn pack_order(position_id: AccountId, expiration_hour: u32) -> Felt {
    let position = Felt::from(position_id);
    let packed = Felt::from(LIMIT_ORDER_WITH_FEES);
    let packed = shift_add(packed, 64, position);
    let packed = shift_add(packed, 64, position);
    let packed = shift_add(packed, 64, position);
    let packed = shift_add(packed, 32, Felt::from(expiration_hour));
    shift_add(packed, PADDING_BITS, Felt::ZERO)
}
