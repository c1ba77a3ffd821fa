use crate::Result;
use crate::error::Error;
use crate::metadata::{Coin, Contract};
use crate::order::OrderIntent;
use crate::order::hash::{Commitment, MessageHash};
use crate::order::nonce::{L2Expiry, nonce_from_client_order_id};
use crate::order::policy::OrderPolicies;
use crate::order::quantize::{Amounts, parse_decimal, quantize};
use crate::types::{AccountId, Decimal, Side, TimeInForce};

/// Everything derived from an [`OrderIntent`] before hashing.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantizedOrder {
    pub amounts: Amounts,
    pub nonce: u32,
    pub expiry: L2Expiry,
    /// Intent's time-in-force, or the default for its order type.
    pub time_in_force: TimeInForce,
}

/// A complete order commitment, ready to be signed.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderCommitment {
    pub quantized: QuantizedOrder,
    pub commitment: Commitment,
    pub hash: MessageHash,
}

/// Quantizes an order and computes the hash the trader signs.
///
/// `l2_price` is the price the settlement amounts are computed at: the limit price for limit
/// orders, a worst acceptable price for market orders. It may differ from the intent's `price`,
/// which is only validated and later sent verbatim.
///
/// Either every field is derived and hashed or an error is returned; nothing partial escapes.
pub fn build_order_commitment(
    intent: &OrderIntent,
    contract: &Contract,
    quote_coin: &Coin,
    l2_price: Decimal,
    position_id: AccountId,
    policies: OrderPolicies,
) -> Result<OrderCommitment> {
    if contract.contract_id != intent.contract_id {
        return Err(Error::validation(format!(
            "order is for contract {} but metadata of contract {} was supplied",
            intent.contract_id, contract.contract_id
        )));
    }
    if contract.quote_coin_id != quote_coin.coin_id {
        return Err(Error::validation(format!(
            "contract {} is quoted in coin {}, not {}",
            contract.contract_id, contract.quote_coin_id, quote_coin.coin_id
        )));
    }

    let is_buying_synthetic = match intent.side {
        Side::Buy => true,
        Side::Sell => false,
        other => return Err(Error::validation(format!("Invalid side: {other}"))),
    };
    let time_in_force = intent.resolved_time_in_force()?;

    parse_decimal("price", &intent.price)?;
    let size = parse_decimal("size", &intent.size)?;
    let fee_rate = policies.fee_rate.resolve(contract)?;
    let synthetic_resolution = contract.synthetic_resolution()?;
    let collateral_resolution = quote_coin.resolution()?;

    let amounts = quantize(
        size,
        l2_price,
        fee_rate,
        synthetic_resolution,
        collateral_resolution,
    )?;
    let nonce = nonce_from_client_order_id(&intent.client_order_id);
    let expiry = L2Expiry::new(intent.expire_time, policies.l2_expiry_buffer)?;

    let commitment = Commitment::new(
        &contract.stark_ex_synthetic_asset_id,
        &quote_coin.stark_ex_asset_id,
        is_buying_synthetic,
        amounts.synthetic,
        amounts.collateral,
        amounts.fee_cap,
        nonce,
        position_id,
        expiry.l2_expire_hour(),
    )?;
    let hash = commitment.hash();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        contract_id = %intent.contract_id,
        client_order_id = %intent.client_order_id,
        amount_synthetic = amounts.synthetic,
        amount_collateral = amounts.collateral,
        max_amount_fee = amounts.fee_cap,
        nonce,
        expiration_hour = expiry.l2_expire_hour(),
        hash = %hash,
        "order commitment built"
    );

    Ok(OrderCommitment {
        quantized: QuantizedOrder {
            amounts,
            nonce,
            expiry,
            time_in_force,
        },
        commitment,
        hash,
    })
}
