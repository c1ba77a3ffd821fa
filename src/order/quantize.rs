use rust_decimal::prelude::ToPrimitive as _;
use rust_decimal_macros::dec;

use crate::Result;
use crate::error::Error;
use crate::types::Decimal;

/// Taker fee rate used when a contract does not publish its own.
pub const DEFAULT_TAKER_FEE_RATE: Decimal = dec!(0.001);

/// Integer scale that converts a decimal quantity of one asset into settlement-layer units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetResolution(Decimal);

impl AssetResolution {
    /// Parses a resolution as published in metadata: `0x`-prefixed hex or plain decimal digits.
    ///
    /// `asset` only labels the error.
    pub fn parse(asset: &str, raw: &str) -> Result<Self> {
        let value = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u64>().ok(),
        };

        match value {
            Some(v) if v > 0 => Ok(Self(Decimal::from(v))),
            _ => Err(Error::missing_resolution(asset, raw)),
        }
    }

    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        self.0
    }
}

impl From<u32> for AssetResolution {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

/// Settlement-layer amounts derived from an order's decimal terms.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Amounts {
    pub synthetic: u64,
    pub collateral: u64,
    /// `limit_fee` scaled by the collateral resolution.
    pub fee_cap: u64,
    /// `price × size`, unscaled.
    pub notional_value: Decimal,
    /// Fee estimate rounded up to a whole unit of the quote coin.
    pub limit_fee: Decimal,
}

/// Parses a decimal without rounding. Inputs beyond 28 fractional digits are rejected instead of
/// being rounded, since the caller's string is what goes on the wire.
pub(crate) fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str_exact(raw).map_err(|e| Error::invalid_decimal(field, raw, e))
}

/// Converts size, price and fee rate into settlement-layer integers.
///
/// Amounts truncate toward zero. The fee is the exception: it is rounded up to a whole quote
/// unit before scaling so that the signed cap never undercharges.
pub fn quantize(
    size: Decimal,
    price: Decimal,
    fee_rate: Decimal,
    synthetic_resolution: AssetResolution,
    collateral_resolution: AssetResolution,
) -> Result<Amounts> {
    if size < Decimal::ZERO {
        return Err(Error::validation(format!(
            "Unable to build order due to negative size {size}"
        )));
    }
    if price < Decimal::ZERO {
        return Err(Error::validation(format!(
            "Unable to build order due to negative price {price}"
        )));
    }
    if fee_rate < Decimal::ZERO {
        return Err(Error::validation(format!(
            "Unable to build order due to negative fee rate {fee_rate}"
        )));
    }

    let notional_value = checked_mul("notional value", price, size)?;
    let synthetic = to_units(
        "synthetic amount",
        checked_mul("synthetic amount", size, synthetic_resolution.as_decimal())?,
    )?;
    let collateral = to_units(
        "collateral amount",
        checked_mul(
            "collateral amount",
            notional_value,
            collateral_resolution.as_decimal(),
        )?,
    )?;

    let limit_fee = checked_mul("fee", checked_mul("fee", size, price)?, fee_rate)?.ceil();
    let fee_cap = to_units(
        "fee cap",
        checked_mul("fee cap", limit_fee, collateral_resolution.as_decimal())?,
    )?;

    Ok(Amounts {
        synthetic,
        collateral,
        fee_cap,
        notional_value,
        limit_fee,
    })
}

fn checked_mul(what: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| Error::validation(format!("{what} overflows: {lhs} * {rhs}")))
}

fn to_units(what: &str, scaled: Decimal) -> Result<u64> {
    scaled.trunc().to_u64().ok_or_else(|| {
        Error::validation(format!("unable to represent {what} {scaled} as a u64"))
    })
}
