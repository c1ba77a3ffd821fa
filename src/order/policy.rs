use chrono::TimeDelta;

use crate::Result;
use crate::error::Error;
use crate::metadata::Contract;
use crate::order::nonce::DEFAULT_L2_EXPIRY_BUFFER;
use crate::order::quantize::{DEFAULT_TAKER_FEE_RATE, parse_decimal};
use crate::types::Decimal;

/// Where the fee rate used for the signed fee cap comes from.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeRatePolicy {
    /// Contract's `defaultTakerFeeRate`, or the given rate when the contract has none.
    ContractOrDefault(Decimal),
    /// Always the given rate, regardless of contract metadata.
    Fixed(Decimal),
}

impl Default for FeeRatePolicy {
    fn default() -> Self {
        FeeRatePolicy::ContractOrDefault(DEFAULT_TAKER_FEE_RATE)
    }
}

impl FeeRatePolicy {
    pub fn resolve(self, contract: &Contract) -> Result<Decimal> {
        match self {
            FeeRatePolicy::Fixed(rate) => Ok(rate),
            FeeRatePolicy::ContractOrDefault(fallback) => {
                if contract.default_taker_fee_rate.is_empty() {
                    Ok(fallback)
                } else {
                    parse_decimal("fee rate", &contract.default_taker_fee_rate)
                }
            }
        }
    }

    fn rate(self) -> Decimal {
        match self {
            FeeRatePolicy::ContractOrDefault(rate) | FeeRatePolicy::Fixed(rate) => rate,
        }
    }
}

/// Defaults used by the order flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderPolicies {
    pub fee_rate: FeeRatePolicy,
    /// Added to the caller's expiration to obtain the settlement-layer expiration.
    pub l2_expiry_buffer: TimeDelta,
}

impl Default for OrderPolicies {
    fn default() -> Self {
        Self {
            fee_rate: FeeRatePolicy::default(),
            l2_expiry_buffer: DEFAULT_L2_EXPIRY_BUFFER,
        }
    }
}

impl OrderPolicies {
    #[must_use]
    pub const fn with_fee_rate(mut self, fee_rate: FeeRatePolicy) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    #[must_use]
    pub const fn with_l2_expiry_buffer(mut self, buffer: TimeDelta) -> Self {
        self.l2_expiry_buffer = buffer;
        self
    }

    pub(crate) fn validate(self) -> Result<()> {
        if self.fee_rate.rate().is_sign_negative() {
            return Err(Error::validation(format!(
                "fee rate policy must not be negative, got {}",
                self.fee_rate.rate()
            )));
        }
        if self.l2_expiry_buffer < TimeDelta::zero() {
            return Err(Error::validation(format!(
                "L2 expiry buffer must not be negative, got {}",
                self.l2_expiry_buffer
            )));
        }
        Ok(())
    }
}
