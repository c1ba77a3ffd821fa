use chrono::{DateTime, TimeDelta, Utc};
use sha2::{Digest as _, Sha256};

use crate::error::Error;
use crate::{Result, TimestampMs};

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Lag allowed between order expiry and settlement-layer expiry.
pub const DEFAULT_L2_EXPIRY_BUFFER: TimeDelta = TimeDelta::days(9);

/// Derives the settlement nonce from a client order id.
///
/// The nonce is the leading 32 bits of `SHA-256(client_order_id)`, so resubmitting the same
/// client order id always signs the same commitment.
#[must_use]
pub fn nonce_from_client_order_id(client_order_id: &str) -> u32 {
    let digest = Sha256::digest(client_order_id.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Expiry of an order as seen by the exchange and by the settlement layer.
///
/// Only the caller's timestamp and the buffer are stored; the wire value and the hour bucket are
/// both computed from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct L2Expiry {
    expire_time: TimestampMs,
    l2_expire_time: TimestampMs,
}

impl L2Expiry {
    pub fn new(expire_time: DateTime<Utc>, buffer: TimeDelta) -> Result<Self> {
        let expire_time_ms = expire_time.timestamp_millis();
        if expire_time_ms < 0 {
            return Err(Error::validation(format!(
                "expiration {expire_time} is before the unix epoch"
            )));
        }
        if buffer < TimeDelta::zero() {
            return Err(Error::validation(format!(
                "L2 expiry buffer must not be negative, got {buffer}"
            )));
        }

        let l2_expire_time = expire_time_ms
            .checked_add(buffer.num_milliseconds())
            .ok_or_else(|| {
                Error::validation(format!("expiration {expire_time} plus {buffer} overflows"))
            })?;
        let hour = l2_expire_time / MILLIS_PER_HOUR;
        if u32::try_from(hour).is_err() {
            return Err(Error::validation(format!(
                "L2 expiration hour {hour} does not fit in 32 bits"
            )));
        }

        Ok(Self {
            expire_time: expire_time_ms,
            l2_expire_time,
        })
    }

    /// Caller's expiration in milliseconds, sent as `expireTime`.
    #[must_use]
    pub const fn expire_time_ms(&self) -> TimestampMs {
        self.expire_time
    }

    /// Buffered expiration in milliseconds, sent as `l2ExpireTime`.
    #[must_use]
    pub const fn l2_expire_time_ms(&self) -> TimestampMs {
        self.l2_expire_time
    }

    /// Hour bucket of [`Self::l2_expire_time_ms`], the value committed to in the order hash.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range checked in `new`"
    )]
    pub const fn l2_expire_hour(&self) -> u32 {
        (self.l2_expire_time / MILLIS_PER_HOUR) as u32
    }
}
