//! Signing capability consumed by the order client.

use std::fmt;

use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};
use starknet_crypto::{Felt, SignError, get_public_key, rfc6979_generate_k, sign};

use crate::Result;
use crate::error::Error;
use crate::order::MessageHash;

const MAX_SIGNING_ATTEMPTS: u64 = 16;

/// Signature over a [`MessageHash`] as transmitted to the exchange.
///
/// Components are opaque hex strings; the client never inspects them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct L2Signature {
    pub r: String,
    pub s: String,
    pub v: String,
}

impl L2Signature {
    /// Wire form of the signature: `r`, `s` and `v` concatenated in that order, no delimiter.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let mut wire = String::with_capacity(self.r.len() + self.s.len() + self.v.len());
        wire.push_str(&self.r);
        wire.push_str(&self.s);
        wire.push_str(&self.v);
        wire
    }
}

#[async_trait]
pub trait Signer: Send + Sync + fmt::Debug {
    /// Signs an order hash. Failures must be reported as [`crate::error::Kind::SigningFailed`].
    async fn sign_hash(&self, hash: &MessageHash) -> Result<L2Signature>;
}

/// Signs with a Stark private key held in process memory.
///
/// `k` is derived with RFC 6979, so the same hash always yields the same signature.
pub struct StarkSigner {
    private_key: Felt,
    public_key: Felt,
}

impl StarkSigner {
    pub fn from_secret(private_key: &SecretString) -> Result<Self> {
        let private_key = Felt::from_hex(private_key.expose_secret().trim())
            .map_err(|e| Error::validation(format!("invalid stark private key: {e}")))?;
        if private_key == Felt::ZERO {
            return Err(Error::validation("stark private key must not be zero"));
        }

        Ok(Self {
            public_key: get_public_key(&private_key),
            private_key,
        })
    }

    #[must_use]
    pub const fn public_key(&self) -> &Felt {
        &self.public_key
    }

    fn sign_felt(&self, message: &Felt) -> Result<L2Signature> {
        let mut seed = None;
        for attempt in 1..=MAX_SIGNING_ATTEMPTS {
            let k = rfc6979_generate_k(message, &self.private_key, seed.as_ref());
            match sign(&self.private_key, message, &k) {
                Ok(signature) => {
                    return Ok(L2Signature {
                        r: to_hex64(&signature.r),
                        s: to_hex64(&signature.s),
                        v: to_hex64(&signature.v),
                    });
                }
                Err(SignError::InvalidK) => seed = Some(Felt::from(attempt)),
                Err(e) => return Err(Error::signing(format!("{e:?}"))),
            }
        }

        Err(Error::signing(format!(
            "no valid k after {MAX_SIGNING_ATTEMPTS} attempts"
        )))
    }
}

impl fmt::Debug for StarkSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarkSigner")
            .field("public_key", &self.public_key.to_fixed_hex_string())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Signer for StarkSigner {
    async fn sign_hash(&self, hash: &MessageHash) -> Result<L2Signature> {
        self.sign_felt(hash.as_felt())
    }
}

/// 64 lowercase hex digits, no prefix.
fn to_hex64(value: &Felt) -> String {
    let hex = value.to_fixed_hex_string();
    hex.trim_start_matches("0x").to_owned()
}
