//! Classification of exchange response envelopes.
//!
//! Every private endpoint answers with the same envelope. Only `code` decides success; `data`
//! is decoded into the caller's type afterwards, so a rejection is reported as such even when its
//! `data` does not match the expected schema.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;
use crate::error::{Error, Kind};

pub const SUCCESS_CODE: &str = "SUCCESS";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub code: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub msg: Option<String>,
    /// Some gateways report the message here instead of, or next to, `msg`.
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub error_param: Option<Value>,
    #[serde(default)]
    pub trace_id: Option<String>,
}

impl Envelope {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The first non-empty of `msg` and `errorMsg`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        [&self.msg, &self.error_msg]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|m| !m.is_empty())
    }

    /// Returns `data` decoded as `T` on success, [`Kind::RequestRejected`] otherwise.
    ///
    /// A successful envelope without `data` decodes `T` from `null`, which suits `Option<_>`,
    /// `()` and [`Value`].
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(code = %self.code, msg = ?self.message(), trace_id = ?self.trace_id, "request rejected");

            let message = self.message().map(str::to_owned);
            return Err(Error::rejected(self.code, message, self.error_param));
        }

        decode(self.data.unwrap_or(Value::Null))
    }
}

/// Parses a raw response body and classifies it.
pub fn interpret<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    let envelope: Envelope = serde_json::from_slice(raw)?;
    envelope.into_result()
}

#[cfg(not(feature = "tracing"))]
fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| Error::with_source(Kind::Internal, e))
}

#[cfg(feature = "tracing")]
fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    let mut unknown = Vec::new();
    let deserializer = serde_ignored::Deserializer::new(data, |path| {
        unknown.push(path.to_string());
    });
    let value: T = serde_path_to_error::deserialize(deserializer)
        .map_err(|e| Error::with_source(Kind::Internal, e))?;

    if !unknown.is_empty() {
        tracing::trace!(fields = ?unknown, "response contained fields not modeled by the client");
    }

    Ok(value)
}
