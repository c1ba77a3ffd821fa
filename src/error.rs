use std::error::Error as StdError;
use std::fmt;

use reqwest::{Method, StatusCode};
use serde_json::Value;

/// Broad category of an [`Error`].
///
/// Callers branch on the kind to decide what to do next: `Validation`, `InvalidDecimal`,
/// `MissingResolution` and `NotFound` are fixable client-side, `RequestRejected` needs different
/// order terms, `SigningFailed` and `Transport` are worth retrying.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Input that parsed but cannot be turned into an order.
    Validation,
    /// A price, size or fee rate string is not a decimal number.
    InvalidDecimal,
    /// An asset resolution factor is absent or not an integer.
    MissingResolution,
    /// A contract or coin is absent from the supplied metadata.
    NotFound,
    /// The signer could not produce a signature.
    SigningFailed,
    /// The request never produced a response body.
    Transport,
    /// The exchange answered with a non-success code.
    RequestRejected,
    /// Serialization or other failures internal to the client.
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the typed detail carried by this error, e.g. [`Rejected`] for
    /// [`Kind::RequestRejected`].
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Self::with_source(
            Kind::Validation,
            Validation {
                reason: reason.into(),
            },
        )
    }

    pub fn invalid_decimal<F: Into<String>, V: Into<String>>(
        field: F,
        value: V,
        source: rust_decimal::Error,
    ) -> Self {
        Self::with_source(
            Kind::InvalidDecimal,
            InvalidDecimal {
                field: field.into(),
                value: value.into(),
                reason: source.to_string(),
            },
        )
    }

    pub fn missing_resolution<A: Into<String>, V: Into<String>>(asset: A, value: V) -> Self {
        Self::with_source(
            Kind::MissingResolution,
            MissingResolution {
                asset: asset.into(),
                value: value.into(),
            },
        )
    }

    pub fn not_found<I: Into<String>>(entity: Entity, id: I) -> Self {
        Self::with_source(
            Kind::NotFound,
            NotFound {
                entity,
                id: id.into(),
            },
        )
    }

    pub fn signing<S: Into<String>>(reason: S) -> Self {
        Self::with_source(
            Kind::SigningFailed,
            SigningFailed {
                reason: reason.into(),
            },
        )
    }

    pub fn status<S: Into<String>>(
        status_code: StatusCode,
        method: Method,
        path: String,
        message: S,
    ) -> Self {
        Self::with_source(
            Kind::Transport,
            Status {
                status_code,
                method,
                path,
                message: message.into(),
            },
        )
    }

    pub fn rejected(code: String, message: Option<String>, error_param: Option<Value>) -> Self {
        Self::with_source(
            Kind::RequestRejected,
            Rejected {
                code,
                message,
                error_param,
            },
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct InvalidDecimal {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for InvalidDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse {} `{}` as a decimal: {}",
            self.field, self.value, self.reason
        )
    }
}

impl StdError for InvalidDecimal {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct MissingResolution {
    pub asset: String,
    pub value: String,
}

impl fmt::Display for MissingResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resolution factor `{}` of asset {} is not a usable integer",
            self.value, self.asset
        )
    }
}

impl StdError for MissingResolution {}

/// What a [`NotFound`] error was looking for.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
    Contract,
    Coin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct NotFound {
    pub entity: Entity,
    pub id: String,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found: {}", self.entity, self.id)
    }
}

impl StdError for NotFound {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SigningFailed {
    pub reason: String,
}

impl fmt::Display for SigningFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to sign order hash: {}", self.reason)
    }
}

impl StdError for SigningFailed {}

/// Non-2xx HTTP status observed by the transport.
#[derive(Debug)]
#[non_exhaustive]
pub struct Status {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error({}) making {} call to {} with {}",
            self.status_code, self.method, self.path, self.message
        )
    }
}

impl StdError for Status {}

/// A well-formed response envelope whose `code` is not `SUCCESS`.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Rejected {
    /// Status code exactly as the exchange sent it.
    pub code: String,
    pub message: Option<String>,
    pub error_param: Option<Value>,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "request failed: {message} (code: {}", self.code)?,
            None => write!(f, "request failed with code: {}", self.code)?,
        }
        if let Some(param) = &self.error_param {
            write!(f, ", errorParam: {param}")?;
        }
        if self.message.is_some() {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl StdError for Rejected {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Transport, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}
