//! Error types for the ToyyibPay client.
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error
//! type [`ToyyibPayError`] keeps transport failures, undecodable bodies and
//! gateway-reported failures apart so callers can branch on the cause.
//!
//! # Error Categories
//!
//! - **Transport** ([`ToyyibPayError::TransportError`]): the request never
//!   produced a readable body
//! - **Shape** ([`ToyyibPayError::DecodeError`], [`ToyyibPayError::InvalidResponse`]):
//!   the body matched none of the shapes the gateway is known to send
//! - **Gateway** ([`ToyyibPayError::BackendError`], [`ToyyibPayError::InvalidCategoryCode`]):
//!   the gateway understood the request and refused it
//! - **Local** ([`ToyyibPayError::InvalidConfig`], [`ToyyibPayError::InvalidInput`]):
//!   rejected before anything was sent
//!
//! # Examples
//!
//! ```
//! use toyyibpay_client::error::{Result, ToyyibPayError};
//!
//! fn require_code(code: &str) -> Result<&str> {
//!     if code.is_empty() {
//!         return Err(ToyyibPayError::InvalidInput("category code is empty".to_owned()));
//!     }
//!     Ok(code)
//! }
//!
//! assert!(require_code("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ToyyibPayError>;

/// Errors that can occur while talking to the ToyyibPay gateway.
///
/// Nothing in this crate retries on its own. Use [`is_transient`](Self::is_transient)
/// to decide whether retrying the same call could succeed.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum ToyyibPayError {
    /// HTTP request failed or the response body could not be read.
    ///
    /// Wraps [`reqwest::Error`]. Common causes are DNS failures, refused
    /// connections, TLS errors and timeouts configured on the transport.
    ///
    /// # Recovery
    ///
    /// The gateway may not have seen the request at all. Retrying bill
    /// creation after this error can create a duplicate bill.
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    /// Response body matched none of the expected shapes.
    ///
    /// `source` carries the underlying JSON failure when there is one. It is
    /// `None` when the body parsed but was unusable, for example a bill
    /// creation response with a `"success"` status and no bill code.
    #[error("failed to decode gateway response: {message}")]
    DecodeError {
        /// What was being decoded and why it failed.
        message: String,
        /// Underlying JSON error, if decoding itself failed.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Category lookup returned no object at all.
    #[error("gateway returned an empty response")]
    InvalidResponse,

    /// Category lookup returned an empty payload for the given code.
    ///
    /// The gateway answers `200 OK` for unknown category codes and signals
    /// the miss only by leaving every field blank.
    #[error("invalid category code: {0}")]
    InvalidCategoryCode(String),

    /// Gateway returned a well-formed error response.
    ///
    /// The message is the gateway's text, unmodified.
    ///
    /// # Recovery
    ///
    /// Usually a request problem: unknown category, malformed title,
    /// unknown or already inactive bill. Fix the input rather than retrying.
    #[error("toyyibpay backend: {0}")]
    BackendError(String),

    /// Client configuration was rejected.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// A request value could not be encoded or failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ToyyibPayError {
    /// Builds a [`DecodeError`](Self::DecodeError) from a JSON failure.
    pub(crate) fn decode(context: &str, source: serde_json::Error) -> Self {
        Self::DecodeError { message: format!("{context}: {source}"), source: Some(source) }
    }

    /// Builds a [`DecodeError`](Self::DecodeError) for a body that parsed but
    /// cannot be used.
    pub(crate) fn unusable(message: impl Into<String>) -> Self {
        Self::DecodeError { message: message.into(), source: None }
    }

    /// Returns true if retrying the same call might succeed.
    ///
    /// Only transport failures qualify. Decode and gateway errors are
    /// deterministic for a given request.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    /// Returns the gateway's own message for [`BackendError`](Self::BackendError).
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::BackendError(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_backend_error_display() {
        let error = ToyyibPayError::BackendError("bill not found".into());
        assert_eq!(error.to_string(), "toyyibpay backend: bill not found");
        assert_eq!(error.backend_message(), Some("bill not found"));
    }

    #[test]
    fn test_invalid_category_code_display() {
        let error = ToyyibPayError::InvalidCategoryCode("XGsIFKnx".to_owned());
        assert_eq!(error.to_string(), "invalid category code: XGsIFKnx");
        assert!(error.backend_message().is_none());
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = ToyyibPayError::decode("createBill response", json_err);

        assert!(error.to_string().starts_with("failed to decode gateway response: createBill"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_unusable_has_no_source() {
        let error = ToyyibPayError::unusable("success status without bill code");
        assert!(matches!(error, ToyyibPayError::DecodeError { source: None, .. }));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_only_transport_errors_are_transient() {
        assert!(!ToyyibPayError::InvalidResponse.is_transient());
        assert!(!ToyyibPayError::BackendError("x".into()).is_transient());
        assert!(!ToyyibPayError::unusable("x").is_transient());
    }
}
