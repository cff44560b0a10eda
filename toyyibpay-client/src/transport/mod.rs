//! Transport abstraction for gateway requests.
//!
//! Every gateway call is a form-encoded `POST` to an endpoint under the API
//! root. The sealed [`Transport`] trait covers exactly that; the only public
//! implementation is [`HttpTransport`].
//!
//! Transports hand back the raw body. The gateway's responses are not
//! reliably typed, so interpretation happens in [`crate::decode`].
//!
//! # Security
//!
//! Every request carries the shared secret in both `userSecretKey` and
//! `secretKey`. Transports add these fields themselves and drop any field
//! of the same name supplied by the caller.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::fmt;

use url::Url;
use zeroize::Zeroizing;

use crate::{error::Result, form::FormFields};

pub mod http;
pub(crate) mod sealed;

pub use http::HttpTransport;

/// Form field carrying the shared secret.
pub const USER_SECRET_KEY_FIELD: &str = "userSecretKey";

/// Second form field carrying the same shared secret.
pub const SECRET_KEY_FIELD: &str = "secretKey";

/// Returns true for the two secret-bearing field names.
#[must_use]
pub fn is_secret_field(name: &str) -> bool {
    name == USER_SECRET_KEY_FIELD || name == SECRET_KEY_FIELD
}

/// Gateway endpoints handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Category lookup.
    CategoryDetails,
    /// Bill creation.
    CreateBill,
    /// Bill deactivation.
    InactiveBill,
}

impl Endpoint {
    /// Path relative to the API root.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::CategoryDetails => "getCategoryDetails",
            Self::CreateBill => "createBill",
            Self::InactiveBill => "inactiveBill",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The gateway API credential.
///
/// Zeroized on drop and redacted from `Debug` output.
#[derive(Clone)]
pub struct SharedSecret(Zeroizing<String>);

impl SharedSecret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Returns the secret for placing on the wire.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(***)")
    }
}

impl From<String> for SharedSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for SharedSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

/// Raw response from a transport call.
///
/// The status code is informational; the gateway signals failures in the
/// body, so callers decide outcomes from [`body`](Self::body) alone.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Unparsed response body.
    pub body: Vec<u8>,
}

/// Form-POST transport to the gateway.
///
/// This trait is sealed; implementations live in this crate only.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Posts `fields`, plus the secret fields, to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ToyyibPayError::TransportError`] if the request fails
    /// or the body cannot be read.
    fn post_form<'a>(
        &'a self,
        endpoint: Endpoint,
        fields: &'a FormFields,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// API root that endpoint paths are joined onto.
    fn base_url(&self) -> &Url;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::CategoryDetails.path(), "getCategoryDetails");
        assert_eq!(Endpoint::CreateBill.path(), "createBill");
        assert_eq!(Endpoint::InactiveBill.to_string(), "inactiveBill");
    }

    #[test]
    fn test_secret_field_names() {
        assert!(is_secret_field("userSecretKey"));
        assert!(is_secret_field("secretKey"));
        assert!(!is_secret_field("SecretKey"));
        assert!(!is_secret_field("billCode"));
    }

    #[test]
    fn test_shared_secret_debug_is_redacted() {
        let secret = SharedSecret::from("e07741af-19a6-438a-b869-b3dfe7e6d3b1");
        let debug = format!("{secret:?}");

        assert_eq!(debug, "SharedSecret(***)");
        assert_eq!(secret.expose(), "e07741af-19a6-438a-b869-b3dfe7e6d3b1");
    }
}
