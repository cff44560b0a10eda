//! ToyyibPay Client: typed access to the ToyyibPay payment gateway
//!
//! An async Rust client for three ToyyibPay API calls: category lookup, bill
//! creation and bill deactivation. It hides the gateway's form-encoded
//! requests and its inconsistent response bodies behind a small typed API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ ToyyibPayClient │  category / create_bill / deactivate_bill
//! └────────┬────────┘
//!          │ BillRequest + BillOption ──► form::encode ──► FormFields
//!          │
//! ┌────────▼────────┐
//! │  HttpTransport  │  form POST, secret fields, user agent, raw body
//! └────────┬────────┘
//!          │ raw bytes
//! ┌────────▼────────┐
//! │     decode      │  ordered response shapes ──► typed result
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use toyyibpay_client::{BillOption, ToyyibPayClient};
//!
//! # async fn example() -> toyyibpay_client::Result<()> {
//! let client = ToyyibPayClient::new("user-secret-key", false)?;
//!
//! let bill = client
//!     .create_bill("XGsIFKnx", "Invoice 42", "Two items", 1000, [
//!         BillOption::webhook("ref-001", "https://shop.example/hook"),
//!         BillOption::payer_info("Test User", "012345789", "user@example.com"),
//!     ])
//!     .await?;
//!
//! println!("Payment URL: {}", client.payment_url(&bill));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return [`Result<T, ToyyibPayError>`](error::Result). Gateway
//! rejections keep the gateway's own message:
//!
//! ```rust,no_run
//! use toyyibpay_client::{ToyyibPayClient, ToyyibPayError};
//!
//! # async fn example(client: ToyyibPayClient) {
//! match client.category("XGsIFKnx").await {
//!     Ok(category) => println!("{} active: {}", category.name, category.is_active()),
//!     Err(ToyyibPayError::InvalidCategoryCode(code)) => eprintln!("no such category: {code}"),
//!     Err(e) if e.is_transient() => eprintln!("network problem, try again: {e}"),
//!     Err(e) => eprintln!("lookup failed: {e}"),
//! }
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the gateway client
//! - [`bill`]: bill requests and option modifiers
//! - [`form`]: flat form-field encoding
//! - [`decode`]: response decoding per operation
//! - [`transport`]: HTTP transport and secret handling
//! - [`config`]: TOML-loadable client configuration
//! - [`models`]: categories and bill codes
//! - [`error`]: error types

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod bill;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod form;
pub mod models;
pub mod transport;

pub use bill::{BillExpiry, BillOption, BillRequest, PaymentChannel};
pub use client::ToyyibPayClient;
pub use config::ClientConfig;
pub use error::{Result, ToyyibPayError};
pub use models::{BillCode, Category};
pub use transport::SharedSecret;
