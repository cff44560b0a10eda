//! Error handling example showing how each failure mode surfaces.
//!
//! # Running this example
//!
//! ```bash
//! export TOYYIBPAY_SECRET_KEY=<user secret key>
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use toyyibpay_client::{ClientConfig, ToyyibPayClient, ToyyibPayError};

fn describe(error: &ToyyibPayError) {
    match error {
        ToyyibPayError::InvalidCategoryCode(code) => {
            eprintln!("   no category with code {:?}", code);
        }
        ToyyibPayError::BackendError(message) => {
            eprintln!("   gateway refused the call: {}", message);
        }
        ToyyibPayError::InvalidResponse | ToyyibPayError::DecodeError { .. } => {
            eprintln!("   gateway answered with something unusable: {}", error);
        }
        e if e.is_transient() => eprintln!("   network problem, safe to retry: {}", e),
        e => eprintln!("   {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("ToyyibPay Client: Error Handling Example\n");

    let secret = env::var("TOYYIBPAY_SECRET_KEY").unwrap_or_else(|_| "not-a-real-key".to_owned());
    let client = ToyyibPayClient::with_config(secret, &ClientConfig::sandbox())?;

    println!("1. Unknown category:");
    if let Err(e) = client.category("does-not-exist").await {
        describe(&e);
    }

    println!("\n2. Bill in an unknown category:");
    if let Err(e) = client.create_bill("does-not-exist", "Title", "Description", 100, []).await {
        describe(&e);
    }

    println!("\n3. Deactivating an unknown bill:");
    if let Err(e) = client.deactivate_bill("does-not-exist").await {
        describe(&e);
    }

    println!("\n4. Invalid configuration:");
    let config = ClientConfig { base_url: "ftp://toyyibpay.com/".to_owned(), ..ClientConfig::default() };
    if let Err(e) = ToyyibPayClient::with_config("key", &config) {
        describe(&e);
    }

    Ok(())
}
