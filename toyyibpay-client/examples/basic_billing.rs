//! Basic billing example: look up a category, create a bill, print its
//! payment URL.
//!
//! # Running this example
//!
//! Point it at the sandbox with a sandbox secret key and category code:
//! ```bash
//! export TOYYIBPAY_SECRET_KEY=<user secret key>
//! export TOYYIBPAY_CATEGORY=<category code>
//! RUST_LOG=toyyibpay_client=debug cargo run --example basic_billing
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use toyyibpay_client::{BillExpiry, BillOption, ClientConfig, PaymentChannel, ToyyibPayClient};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    env::var(name).map_err(|_| format!("{name} environment variable not set").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("ToyyibPay Client: Basic Billing Example\n");

    let secret = required_env("TOYYIBPAY_SECRET_KEY")?;
    let category_code = required_env("TOYYIBPAY_CATEGORY")?;

    let config = ClientConfig { debug: true, ..ClientConfig::sandbox() };
    let client = ToyyibPayClient::with_config(secret, &config)?;

    println!("1. Looking up category {}...", category_code);
    let category = client.category(&category_code).await?;
    println!("   {} (active: {})", category.name, category.is_active());

    println!("\n2. Creating bill...");
    let bill = client
        .create_bill(&category_code, "Billing Test", "Billing Test", 1000, [
            BillOption::webhook_with_return(
                "ref-001",
                "https://your-webhook-url.com",
                "https://example.com",
            ),
            BillOption::payer_info("Test User", "012345789", "example@example.com"),
            BillOption::PaymentChannel(PaymentChannel::Fpx),
            BillOption::Expiry(BillExpiry::Days(3)),
        ])
        .await?;
    println!("   Bill code: {}", bill);
    println!("   Pay at:    {}", client.payment_url(&bill));

    println!("\nDone");
    Ok(())
}
