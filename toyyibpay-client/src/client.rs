//! Gateway client exposing the category, bill creation and deactivation calls.

use tracing::{info, instrument, warn};

use crate::{
    bill::{BillOption, BillRequest},
    config::ClientConfig,
    decode,
    error::{Result, ToyyibPayError},
    form::FormFields,
    models::{BillCode, Category},
    transport::{Endpoint, HttpTransport, SharedSecret, Transport},
};

/// Client for the ToyyibPay gateway.
///
/// Holds no per-call state. One instance can be shared across tasks by
/// reference or behind an `Arc`; it reuses a single pooled HTTP client.
///
/// # Examples
///
/// ```rust,no_run
/// use toyyibpay_client::{BillOption, ToyyibPayClient};
///
/// # async fn example() -> toyyibpay_client::Result<()> {
/// let client = ToyyibPayClient::new("user-secret-key", false)?;
///
/// let category = client.category("XGsIFKnx").await?;
/// assert!(category.is_active());
///
/// let bill = client
///     .create_bill("XGsIFKnx", "Invoice 42", "Two items", 1000, [
///         BillOption::webhook_with_return("ref-001", "https://shop.example/hook", "https://shop.example"),
///         BillOption::payer_info("Test User", "012345789", "user@example.com"),
///     ])
///     .await?;
///
/// println!("Pay at {}", client.payment_url(&bill));
///
/// client.deactivate_bill(&bill).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ToyyibPayClient<T: Transport = HttpTransport> {
    transport: T,
}

impl ToyyibPayClient<HttpTransport> {
    /// Creates a client for the production gateway.
    ///
    /// With `debug` set, request fields (secrets excluded) and raw response
    /// bodies are emitted as `tracing` debug events.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::TransportError`] if the HTTP client cannot
    /// be built.
    pub fn new(secret: impl Into<SharedSecret>, debug: bool) -> Result<Self> {
        let config = ClientConfig { debug, ..ClientConfig::default() };
        Self::with_config(secret, &config)
    }

    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidConfig`] if the configuration is
    /// invalid, or [`ToyyibPayError::TransportError`] if the HTTP client
    /// cannot be built.
    pub fn with_config(secret: impl Into<SharedSecret>, config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(secret, config)?))
    }
}

impl<T: Transport> ToyyibPayClient<T> {
    pub(crate) fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Looks up a billing category.
    ///
    /// # Errors
    ///
    /// - [`ToyyibPayError::InvalidCategoryCode`] if the gateway does not know `code`
    /// - [`ToyyibPayError::InvalidResponse`] if the gateway sent no object
    /// - [`ToyyibPayError::DecodeError`] if the body is not a category
    /// - [`ToyyibPayError::TransportError`] on network failure
    #[instrument(skip(self))]
    pub async fn category(&self, code: &str) -> Result<Category> {
        let mut fields = FormFields::new();
        fields.insert("categoryCode".to_owned(), code.to_owned());

        let response = self.transport.post_form(Endpoint::CategoryDetails, &fields).await?;
        let category = decode::category(code, &response.body)?;

        info!(active = category.is_active(), "category lookup completed");
        Ok(category)
    }

    /// Creates a bill and returns its code.
    ///
    /// The base request has corporate FPX enabled; `options` are applied to
    /// it in order.
    ///
    /// # Errors
    ///
    /// - [`ToyyibPayError::BackendError`] with the gateway's message on rejection
    /// - [`ToyyibPayError::DecodeError`] if the response carries no bill code
    /// - [`ToyyibPayError::TransportError`] on network failure
    #[instrument(skip(self, title, description, options))]
    pub async fn create_bill<I>(
        &self,
        category_code: &str,
        title: &str,
        description: &str,
        amount_in_sen: u64,
        options: I,
    ) -> Result<BillCode>
    where
        I: IntoIterator<Item = BillOption>,
    {
        let request =
            BillRequest::new(category_code, title, description, amount_in_sen).with_options(options);
        self.submit_bill(&request).await
    }

    /// Submits a fully built bill request.
    ///
    /// # Errors
    ///
    /// Same as [`create_bill`](Self::create_bill), plus
    /// [`ToyyibPayError::InvalidInput`] if the request cannot be encoded.
    #[instrument(skip(self, request), fields(category_code = %request.category_code, amount = request.amount))]
    pub async fn submit_bill(&self, request: &BillRequest) -> Result<BillCode> {
        let fields = request.to_form()?;
        let response = self.transport.post_form(Endpoint::CreateBill, &fields).await?;

        match decode::create_bill(&response.body) {
            Ok(code) => {
                info!(bill_code = %code, "bill created");
                Ok(code)
            }
            Err(e) => {
                warn!(error = %e, status = response.status, "bill creation failed");
                Err(e)
            }
        }
    }

    /// Deactivates a bill so it no longer accepts payment.
    ///
    /// Nothing is tracked locally: deactivating the same bill twice reports
    /// whatever the gateway answers the second time.
    ///
    /// # Errors
    ///
    /// - [`ToyyibPayError::BackendError`] with the gateway's result text
    /// - [`ToyyibPayError::DecodeError`] if the body is not a status object
    /// - [`ToyyibPayError::TransportError`] on network failure
    #[instrument(skip(self, bill_code), fields(bill_code = %bill_code.as_ref()))]
    pub async fn deactivate_bill(&self, bill_code: impl AsRef<str>) -> Result<()> {
        let mut fields = FormFields::new();
        fields.insert("billCode".to_owned(), bill_code.as_ref().to_owned());

        let response = self.transport.post_form(Endpoint::InactiveBill, &fields).await?;
        if let Err(e) = decode::deactivate_bill(&response.body) {
            if let ToyyibPayError::BackendError(ref reason) = e {
                warn!(%reason, "gateway refused deactivation");
            }
            return Err(e);
        }

        info!("bill deactivated");
        Ok(())
    }

    /// Returns the payment page for a bill on this client's gateway.
    #[must_use]
    pub fn payment_url(&self, bill_code: &BillCode) -> String {
        let base = self.transport.base_url();
        let site_root = base.join("/").map_or_else(|_| base.to_string(), String::from);
        bill_code.payment_url(&site_root)
    }
}

#[cfg(test)]
#[allow(
    clippy::unreachable,
    reason = "test code uses unreachable for expected-path assertions"
)]
mod tests {
    use std::sync::Mutex;

    use url::Url;

    use super::*;
    use crate::transport::{TransportResponse, sealed};

    /// Transport answering every call with one canned body.
    #[derive(Debug)]
    struct CannedTransport {
        base_url: Url,
        body: Vec<u8>,
        calls: Mutex<Vec<(Endpoint, FormFields)>>,
    }

    impl CannedTransport {
        fn new(body: &str) -> Self {
            Self {
                base_url: Url::parse("https://dev.toyyibpay.com/index.php/api/").unwrap(),
                body: body.as_bytes().to_vec(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Endpoint, FormFields)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl sealed::private::Sealed for CannedTransport {}

    impl Transport for CannedTransport {
        async fn post_form<'a>(
            &'a self,
            endpoint: Endpoint,
            fields: &'a FormFields,
        ) -> Result<TransportResponse> {
            self.calls.lock().unwrap().push((endpoint, fields.clone()));
            Ok(TransportResponse { status: 200, body: self.body.clone() })
        }

        fn base_url(&self) -> &Url {
            &self.base_url
        }
    }

    fn client(body: &str) -> ToyyibPayClient<CannedTransport> {
        ToyyibPayClient::with_transport(CannedTransport::new(body))
    }

    #[tokio::test]
    async fn test_category_found() {
        let client =
            client(r#"{"CategoryName":"Test","categoryDescription":"d","categoryStatus":"1"}"#);

        let category = client.category("ABC123").await.unwrap();
        assert_eq!(category.id, "ABC123");
        assert_eq!(category.name, "Test");
        assert!(category.is_active());

        let calls = client.transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Endpoint::CategoryDetails);
        assert_eq!(calls[0].1.get("categoryCode").map(String::as_str), Some("ABC123"));
    }

    #[tokio::test]
    async fn test_category_unknown_code() {
        let client =
            client(r#"{"CategoryName":"","categoryDescription":"","categoryStatus":""}"#);

        match client.category("ABC123").await {
            Err(ToyyibPayError::InvalidCategoryCode(code)) => assert_eq!(code, "ABC123"),
            other => unreachable!("expected InvalidCategoryCode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_bill_sends_request_and_returns_code() {
        let client = client(r#"[{"billCode":"xyz789"}]"#);

        let code = client
            .create_bill("XGsIFKnx", "Title", "Desc", 1000, [
                BillOption::webhook("ref-001", "https://shop.example/hook"),
                BillOption::payer_info("Test User", "012345789", "user@example.com"),
            ])
            .await
            .unwrap();
        assert_eq!(code.as_str(), "xyz789");

        let calls = client.transport.calls();
        assert_eq!(calls[0].0, Endpoint::CreateBill);
        let fields = &calls[0].1;
        assert_eq!(fields.get("categoryCode").map(String::as_str), Some("XGsIFKnx"));
        assert_eq!(fields.get("billAmount").map(String::as_str), Some("1000"));
        assert_eq!(fields.get("billExternalReferenceNo").map(String::as_str), Some("ref-001"));
        assert_eq!(fields.get("billTo").map(String::as_str), Some("Test User"));
        assert_eq!(fields.get("enableFPXB2B").map(String::as_str), Some("1"));
        assert_eq!(fields.get("chargeFPXB2B").map(String::as_str), Some("1"));
        assert!(!fields.contains_key("billReturnUrl"));
    }

    #[tokio::test]
    async fn test_create_bill_backend_error() {
        let client = client(r#"{"status":"fail","msg":"invalid category"}"#);

        let error = client.create_bill("bad", "Title", "", 1000, []).await.unwrap_err();
        assert_eq!(error.backend_message(), Some("invalid category"));
    }

    #[tokio::test]
    async fn test_create_bill_unparseable_body() {
        let client = client("not json");

        let result = client.create_bill("cat", "Title", "", 1000, []).await;
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { .. })));
    }

    #[tokio::test]
    async fn test_create_bill_success_status_without_code() {
        let client = client(r#"{"status":"success","msg":""}"#);

        let result = client.create_bill("cat", "Title", "", 1000, []).await;
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: None, .. })));
    }

    #[tokio::test]
    async fn test_deactivate_success() {
        let client = client(r#"{"status":"success","result":""}"#);

        client.deactivate_bill(&BillCode::new("xyz789")).await.unwrap();

        let calls = client.transport.calls();
        assert_eq!(calls[0].0, Endpoint::InactiveBill);
        assert_eq!(calls[0].1.get("billCode").map(String::as_str), Some("xyz789"));
    }

    #[tokio::test]
    async fn test_deactivate_failure_is_reported_every_time() {
        let client = client(r#"{"status":"fail","result":"bill not found"}"#);

        for _ in 0..2 {
            match client.deactivate_bill("xyz789").await {
                Err(ToyyibPayError::BackendError(msg)) => assert_eq!(msg, "bill not found"),
                other => unreachable!("expected BackendError, got {other:?}"),
            }
        }
        assert_eq!(client.transport.calls().len(), 2);
    }

    #[test]
    fn test_payment_url_uses_site_root() {
        let client = client("");
        assert_eq!(
            client.payment_url(&BillCode::new("xyz789")),
            "https://dev.toyyibpay.com/xyz789"
        );
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToyyibPayClient<HttpTransport>>();
        assert_send_sync::<ToyyibPayClient>();
    }

    #[test]
    fn test_new_production_client() {
        let client = ToyyibPayClient::new("secret", true).unwrap();
        assert_eq!(client.payment_url(&BillCode::new("abc")), "https://toyyibpay.com/abc");
    }
}
