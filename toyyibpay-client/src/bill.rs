//! Bill creation request and its option modifiers.
//!
//! A [`BillRequest`] starts from [`BillRequest::new`] and is enriched by an
//! ordered list of [`BillOption`]s. Options are applied left to right on the
//! same request, so a later option overrides an earlier one wherever they
//! touch the same field.
//!
//! Flags stay integers on the wire (`0`, `1`, `2`) exactly as the gateway
//! documents them.

use serde::Serialize;

use crate::{
    error::{Result, ToyyibPayError},
    form::{self, FormFields, is_zero},
};

/// Maximum length of a bill title or description accepted by the gateway.
pub const MAX_TEXT_LEN: usize = 30;

/// Parameters for the `createBill` endpoint.
///
/// Each field carries the gateway's parameter name. Fields marked
/// "omitted when empty" are left out of the form entirely when unset; every
/// other field is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BillRequest {
    /// Category the bill belongs to.
    #[serde(rename = "categoryCode")]
    pub category_code: String,

    /// Amount in sen.
    #[serde(rename = "billAmount")]
    pub amount: u64,
    /// Bill title.
    #[serde(rename = "billName")]
    pub title: String,
    /// Bill description, omitted when empty.
    #[serde(rename = "billDescription", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Caller's own reference, echoed back in callbacks.
    #[serde(rename = "billExternalReferenceNo")]
    pub webhook_reference: String,
    /// URL the gateway posts payment status to.
    #[serde(rename = "billCallbackUrl")]
    pub callback_url: String,
    /// URL the payer is redirected to afterwards, omitted when empty.
    #[serde(rename = "billReturnUrl", skip_serializing_if = "String::is_empty")]
    pub return_url: String,

    /// `1` when payer details below are supplied by the caller.
    #[serde(rename = "billPayorInfo")]
    pub custom_payer_info: u32,
    /// Payer email.
    #[serde(rename = "billEmail")]
    pub email: String,
    /// Payer phone number.
    #[serde(rename = "billPhone")]
    pub phone: String,
    /// Payer name, omitted when empty.
    #[serde(rename = "billTo", skip_serializing_if = "String::is_empty")]
    pub payer_name: String,

    /// `1` for a fixed amount, `0` lets the payer enter the amount.
    #[serde(rename = "billPriceSetting")]
    pub price_setting: u32,
    /// Who bears the processing charge.
    #[serde(rename = "billChargeToCustomer")]
    pub charge_to_customer: u32,
    /// Prepaid charge routing, omitted when zero.
    #[serde(rename = "billChargeToPrepaid", skip_serializing_if = "is_zero")]
    pub charge_to_prepaid: u32,
    /// Custom text for the receipt email, omitted when empty.
    #[serde(rename = "billContentEmail", skip_serializing_if = "String::is_empty")]
    pub email_content: String,
    /// Absolute expiry such as `17-12-2020 17:00:00`, omitted when empty.
    ///
    /// Takes precedence over [`expiry_days`](Self::expiry_days) on the gateway.
    #[serde(rename = "billExpiryDate", skip_serializing_if = "String::is_empty")]
    pub expiry_date: String,
    /// Expiry in days (1 to 100), omitted when zero.
    #[serde(rename = "billExpiryDays", skip_serializing_if = "is_zero")]
    pub expiry_days: u32,

    /// Accepted channels, see [`PaymentChannel`].
    #[serde(rename = "billPaymentChannel")]
    pub payment_channel: u32,
    /// Corporate FPX (B2B) enablement, omitted when zero.
    #[serde(rename = "enableFPXB2B", skip_serializing_if = "is_zero")]
    pub enable_corporate_fpx: u32,
    /// Corporate FPX charge routing, omitted when zero.
    #[serde(rename = "chargeFPXB2B", skip_serializing_if = "is_zero")]
    pub charge_corporate_fpx: u32,

    /// `1` to split the payment, omitted when zero.
    #[serde(rename = "billSplitPayment", skip_serializing_if = "is_zero")]
    pub split_payment: u32,
    /// Split payment arguments as the gateway's JSON string, omitted when empty.
    #[serde(rename = "billSplitPaymentArgs", skip_serializing_if = "String::is_empty")]
    pub split_payment_args: String,
}

impl BillRequest {
    /// Creates the base request used by bill creation.
    ///
    /// Corporate FPX is always enabled and charged (`enableFPXB2B=1`,
    /// `chargeFPXB2B=1`); a [`BillOption::CorporateFpx`] can override it.
    #[must_use]
    pub fn new(
        category_code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            category_code: category_code.into(),
            title: title.into(),
            description: description.into(),
            amount,
            enable_corporate_fpx: 1,
            charge_corporate_fpx: 1,
            ..Self::default()
        }
    }

    /// Applies options in order and returns the request.
    #[must_use]
    pub fn with_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = BillOption>,
    {
        for option in options {
            option.apply(&mut self);
        }
        self
    }

    /// Encodes the request as gateway form fields.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidInput`] if encoding fails.
    pub fn to_form(&self) -> Result<FormFields> {
        form::encode(self)
    }

    /// Checks title and description against the gateway's text rules.
    ///
    /// The client never calls this itself; the gateway enforces the rules
    /// and answers with a backend error. Call it to fail earlier.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidInput`] if the title is empty, or if
    /// the title or description is longer than [`MAX_TEXT_LEN`] characters
    /// or contains anything other than ASCII letters, digits, space and `_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use toyyibpay_client::BillRequest;
    ///
    /// assert!(BillRequest::new("cat", "Order_42", "Two items", 1000).validate_text().is_ok());
    /// assert!(BillRequest::new("cat", "Order #42", "", 1000).validate_text().is_err());
    /// ```
    pub fn validate_text(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(ToyyibPayError::InvalidInput("bill title is empty".to_owned()));
        }
        check_text("title", &self.title)?;
        check_text("description", &self.description)
    }
}

fn check_text(field: &str, text: &str) -> Result<()> {
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(ToyyibPayError::InvalidInput(format!(
            "bill {field} exceeds {MAX_TEXT_LEN} characters"
        )));
    }
    if let Some(bad) = text.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == ' ' || *c == '_'))
    {
        return Err(ToyyibPayError::InvalidInput(format!(
            "bill {field} contains unsupported character '{bad}'"
        )));
    }
    Ok(())
}

/// Payment channels accepted for a bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentChannel {
    /// Online banking (FPX) only.
    #[default]
    Fpx,
    /// Credit or debit card only.
    Card,
    /// Both FPX and card.
    Both,
}

impl PaymentChannel {
    /// Gateway wire value.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            Self::Fpx => 0,
            Self::Card => 1,
            Self::Both => 2,
        }
    }
}

/// When a bill stops accepting payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillExpiry {
    /// Absolute date and time, formatted `dd-mm-yyyy HH:MM:SS`.
    Date(String),
    /// Days from creation, 1 to 100.
    Days(u32),
}

/// A modification applied to a [`BillRequest`] before submission.
///
/// Each variant only writes the fields it names.
///
/// # Examples
///
/// ```
/// use toyyibpay_client::{BillOption, BillRequest};
///
/// let request = BillRequest::new("XGsIFKnx", "Invoice 42", "", 1000).with_options([
///     BillOption::webhook_with_return("ref-001", "https://shop.example/hook", "https://shop.example"),
///     BillOption::payer_info("Test User", "012345789", "user@example.com"),
/// ]);
///
/// assert_eq!(request.custom_payer_info, 1);
/// assert_eq!(request.return_url, "https://shop.example");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillOption {
    /// Supplies payer details and marks them as caller-provided.
    PayerInfo {
        /// Payer name.
        name: String,
        /// Payer phone number.
        phone: String,
        /// Payer email.
        email: String,
    },
    /// Sets the callback reference and URL, and the return URL when given.
    Webhook {
        /// Caller's reference.
        reference: String,
        /// Callback URL.
        url: String,
        /// Redirect after payment; `None` leaves any existing value alone.
        return_url: Option<String>,
    },
    /// Sets the bill expiry.
    Expiry(BillExpiry),
    /// Restricts accepted payment channels.
    PaymentChannel(PaymentChannel),
    /// Sets `billPriceSetting`.
    PriceSetting(u32),
    /// Sets `billChargeToCustomer`.
    ChargeToCustomer(u32),
    /// Sets `billChargeToPrepaid`.
    ChargeToPrepaid(u32),
    /// Sets the receipt email text.
    EmailContent(String),
    /// Overrides corporate FPX flags.
    CorporateFpx {
        /// `enableFPXB2B`; zero omits the field.
        enable: u32,
        /// `chargeFPXB2B`; zero omits the field.
        charge: u32,
    },
    /// Enables split payment with the gateway's argument string.
    SplitPayment(String),
}

impl BillOption {
    /// Payer details option.
    #[must_use]
    pub fn payer_info(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::PayerInfo { name: name.into(), phone: phone.into(), email: email.into() }
    }

    /// Webhook option without a return URL.
    #[must_use]
    pub fn webhook(reference: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Webhook { reference: reference.into(), url: url.into(), return_url: None }
    }

    /// Webhook option with a return URL.
    #[must_use]
    pub fn webhook_with_return(
        reference: impl Into<String>,
        url: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self::Webhook {
            reference: reference.into(),
            url: url.into(),
            return_url: Some(return_url.into()),
        }
    }

    /// Applies this option to `request` in place.
    pub fn apply(self, request: &mut BillRequest) {
        match self {
            Self::PayerInfo { name, phone, email } => {
                request.custom_payer_info = 1;
                request.payer_name = name;
                request.phone = phone;
                request.email = email;
            }
            Self::Webhook { reference, url, return_url } => {
                if let Some(return_url) = return_url {
                    request.return_url = return_url;
                }
                request.webhook_reference = reference;
                request.callback_url = url;
            }
            Self::Expiry(BillExpiry::Date(date)) => request.expiry_date = date,
            Self::Expiry(BillExpiry::Days(days)) => request.expiry_days = days,
            Self::PaymentChannel(channel) => request.payment_channel = channel.code(),
            Self::PriceSetting(value) => request.price_setting = value,
            Self::ChargeToCustomer(value) => request.charge_to_customer = value,
            Self::ChargeToPrepaid(value) => request.charge_to_prepaid = value,
            Self::EmailContent(content) => request.email_content = content,
            Self::CorporateFpx { enable, charge } => {
                request.enable_corporate_fpx = enable;
                request.charge_corporate_fpx = charge;
            }
            Self::SplitPayment(args) => {
                request.split_payment = 1;
                request.split_payment_args = args;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a FormFields, name: &str) -> Option<&'a str> {
        fields.get(name).map(String::as_str)
    }

    #[test]
    fn test_new_forces_corporate_fpx() {
        let request = BillRequest::new("cat", "Title", "Desc", 1000);
        assert_eq!(request.enable_corporate_fpx, 1);
        assert_eq!(request.charge_corporate_fpx, 1);
        assert_eq!(request.amount, 1000);
    }

    #[test]
    fn test_base_request_form_fields() {
        let fields = BillRequest::new("XGsIFKnx", "Title", "", 1000).to_form().unwrap();

        assert_eq!(field(&fields, "categoryCode"), Some("XGsIFKnx"));
        assert_eq!(field(&fields, "billAmount"), Some("1000"));
        assert_eq!(field(&fields, "billName"), Some("Title"));
        assert_eq!(field(&fields, "enableFPXB2B"), Some("1"));
        assert_eq!(field(&fields, "chargeFPXB2B"), Some("1"));

        // Always sent, even when empty or zero
        assert_eq!(field(&fields, "billExternalReferenceNo"), Some(""));
        assert_eq!(field(&fields, "billCallbackUrl"), Some(""));
        assert_eq!(field(&fields, "billEmail"), Some(""));
        assert_eq!(field(&fields, "billPhone"), Some(""));
        assert_eq!(field(&fields, "billPayorInfo"), Some("0"));
        assert_eq!(field(&fields, "billPriceSetting"), Some("0"));
        assert_eq!(field(&fields, "billChargeToCustomer"), Some("0"));
        assert_eq!(field(&fields, "billPaymentChannel"), Some("0"));

        // Omitted when empty
        for name in [
            "billDescription",
            "billReturnUrl",
            "billTo",
            "billChargeToPrepaid",
            "billContentEmail",
            "billExpiryDate",
            "billExpiryDays",
            "billSplitPayment",
            "billSplitPaymentArgs",
        ] {
            assert!(!fields.contains_key(name), "{name} should be omitted");
        }
    }

    #[test]
    fn test_payer_info_option() {
        let request = BillRequest::new("cat", "T", "", 100)
            .with_options([BillOption::payer_info("Test User", "012345789", "a@example.com")]);

        let fields = request.to_form().unwrap();
        assert_eq!(field(&fields, "billPayorInfo"), Some("1"));
        assert_eq!(field(&fields, "billTo"), Some("Test User"));
        assert_eq!(field(&fields, "billPhone"), Some("012345789"));
        assert_eq!(field(&fields, "billEmail"), Some("a@example.com"));
    }

    #[test]
    fn test_webhook_without_return_keeps_existing_return_url() {
        let request = BillRequest::new("cat", "T", "", 100).with_options([
            BillOption::webhook_with_return("ref-1", "https://a.example/hook", "https://a.example"),
            BillOption::webhook("ref-2", "https://b.example/hook"),
        ]);

        assert_eq!(request.webhook_reference, "ref-2");
        assert_eq!(request.callback_url, "https://b.example/hook");
        assert_eq!(request.return_url, "https://a.example");
    }

    #[test]
    fn test_later_options_override_earlier() {
        let request = BillRequest::new("cat", "T", "", 100).with_options([
            BillOption::payer_info("First", "1", "first@example.com"),
            BillOption::payer_info("Second", "2", "second@example.com"),
            BillOption::PaymentChannel(PaymentChannel::Card),
            BillOption::PaymentChannel(PaymentChannel::Both),
        ]);

        assert_eq!(request.payer_name, "Second");
        assert_eq!(request.email, "second@example.com");
        assert_eq!(request.payment_channel, 2);
    }

    #[test]
    fn test_options_only_touch_their_fields() {
        let base = BillRequest::new("cat", "T", "D", 100);
        let mut request = base.clone();
        BillOption::Expiry(BillExpiry::Days(3)).apply(&mut request);

        assert_eq!(request.expiry_days, 3);
        assert_eq!(BillRequest { expiry_days: 0, ..request }, base);
    }

    #[test]
    fn test_expiry_and_split_payment_fields() {
        let fields = BillRequest::new("cat", "T", "", 100)
            .with_options([
                BillOption::Expiry(BillExpiry::Date("17-12-2020 17:00:00".to_owned())),
                BillOption::Expiry(BillExpiry::Days(5)),
                BillOption::SplitPayment(r#"[{"id":"x","amount":"100"}]"#.to_owned()),
                BillOption::ChargeToPrepaid(1),
                BillOption::EmailContent("Thanks".to_owned()),
            ])
            .to_form()
            .unwrap();

        assert_eq!(field(&fields, "billExpiryDate"), Some("17-12-2020 17:00:00"));
        assert_eq!(field(&fields, "billExpiryDays"), Some("5"));
        assert_eq!(field(&fields, "billSplitPayment"), Some("1"));
        assert_eq!(field(&fields, "billSplitPaymentArgs"), Some(r#"[{"id":"x","amount":"100"}]"#));
        assert_eq!(field(&fields, "billChargeToPrepaid"), Some("1"));
        assert_eq!(field(&fields, "billContentEmail"), Some("Thanks"));
    }

    #[test]
    fn test_corporate_fpx_can_be_disabled() {
        let fields = BillRequest::new("cat", "T", "", 100)
            .with_options([BillOption::CorporateFpx { enable: 0, charge: 0 }])
            .to_form()
            .unwrap();

        assert!(!fields.contains_key("enableFPXB2B"));
        assert!(!fields.contains_key("chargeFPXB2B"));
    }

    #[test]
    fn test_payment_channel_codes() {
        assert_eq!(PaymentChannel::Fpx.code(), 0);
        assert_eq!(PaymentChannel::Card.code(), 1);
        assert_eq!(PaymentChannel::Both.code(), 2);
    }

    #[test]
    fn test_validate_text_limits() {
        assert!(BillRequest::new("c", "a".repeat(30), "", 1).validate_text().is_ok());
        assert!(BillRequest::new("c", "a".repeat(31), "", 1).validate_text().is_err());
        assert!(BillRequest::new("c", "ok", "bad-char", 1).validate_text().is_err());
        assert!(BillRequest::new("c", "", "", 1).validate_text().is_err());
        assert!(BillRequest::new("c", "Billing Test_1", "Billing Test", 1).validate_text().is_ok());
    }
}
