//! HTTP transport implementation using reqwest.

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{Result, ToyyibPayError},
    form::FormFields,
    transport::{
        Endpoint, SECRET_KEY_FIELD, SharedSecret, Transport, TransportResponse,
        USER_SECRET_KEY_FIELD, is_secret_field, sealed,
    },
};

/// Form-POST transport over reqwest.
///
/// Holds one pooled [`Client`], so a single transport should be reused for
/// all calls. Timeouts come from [`crate::config::HttpConfig`] or reqwest's
/// defaults.
///
/// # Examples
///
/// ```
/// use toyyibpay_client::{ClientConfig, transport::HttpTransport};
///
/// let transport = HttpTransport::new("secret", &ClientConfig::sandbox()).unwrap();
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    secret: SharedSecret,
    debug: bool,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport for the given secret and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ToyyibPayError::InvalidConfig`] if the configuration is
    /// invalid, or [`ToyyibPayError::TransportError`] if the HTTP client
    /// cannot be built.
    pub fn new(secret: impl Into<SharedSecret>, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.http.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.http.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(max_idle) = config.http.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max_idle);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url, secret: secret.into(), debug: config.debug })
    }

    /// Returns true if payload debug events are enabled.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        self.base_url.join(endpoint.path()).map_err(|e| {
            ToyyibPayError::InvalidConfig(format!("cannot join endpoint {endpoint}: {e}"))
        })
    }

    /// Builds the outgoing form: caller fields first, secret fields last.
    fn outgoing_form<'a>(&'a self, fields: &'a FormFields) -> Vec<(&'a str, &'a str)> {
        let mut form: Vec<(&str, &str)> = fields
            .iter()
            .filter(|(name, _)| !is_secret_field(name))
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        form.push((USER_SECRET_KEY_FIELD, self.secret.expose()));
        form.push((SECRET_KEY_FIELD, self.secret.expose()));
        form
    }

    #[instrument(skip(self, request_fields), fields(endpoint = endpoint.path(), base_url = %self.base_url))]
    async fn execute(
        &self,
        endpoint: Endpoint,
        request_fields: &FormFields,
    ) -> Result<TransportResponse> {
        let url = self.endpoint_url(endpoint)?;
        let form = self.outgoing_form(request_fields);

        if self.debug {
            let visible: Vec<_> = form.iter().filter(|(name, _)| !is_secret_field(name)).collect();
            debug!(%url, fields = ?visible, "sending form request");
        }

        let response = self.client.post(url).form(&form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        if self.debug {
            debug!(status, body = %String::from_utf8_lossy(&body), "received response body");
        }

        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn post_form<'a>(
        &'a self,
        endpoint: Endpoint,
        fields: &'a FormFields,
    ) -> Result<TransportResponse> {
        self.execute(endpoint, fields).await
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}
