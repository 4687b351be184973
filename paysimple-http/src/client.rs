//! A [`paysimple::Gateway`] implementation that talks to PaySimple over HTTP.
//!
//! [`HttpGatewayClient`] signs every request with a `PSSERVER` header, unwraps
//! the `{ Meta, Response }` envelope on success and turns any non-success
//! status into a [`paysimple::EndpointError`] carrying the gateway's
//! field-level messages.
//!
//! ## Error Handling
//!
//! [`HttpClientError`] captures detailed failure contexts, including
//! - URL construction
//! - HTTP transport failures
//! - JSON deserialization errors
//! - Non-success HTTP status responses
//!
//! Converting to [`GatewayError`] keeps endpoint errors inspectable and boxes
//! everything else as a transport error.

use std::time::Duration;

use async_trait::async_trait;
use paysimple::proto::{
    AchAccount, ApiResponse, CreditCard, Customer, CustomerId, NewPayment, Payment,
};
use paysimple::{EndpointError, Gateway, GatewayError, PaySimpleSettings};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::auth::PsServerAuth;
use crate::constants::{
    DEFAULT_TIMEOUT_SECS, PAYMENT_PATH, customer_path, default_ach_path,
    default_credit_card_path,
};
use crate::error::HttpClientError;

/// A client for the PaySimple v4 REST API.
#[derive(Clone, Debug)]
pub struct HttpGatewayClient {
    /// Base URL, always ending in `/` so relative joins keep its path.
    base_url: Url,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Request signer
    auth: PsServerAuth,
    /// Per-request timeout
    timeout: Option<Duration>,
}

impl HttpGatewayClient {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

    /// Constructs a client for the given session.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::ClientBuild`] if the TLS backend cannot be
    /// initialised.
    pub fn try_new(settings: &PaySimpleSettings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .build()
            .map_err(HttpClientError::ClientBuild)?;
        Ok(Self::with_http_client(settings, client))
    }

    /// Constructs a client around a pre-configured `reqwest` client.
    #[must_use]
    pub fn with_http_client(settings: &PaySimpleSettings, client: Client) -> Self {
        Self {
            base_url: normalize_base_url(settings.base_url()),
            client,
            auth: PsServerAuth::from_settings(settings),
            timeout: Some(Self::DEFAULT_TIMEOUT),
        }
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sends `GET v4/customer/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] if the request fails or the gateway
    /// answers with a non-success status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "paysimple.get_customer", skip(self), err)
    )]
    pub async fn get_customer(&self, customer_id: CustomerId) -> Result<Customer, HttpClientError> {
        self.get_json(&customer_path(customer_id)).await
    }

    /// Sends `GET v4/customer/{id}/defaultcreditcard`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] if the request fails or the gateway
    /// answers with a non-success status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "paysimple.get_default_credit_card", skip(self), err)
    )]
    pub async fn get_default_credit_card_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<CreditCard, HttpClientError> {
        self.get_json(&default_credit_card_path(customer_id)).await
    }

    /// Sends `GET v4/customer/{id}/defaultach`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] if the request fails or the gateway
    /// answers with a non-success status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "paysimple.get_default_ach", skip(self), err)
    )]
    pub async fn get_default_ach_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<AchAccount, HttpClientError> {
        self.get_json(&default_ach_path(customer_id)).await
    }

    /// Sends `POST v4/payment`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] if the request fails or the gateway
    /// answers with a non-success status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "paysimple.create_payment",
            skip_all,
            fields(account_id = payment.account_id, amount = %payment.amount),
            err
        )
    )]
    pub async fn create_payment(&self, payment: &NewPayment) -> Result<Payment, HttpClientError> {
        let url = self.endpoint(PAYMENT_PATH)?;
        let request = self.client.post(url).json(payment);
        self.send(request, format!("POST {PAYMENT_PATH}")).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, HttpClientError> {
        self.base_url
            .join(path)
            .map_err(|source| HttpClientError::UrlParse {
                context: format!("Failed to construct {path} URL"),
                source,
            })
    }

    async fn get_json<R>(&self, path: &str) -> Result<R, HttpClientError>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.client.get(url);
        self.send(request, format!("GET {path}")).await
    }

    /// Signs, sends and decodes one request.
    ///
    /// `context` is a human-readable identifier used in tracing and error
    /// messages (e.g. `"GET v4/customer/42"`).
    async fn send<R>(&self, request: RequestBuilder, context: String) -> Result<R, HttpClientError>
    where
        R: DeserializeOwned,
    {
        let mut request = request
            .header(AUTHORIZATION, self.auth.header()?)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let result = self.send_inner(request, &context).await;
        record_result(&context, &result);
        result
    }

    async fn send_inner<R>(&self, request: RequestBuilder, context: &str) -> Result<R, HttpClientError>
    where
        R: DeserializeOwned,
    {
        let http_response = request
            .send()
            .await
            .map_err(|source| HttpClientError::Http {
                context: context.to_owned(),
                source,
            })?;

        let status = http_response.status();
        let body = http_response
            .text()
            .await
            .map_err(|source| HttpClientError::ResponseBodyRead {
                context: context.to_owned(),
                source,
            })?;

        if !status.is_success() {
            return Err(EndpointError::from_body(status, &body).into());
        }

        let envelope: ApiResponse<R> =
            serde_json::from_str(&body).map_err(|source| HttpClientError::JsonDeserialization {
                context: context.to_owned(),
                source,
            })?;

        envelope
            .response
            .ok_or_else(|| HttpClientError::EmptyResponse {
                context: context.to_owned(),
            })
    }
}

#[async_trait]
impl Gateway for HttpGatewayClient {
    async fn get_customer(&self, customer_id: CustomerId) -> Result<Customer, GatewayError> {
        Ok(Self::get_customer(self, customer_id).await?)
    }

    async fn get_default_credit_card_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<CreditCard, GatewayError> {
        Ok(Self::get_default_credit_card_account(self, customer_id).await?)
    }

    async fn get_default_ach_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<AchAccount, GatewayError> {
        Ok(Self::get_default_ach_account(self, customer_id).await?)
    }

    async fn create_payment(&self, payment: &NewPayment) -> Result<Payment, GatewayError> {
        Ok(Self::create_payment(self, payment).await?)
    }
}

/// Ensures the base URL path ends in `/` so `join` appends rather than replaces.
fn normalize_base_url(base: &Url) -> Url {
    let mut url = base.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Logs the outcome of a request. Endpoint errors are expected outcomes and
/// stay at debug level.
#[cfg(feature = "telemetry")]
fn record_result<R>(context: &str, result: &Result<R, HttpClientError>) {
    match result {
        Ok(_) => tracing::debug!(request = context, "PaySimple request succeeded"),
        Err(HttpClientError::Endpoint(err)) => {
            tracing::debug!(request = context, status = %err.status(), "PaySimple endpoint error");
        }
        Err(err) => tracing::warn!(request = context, error = %err, "PaySimple request failed"),
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result<R>(_context: &str, _result: &Result<R, HttpClientError>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use paysimple::proto::{Issuer, PaymentStatus};
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn settings_for(server: &MockServer) -> PaySimpleSettings {
        PaySimpleSettings::new("secret", "APIUser1234", server.uri().parse().unwrap())
    }

    fn envelope(response: serde_json::Value) -> serde_json::Value {
        json!({
            "Meta": { "Errors": null, "HttpStatus": "OK", "HttpStatusCode": 200 },
            "Response": response
        })
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = normalize_base_url(&"https://sandbox-api.paysimple.com/api".parse().unwrap());
        assert_eq!(url.as_str(), "https://sandbox-api.paysimple.com/api/");
        assert_eq!(
            url.join("v4/payment").unwrap().as_str(),
            "https://sandbox-api.paysimple.com/api/v4/payment"
        );
    }

    #[tokio::test]
    async fn get_customer_unwraps_envelope_and_signs_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/customer/42"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "Id": 42,
                "FirstName": "Jane",
                "LastName": "Doe",
                "Email": "jane@example.com"
            }))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let customer = client.get_customer(42).await.unwrap();

        assert_eq!(customer.id, 42);
        assert_eq!(customer.display_name(), "Jane Doe");

        let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
        let auth = requests[0].headers.get("Authorization").unwrap().to_str().unwrap();
        assert!(auth.starts_with("PSSERVER accessid=APIUser1234; timestamp="));
    }

    #[tokio::test]
    async fn not_found_becomes_endpoint_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/customer/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "Meta": {
                    "Errors": {
                        "ErrorCode": "NotFound",
                        "ErrorMessages": [{ "Field": null, "Message": "Customer not found" }]
                    },
                    "HttpStatus": "NotFound",
                    "HttpStatusCode": 404
                },
                "Response": null
            })))
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let err = Gateway::get_customer(&client, 7).await.unwrap_err();

        let endpoint = err.as_endpoint().unwrap();
        assert!(endpoint.is_not_found());
        assert_eq!(endpoint.message(), "Customer not found");
    }

    #[tokio::test]
    async fn default_credit_card_uses_customer_sub_resource() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/customer/42/defaultcreditcard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "Id": 7,
                "CustomerId": 42,
                "CreditCardNumber": "************1111",
                "Issuer": "Master"
            }))))
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let card = client.get_default_credit_card_account(42).await.unwrap();

        assert_eq!(card.id, 7);
        assert_eq!(card.issuer, Issuer::Master);
    }

    #[tokio::test]
    async fn default_ach_uses_customer_sub_resource() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/customer/42/defaultach"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
                "Id": 8,
                "CustomerId": 42,
                "AccountNumber": "****6789",
                "RoutingNumber": "307075259",
                "BankName": "First Bank",
                "IsCheckingAccount": true
            }))))
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let ach = client.get_default_ach_account(42).await.unwrap();

        assert_eq!(ach.id, 8);
        assert!(ach.is_checking_account);
    }

    #[tokio::test]
    async fn create_payment_posts_account_and_amount() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v4/payment"))
            .and(body_json(json!({ "AccountId": 7, "Amount": 50.0 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
                "Id": 555,
                "AccountId": 7,
                "Amount": 50.0,
                "Status": "Posted"
            }))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let payment = client
            .create_payment(&NewPayment::new(7, Decimal::new(5000, 2)))
            .await
            .unwrap();

        assert_eq!(payment.id, 555);
        assert_eq!(payment.status, Some(PaymentStatus::Posted));
    }

    #[tokio::test]
    async fn validation_failure_keeps_field_messages() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v4/payment"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "Meta": {
                    "Errors": {
                        "ErrorCode": "InvalidInput",
                        "ErrorMessages": [
                            { "Field": "Amount", "Message": "too high" },
                            { "Field": "", "Message": "generic" }
                        ]
                    },
                    "HttpStatus": "BadRequest",
                    "HttpStatusCode": 400
                },
                "Response": null
            })))
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let err = client
            .create_payment(&NewPayment::new(7, Decimal::new(1_000_000, 2)))
            .await
            .unwrap_err();

        let HttpClientError::Endpoint(endpoint) = err else {
            panic!("expected endpoint error, got {err:?}");
        };
        assert_eq!(endpoint.status(), StatusCode::BAD_REQUEST);
        assert_eq!(endpoint.error_messages().len(), 2);
        assert_eq!(endpoint.error_messages()[0].field_name(), Some("Amount"));
    }

    #[tokio::test]
    async fn empty_payload_is_a_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/customer/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let err = Gateway::get_customer(&client, 1).await.unwrap_err();

        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/customer/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = HttpGatewayClient::try_new(&settings_for(&mock_server)).unwrap();
        let err = client.get_customer(1).await.unwrap_err();

        assert!(matches!(err, HttpClientError::JsonDeserialization { .. }));
    }
}
