//! Twilio SMS provider implementation.
//!
//! Sends messages through the Twilio Messages API using the global
//! `HTTP_CLIENT`. Unconfigured credentials short-circuit to a sentinel result
//! without any network I/O.

use super::provider::{DeliveryProvider, DeliveryResult, SEND_TIMEOUT};
use crate::config::TwilioConfig;
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use serde::Deserialize;

/// Twilio SMS provider
#[derive(Clone)]
pub struct TwilioProvider {
    config: TwilioConfig,
}

/// Correlation fields from a successful Messages API response.
#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: Option<String>,
    status: Option<String>,
}

impl TwilioProvider {
    /// Creates a new Twilio provider from credentials loaded at startup.
    pub fn new(config: TwilioConfig) -> Self {
        Self { config }
    }

    /// Builds the Messages API endpoint for the configured account.
    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl DeliveryProvider for TwilioProvider {
    fn name(&self) -> &'static str {
        "twilio"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Sends one SMS via the Twilio Messages API.
    ///
    /// SMS has no subject concept, so `subject` is ignored. A success
    /// response yields the message `sid` and `status` as correlation fields;
    /// any other outcome is captured as a failed [`DeliveryResult`].
    async fn send(&self, target: &str, _subject: Option<&str>, body: &str) -> DeliveryResult {
        if !self.is_configured() {
            return DeliveryResult::not_configured(self.name());
        }

        let params = [
            ("From", self.config.from_number.as_str()),
            ("To", target),
            ("Body", body),
        ];

        let response = HTTP_CLIENT
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .timeout(SEND_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                if resp.status().is_success() {
                    match resp.json::<TwilioMessage>().await {
                        Ok(message) => DeliveryResult::accepted_with_correlation(
                            message.sid,
                            message.status,
                        ),
                        // Accepted but unparseable body: keep the success,
                        // just without correlation fields.
                        Err(_) => DeliveryResult::accepted_with_correlation(None, None),
                    }
                } else {
                    let reason = resp.text().await.unwrap_or_default();
                    DeliveryResult::rejected(status_code, reason)
                }
            }
            Err(e) => DeliveryResult::transport_failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn spawn_stub(status: StatusCode, body: &'static str) -> String {
        let app = axum::Router::new().fallback(move || async move { (status, body) });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn configured() -> TwilioConfig {
        TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550100".to_string(),
            api_base: "https://api.twilio.com".to_string(),
        }
    }

    #[test]
    fn test_messages_url() {
        let provider = TwilioProvider::new(configured());
        assert_eq!(
            provider.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_messages_url_trailing_slash() {
        let mut config = configured();
        config.api_base = "https://api.twilio.com/".to_string();
        let provider = TwilioProvider::new(config);
        assert_eq!(
            provider.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_send_returns_sentinel_without_io() {
        let provider = TwilioProvider::new(TwilioConfig::default());
        assert!(!provider.is_configured());

        let result = provider.send("+15550199", None, "hello").await;
        assert!(!result.sent);
        assert_eq!(result.reason.as_deref(), Some("twilio not configured"));
        assert_eq!(result.status_code, None);
    }

    #[test]
    fn test_success_body_parsing() {
        let message: TwilioMessage =
            serde_json::from_str(r#"{"sid":"SM123","status":"queued"}"#).unwrap();
        let result = DeliveryResult::accepted_with_correlation(message.sid, message.status);
        assert!(result.sent);
        assert_eq!(result.sid.as_deref(), Some("SM123"));
        assert_eq!(result.status.as_deref(), Some("queued"));
    }

    #[tokio::test]
    async fn test_created_response_yields_correlation_fields() {
        let mut config = configured();
        config.api_base = spawn_stub(
            StatusCode::CREATED,
            r#"{"sid":"SM123","status":"queued"}"#,
        )
        .await;

        let provider = TwilioProvider::new(config);
        let result = provider.send("+15550199", None, "hello").await;

        assert!(result.sent);
        assert_eq!(result.sid.as_deref(), Some("SM123"));
        assert_eq!(result.status.as_deref(), Some("queued"));
        assert!(result.reason.is_none());
    }

    #[tokio::test]
    async fn test_error_response_yields_rejected_with_body() {
        let mut config = configured();
        config.api_base = spawn_stub(StatusCode::BAD_REQUEST, "bad request").await;

        let provider = TwilioProvider::new(config);
        let result = provider.send("+15550199", None, "hello").await;

        assert!(!result.sent);
        assert_eq!(result.status_code, Some(400));
        assert_eq!(result.reason.as_deref(), Some("bad request"));
    }

    #[tokio::test]
    async fn test_refused_connection_yields_transport_failure() {
        // Bind and immediately drop so the port is closed when the call runs.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = configured();
        config.api_base = format!("http://{}", addr);

        let provider = TwilioProvider::new(config);
        let result = provider.send("+15550199", None, "hello").await;

        assert!(!result.sent);
        assert_eq!(result.status_code, None);
        assert!(result.reason.is_some());
    }
}
