//! SendGrid email provider implementation.
//!
//! Sends plain-text mail through the SendGrid v3 API using the global
//! `HTTP_CLIENT`. Unconfigured credentials short-circuit to a sentinel result
//! without any network I/O.

use super::provider::{DeliveryProvider, DeliveryResult, SEND_TIMEOUT};
use crate::config::SendgridConfig;
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use serde_json::json;

/// Subject used when the request carries no title.
const DEFAULT_SUBJECT: &str = "Notification";

/// SendGrid email provider
#[derive(Clone)]
pub struct SendgridProvider {
    config: SendgridConfig,
}

impl SendgridProvider {
    /// Creates a new SendGrid provider from credentials loaded at startup.
    pub fn new(config: SendgridConfig) -> Self {
        Self { config }
    }

    fn mail_send_url(&self) -> String {
        format!("{}/v3/mail/send", self.config.api_base.trim_end_matches('/'))
    }

    /// Builds the v3 mail/send request body.
    fn build_payload(&self, target: &str, subject: Option<&str>, body: &str) -> serde_json::Value {
        json!({
            "personalizations": [{"to": [{"email": target}]}],
            "from": {"email": self.config.from_email},
            "subject": subject.unwrap_or(DEFAULT_SUBJECT),
            "content": [{"type": "text/plain", "value": body}],
        })
    }
}

#[async_trait]
impl DeliveryProvider for SendgridProvider {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Sends one email via the SendGrid v3 mail/send API.
    ///
    /// SendGrid answers 202 with an empty body on acceptance, so the status
    /// code is the only correlation field. Any other outcome is captured as a
    /// failed [`DeliveryResult`].
    async fn send(&self, target: &str, subject: Option<&str>, body: &str) -> DeliveryResult {
        if !self.is_configured() {
            return DeliveryResult::not_configured(self.name());
        }

        let payload = self.build_payload(target, subject, body);

        let response = HTTP_CLIENT
            .post(self.mail_send_url())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .timeout(SEND_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                if resp.status().is_success() {
                    DeliveryResult::accepted(status_code)
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

    fn configured() -> SendgridConfig {
        SendgridConfig {
            api_key: "SG.key".to_string(),
            from_email: "noreply@example.com".to_string(),
            api_base: "https://api.sendgrid.com".to_string(),
        }
    }

    #[test]
    fn test_mail_send_url() {
        let provider = SendgridProvider::new(configured());
        assert_eq!(
            provider.mail_send_url(),
            "https://api.sendgrid.com/v3/mail/send"
        );
    }

    #[test]
    fn test_build_payload_with_subject() {
        let provider = SendgridProvider::new(configured());
        let payload = provider.build_payload("user@example.com", Some("Hi there"), "body text");

        assert_eq!(
            payload["personalizations"][0]["to"][0]["email"],
            "user@example.com"
        );
        assert_eq!(payload["from"]["email"], "noreply@example.com");
        assert_eq!(payload["subject"], "Hi there");
        assert_eq!(payload["content"][0]["type"], "text/plain");
        assert_eq!(payload["content"][0]["value"], "body text");
    }

    #[test]
    fn test_build_payload_defaults_subject() {
        let provider = SendgridProvider::new(configured());
        let payload = provider.build_payload("user@example.com", None, "body");
        assert_eq!(payload["subject"], "Notification");
    }

    #[tokio::test]
    async fn test_unconfigured_send_returns_sentinel_without_io() {
        let provider = SendgridProvider::new(SendgridConfig::default());
        assert!(!provider.is_configured());

        let result = provider.send("user@example.com", Some("subject"), "body").await;
        assert!(!result.sent);
        assert_eq!(result.reason.as_deref(), Some("sendgrid not configured"));
        assert_eq!(result.status_code, None);
    }

    #[tokio::test]
    async fn test_accepted_response_carries_status_code() {
        let mut config = configured();
        config.api_base = spawn_stub(StatusCode::ACCEPTED, "").await;

        let provider = SendgridProvider::new(config);
        let result = provider.send("user@example.com", Some("hi"), "body").await;

        assert!(result.sent);
        assert_eq!(result.status_code, Some(202));
        assert!(result.reason.is_none());
    }

    #[tokio::test]
    async fn test_error_response_yields_rejected_with_body() {
        let mut config = configured();
        config.api_base = spawn_stub(StatusCode::BAD_REQUEST, "bad request").await;

        let provider = SendgridProvider::new(config);
        let result = provider.send("user@example.com", None, "body").await;

        assert!(!result.sent);
        assert_eq!(result.status_code, Some(400));
        assert_eq!(result.reason.as_deref(), Some("bad request"));
    }

    #[tokio::test]
    async fn test_refused_connection_yields_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = configured();
        config.api_base = format!("http://{}", addr);

        let provider = SendgridProvider::new(config);
        let result = provider.send("user@example.com", None, "body").await;

        assert!(!result.sent);
        assert_eq!(result.status_code, None);
        assert!(result.reason.is_some());
    }
}
