//! Core delivery provider trait and the normalized result type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

/// Upper bound for a single outbound delivery call.
///
/// A timed-out call is reported as a failed [`DeliveryResult`], never as a
/// hung request.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Normalized outcome of one delivery attempt.
///
/// Every provider returns this shape regardless of channel. On success the
/// provider-specific correlation fields (`sid`, `status`, `status_code`) carry
/// whatever the provider reported; on failure `reason` always explains why.
/// Absent fields are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryResult {
    /// Whether the provider accepted the message
    pub sent: bool,
    /// HTTP status code reported by the provider, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Provider message id (Twilio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Provider delivery status (Twilio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Failure description: provider error body or transport error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl DeliveryResult {
    /// Success with only a status code for correlation (SendGrid).
    pub fn accepted(status_code: u16) -> Self {
        Self {
            sent: true,
            status_code: Some(status_code),
            sid: None,
            status: None,
            reason: None,
        }
    }

    /// Success with message id and status for correlation (Twilio).
    pub fn accepted_with_correlation(sid: Option<String>, status: Option<String>) -> Self {
        Self {
            sent: true,
            status_code: None,
            sid,
            status,
            reason: None,
        }
    }

    /// The provider's required credentials are missing.
    ///
    /// This is a normal, expected result in partially-configured
    /// environments, not an error.
    pub fn not_configured(provider: &str) -> Self {
        Self {
            sent: false,
            status_code: None,
            sid: None,
            status: None,
            reason: Some(format!("{} not configured", provider)),
        }
    }

    /// Sentinel for channels this service never routes to a provider.
    pub fn not_routed() -> Self {
        Self {
            sent: false,
            status_code: None,
            sid: None,
            status: None,
            reason: Some("not routed to provider".to_string()),
        }
    }

    /// The provider answered with a non-success status.
    pub fn rejected(status_code: u16, reason: String) -> Self {
        Self {
            sent: false,
            status_code: Some(status_code),
            sid: None,
            status: None,
            reason: Some(reason),
        }
    }

    /// The call never completed: timeout, connection refused, DNS failure.
    pub fn transport_failure(reason: String) -> Self {
        Self {
            sent: false,
            status_code: None,
            sid: None,
            status: None,
            reason: Some(reason),
        }
    }
}

/// Capability trait for delivery providers (email, SMS).
///
/// Providers never propagate provider-side failures as `Err`: 4xx/5xx
/// responses, timeouts, and connection errors are all captured in the
/// returned [`DeliveryResult`]. Only programming errors surface as faults,
/// which is why `send` returns the result directly instead of a `Result`.
#[async_trait]
pub trait DeliveryProvider: Send + Sync {
    /// Returns the provider name used in logs and "not configured" reasons.
    fn name(&self) -> &'static str;

    /// True iff all required credential fields are present and non-empty.
    /// Pure, no I/O.
    fn is_configured(&self) -> bool;

    /// Sends one message.
    ///
    /// Exactly one outbound network call when configured, zero when not.
    /// `subject` is ignored by providers whose channel has no subject concept.
    async fn send(&self, target: &str, subject: Option<&str>, body: &str) -> DeliveryResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_omitted_from_json() {
        let result = DeliveryResult::not_configured("sendgrid");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sent": false, "reason": "sendgrid not configured"})
        );
    }

    #[test]
    fn test_accepted_with_correlation_shape() {
        let result = DeliveryResult::accepted_with_correlation(
            Some("SM123".to_string()),
            Some("queued".to_string()),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sent": true, "sid": "SM123", "status": "queued"})
        );
    }

    #[test]
    fn test_rejected_carries_status_and_reason() {
        let result = DeliveryResult::rejected(400, "bad request".to_string());
        assert!(!result.sent);
        assert_eq!(result.status_code, Some(400));
        assert_eq!(result.reason.as_deref(), Some("bad request"));
    }

    #[test]
    fn test_not_routed_sentinel() {
        let result = DeliveryResult::not_routed();
        assert!(!result.sent);
        assert_eq!(result.reason.as_deref(), Some("not routed to provider"));
        assert_eq!(result.status_code, None);
    }

    #[test]
    fn test_transport_failure_has_no_status_code() {
        let result = DeliveryResult::transport_failure("connection refused".to_string());
        assert!(!result.sent);
        assert_eq!(result.status_code, None);
        assert_eq!(result.reason.as_deref(), Some("connection refused"));
    }
}
