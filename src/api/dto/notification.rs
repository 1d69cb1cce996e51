//! Notification dispatch and registration DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Channel;
use crate::services::{ChannelDelivery, DispatchOutcome};

/// Request body for `POST /notifications/`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NotificationPayload {
    /// Delivery channel: email, sms, or webpush
    pub channel: Channel,

    /// Recipient: an email address or phone number, depending on channel
    #[validate(length(min = 1, message = "to must not be empty"))]
    pub to: String,

    /// Optional title; used as the email subject
    pub title: Option<String>,

    /// Message body
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,

    /// Arbitrary caller-supplied metadata, stored with the record
    pub metadata: Option<JsonValue>,
}

/// Request body for `POST /notifications/webpush/register`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WebPushRegistrationPayload {
    /// Push service endpoint URL; the registration's unique key
    #[validate(url(message = "endpoint must be a valid URL"))]
    pub endpoint: String,

    /// Client public key
    #[validate(length(min = 1, message = "p256dh must not be empty"))]
    pub p256dh: String,

    /// Client auth secret
    #[validate(length(min = 1, message = "auth must not be empty"))]
    pub auth: String,
}

/// Informational provider URLs echoed in dispatch envelopes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderUrls {
    pub email: String,
    pub sms: String,
}

/// Response envelope for `POST /notifications/`.
///
/// `accepted` is unconditional once the record is persisted: provider failure
/// never flips it. Callers inspect the nested `sent` flags for the delivery
/// outcome. Both channel summaries are always present; the one the request
/// was not routed to carries `result: null`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DispatchResponse {
    /// Always true; persistence failure yields an error response instead
    pub accepted: bool,
    /// Identifier of the persisted record
    pub id: i64,
    /// Channel the request named
    pub channel: Channel,
    /// Recipient the request named
    pub target: String,
    /// Metadata stored with the record
    pub metadata: JsonValue,
    /// Informational provider URLs
    pub provider_urls: ProviderUrls,
    /// Email delivery summary
    pub email: ChannelDelivery,
    /// SMS delivery summary
    pub sms: ChannelDelivery,
}

impl DispatchResponse {
    /// Assembles the envelope from a dispatch outcome.
    pub fn from_outcome(outcome: DispatchOutcome, provider_urls: ProviderUrls) -> Self {
        Self {
            accepted: true,
            id: outcome.record.id,
            channel: outcome.record.channel,
            target: outcome.record.target,
            metadata: outcome.record.metadata,
            provider_urls,
            email: outcome.email,
            sms: outcome.sms,
        }
    }
}

/// Response for `POST /notifications/webpush/register`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub accepted: bool,
    pub endpoint: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationRecord;
    use crate::services::providers::DeliveryResult;

    fn outcome(channel: Channel) -> DispatchOutcome {
        DispatchOutcome {
            record: NotificationRecord {
                id: 7,
                channel,
                target: "user@example.com".to_string(),
                title: None,
                body: "hi".to_string(),
                metadata: serde_json::json!({"k": "v"}),
                created_at: chrono::NaiveDateTime::default(),
            },
            email: ChannelDelivery {
                configured: false,
                result: Some(DeliveryResult::not_configured("sendgrid")),
            },
            sms: ChannelDelivery {
                configured: false,
                result: None,
            },
        }
    }

    #[test]
    fn test_envelope_shape() {
        let response = DispatchResponse::from_outcome(
            outcome(Channel::Email),
            ProviderUrls {
                email: "http://mailhog:8025".to_string(),
                sms: "https://api.twilio.com".to_string(),
            },
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["accepted"], true);
        assert_eq!(json["id"], 7);
        assert_eq!(json["channel"], "email");
        assert_eq!(json["metadata"]["k"], "v");
        assert_eq!(json["provider_urls"]["email"], "http://mailhog:8025");
        assert_eq!(json["email"]["result"]["sent"], false);
        // The unused channel is explicitly null, never omitted.
        assert!(json["sms"].get("result").is_some());
        assert!(json["sms"]["result"].is_null());
    }

    #[test]
    fn test_payload_validation_rules() {
        let payload = NotificationPayload {
            channel: Channel::Sms,
            to: String::new(),
            title: None,
            body: "hi".to_string(),
            metadata: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_registration_payload_requires_url_endpoint() {
        let payload = WebPushRegistrationPayload {
            endpoint: "not a url".to_string(),
            p256dh: "key".to_string(),
            auth: "secret".to_string(),
        };
        assert!(payload.validate().is_err());

        let payload = WebPushRegistrationPayload {
            endpoint: "https://push.example.com/sub/1".to_string(),
            p256dh: "key".to_string(),
            auth: "secret".to_string(),
        };
        assert!(payload.validate().is_ok());
    }
}
