//! Dispatch router: the core of the service.
//!
//! Given a validated notification request, persists an immutable record,
//! selects zero or one provider by channel, invokes it, and normalizes the
//! outcome into per-channel delivery summaries. Persistence always happens
//! before any provider call, and delivery failure never removes the record.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ProvidersConfig;
use crate::error::AppResult;
use crate::models::{
    Channel, NewNotification, NewWebPushRegistration, NotificationRecord, WebPushRegistration,
};
use crate::repositories::{NotificationRepository, RegistrationRepository};
use crate::services::providers::{
    DeliveryProvider, DeliveryResult, SendgridProvider, TwilioProvider,
};

/// Per-channel delivery summary inside a response envelope.
///
/// `result` is populated only for the channel the request was routed to
/// (both for webpush, with the "not routed" sentinel); the other channel's
/// summary keeps `result: null` so the envelope shape is uniform.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChannelDelivery {
    /// Whether this provider's credentials are configured
    pub configured: bool,
    /// Delivery outcome, or null when the request was not for this channel
    pub result: Option<DeliveryResult>,
}

/// Result of dispatching one notification request.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// The persisted record; exists regardless of delivery outcome
    pub record: NotificationRecord,
    /// Email delivery summary
    pub email: ChannelDelivery,
    /// SMS delivery summary
    pub sms: ChannelDelivery,
}

/// Dispatch service routing notification requests to delivery providers.
#[derive(Clone)]
pub struct DispatchService {
    notifications: NotificationRepository,
    registrations: RegistrationRepository,
    email: SendgridProvider,
    sms: TwilioProvider,
}

impl DispatchService {
    /// Creates a new DispatchService.
    ///
    /// Provider credentials come from the immutable startup configuration, so
    /// `configured` flags are deterministic for the process lifetime.
    pub fn new(
        notifications: NotificationRepository,
        registrations: RegistrationRepository,
        providers: &ProvidersConfig,
    ) -> Self {
        Self {
            notifications,
            registrations,
            email: SendgridProvider::new(providers.sendgrid.clone()),
            sms: TwilioProvider::new(providers.twilio.clone()),
        }
    }

    /// Dispatches one notification request.
    ///
    /// 1. Persists the record; a persistence failure aborts the whole request
    ///    and no envelope is produced.
    /// 2. Invokes the matching provider. Provider failures are data in the
    ///    returned summaries, never errors.
    pub async fn dispatch(&self, request: NewNotification) -> AppResult<DispatchOutcome> {
        let record = self.notifications.create(request).await?;

        tracing::info!(
            id = record.id,
            channel = %record.channel,
            "Notification recorded"
        );

        let (email, sms) = route_to_provider(
            &self.email,
            &self.sms,
            record.channel,
            &record.target,
            record.title.as_deref(),
            &record.body,
        )
        .await;

        Ok(DispatchOutcome { record, email, sms })
    }

    /// Upserts a web-push registration keyed by endpoint.
    pub async fn register(
        &self,
        registration: NewWebPushRegistration,
    ) -> AppResult<WebPushRegistration> {
        self.registrations.upsert(registration).await
    }

    /// True iff the email provider has complete credentials.
    pub fn email_configured(&self) -> bool {
        self.email.is_configured()
    }

    /// True iff the SMS provider has complete credentials.
    pub fn sms_configured(&self) -> bool {
        self.sms.is_configured()
    }
}

/// Selects zero or one provider by channel and invokes it.
///
/// Returns (email, sms) summaries. Exactly one carries a real delivery result
/// for email/sms requests; webpush requests produce the "not routed" sentinel
/// on both sides since this service performs no web-push delivery.
async fn route_to_provider(
    email: &SendgridProvider,
    sms: &TwilioProvider,
    channel: Channel,
    target: &str,
    title: Option<&str>,
    body: &str,
) -> (ChannelDelivery, ChannelDelivery) {
    let email_configured = email.is_configured();
    let sms_configured = sms.is_configured();

    match channel {
        Channel::Email => {
            let result = email.send(target, title, body).await;
            (
                ChannelDelivery {
                    configured: email_configured,
                    result: Some(result),
                },
                ChannelDelivery {
                    configured: sms_configured,
                    result: None,
                },
            )
        }
        Channel::Sms => {
            let result = sms.send(target, None, body).await;
            (
                ChannelDelivery {
                    configured: email_configured,
                    result: None,
                },
                ChannelDelivery {
                    configured: sms_configured,
                    result: Some(result),
                },
            )
        }
        Channel::WebPush => (
            ChannelDelivery {
                configured: email_configured,
                result: Some(DeliveryResult::not_routed()),
            },
            ChannelDelivery {
                configured: sms_configured,
                result: Some(DeliveryResult::not_routed()),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SendgridConfig, TwilioConfig};

    fn unconfigured_providers() -> (SendgridProvider, TwilioProvider) {
        (
            SendgridProvider::new(SendgridConfig::default()),
            TwilioProvider::new(TwilioConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_email_channel_leaves_sms_result_null() {
        let (email, sms) = unconfigured_providers();
        let (email_summary, sms_summary) = route_to_provider(
            &email,
            &sms,
            Channel::Email,
            "user@example.com",
            Some("hi"),
            "body",
        )
        .await;

        let result = email_summary.result.expect("email result populated");
        assert!(!result.sent);
        assert!(result.reason.unwrap().contains("not configured"));
        assert!(sms_summary.result.is_none());
    }

    #[tokio::test]
    async fn test_sms_channel_leaves_email_result_null() {
        let (email, sms) = unconfigured_providers();
        let (email_summary, sms_summary) =
            route_to_provider(&email, &sms, Channel::Sms, "+15550199", None, "body").await;

        assert!(email_summary.result.is_none());
        let result = sms_summary.result.expect("sms result populated");
        assert!(!result.sent);
        assert_eq!(result.reason.as_deref(), Some("twilio not configured"));
    }

    #[tokio::test]
    async fn test_webpush_channel_yields_double_sentinel() {
        let (email, sms) = unconfigured_providers();
        let (email_summary, sms_summary) = route_to_provider(
            &email,
            &sms,
            Channel::WebPush,
            "x@example.com",
            None,
            "hi",
        )
        .await;

        for summary in [email_summary, sms_summary] {
            let result = summary.result.expect("sentinel populated");
            assert!(!result.sent);
            assert_eq!(result.reason.as_deref(), Some("not routed to provider"));
        }
    }

    #[tokio::test]
    async fn test_configured_flags_reported_for_both_channels() {
        let email = SendgridProvider::new(SendgridConfig {
            api_key: "SG.key".to_string(),
            from_email: "noreply@example.com".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        });
        let sms = TwilioProvider::new(TwilioConfig::default());

        // SMS request: the email provider is not invoked, but its configured
        // flag is still reported.
        let (email_summary, sms_summary) =
            route_to_provider(&email, &sms, Channel::Sms, "+15550199", None, "body").await;

        assert!(email_summary.configured);
        assert!(email_summary.result.is_none());
        assert!(!sms_summary.configured);
    }
}
