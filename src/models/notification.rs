//! Notification record models.
//!
//! A notification record is written once per accepted request, before any
//! provider is invoked, and is never updated or deleted afterwards. Its
//! existence therefore does not imply successful delivery.

use chrono::NaiveDateTime;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::io::Write;

/// Delivery channel for a notification.
///
/// Closed set: the dispatch router branches exhaustively on this enum, so
/// adding a channel forces every call site to handle it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    WebPush,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::WebPush => "webpush",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl diesel::query_builder::QueryId for Channel {
    type QueryId = Channel;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for Channel {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for Channel {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "email" => Ok(Channel::Email),
            "sms" => Ok(Channel::Sms),
            "webpush" => Ok(Channel::WebPush),
            _ => Err(format!("Unrecognized channel: {}", s).into()),
        }
    }
}

/// NotificationRecord query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRecord {
    pub id: i64,
    pub channel: Channel,
    pub target: String,
    pub title: Option<String>,
    pub body: String,
    pub metadata: JsonValue,
    pub created_at: NaiveDateTime,
}

/// NewNotification insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification {
    pub channel: Channel,
    pub target: String,
    pub title: Option<String>,
    pub body: String,
    pub metadata: JsonValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_serde_names() {
        assert_eq!(serde_json::to_string(&Channel::Email).unwrap(), "\"email\"");
        assert_eq!(serde_json::to_string(&Channel::Sms).unwrap(), "\"sms\"");
        assert_eq!(
            serde_json::to_string(&Channel::WebPush).unwrap(),
            "\"webpush\""
        );
    }

    #[test]
    fn test_channel_deserialize() {
        let channel: Channel = serde_json::from_str("\"webpush\"").unwrap();
        assert_eq!(channel, Channel::WebPush);
        assert!(serde_json::from_str::<Channel>("\"pigeon\"").is_err());
    }

    #[test]
    fn test_channel_display_matches_serde() {
        for channel in [Channel::Email, Channel::Sms, Channel::WebPush] {
            let json = serde_json::to_string(&channel).unwrap();
            assert_eq!(json, format!("\"{}\"", channel));
        }
    }
}
