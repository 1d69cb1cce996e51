//! Web-push registration models.
//!
//! Registrations are keyed uniquely by endpoint with upsert semantics: the
//! latest write wins and no history is retained.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// WebPushRegistration query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::webpush_registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WebPushRegistration {
    pub id: i32,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub updated_at: NaiveDateTime,
}

/// NewWebPushRegistration insert model for INSERT/UPSERT operations
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::webpush_registrations)]
pub struct NewWebPushRegistration {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}
