use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::email_entry::{EmailEntry, EmailEntryUpdate};
use crate::domain::lenient;

/// Subscriber record as it travels over the JSON API.
///
/// Every field is optional on the way in, so a body with missing, unknown or
/// mistyped fields still decodes. A mistyped field takes its default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmailEntryBody {
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub email: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub opt_out: Option<bool>,
}

impl From<&EmailEntry> for EmailEntryBody {
    fn from(entry: &EmailEntry) -> Self {
        EmailEntryBody {
            id: entry.id,
            email: entry.email.clone(),
            confirmed_at: Some(entry.confirmed_at),
            opt_out: Some(entry.opt_out),
        }
    }
}

impl From<EmailEntryBody> for EmailEntryUpdate {
    fn from(body: EmailEntryBody) -> Self {
        EmailEntryUpdate {
            email: body.email,
            confirmed_at: body.confirmed_at,
            opt_out: body.opt_out,
        }
    }
}
