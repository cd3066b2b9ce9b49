use chrono::{DateTime, TimeZone, Utc};

use crate::error::MailingListError;

pub const MISSING_UPDATE_FIELDS: &str = "confirmedAt and optOut fields should not be empty";

/// A mailing list subscriber as it is stored.
///
/// `confirmed_at` at the unix epoch means the subscriber never confirmed.
/// `opt_out` marks a soft deleted subscriber: the row stays, but it is
/// left out of batch listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEntry {
    pub id: i64,
    pub email: String,
    pub confirmed_at: DateTime<Utc>,
    pub opt_out: bool,
}

/// Input of the update operation. Both `confirmed_at` and `opt_out` are
/// optional here so callers can tell "not sent" apart from a zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailEntryUpdate {
    pub email: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub opt_out: Option<bool>,
}

impl EmailEntryUpdate {
    pub fn required_fields(&self) -> Result<(DateTime<Utc>, bool), MailingListError> {
        match (self.confirmed_at, self.opt_out) {
            (Some(confirmed_at), Some(opt_out)) => Ok((confirmed_at, opt_out)),
            _ => Err(MailingListError::validation(MISSING_UPDATE_FIELDS)),
        }
    }
}

impl From<EmailEntry> for EmailEntryUpdate {
    fn from(entry: EmailEntry) -> Self {
        EmailEntryUpdate {
            email: entry.email,
            confirmed_at: Some(entry.confirmed_at),
            opt_out: Some(entry.opt_out),
        }
    }
}

pub fn unconfirmed() -> DateTime<Utc> {
    DateTime::<Utc>::from(std::time::UNIX_EPOCH)
}

pub fn from_unix_seconds(seconds: i64) -> Result<DateTime<Utc>, MailingListError> {
    Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
        MailingListError::validation(format!("{} is not a valid unix timestamp", seconds))
    })
}

pub fn to_unix_seconds(timestamp: &DateTime<Utc>) -> i64 {
    timestamp.timestamp()
}
