use crate::domain::email_entry::{from_unix_seconds, to_unix_seconds};
use crate::domain::{EmailEntry, EmailEntryUpdate, GetEmailBatchQuery};
use crate::error::MailingListError;
use crate::grpc::proto;

impl From<&EmailEntry> for proto::EmailEntry {
    fn from(entry: &EmailEntry) -> Self {
        proto::EmailEntry {
            id: entry.id,
            email: entry.email.clone(),
            confirmed_at: to_unix_seconds(&entry.confirmed_at),
            opt_out: entry.opt_out,
        }
    }
}

impl TryFrom<proto::EmailEntry> for EmailEntry {
    type Error = MailingListError;

    fn try_from(entry: proto::EmailEntry) -> Result<Self, Self::Error> {
        Ok(EmailEntry {
            id: entry.id,
            email: entry.email,
            confirmed_at: from_unix_seconds(entry.confirmed_at)?,
            opt_out: entry.opt_out,
        })
    }
}

// proto3 scalars are always present, so an RPC update always carries both fields.
impl TryFrom<proto::EmailEntry> for EmailEntryUpdate {
    type Error = MailingListError;

    fn try_from(entry: proto::EmailEntry) -> Result<Self, Self::Error> {
        EmailEntry::try_from(entry).map(EmailEntryUpdate::from)
    }
}

impl From<&proto::GetEmailBatchRequest> for GetEmailBatchQuery {
    fn from(request: &proto::GetEmailBatchRequest) -> Self {
        GetEmailBatchQuery::new(i64::from(request.page), i64::from(request.count))
    }
}

impl From<Option<EmailEntry>> for proto::EmailResponse {
    fn from(entry: Option<EmailEntry>) -> Self {
        proto::EmailResponse {
            email_entry: entry.as_ref().map(proto::EmailEntry::from),
        }
    }
}

impl From<Vec<EmailEntry>> for proto::GetEmailBatchResponse {
    fn from(entries: Vec<EmailEntry>) -> Self {
        proto::GetEmailBatchResponse {
            email_entries: entries.iter().map(proto::EmailEntry::from).collect(),
        }
    }
}
