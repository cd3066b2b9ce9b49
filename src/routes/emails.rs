use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::{EmailEntry, EmailEntryBody, EmailEntryUpdate, GetEmailBatchQuery};
use crate::error::{ErrorBody, MailingListError};
use crate::storage::MailingListStore;

#[tracing::instrument(
    name = "JSON CreateEmail",
    skip(body, store),
    fields(email = tracing::field::Empty)
)]
pub async fn create_email(
    body: web::Bytes,
    store: web::Data<MailingListStore>,
) -> Result<HttpResponse, MailingListError> {
    let entry: EmailEntryBody = from_json(&body);
    tracing::Span::current().record("email", entry.email.as_str());

    store.create_email_entry(&entry.email).await?;

    entry_response(&store, &entry.email).await
}

#[tracing::instrument(
    name = "JSON GetEmail",
    skip(body, store),
    fields(email = tracing::field::Empty)
)]
pub async fn get_email(
    body: web::Bytes,
    store: web::Data<MailingListStore>,
) -> Result<HttpResponse, MailingListError> {
    let entry: EmailEntryBody = from_json(&body);
    tracing::Span::current().record("email", entry.email.as_str());

    entry_response(&store, &entry.email).await
}

#[tracing::instrument(
    name = "JSON GetEmailBatch",
    skip(body, store),
    fields(page = tracing::field::Empty, count = tracing::field::Empty)
)]
pub async fn get_email_batch(
    body: web::Bytes,
    store: web::Data<MailingListStore>,
) -> Result<HttpResponse, MailingListError> {
    let query: GetEmailBatchQuery = from_json(&body);
    tracing::Span::current()
        .record("page", query.page)
        .record("count", query.count);

    // Checked here so invalid pagination never reaches storage
    let query = query.validate()?;
    let entries: Vec<EmailEntryBody> = store
        .get_email_batch(query)
        .await?
        .iter()
        .map(EmailEntryBody::from)
        .collect();

    Ok(json_response(&entries))
}

#[tracing::instrument(
    name = "JSON UpdateEmail",
    skip(body, store),
    fields(email = tracing::field::Empty)
)]
pub async fn update_email(
    body: web::Bytes,
    store: web::Data<MailingListStore>,
) -> Result<HttpResponse, MailingListError> {
    let update = EmailEntryUpdate::from(from_json::<EmailEntryBody>(&body));
    tracing::Span::current().record("email", update.email.as_str());

    store.update_email_entry(&update).await?;

    entry_response(&store, &update.email).await
}

#[tracing::instrument(
    name = "JSON DeleteEmail",
    skip(body, store),
    fields(email = tracing::field::Empty)
)]
pub async fn delete_email(
    body: web::Bytes,
    store: web::Data<MailingListStore>,
) -> Result<HttpResponse, MailingListError> {
    let entry: EmailEntryBody = from_json(&body);
    tracing::Span::current().record("email", entry.email.as_str());

    store.delete_email_entry(&entry.email).await?;

    entry_response(&store, &entry.email).await
}

/// Requests with the wrong method get an empty response.
pub async fn ignore_request(request: HttpRequest) -> HttpResponse {
    tracing::debug!(
        "Ignoring {} request to {}",
        request.method(),
        request.path()
    );

    HttpResponse::Ok().finish()
}

/// Decodes `body` leniently: missing or mistyped fields take their default
/// value and a body that is not a JSON object is treated as empty.
fn from_json<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    if body.is_empty() {
        return T::default();
    }

    serde_json::from_slice(body).unwrap_or_else(|err| {
        tracing::warn!("Ignoring undecodable request body: {}", err);
        T::default()
    })
}

fn json_response<T: Serialize>(data: &T) -> HttpResponse {
    match serde_json::to_vec(data) {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(body),
        Err(err) => {
            tracing::error!("Failed to serialize the response: {:?}", err);
            HttpResponse::InternalServerError().json(ErrorBody {
                err: err.to_string(),
            })
        }
    }
}

/// Re-reads the entry after an operation. A missing entry is answered with `{}`.
async fn entry_response(
    store: &MailingListStore,
    email: &str,
) -> Result<HttpResponse, MailingListError> {
    let entry: Option<EmailEntry> = store.get_email_entry(email).await?;

    Ok(match entry {
        Some(entry) => json_response(&EmailEntryBody::from(&entry)),
        None => json_response(&serde_json::json!({})),
    })
}
