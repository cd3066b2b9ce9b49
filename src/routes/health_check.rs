use actix_web::{web, HttpResponse};

use crate::storage::MailingListStore;

/// Liveness probe. Answers 503 when the database cannot be reached.
#[tracing::instrument(name = "Health Check handler", skip(store))]
pub async fn health_check(store: web::Data<MailingListStore>) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::error!("Database is not reachable: {:?}", err);
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
