use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(thiserror::Error)]
pub enum MailingListError {
    /// Input rejected before any storage access.
    #[error("{0}")]
    Validation(String),
    #[error("email {0} is already registered")]
    ConstraintViolation(String),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl MailingListError {
    pub fn validation(message: impl Into<String>) -> Self {
        MailingListError::Validation(message.into())
    }
}

impl std::fmt::Debug for MailingListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorBody {
    pub err: String,
}

impl ResponseError for MailingListError {
    // Constraint and storage failures are not told apart at the HTTP level.
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            err: self.to_string(),
        })
    }
}

impl From<MailingListError> for tonic::Status {
    fn from(err: MailingListError) -> Self {
        match err {
            MailingListError::Validation(message) => tonic::Status::invalid_argument(message),
            err @ MailingListError::ConstraintViolation(_) => {
                tonic::Status::already_exists(err.to_string())
            }
            err @ MailingListError::Storage(_) => tonic::Status::internal(err.to_string()),
        }
    }
}
