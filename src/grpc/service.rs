use tonic::{Request, Response, Status};

use crate::domain::{EmailEntryUpdate, GetEmailBatchQuery};
use crate::error::MailingListError;
use crate::grpc::proto::{
    self, mailing_list_service_server::MailingListService, CreateEmailRequest,
    DeleteEmailRequest, EmailResponse, GetEmailBatchRequest, GetEmailBatchResponse,
    GetEmailRequest, UpdateEmailRequest,
};
use crate::storage::MailingListStore;

/// gRPC front end over the shared [`MailingListStore`].
///
/// Any storage error fails the call with a status; it is never embedded in a
/// successful response. Unlike the JSON API, batch pagination is not
/// validated here.
#[derive(Clone, Debug)]
pub struct MailServer {
    store: MailingListStore,
}

impl MailServer {
    pub fn new(store: MailingListStore) -> Self {
        MailServer { store }
    }

    async fn email_response(&self, email: &str) -> Result<Response<EmailResponse>, Status> {
        let entry = self.store.get_email_entry(email).await?;

        Ok(Response::new(entry.into()))
    }
}

#[tonic::async_trait]
impl MailingListService for MailServer {
    #[tracing::instrument(
        name = "gRPC GetEmail",
        skip(self, request),
        fields(email = %request.get_ref().email_addr)
    )]
    async fn get_email(
        &self,
        request: Request<GetEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        self.email_response(&request.get_ref().email_addr).await
    }

    #[tracing::instrument(
        name = "gRPC CreateEmail",
        skip(self, request),
        fields(email = %request.get_ref().email_addr)
    )]
    async fn create_email(
        &self,
        request: Request<CreateEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let email = request.into_inner().email_addr;
        self.store.create_email_entry(&email).await?;

        self.email_response(&email).await
    }

    #[tracing::instrument(
        name = "gRPC UpdateEmail",
        skip(self, request),
        fields(email = tracing::field::Empty)
    )]
    async fn update_email(
        &self,
        request: Request<UpdateEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let entry = request
            .into_inner()
            .email_entry
            .ok_or_else(|| MailingListError::validation("email_entry should be set"))?;
        tracing::Span::current().record("email", entry.email.as_str());
        let update = EmailEntryUpdate::try_from(entry)?;
        self.store.update_email_entry(&update).await?;

        self.email_response(&update.email).await
    }

    #[tracing::instrument(
        name = "gRPC DeleteEmail",
        skip(self, request),
        fields(email = %request.get_ref().email_addr)
    )]
    async fn delete_email(
        &self,
        request: Request<DeleteEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let email = request.into_inner().email_addr;
        self.store.delete_email_entry(&email).await?;

        self.email_response(&email).await
    }

    #[tracing::instrument(
        name = "gRPC GetEmailBatch",
        skip(self, request),
        fields(
            page = request.get_ref().page,
            count = request.get_ref().count
        )
    )]
    async fn get_email_batch(
        &self,
        request: Request<GetEmailBatchRequest>,
    ) -> Result<Response<GetEmailBatchResponse>, Status> {
        let query = GetEmailBatchQuery::from(request.get_ref());
        let entries = self.store.get_email_batch(query).await?;

        Ok(Response::new(proto::GetEmailBatchResponse::from(entries)))
    }
}
