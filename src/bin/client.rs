use anyhow::Context;
use tonic::transport::{Channel, Endpoint};

use mailinglist::config::get_client_configuration;
use mailinglist::grpc::proto::{
    CreateEmailRequest, DeleteEmailRequest, EmailEntry, EmailResponse, GetEmailBatchRequest,
    GetEmailRequest, UpdateEmailRequest,
};
use mailinglist::grpc::MailingListServiceClient;
use mailinglist::telemetry::{get_subscriber, init_subscriber};

type Client = MailingListServiceClient<Channel>;

fn log_response(response: EmailResponse) -> Option<EmailEntry> {
    match response.email_entry {
        Some(entry) => {
            tracing::info!("response: {:?}", entry);
            Some(entry)
        }
        None => {
            tracing::info!("email not found");
            None
        }
    }
}

#[tracing::instrument(skip(client))]
async fn create_email(client: &mut Client, email_addr: &str) -> anyhow::Result<Option<EmailEntry>> {
    let response = client
        .create_email(CreateEmailRequest {
            email_addr: email_addr.to_string(),
        })
        .await?;

    Ok(log_response(response.into_inner()))
}

#[tracing::instrument(skip(client))]
async fn get_email(client: &mut Client, email_addr: &str) -> anyhow::Result<Option<EmailEntry>> {
    let response = client
        .get_email(GetEmailRequest {
            email_addr: email_addr.to_string(),
        })
        .await?;

    Ok(log_response(response.into_inner()))
}

#[tracing::instrument(skip(client))]
async fn update_email(client: &mut Client, entry: EmailEntry) -> anyhow::Result<Option<EmailEntry>> {
    let response = client
        .update_email(UpdateEmailRequest {
            email_entry: Some(entry),
        })
        .await?;

    Ok(log_response(response.into_inner()))
}

#[tracing::instrument(skip(client))]
async fn delete_email(client: &mut Client, email_addr: &str) -> anyhow::Result<Option<EmailEntry>> {
    let response = client
        .delete_email(DeleteEmailRequest {
            email_addr: email_addr.to_string(),
        })
        .await?;

    Ok(log_response(response.into_inner()))
}

#[tracing::instrument(skip(client))]
async fn get_email_batch(client: &mut Client, page: i32, count: i32) -> anyhow::Result<Vec<EmailEntry>> {
    let entries = client
        .get_email_batch(GetEmailBatchRequest { page, count })
        .await?
        .into_inner()
        .email_entries;

    for (index, entry) in entries.iter().enumerate() {
        tracing::info!("item: [{}] {:?}", index, entry);
    }

    Ok(entries)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        String::from("mailinglist-client"),
        String::from("info"),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let settings = get_client_configuration()?;
    // Every call gets its own deadline so the client never hangs on the server
    let channel = Endpoint::from_shared(settings.get_endpoint())?
        .connect_timeout(settings.get_timeout())
        .timeout(settings.get_timeout())
        .connect()
        .await
        .with_context(|| format!("Unable to connect to {}", settings.get_endpoint()))?;
    let mut client = MailingListServiceClient::new(channel);

    if let Some(email) = settings.email.as_deref() {
        if let Some(mut entry) = create_email(&mut client, email).await? {
            entry.confirmed_at = chrono::Utc::now().timestamp();
            update_email(&mut client, entry).await?;
        }
        get_email(&mut client, email).await?;
        delete_email(&mut client, email).await?;
    }

    get_email_batch(&mut client, 1, 2).await?;
    get_email_batch(&mut client, 2, 2).await?;

    Ok(())
}
