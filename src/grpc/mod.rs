pub mod conversions;
pub mod proto;
pub mod service;

pub use proto::mailing_list_service_client::MailingListServiceClient;
pub use proto::mailing_list_service_server::MailingListServiceServer;
pub use service::MailServer;
