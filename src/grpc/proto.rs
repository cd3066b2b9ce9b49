//! Wire messages of the `mailinglist.MailingListService` gRPC service.
//!
//! Equivalent protobuf definition:
//!
//! ```text
//! message EmailEntry {
//!     int64 id = 1;
//!     string email = 2;
//!     int64 confirmed_at = 3;
//!     bool opt_out = 4;
//! }
//! message CreateEmailRequest { string email_addr = 1; }
//! message GetEmailRequest { string email_addr = 1; }
//! message UpdateEmailRequest { EmailEntry email_entry = 1; }
//! message DeleteEmailRequest { string email_addr = 1; }
//! message GetEmailBatchRequest { int32 page = 1; int32 count = 2; }
//! message EmailResponse { optional EmailEntry email_entry = 1; }
//! message GetEmailBatchResponse { repeated EmailEntry email_entries = 1; }
//! ```

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmailEntry {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub email: ::prost::alloc::string::String,
    /// Unix seconds, 0 when not confirmed.
    #[prost(int64, tag = "3")]
    pub confirmed_at: i64,
    #[prost(bool, tag = "4")]
    pub opt_out: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateEmailRequest {
    #[prost(string, tag = "1")]
    pub email_addr: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEmailRequest {
    #[prost(string, tag = "1")]
    pub email_addr: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateEmailRequest {
    #[prost(message, optional, tag = "1")]
    pub email_entry: ::core::option::Option<EmailEntry>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteEmailRequest {
    #[prost(string, tag = "1")]
    pub email_addr: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEmailBatchRequest {
    #[prost(int32, tag = "1")]
    pub page: i32,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmailResponse {
    #[prost(message, optional, tag = "1")]
    pub email_entry: ::core::option::Option<EmailEntry>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEmailBatchResponse {
    #[prost(message, repeated, tag = "1")]
    pub email_entries: ::prost::alloc::vec::Vec<EmailEntry>,
}

include!(concat!(env!("OUT_DIR"), "/mailinglist.MailingListService.rs"));
