// Generates the MailingListService server and client glue. Messages live in
// src/grpc/proto.rs as prost structs, so no protoc is needed at build time.
fn main() {
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(format!("crate::grpc::proto::{}", input))
            .output_type(format!("crate::grpc::proto::{}", output))
            .codec_path("tonic::codec::ProstCodec")
            .build()
    };

    let service = tonic_build::manual::Service::builder()
        .name("MailingListService")
        .package("mailinglist")
        .method(method(
            "create_email",
            "CreateEmail",
            "CreateEmailRequest",
            "EmailResponse",
        ))
        .method(method(
            "get_email",
            "GetEmail",
            "GetEmailRequest",
            "EmailResponse",
        ))
        .method(method(
            "update_email",
            "UpdateEmail",
            "UpdateEmailRequest",
            "EmailResponse",
        ))
        .method(method(
            "delete_email",
            "DeleteEmail",
            "DeleteEmailRequest",
            "EmailResponse",
        ))
        .method(method(
            "get_email_batch",
            "GetEmailBatch",
            "GetEmailBatchRequest",
            "GetEmailBatchResponse",
        ))
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}
