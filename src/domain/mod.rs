pub mod batch_query;
pub mod email_entry;
pub mod email_entry_body;
pub mod lenient;

pub use batch_query::{GetEmailBatchQuery, INVALID_BATCH_QUERY};
pub use email_entry::{EmailEntry, EmailEntryUpdate};
pub use email_entry_body::EmailEntryBody;
