use serde::Deserialize;

use crate::domain::lenient;
use crate::error::MailingListError;

pub const INVALID_BATCH_QUERY: &str = "page and count should be set and >0";

/// Pagination over active subscribers. `page` starts at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetEmailBatchQuery {
    #[serde(deserialize_with = "lenient::or_default")]
    pub page: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub count: i64,
}

impl GetEmailBatchQuery {
    pub fn new(page: i64, count: i64) -> Self {
        GetEmailBatchQuery { page, count }
    }

    pub fn validate(self) -> Result<Self, MailingListError> {
        if self.page <= 0 || self.count <= 0 {
            return Err(MailingListError::validation(INVALID_BATCH_QUERY));
        }

        Ok(self)
    }

    pub fn limit(&self) -> i64 {
        self.count
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.count)
    }
}
