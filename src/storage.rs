use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::domain::email_entry::{from_unix_seconds, to_unix_seconds};
use crate::domain::{EmailEntry, EmailEntryUpdate, GetEmailBatchQuery};
use crate::error::MailingListError;

/// Every read and write of the `emails` table goes through this type.
///
/// It is cheap to clone: clones share the same connection pool, so the JSON
/// and gRPC servers see the same data. There is no caching and no
/// application level locking; each call is a single statement and SQLite
/// serializes conflicting writers.
#[derive(Clone, Debug)]
pub struct MailingListStore {
    pool: SqlitePool,
}

impl MailingListStore {
    pub fn new(pool: SqlitePool) -> Self {
        MailingListStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), MailingListError> {
        sqlx::query("SELECT 1;").execute(&self.pool).await?;

        Ok(())
    }

    /// Creates the `emails` table when it does not exist yet.
    #[tracing::instrument(name = "Ensure the emails table exists", skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), MailingListError> {
        let result = sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS emails (
                id INTEGER PRIMARY KEY,
                email TEXT UNIQUE,
                confirmed_at INTEGER,
                opt_out BOOL
            );
            "#,
        )
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.message().contains("already exists") => {
                tracing::debug!("emails table already exists");
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to create the emails table: {:?}", err);
                Err(MailingListError::Storage(err))
            }
        }
    }

    #[tracing::instrument(name = "Insert a new email entry", skip(self))]
    pub async fn create_email_entry(&self, email: &str) -> Result<(), MailingListError> {
        sqlx::query(
            r#"
            INSERT INTO emails (email, confirmed_at, opt_out)
            VALUES (?, 0, false);
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                tracing::warn!("Email {} is already registered", email);
                MailingListError::ConstraintViolation(email.to_string())
            }
            err => {
                tracing::error!("Failed to execute query: {:?}", err);
                MailingListError::Storage(err)
            }
        })?;

        Ok(())
    }

    /// `Ok(None)` when nobody is registered under `email`.
    #[tracing::instrument(name = "Fetch an email entry", skip(self))]
    pub async fn get_email_entry(&self, email: &str) -> Result<Option<EmailEntry>, MailingListError> {
        // email is unique, so the first row is the only row
        sqlx::query(
            r#"
            SELECT id, email, confirmed_at, opt_out
            FROM emails
            WHERE email = ?;
            "#,
        )
        .bind(email)
        .try_map(email_entry_from_row)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            MailingListError::Storage(err)
        })
    }

    /// Inserts the entry, or overwrites `confirmed_at` and `opt_out` when the
    /// email is already registered.
    #[tracing::instrument(
        name = "Upsert an email entry",
        skip(self, update),
        fields(email = %update.email)
    )]
    pub async fn update_email_entry(&self, update: &EmailEntryUpdate) -> Result<(), MailingListError> {
        let (confirmed_at, opt_out) = update.required_fields().map_err(|err| {
            tracing::warn!("Rejected update of {:?}: {}", update, err);
            err
        })?;

        sqlx::query(
            r#"
            INSERT INTO emails (email, confirmed_at, opt_out)
            VALUES (?, ?, ?)
            ON CONFLICT (email) DO UPDATE SET
                confirmed_at = excluded.confirmed_at,
                opt_out = excluded.opt_out;
            "#,
        )
        .bind(&update.email)
        .bind(to_unix_seconds(&confirmed_at))
        .bind(opt_out)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            MailingListError::Storage(err)
        })?;

        Ok(())
    }

    /// Soft delete: the row stays and is only flagged as opted out.
    #[tracing::instrument(name = "Opt out an email entry", skip(self))]
    pub async fn delete_email_entry(&self, email: &str) -> Result<(), MailingListError> {
        sqlx::query(
            r#"
            UPDATE emails
            SET opt_out = true
            WHERE email = ?;
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            MailingListError::Storage(err)
        })?;

        Ok(())
    }

    /// Active entries in insertion order. The query is not validated here:
    /// a negative count reaches SQLite as a negative LIMIT, which it reads
    /// as "no limit".
    #[tracing::instrument(name = "Fetch a batch of email entries", skip(self))]
    pub async fn get_email_batch(
        &self,
        query: GetEmailBatchQuery,
    ) -> Result<Vec<EmailEntry>, MailingListError> {
        sqlx::query(
            r#"
            SELECT id, email, confirmed_at, opt_out
            FROM emails
            WHERE opt_out = false
            ORDER BY id ASC
            LIMIT ? OFFSET ?;
            "#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .try_map(email_entry_from_row)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            MailingListError::Storage(err)
        })
    }
}

fn email_entry_from_row(row: SqliteRow) -> Result<EmailEntry, sqlx::Error> {
    let confirmed_at: Option<i64> = row.try_get("confirmed_at")?;
    let opt_out: Option<bool> = row.try_get("opt_out")?;
    let confirmed_at = from_unix_seconds(confirmed_at.unwrap_or(0))
        .map_err(|err| sqlx::Error::Decode(err.to_string().into()))?;

    Ok(EmailEntry {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        confirmed_at,
        opt_out: opt_out.unwrap_or(false),
    })
}
