//! Email list repository

use outreach_common::types::EmailListId;
use outreach_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::classify_db_error;
use crate::models::{CreateEmailList, EmailList};

/// Email list repository
#[derive(Clone)]
pub struct EmailListRepository {
    pool: PgPool,
}

impl EmailListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new email list
    pub async fn create(&self, input: CreateEmailList) -> Result<EmailList> {
        let id = Uuid::new_v4();

        sqlx::query_as::<_, EmailList>(
            r#"
            INSERT INTO email_lists (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Get a list by ID
    pub async fn get(&self, id: EmailListId) -> Result<Option<EmailList>> {
        sqlx::query_as::<_, EmailList>("SELECT * FROM email_lists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_db_error)
    }

    /// List all email lists, newest first
    pub async fn list(&self) -> Result<Vec<EmailList>> {
        sqlx::query_as::<_, EmailList>("SELECT * FROM email_lists ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(classify_db_error)
    }

    /// Delete a list and its contacts
    pub async fn delete(&self, id: EmailListId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM email_lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// Recount the list's contacts after an import
    pub async fn refresh_contact_count(&self, id: EmailListId) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE email_lists SET
                contact_count = (SELECT COUNT(*) FROM contacts WHERE list_id = $1),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify_db_error)?;
        Ok(())
    }
}
