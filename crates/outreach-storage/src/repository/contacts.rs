//! Contact repository

use outreach_common::types::{ContactId, EmailListId};
use outreach_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::classify_db_error;
use crate::models::{Contact, CreateContact};

/// Contact repository
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a contact to a list
    pub async fn create(&self, list_id: EmailListId, input: CreateContact) -> Result<Contact> {
        let id = Uuid::new_v4();
        let custom_fields = input.custom_fields.unwrap_or_else(|| serde_json::json!({}));

        sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (
                id, list_id, email, first_name, last_name, company,
                phone, location, job_title, website, notes, custom_fields
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(list_id)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.company)
        .bind(&input.phone)
        .bind(&input.location)
        .bind(&input.job_title)
        .bind(&input.website)
        .bind(&input.notes)
        .bind(&custom_fields)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Get a contact by ID
    pub async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_db_error)
    }

    /// List the contacts on a list
    pub async fn list_by_list(&self, list_id: EmailListId) -> Result<Vec<Contact>> {
        sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE list_id = $1 ORDER BY created_at ASC",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Fetch a specific set of contacts, preserving no particular order
    pub async fn get_many(&self, ids: &[ContactId]) -> Result<Vec<Contact>> {
        sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(classify_db_error)
    }

    /// Remove a contact
    pub async fn delete(&self, id: ContactId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
