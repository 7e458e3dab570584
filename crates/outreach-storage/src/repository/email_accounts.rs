//! Sender account repository

use outreach_common::types::AccountId;
use outreach_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::classify_db_error;
use crate::models::{CreateSmtpAccount, EmailAccount};

/// Sender account repository
#[derive(Clone)]
pub struct EmailAccountRepository {
    pool: PgPool,
}

impl EmailAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register an SMTP sender account
    pub async fn create_smtp(&self, input: CreateSmtpAccount) -> Result<EmailAccount> {
        let id = Uuid::new_v4();

        sqlx::query_as::<_, EmailAccount>(
            r#"
            INSERT INTO email_accounts (
                id, email, display_name, provider, smtp_host, smtp_port,
                smtp_username, smtp_password
            )
            VALUES ($1, $2, $3, 'smtp', $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.email)
        .bind(&input.display_name)
        .bind(&input.smtp_host)
        .bind(input.smtp_port)
        .bind(&input.smtp_username)
        .bind(&input.smtp_password)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Get an account by ID
    pub async fn get(&self, id: AccountId) -> Result<Option<EmailAccount>> {
        sqlx::query_as::<_, EmailAccount>("SELECT * FROM email_accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_db_error)
    }

    /// List active sender accounts
    pub async fn list_active(&self) -> Result<Vec<EmailAccount>> {
        sqlx::query_as::<_, EmailAccount>(
            "SELECT * FROM email_accounts WHERE active = TRUE ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Deactivate an account without losing its send history
    pub async fn deactivate(&self, id: AccountId) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE email_accounts SET active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(classify_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
