//! Upload repository

use outreach_common::types::UploadId;
use outreach_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::classify_db_error;
use crate::models::{CreateUpload, Upload};

/// Upload repository
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an imported contact file
    pub async fn create(&self, input: CreateUpload) -> Result<Upload> {
        let id = Uuid::new_v4();

        sqlx::query_as::<_, Upload>(
            r#"
            INSERT INTO uploads (
                id, filename, original_name, file_size, file_type, storage_path,
                list_id, row_count
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.filename)
        .bind(&input.original_name)
        .bind(input.file_size)
        .bind(&input.file_type)
        .bind(&input.storage_path)
        .bind(input.list_id)
        .bind(input.row_count)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_db_error)
    }

    /// Get an upload record
    pub async fn get(&self, id: UploadId) -> Result<Option<Upload>> {
        sqlx::query_as::<_, Upload>("SELECT * FROM uploads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_db_error)
    }

    /// List upload history, newest first
    pub async fn list(&self) -> Result<Vec<Upload>> {
        sqlx::query_as::<_, Upload>("SELECT * FROM uploads ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(classify_db_error)
    }
}
