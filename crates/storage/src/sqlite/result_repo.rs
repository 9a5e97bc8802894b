use quiz_core::report::RawResultData;
use sqlx::Row;

use super::{SqliteRepository, conn, ser};
use crate::repository::{
    ResultSubmission, ResultSubmissionRepository, StorageError, StoredResult, SubmissionAck,
};

fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<StoredResult, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let version: i64 = row.try_get("version").map_err(ser)?;
    let raw_data: String = row.try_get("raw_data").map_err(ser)?;
    let raw_data: RawResultData = serde_json::from_str(&raw_data).map_err(ser)?;

    Ok(StoredResult {
        id,
        submission: ResultSubmission {
            tool_id: row.try_get("tool_id").map_err(ser)?,
            version: u32::try_from(version)
                .map_err(|_| StorageError::Serialization(format!("invalid version: {version}")))?,
            summary: row.try_get("summary").map_err(ser)?,
            raw_data,
            submitted_at: row.try_get("submitted_at").map_err(ser)?,
        },
    })
}

#[async_trait::async_trait]
impl ResultSubmissionRepository for SqliteRepository {
    async fn submit(&self, submission: &ResultSubmission) -> Result<SubmissionAck, StorageError> {
        let raw_data = serde_json::to_string(&submission.raw_data).map_err(ser)?;
        let res = sqlx::query(
            r"
                INSERT INTO assessment_results (tool_id, version, summary, raw_data, submitted_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(&submission.tool_id)
        .bind(i64::from(submission.version))
        .bind(&submission.summary)
        .bind(raw_data)
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(SubmissionAck::accepted(res.last_insert_rowid()))
    }

    async fn list_results(&self, tool_id: &str) -> Result<Vec<StoredResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, tool_id, version, summary, raw_data, submitted_at
                FROM assessment_results
                WHERE tool_id = ?1
                ORDER BY submitted_at ASC, id ASC
            ",
        )
        .bind(tool_id)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_result_row).collect()
    }
}
