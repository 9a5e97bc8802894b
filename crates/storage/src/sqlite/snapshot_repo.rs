use chrono::{DateTime, Utc};
use quiz_core::model::SessionState;
use sqlx::Row;

use super::{SqliteRepository, conn, ser};
use crate::repository::{SessionSnapshotRepository, StorageError};
use crate::snapshot::{decode_snapshot, encode_snapshot};

#[async_trait::async_trait]
impl SessionSnapshotRepository for SqliteRepository {
    async fn load_snapshot(&self, key: &str) -> Result<Option<SessionState>, StorageError> {
        let row = sqlx::query("SELECT state_json FROM session_snapshots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("state_json").map_err(ser)?;
                decode_snapshot(&raw).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn save_snapshot(
        &self,
        key: &str,
        state: &SessionState,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let raw = encode_snapshot(state)?;
        sqlx::query(
            r"
                INSERT INTO session_snapshots (key, state_json, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    state_json = excluded.state_json,
                    updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(raw)
        .bind(saved_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn clear_snapshot(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM session_snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
