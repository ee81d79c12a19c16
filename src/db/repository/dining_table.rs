//! Dining Table Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::DiningTable;
use crate::workflow::TableStatus;

#[derive(Clone)]
pub struct DiningTableRepository {
    pool: SqlitePool,
}

impl DiningTableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All tables ordered by table number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables =
            sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_tables ORDER BY number")
                .fetch_all(&self.pool)
                .await?;
        Ok(tables)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        let table = sqlx::query_as::<_, DiningTable>("SELECT * FROM dining_tables WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(table)
    }

    /// Create a new table. Fails with Duplicate on an existing number.
    pub async fn create(
        &self,
        number: i64,
        capacity: i64,
        status: TableStatus,
    ) -> RepoResult<DiningTable> {
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dining_tables WHERE number = ?")
                .bind(number)
                .fetch_one(&self.pool)
                .await?;
        if existing > 0 {
            return Err(RepoError::Duplicate(format!(
                "Table number {number} already exists"
            )));
        }

        let result =
            sqlx::query("INSERT INTO dining_tables (number, capacity, status) VALUES (?, ?, ?)")
                .bind(number)
                .bind(capacity)
                .bind(status)
                .execute(&self.pool)
                .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Partial update of number / capacity / status
    pub async fn update(
        &self,
        id: i64,
        number: Option<i64>,
        capacity: Option<i64>,
        status: Option<TableStatus>,
    ) -> RepoResult<DiningTable> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))?;

        let number = number.unwrap_or(existing.number);
        if number != existing.number {
            let taken = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM dining_tables WHERE number = ? AND id <> ?",
            )
            .bind(number)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
            if taken > 0 {
                return Err(RepoError::Duplicate(format!(
                    "Table number {number} already exists"
                )));
            }
        }

        sqlx::query("UPDATE dining_tables SET number = ?, capacity = ?, status = ? WHERE id = ?")
            .bind(number)
            .bind(capacity.unwrap_or(existing.capacity))
            .bind(status.unwrap_or(existing.status))
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM dining_tables WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn create_defaults_and_duplicate_number() {
        let repo = DiningTableRepository::new(memory_pool().await);
        let table = repo.create(3, 4, TableStatus::Libre).await.unwrap();
        assert_eq!(table.number, 3);
        assert_eq!(table.status, TableStatus::Libre);

        let err = repo.create(3, 2, TableStatus::Libre).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repo = DiningTableRepository::new(memory_pool().await);
        let table = repo.create(1, 4, TableStatus::Libre).await.unwrap();

        let updated = repo
            .update(table.id, None, Some(6), Some(TableStatus::Ocupada))
            .await
            .unwrap();
        assert_eq!(updated.capacity, 6);
        assert_eq!(updated.status, TableStatus::Ocupada);

        assert!(repo.delete(table.id).await.unwrap());
        assert!(!repo.delete(table.id).await.unwrap());
    }
}
