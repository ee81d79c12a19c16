//! Reservation Repository
//!
//! Status changes and their table cascade are applied inside one
//! transaction: either both rows commit or neither does.

use chrono::NaiveDateTime;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{DiningTable, Reservation};
use crate::utils::ListQuery;
use crate::workflow::{self, ReservationStatus, TableStatus};

/// Insert payload (status and start time already parsed by the handler)
#[derive(Debug, Clone)]
pub struct ReservationInsert {
    pub user_id: Option<i64>,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: Option<String>,
    pub quantity: i64,
    pub table_id: Option<i64>,
    pub status: ReservationStatus,
    pub start_date_time: NaiveDateTime,
    pub additional_details: Option<String>,
}

/// Field changes for an update (status handled separately by the workflow)
#[derive(Debug, Clone, Default)]
pub struct ReservationFields {
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_email: Option<String>,
    pub quantity: Option<i64>,
    pub table_id: Option<i64>,
    pub start_date_time: Option<NaiveDateTime>,
    pub additional_details: Option<String>,
}

#[derive(Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a reservation.
    ///
    /// No blocking availability check is performed: booking against a
    /// non-LIBRE table is allowed and only flagged in the log (product
    /// decision pending, see DESIGN.md).
    pub async fn create(&self, data: ReservationInsert) -> RepoResult<Reservation> {
        if let Some(table_id) = data.table_id {
            let table = sqlx::query_as::<_, DiningTable>(
                "SELECT * FROM dining_tables WHERE id = ?",
            )
            .bind(table_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {table_id} not found")))?;

            if table.status != TableStatus::Libre {
                tracing::warn!(
                    table_id,
                    table_status = table.status.as_str(),
                    "Booking against a table that is not LIBRE"
                );
            }
        }

        let result = sqlx::query(
            "INSERT INTO reservations \
             (user_id, guest_name, guest_phone, guest_email, quantity, table_id, status, \
              start_date_time, additional_details) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.user_id)
        .bind(&data.guest_name)
        .bind(&data.guest_phone)
        .bind(&data.guest_email)
        .bind(data.quantity)
        .bind(data.table_id)
        .bind(data.status)
        .bind(data.start_date_time)
        .bind(&data.additional_details)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Reservation>> {
        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(reservation)
    }

    /// Paginated listing with search over guest fields, plus status and
    /// date (`YYYY-MM-DD`) filters.
    pub async fn list(
        &self,
        query: &ListQuery,
        status: Option<ReservationStatus>,
    ) -> RepoResult<(Vec<Reservation>, i64)> {
        let apply_filters = |qb: &mut QueryBuilder<'_, Sqlite>| {
            if let Some(term) = query.search_term() {
                let like = format!("%{term}%");
                qb.push(" AND (guest_name LIKE ")
                    .push_bind(like.clone())
                    .push(" OR guest_phone LIKE ")
                    .push_bind(like.clone())
                    .push(" OR guest_email LIKE ")
                    .push_bind(like)
                    .push(")");
            }
            if let Some(status) = status {
                qb.push(" AND status = ").push_bind(status);
            }
            if let Some(date) = query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
                qb.push(" AND date(start_date_time) = ").push_bind(date.to_string());
            }
        };

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM reservations WHERE 1=1");
        apply_filters(&mut count_qb);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut list_qb = QueryBuilder::new("SELECT * FROM reservations WHERE 1=1");
        apply_filters(&mut list_qb);
        list_qb
            .push(" ORDER BY start_date_time ASC, id ASC LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let reservations = list_qb
            .build_query_as::<Reservation>()
            .fetch_all(&self.pool)
            .await?;

        Ok((reservations, total))
    }

    /// Partial update, optionally with a status transition.
    ///
    /// The transition is planned by the workflow engine, and the
    /// reservation write plus the table cascade commit atomically.
    /// Returns the updated reservation and the cascaded table, if any.
    pub async fn update(
        &self,
        id: i64,
        fields: ReservationFields,
        requested_status: Option<ReservationStatus>,
    ) -> RepoResult<(Reservation, Option<DiningTable>)> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))?;

        // New table reference must exist before we point at it
        if let Some(table_id) = fields.table_id
            && Some(table_id) != existing.table_id
        {
            let exists =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dining_tables WHERE id = ?")
                    .bind(table_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if exists == 0 {
                return Err(RepoError::NotFound(format!("Table {table_id} not found")));
            }
        }

        let plan = match requested_status {
            Some(target) => Some(workflow::plan_reservation_transition(existing.status, target)?),
            None => None,
        };

        let status = plan.map(|p| p.next).unwrap_or(existing.status);
        let table_id = fields.table_id.or(existing.table_id);

        sqlx::query(
            "UPDATE reservations SET guest_name = ?, guest_phone = ?, guest_email = ?, \
             quantity = ?, table_id = ?, status = ?, start_date_time = ?, \
             additional_details = ? WHERE id = ?",
        )
        .bind(fields.guest_name.unwrap_or(existing.guest_name))
        .bind(fields.guest_phone.unwrap_or(existing.guest_phone))
        .bind(fields.guest_email.or(existing.guest_email))
        .bind(fields.quantity.unwrap_or(existing.quantity))
        .bind(table_id)
        .bind(status)
        .bind(fields.start_date_time.unwrap_or(existing.start_date_time))
        .bind(fields.additional_details.or(existing.additional_details))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        // Table cascade, only when the reservation actually has a table
        let mut cascaded = None;
        if let (Some(plan), Some(table_id)) = (plan, table_id)
            && let Some(table_status) = plan.table
        {
            sqlx::query("UPDATE dining_tables SET status = ? WHERE id = ?")
                .bind(table_status)
                .bind(table_id)
                .execute(&mut *tx)
                .await?;

            cascaded = sqlx::query_as::<_, DiningTable>(
                "SELECT * FROM dining_tables WHERE id = ?",
            )
            .bind(table_id)
            .fetch_optional(&mut *tx)
            .await?;
        }

        let updated = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((updated, cascaded))
    }

    /// Delete a reservation. The linked table keeps its status (observed
    /// behavior of the original system).
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::DiningTableRepository;
    use crate::db::test_support::memory_pool;

    fn insert(table_id: Option<i64>) -> ReservationInsert {
        ReservationInsert {
            user_id: None,
            guest_name: "Carlos".to_string(),
            guest_phone: "5559999".to_string(),
            guest_email: Some("carlos@example.com".to_string()),
            quantity: 4,
            table_id,
            status: ReservationStatus::Pendiente,
            start_date_time: NaiveDateTime::parse_from_str(
                "2024-03-01 19:30:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            additional_details: None,
        }
    }

    #[tokio::test]
    async fn create_without_table_defaults_pending() {
        let repo = ReservationRepository::new(memory_pool().await);
        let reservation = repo.create(insert(None)).await.unwrap();

        assert_eq!(reservation.status, ReservationStatus::Pendiente);
        assert_eq!(reservation.table_id, None);
        assert_eq!(reservation.quantity, 4);
    }

    #[tokio::test]
    async fn create_against_missing_table_fails() {
        let repo = ReservationRepository::new(memory_pool().await);
        let err = repo.create(insert(Some(99))).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn confirm_cascades_table_to_reserved() {
        let pool = memory_pool().await;
        let tables = DiningTableRepository::new(pool.clone());
        let repo = ReservationRepository::new(pool);

        let table = tables.create(3, 4, TableStatus::Libre).await.unwrap();
        let reservation = repo.create(insert(Some(table.id))).await.unwrap();

        let (updated, cascaded) = repo
            .update(
                reservation.id,
                ReservationFields::default(),
                Some(ReservationStatus::Confirmada),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::Confirmada);
        let cascaded = cascaded.unwrap();
        assert_eq!(cascaded.id, table.id);
        assert_eq!(cascaded.status, TableStatus::Reservada);

        // Completing seats the party; cancelling would free the table
        let (_, cascaded) = repo
            .update(
                reservation.id,
                ReservationFields::default(),
                Some(ReservationStatus::Completada),
            )
            .await
            .unwrap();
        assert_eq!(cascaded.unwrap().status, TableStatus::Ocupada);
    }

    #[tokio::test]
    async fn cancel_frees_the_table() {
        let pool = memory_pool().await;
        let tables = DiningTableRepository::new(pool.clone());
        let repo = ReservationRepository::new(pool);

        let table = tables.create(1, 2, TableStatus::Libre).await.unwrap();
        let reservation = repo.create(insert(Some(table.id))).await.unwrap();

        repo.update(
            reservation.id,
            ReservationFields::default(),
            Some(ReservationStatus::Confirmada),
        )
        .await
        .unwrap();

        let (updated, cascaded) = repo
            .update(
                reservation.id,
                ReservationFields::default(),
                Some(ReservationStatus::Cancelada),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::Cancelada);
        assert_eq!(cascaded.unwrap().status, TableStatus::Libre);
    }

    #[tokio::test]
    async fn forbidden_transition_leaves_rows_untouched() {
        let pool = memory_pool().await;
        let tables = DiningTableRepository::new(pool.clone());
        let repo = ReservationRepository::new(pool);

        let table = tables.create(2, 4, TableStatus::Libre).await.unwrap();
        let reservation = repo.create(insert(Some(table.id))).await.unwrap();

        // PENDIENTE -> COMPLETADA skips confirmation
        let err = repo
            .update(
                reservation.id,
                ReservationFields::default(),
                Some(ReservationStatus::Completada),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Workflow(workflow::WorkflowError::ForbiddenTransition { .. })
        ));

        let stored = repo.find_by_id(reservation.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Pendiente);
        let table = tables.find_by_id(table.id).await.unwrap().unwrap();
        assert_eq!(table.status, TableStatus::Libre);
    }

    #[tokio::test]
    async fn delete_does_not_touch_the_table() {
        let pool = memory_pool().await;
        let tables = DiningTableRepository::new(pool.clone());
        let repo = ReservationRepository::new(pool);

        let table = tables.create(7, 4, TableStatus::Libre).await.unwrap();
        let reservation = repo.create(insert(Some(table.id))).await.unwrap();
        repo.update(
            reservation.id,
            ReservationFields::default(),
            Some(ReservationStatus::Confirmada),
        )
        .await
        .unwrap();

        assert!(repo.delete(reservation.id).await.unwrap());
        let table = tables.find_by_id(table.id).await.unwrap().unwrap();
        assert_eq!(table.status, TableStatus::Reservada);
    }
}
