//! Order Repository
//!
//! Order creation writes the order row, its detail rows and the
//! recomputed total in one transaction. Status changes go through the
//! workflow engine.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::db::models::{Order, OrderCreate, OrderDetail, OrderView};
use crate::utils::ListQuery;
use crate::workflow::{self, OrderStatus, compute_order_total};

/// Order row joined with the owning user's email
#[derive(Debug, sqlx::FromRow)]
struct OrderListRow {
    pub id: i64,
    pub code: String,
    pub user_id: Option<i64>,
    pub user_email: Option<String>,
    pub table_id: Option<i64>,
    pub status: OrderStatus,
    pub total: f64,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an order with its line items.
    ///
    /// The total is recomputed from the inserted detail rows before
    /// commit, so the stored total always matches the details.
    pub async fn create(
        &self,
        user_id: Option<i64>,
        data: OrderCreate,
    ) -> RepoResult<OrderView> {
        let code = generate_order_code();
        let mut tx = self.pool.begin().await?;

        if let Some(table_id) = data.table_id {
            let exists =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dining_tables WHERE id = ?")
                    .bind(table_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if exists == 0 {
                return Err(RepoError::NotFound(format!("Table {table_id} not found")));
            }
        }

        let order_id = sqlx::query(
            "INSERT INTO orders (code, user_id, table_id, status, total) \
             VALUES (?, ?, ?, 'PENDIENTE', 0)",
        )
        .bind(&code)
        .bind(user_id)
        .bind(data.table_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for item in &data.dishes {
            let name = sqlx::query_scalar::<_, String>("SELECT name FROM dishes WHERE id = ?")
                .bind(item.id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Dish {} not found", item.id)))?;

            sqlx::query(
                "INSERT INTO order_details (order_id, dish_id, product_name, quantity, unit_price) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(item.id)
            .bind(name)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        for item in &data.drinks {
            let name = sqlx::query_scalar::<_, String>("SELECT name FROM drinks WHERE id = ?")
                .bind(item.id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Drink {} not found", item.id)))?;

            sqlx::query(
                "INSERT INTO order_details (order_id, drink_id, product_name, quantity, unit_price) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(item.id)
            .bind(name)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        // Idempotent recomputation from the rows just written
        let rows = sqlx::query_as::<_, (i64, f64)>(
            "SELECT quantity, unit_price FROM order_details WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;
        let total = compute_order_total(rows);

        sqlx::query("UPDATE orders SET total = ? WHERE id = ?")
            .bind(total)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.find_view(order_id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    /// Order with details and owner email
    pub async fn find_view(&self, id: i64) -> RepoResult<Option<OrderView>> {
        let row = sqlx::query_as::<_, OrderListRow>(
            "SELECT o.id, o.code, o.user_id, u.email AS user_email, o.table_id, o.status, \
             o.total, o.created_at \
             FROM orders o LEFT JOIN users u ON u.id = o.user_id WHERE o.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };

        let details = sqlx::query_as::<_, OrderDetail>(
            "SELECT * FROM order_details WHERE order_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(into_view(row, details)))
    }

    /// Admin listing: newest first, search over the owning user's email.
    pub async fn list(
        &self,
        query: &ListQuery,
        status: Option<OrderStatus>,
    ) -> RepoResult<(Vec<OrderView>, i64)> {
        self.list_inner(query, status, None, false).await
    }

    /// Kitchen listing: oldest first; without an explicit filter only
    /// PENDIENTE and EN_PROCESO orders are shown.
    pub async fn list_for_kitchen(
        &self,
        query: &ListQuery,
        status: Option<OrderStatus>,
    ) -> RepoResult<(Vec<OrderView>, i64)> {
        self.list_inner(query, status, None, true).await
    }

    /// Orders belonging to one user (`/mis-ordenes`)
    pub async fn list_for_user(
        &self,
        user_id: i64,
        query: &ListQuery,
        status: Option<OrderStatus>,
    ) -> RepoResult<(Vec<OrderView>, i64)> {
        self.list_inner(query, status, Some(user_id), false).await
    }

    async fn list_inner(
        &self,
        query: &ListQuery,
        status: Option<OrderStatus>,
        user_id: Option<i64>,
        kitchen: bool,
    ) -> RepoResult<(Vec<OrderView>, i64)> {
        let apply_filters = |qb: &mut QueryBuilder<'_, Sqlite>| {
            if let Some(term) = query.search_term() {
                qb.push(" AND u.email LIKE ")
                    .push_bind(format!("%{term}%"));
            }
            match status {
                Some(status) => {
                    qb.push(" AND o.status = ").push_bind(status);
                }
                None if kitchen => {
                    qb.push(" AND o.status IN ('PENDIENTE', 'EN_PROCESO')");
                }
                None => {}
            }
            if let Some(user_id) = user_id {
                qb.push(" AND o.user_id = ").push_bind(user_id);
            }
        };

        let mut count_qb = QueryBuilder::new(
            "SELECT COUNT(*) FROM orders o LEFT JOIN users u ON u.id = o.user_id WHERE 1=1",
        );
        apply_filters(&mut count_qb);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut list_qb = QueryBuilder::new(
            "SELECT o.id, o.code, o.user_id, u.email AS user_email, o.table_id, o.status, \
             o.total, o.created_at \
             FROM orders o LEFT JOIN users u ON u.id = o.user_id WHERE 1=1",
        );
        apply_filters(&mut list_qb);
        if kitchen {
            list_qb.push(" ORDER BY o.created_at ASC, o.id ASC");
        } else {
            list_qb.push(" ORDER BY o.created_at DESC, o.id DESC");
        }
        list_qb
            .push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let rows = list_qb
            .build_query_as::<OrderListRow>()
            .fetch_all(&self.pool)
            .await?;

        // One details query for the whole page
        let mut views = Vec::with_capacity(rows.len());
        if rows.is_empty() {
            return Ok((views, total));
        }

        let mut details_qb =
            QueryBuilder::new("SELECT * FROM order_details WHERE order_id IN (");
        let mut separated = details_qb.separated(", ");
        for row in &rows {
            separated.push_bind(row.id);
        }
        details_qb.push(") ORDER BY id");

        let mut details = details_qb
            .build_query_as::<OrderDetail>()
            .fetch_all(&self.pool)
            .await?;

        for row in rows {
            let (mine, rest): (Vec<_>, Vec<_>) =
                details.into_iter().partition(|d| d.order_id == row.id);
            details = rest;
            views.push(into_view(row, mine));
        }

        Ok((views, total))
    }

    /// Apply a status transition. Fails without touching the row when the
    /// workflow rejects the move.
    pub async fn update_status(&self, id: i64, requested: OrderStatus) -> RepoResult<OrderView> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT status FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

        let next = workflow::plan_order_transition(current, requested)?;

        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(next)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.find_view(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Delete an order; detail rows go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn into_view(row: OrderListRow, details: Vec<OrderDetail>) -> OrderView {
    OrderView {
        id: row.id,
        code: row.code,
        user_id: row.user_id,
        user_email: row.user_email,
        table_id: row.table_id,
        status: row.status,
        total: row.total,
        created_at: row.created_at,
        details: details.into_iter().map(Into::into).collect(),
    }
}

/// Unique short order code (`ORD-` + 8 hex chars)
fn generate_order_code() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", uuid[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::LineItemInput;
    use crate::db::test_support::memory_pool;

    async fn seed_catalog(pool: &SqlitePool) -> (i64, i64) {
        let dish = sqlx::query(
            "INSERT INTO dishes (name, description, price, type) \
             VALUES ('Taco', 'Taco al pastor', 5.0, 'PRINCIPAL')",
        )
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid();

        let drink = sqlx::query(
            "INSERT INTO drinks (name, description, price, type) \
             VALUES ('Soda', 'Cola 355ml', 2.0, 'GASEOSA')",
        )
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid();

        (dish, drink)
    }

    fn order_with(dish: i64, drink: i64) -> OrderCreate {
        OrderCreate {
            table_id: None,
            dishes: vec![LineItemInput {
                id: dish,
                quantity: 2,
                price: 5.0,
            }],
            drinks: vec![LineItemInput {
                id: drink,
                quantity: 1,
                price: 2.0,
            }],
        }
    }

    #[tokio::test]
    async fn create_computes_total_from_details() {
        let pool = memory_pool().await;
        let (dish, drink) = seed_catalog(&pool).await;
        let repo = OrderRepository::new(pool);

        let order = repo.create(None, order_with(dish, drink)).await.unwrap();

        assert_eq!(order.total, 12.0);
        assert_eq!(order.status, OrderStatus::Pendiente);
        assert_eq!(order.details.len(), 2);
        assert!(order.code.starts_with("ORD-"));
        assert_eq!(order.details[0].subtotal, 10.0);
    }

    #[tokio::test]
    async fn empty_order_totals_zero() {
        let pool = memory_pool().await;
        let repo = OrderRepository::new(pool);

        let order = repo
            .create(
                None,
                OrderCreate {
                    table_id: None,
                    dishes: vec![],
                    drinks: vec![],
                },
            )
            .await
            .unwrap();
        assert_eq!(order.total, 0.0);
    }

    #[tokio::test]
    async fn unknown_dish_rolls_back_everything() {
        let pool = memory_pool().await;
        let repo = OrderRepository::new(pool.clone());

        let err = repo
            .create(
                None,
                OrderCreate {
                    table_id: None,
                    dishes: vec![LineItemInput {
                        id: 42,
                        quantity: 1,
                        price: 5.0,
                    }],
                    drinks: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        let orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orders, 0);
    }

    #[tokio::test]
    async fn status_transitions_follow_the_matrix() {
        let pool = memory_pool().await;
        let (dish, drink) = seed_catalog(&pool).await;
        let repo = OrderRepository::new(pool);

        let order = repo.create(None, order_with(dish, drink)).await.unwrap();

        let order = repo
            .update_status(order.id, OrderStatus::EnProceso)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::EnProceso);

        // Can't go back to PENDIENTE
        let err = repo
            .update_status(order.id, OrderStatus::Pendiente)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Workflow(_)));

        let stored = repo.find_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::EnProceso);
    }

    #[tokio::test]
    async fn kitchen_default_filter_hides_finished_orders() {
        let pool = memory_pool().await;
        let (dish, drink) = seed_catalog(&pool).await;
        let repo = OrderRepository::new(pool);

        let first = repo.create(None, order_with(dish, drink)).await.unwrap();
        let second = repo.create(None, order_with(dish, drink)).await.unwrap();

        repo.update_status(first.id, OrderStatus::EnProceso)
            .await
            .unwrap();
        repo.update_status(first.id, OrderStatus::Completada)
            .await
            .unwrap();

        let (views, total) = repo
            .list_for_kitchen(&ListQuery::default(), None)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(views[0].id, second.id);
    }

    #[tokio::test]
    async fn delete_cascades_details() {
        let pool = memory_pool().await;
        let (dish, drink) = seed_catalog(&pool).await;
        let repo = OrderRepository::new(pool.clone());

        let order = repo.create(None, order_with(dish, drink)).await.unwrap();
        assert!(repo.delete(order.id).await.unwrap());

        let details = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_details")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(details, 0);
    }

    #[tokio::test]
    async fn pagination_envelope_math() {
        let pool = memory_pool().await;
        let (dish, drink) = seed_catalog(&pool).await;
        let repo = OrderRepository::new(pool);

        for _ in 0..25 {
            repo.create(None, order_with(dish, drink)).await.unwrap();
        }

        let query = ListQuery {
            page: Some(2),
            per_page: Some(10),
            ..Default::default()
        };
        let (views, total) = repo.list(&query, None).await.unwrap();
        assert_eq!(total, 25);
        assert_eq!(views.len(), 10);
        assert_eq!(crate::utils::pagination::total_pages(total, 10), 3);
    }
}
