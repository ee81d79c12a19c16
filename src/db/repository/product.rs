//! Catalog Repository
//!
//! Dishes and drinks share almost the same shape; the `ProductKind`
//! dispatch keeps the two tables behind one surface for the admin
//! endpoints while reads stay typed per table.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{
    Dish, DishType, Drink, DrinkType, ProductCreate, ProductKind, ProductUpdate,
};

/// Either catalog entity, serialized flat
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Product {
    Dish(Dish),
    Drink(Drink),
}

#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_dishes(&self, active_only: bool) -> RepoResult<Vec<Dish>> {
        let sql = if active_only {
            "SELECT * FROM dishes WHERE is_active = 1 ORDER BY name"
        } else {
            "SELECT * FROM dishes ORDER BY name"
        };
        Ok(sqlx::query_as::<_, Dish>(sql).fetch_all(&self.pool).await?)
    }

    pub async fn list_drinks(&self, active_only: bool) -> RepoResult<Vec<Drink>> {
        let sql = if active_only {
            "SELECT * FROM drinks WHERE is_active = 1 ORDER BY name"
        } else {
            "SELECT * FROM drinks ORDER BY name"
        };
        Ok(sqlx::query_as::<_, Drink>(sql).fetch_all(&self.pool).await?)
    }

    pub async fn find(&self, kind: ProductKind, id: i64) -> RepoResult<Option<Product>> {
        match kind {
            ProductKind::Dish => {
                let dish = sqlx::query_as::<_, Dish>("SELECT * FROM dishes WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
                Ok(dish.map(Product::Dish))
            }
            ProductKind::Drink => {
                let drink = sqlx::query_as::<_, Drink>("SELECT * FROM drinks WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
                Ok(drink.map(Product::Drink))
            }
        }
    }

    pub async fn create(&self, kind: ProductKind, data: ProductCreate) -> RepoResult<Product> {
        let id = match kind {
            ProductKind::Dish => {
                let category = DishType::parse(&data.category).ok_or_else(|| {
                    RepoError::Validation(format!(
                        "Invalid dish type '{}', expected one of: {}",
                        data.category,
                        DishType::MEMBERS
                    ))
                })?;
                sqlx::query(
                    "INSERT INTO dishes (name, description, url_img, price, type) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&data.name)
                .bind(&data.description)
                .bind(&data.url_img)
                .bind(data.price)
                .bind(category)
                .execute(&self.pool)
                .await?
                .last_insert_rowid()
            }
            ProductKind::Drink => {
                let category = DrinkType::parse(&data.category).ok_or_else(|| {
                    RepoError::Validation(format!(
                        "Invalid drink type '{}', expected one of: {}",
                        data.category,
                        DrinkType::MEMBERS
                    ))
                })?;
                sqlx::query(
                    "INSERT INTO drinks (name, description, url_img, price, type) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&data.name)
                .bind(&data.description)
                .bind(&data.url_img)
                .bind(data.price)
                .bind(category)
                .execute(&self.pool)
                .await?
                .last_insert_rowid()
            }
        };

        self.find(kind, id).await?.ok_or_else(|| {
            RepoError::Database(format!("Failed to create {}", kind.label().to_lowercase()))
        })
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(
        &self,
        kind: ProductKind,
        id: i64,
        data: ProductUpdate,
    ) -> RepoResult<Product> {
        self.find(kind, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("{} {id} not found", kind.label())))?;

        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("UPDATE {} SET updated_at = CURRENT_TIMESTAMP", kind.table()));

        if let Some(name) = &data.name {
            qb.push(", name = ").push_bind(name);
        }
        if let Some(description) = &data.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(category) = &data.category {
            match kind {
                ProductKind::Dish => {
                    let category = DishType::parse(category).ok_or_else(|| {
                        RepoError::Validation(format!(
                            "Invalid dish type '{category}', expected one of: {}",
                            DishType::MEMBERS
                        ))
                    })?;
                    qb.push(", type = ").push_bind(category);
                }
                ProductKind::Drink => {
                    let category = DrinkType::parse(category).ok_or_else(|| {
                        RepoError::Validation(format!(
                            "Invalid drink type '{category}', expected one of: {}",
                            DrinkType::MEMBERS
                        ))
                    })?;
                    qb.push(", type = ").push_bind(category);
                }
            }
        }
        if let Some(price) = data.price {
            qb.push(", price = ").push_bind(price);
        }
        if let Some(url_img) = &data.url_img {
            qb.push(", url_img = ").push_bind(url_img);
        }
        if let Some(is_active) = data.is_active {
            qb.push(", is_active = ").push_bind(is_active);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.build().execute(&self.pool).await?;

        self.find(kind, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("{} {id} not found", kind.label())))
    }

    pub async fn delete(&self, kind: ProductKind, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", kind.table()))
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

    fn taco() -> ProductCreate {
        ProductCreate {
            tipo: "PLATO".to_string(),
            name: "Taco".to_string(),
            description: "Taco al pastor".to_string(),
            category: "PRINCIPAL".to_string(),
            price: 5.0,
            url_img: None,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_dish() {
        let pool = memory_pool().await;
        let repo = CatalogRepository::new(pool);

        let created = repo.create(ProductKind::Dish, taco()).await.unwrap();
        let Product::Dish(dish) = created else {
            panic!("expected a dish");
        };
        assert_eq!(dish.name, "Taco");
        assert_eq!(dish.dish_type, DishType::Principal);
        assert!(dish.is_active);
    }

    #[tokio::test]
    async fn invalid_category_is_rejected() {
        let pool = memory_pool().await;
        let repo = CatalogRepository::new(pool);

        let mut data = taco();
        data.category = "SOPA".to_string();
        let err = repo.create(ProductKind::Dish, data).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn active_only_listing_hides_deactivated() {
        let pool = memory_pool().await;
        let repo = CatalogRepository::new(pool);

        let Product::Dish(dish) = repo.create(ProductKind::Dish, taco()).await.unwrap() else {
            panic!("expected a dish");
        };
        repo.update(
            ProductKind::Dish,
            dish.id,
            ProductUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(repo.list_dishes(true).await.unwrap().is_empty());
        assert_eq!(repo.list_dishes(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let pool = memory_pool().await;
        let repo = CatalogRepository::new(pool);

        let Product::Dish(dish) = repo.create(ProductKind::Dish, taco()).await.unwrap() else {
            panic!("expected a dish");
        };
        let updated = repo
            .update(
                ProductKind::Dish,
                dish.id,
                ProductUpdate {
                    price: Some(6.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let Product::Dish(updated) = updated else {
            panic!("expected a dish");
        };
        assert_eq!(updated.price, 6.5);
        assert_eq!(updated.name, "Taco");
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let pool = memory_pool().await;
        let repo = CatalogRepository::new(pool);
        assert!(!repo.delete(ProductKind::Drink, 99).await.unwrap());
    }
}
