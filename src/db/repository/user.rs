//! User Repository

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{ProfileUpdate, User, UserRole};
use crate::utils::ListQuery;

/// Insert payload (password already hashed, role already parsed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user. Fails with Duplicate on an existing email.
    pub async fn create(&self, data: NewUser) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User '{}' already exists",
                data.email
            )));
        }

        let result = sqlx::query(
            "INSERT INTO users (name, last_name, phone_number, email, password_hash, role, is_active) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.last_name)
        .bind(&data.phone_number)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(data.is_active)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Paginated listing with free-text search over name/last name/email
    /// and an optional role filter.
    pub async fn list(
        &self,
        query: &ListQuery,
        role: Option<UserRole>,
    ) -> RepoResult<(Vec<User>, i64)> {
        let apply_filters = |qb: &mut QueryBuilder<'_, Sqlite>| {
            if let Some(term) = query.search_term() {
                let like = format!("%{term}%");
                qb.push(" AND (name LIKE ")
                    .push_bind(like.clone())
                    .push(" OR last_name LIKE ")
                    .push_bind(like.clone())
                    .push(" OR email LIKE ")
                    .push_bind(like)
                    .push(")");
            }
            if let Some(role) = role {
                qb.push(" AND role = ").push_bind(role);
            }
        };

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE 1=1");
        apply_filters(&mut count_qb);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut list_qb = QueryBuilder::new("SELECT * FROM users WHERE 1=1");
        apply_filters(&mut list_qb);
        list_qb
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let users = list_qb
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }

    /// Partial profile update. Changing the email to one already taken
    /// fails with Duplicate.
    pub async fn update_profile(&self, id: i64, data: ProfileUpdate) -> RepoResult<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

        let email = data.email.unwrap_or_else(|| existing.email.clone());
        if email != existing.email
            && let Some(found) = self.find_by_email(&email).await?
            && found.id != id
        {
            return Err(RepoError::Duplicate(format!(
                "User '{email}' already exists"
            )));
        }

        sqlx::query(
            "UPDATE users SET name = ?, last_name = ?, phone_number = ?, email = ?, \
             updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(data.name.unwrap_or(existing.name))
        .bind(data.last_name.unwrap_or(existing.last_name))
        .bind(data.phone_number.unwrap_or(existing.phone_number))
        .bind(&email)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }

    /// Mark an account verified (email confirmation)
    pub async fn set_active(&self, id: i64, is_active: bool) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE users SET is_active = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("User {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    fn new_user(email: &str, role: UserRole) -> NewUser {
        NewUser {
            name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            phone_number: "5550001".to_string(),
            email: email.to_string(),
            password_hash: "argon2-hash".to_string(),
            role,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = UserRepository::new(memory_pool().await);
        let user = repo
            .create(new_user("ana@example.com", UserRole::Cliente))
            .await
            .unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.role, UserRole::Cliente);

        let found = repo.find_by_email("ana@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(new_user("dup@example.com", UserRole::Cliente))
            .await
            .unwrap();

        let err = repo
            .create(new_user("dup@example.com", UserRole::Mesero))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn list_filters_by_role() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(new_user("a@example.com", UserRole::Cliente))
            .await
            .unwrap();
        repo.create(new_user("b@example.com", UserRole::Cocina))
            .await
            .unwrap();

        let (users, total) = repo
            .list(&ListQuery::default(), Some(UserRole::Cocina))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(users[0].email, "b@example.com");
    }
}
