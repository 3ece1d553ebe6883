use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::user_repository::{NewUser, ProfilePatch, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_credentials(
        &self,
        column: CredentialsKey,
        value: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let sql = match column {
            CredentialsKey::Email => {
                r#"
                SELECT id, email, phone, name, city, password_hash
                FROM users
                WHERE email = $1
                "#
            }
            CredentialsKey::Phone => {
                r#"
                SELECT id, email, phone, name, city, password_hash
                FROM users
                WHERE phone = $1
                "#
            }
        };

        let row = sqlx::query_as::<_, UserCredentialsRow>(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        row.map(|r| {
            let user = User::new(r.id, r.email, r.phone, r.name, r.city)
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;
            Ok(UserCredentials {
                user,
                password_hash: r.password_hash,
            })
        })
        .transpose()
    }
}

#[derive(Debug, Clone, Copy)]
enum CredentialsKey {
    Email,
    Phone,
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    phone: String,
    name: String,
    city: String,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    id: i64,
    email: String,
    phone: String,
    name: String,
    city: String,
    password_hash: String,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, phone, name, password_hash, city)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, phone, name, city
            "#,
        )
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.name)
        .bind(&input.password_hash)
        .bind(&input.city)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        map_row_to_user(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        self.find_credentials(CredentialsKey::Email, email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<UserCredentials>, DomainError> {
        self.find_credentials(CredentialsKey::Phone, phone).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, phone, name, city
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn update_profile(
        &self,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = $2,
                city = $3
            WHERE email = $1
            RETURNING id, email, phone, name, city
            "#,
        )
        .bind(email)
        .bind(&patch.name)
        .bind(&patch.city)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, phone, name, city
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        rows.into_iter().map(map_row_to_user).collect()
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    User::new(row.id, row.email, row.phone, row.name, row.city)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let resource = match db_err.constraint() {
            Some("users_email_key") => "email",
            Some("users_phone_key") => "phone",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
