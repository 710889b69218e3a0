use async_trait::async_trait;
use auth::CredentialStore;
use auth::CredentialStoreError;
use auth::PasswordDigest;
use auth::Principal;
use auth::PrincipalId;
use auth::Role;
use sqlx::FromRow;
use sqlx::PgPool;

/// Credential lookup against the `users` table.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password_hash: String,
    password_salt: String,
    role_label: String,
}

impl From<CredentialRow> for Principal {
    fn from(row: CredentialRow) -> Self {
        Principal::new(
            PrincipalId(row.id),
            row.email,
            PasswordDigest::new(row.password_hash, row.password_salt),
            Role::new(row.role_label),
        )
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Principal>, CredentialStoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, email, password_hash, password_salt, role_label
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        Ok(row.map(Principal::from))
    }
}
