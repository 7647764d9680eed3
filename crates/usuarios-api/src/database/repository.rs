use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use super::{ActualizarUsuario, DbPool, Usuario, ValidNuevoUsuario};

/// SQLSTATE raised by PostgreSQL on a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Split unique violations out of the generic driver errors.
    fn classify(err: sqlx::Error) -> Self {
        let is_unique = err
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == UNIQUE_VIOLATION);

        if is_unique {
            RepositoryError::UniqueViolation(err.to_string())
        } else {
            RepositoryError::Database(err)
        }
    }
}

/// Storage port for the `usuarios` table. Every method issues exactly one statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Usuario>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Usuario>, RepositoryError>;
    async fn create(&self, usuario: &ValidNuevoUsuario) -> Result<Usuario, RepositoryError>;
    async fn update(
        &self,
        id: i32,
        cambios: &ActualizarUsuario,
    ) -> Result<Option<Usuario>, RepositoryError>;
    /// Returns `false` when no row matched.
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
}

pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<Usuario>, RepositoryError> {
        let usuarios = sqlx::query_as::<_, Usuario>(
            r#"SELECT id_usuario, nombre, correo, password
               FROM usuarios
               ORDER BY id_usuario ASC"#,
        )
        .fetch_all(self.pool.get_pool())
        .await?;

        debug!("Fetched {} usuarios", usuarios.len());
        Ok(usuarios)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Usuario>, RepositoryError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"SELECT id_usuario, nombre, correo, password
               FROM usuarios
               WHERE id_usuario = $1"#,
        )
        .bind(id)
        .fetch_optional(self.pool.get_pool())
        .await?;

        Ok(usuario)
    }

    async fn create(&self, usuario: &ValidNuevoUsuario) -> Result<Usuario, RepositoryError> {
        let row = sqlx::query_as::<_, Usuario>(
            r#"INSERT INTO usuarios (nombre, correo, password)
               VALUES ($1, $2, $3)
               RETURNING id_usuario, nombre, correo, password"#,
        )
        .bind(&usuario.nombre)
        .bind(&usuario.correo)
        .bind(&usuario.password)
        .fetch_one(self.pool.get_pool())
        .await
        .map_err(RepositoryError::classify)?;

        info!("Usuario created: {}", row.id_usuario);
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        cambios: &ActualizarUsuario,
    ) -> Result<Option<Usuario>, RepositoryError> {
        let row = sqlx::query_as::<_, Usuario>(
            r#"UPDATE usuarios
               SET nombre = COALESCE($1, nombre),
                   correo = COALESCE($2, correo),
                   password = COALESCE($3, password)
               WHERE id_usuario = $4
               RETURNING id_usuario, nombre, correo, password"#,
        )
        .bind(cambios.nombre.as_deref())
        .bind(cambios.correo.as_deref())
        .bind(cambios.password.as_deref())
        .bind(id)
        .fetch_optional(self.pool.get_pool())
        .await
        .map_err(RepositoryError::classify)?;

        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id_usuario = $1")
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;

        if result.rows_affected() > 0 {
            info!("Usuario deleted: {}", id);
        }
        Ok(result.rows_affected() > 0)
    }
}
