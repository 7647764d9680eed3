// Storage failures must map to each endpoint's generic message without leaking details.

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use axum::Router;
    use serde_json::json;
    use std::sync::Arc;

    use super::super::send;
    use crate::database::repository::MockUserRepository;
    use crate::database::{
        ActualizarUsuario, RepositoryError, UserRepository, Usuario, ValidNuevoUsuario,
    };
    use crate::{build_router, PANIC_MESSAGE};
    use crate::state::AppState;

    fn app(repository: MockUserRepository) -> Router {
        build_router(AppState::new(Arc::new(repository), "API en Render"))
    }

    fn pool_timeout() -> RepositoryError {
        RepositoryError::Database(sqlx::Error::PoolTimedOut)
    }

    #[tokio::test]
    async fn test_list_failure() {
        let mut repository = MockUserRepository::new();
        repository.expect_list().times(1).returning(|| Err(pool_timeout()));

        let (status, body) = send(&app(repository), Method::GET, "/api/usuarios", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error al obtener usuarios" }));
    }

    #[tokio::test]
    async fn test_create_failure() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(pool_timeout()));

        let payload = json!({ "nombre": "Ana", "correo": "ana@x.com", "password": "p1" });
        let (status, body) =
            send(&app(repository), Method::POST, "/api/usuarios", Some(payload)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error al insertar usuario" }));
    }

    #[tokio::test]
    async fn test_create_unique_violation() {
        let mut repository = MockUserRepository::new();
        repository.expect_create().times(1).returning(|_| {
            Err(RepositoryError::UniqueViolation(
                "duplicate key value violates unique constraint \"usuarios_correo_key\"".into(),
            ))
        });

        let payload = json!({ "nombre": "Ana", "correo": "ana@x.com", "password": "p1" });
        let (status, body) =
            send(&app(repository), Method::POST, "/api/usuarios", Some(payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "error": "El correo ya existe" }));
    }

    #[tokio::test]
    async fn test_create_passes_payload_to_storage() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .withf(|nuevo| nuevo.nombre == "Ana" && nuevo.correo == "ana@x.com" && nuevo.password == "p1")
            .times(1)
            .returning(|nuevo| {
                Ok(Usuario {
                    id_usuario: 10,
                    nombre: nuevo.nombre.clone(),
                    correo: nuevo.correo.clone(),
                    password: nuevo.password.clone(),
                })
            });

        let payload = json!({ "nombre": "Ana", "correo": "ana@x.com", "password": "p1", "extra": 1 });
        let (status, body) =
            send(&app(repository), Method::POST, "/api/usuarios", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id_usuario"], json!(10));
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_storage() {
        let mut repository = MockUserRepository::new();
        repository.expect_create().never();

        let payload = json!({ "nombre": "Ana", "password": "p1" });
        let (status, _) = send(&app(repository), Method::POST, "/api/usuarios", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_failure() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Err(pool_timeout()));

        let (status, body) = send(&app(repository), Method::GET, "/api/usuarios/3", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error al obtener usuario" }));
    }

    #[tokio::test]
    async fn test_update_failure() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_update()
            .times(1)
            .returning(|_, _| Err(pool_timeout()));

        let (status, body) = send(
            &app(repository),
            Method::PUT,
            "/api/usuarios/3",
            Some(json!({ "nombre": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error al actualizar" }));
    }

    #[tokio::test]
    async fn test_delete_failure() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(|_| Err(pool_timeout()));

        let (status, body) =
            send(&app(repository), Method::DELETE, "/api/usuarios/3", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error al eliminar" }));
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_storage() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_id().never();
        repository.expect_delete().never();
        let app = app(repository);

        let (status, _) = send(&app, Method::GET, "/api/usuarios/uno", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, Method::DELETE, "/api/usuarios/uno", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    struct PanickingRepository;

    #[async_trait::async_trait]
    impl UserRepository for PanickingRepository {
        async fn list(&self) -> Result<Vec<Usuario>, RepositoryError> {
            panic!("connection state corrupted")
        }
        async fn find_by_id(&self, _id: i32) -> Result<Option<Usuario>, RepositoryError> {
            Ok(None)
        }
        async fn create(&self, _usuario: &ValidNuevoUsuario) -> Result<Usuario, RepositoryError> {
            Err(pool_timeout())
        }
        async fn update(
            &self,
            _id: i32,
            _cambios: &ActualizarUsuario,
        ) -> Result<Option<Usuario>, RepositoryError> {
            Ok(None)
        }
        async fn delete(&self, _id: i32) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_internal_error() {
        let app = build_router(AppState::new(Arc::new(PanickingRepository), "API en Render"));

        let (status, body) = send(&app, Method::GET, "/api/usuarios", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": PANIC_MESSAGE }));

        // The router keeps serving after a panic
        let (status, _) = send(&app, Method::GET, "/api/usuarios", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (status, _) = send(&app, Method::GET, "/api/hora", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
