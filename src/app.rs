use crate::di::Container;
use crate::error::Result;
use crate::modules::user::UserController;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// The HTTP surface: every registered controller plus request tracing.
///
/// Controllers are resolved from `container`, so their modules must be
/// registered first.
pub fn router(container: &Container) -> Result<Router> {
    let user_controller = container.resolve::<UserController>()?;

    Ok(Router::new()
        .merge(UserController::router(user_controller))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::{
        MemoryUserRepository, UpdateUserRequest, User, UserModule, UserRepository,
    };
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(repository: Arc<dyn UserRepository>) -> Router {
        let mut container = Container::new();
        UserModule::register_with(&mut container, repository).unwrap();
        router(&container).unwrap()
    }

    fn app() -> Router {
        app_with(Arc::new(MemoryUserRepository::new()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, String) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    const ANN: &str = r#"{"id":1,"name":"Ann","age":30,"height":1.7}"#;

    #[tokio::test]
    async fn test_create_then_get() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/api/users", Some(ANN)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, ANN);

        let (status, body) = send(&app, Method::GET, "/api/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ID: 1, Name: Ann, Height: 1.7, Age: 30\n");
    }

    #[tokio::test]
    async fn test_create_response_is_json() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(ANN))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let app = app();
        send(&app, Method::POST, "/api/users", Some(ANN)).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/users/1",
            Some(r#"{"name":"Ann","age":31,"height":1.71}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "WORKED!");

        let (_, body) = send(&app, Method::GET, "/api/users/1", None).await;
        assert_eq!(body, "ID: 1, Name: Ann, Height: 1.71, Age: 31\n");
    }

    #[tokio::test]
    async fn test_update_path_id_wins_over_body_id() {
        let app = app();
        send(&app, Method::POST, "/api/users", Some(ANN)).await;

        send(
            &app,
            Method::PUT,
            "/api/users/1",
            Some(r#"{"id":7,"name":"Zed","age":40,"height":1.8}"#),
        )
        .await;

        let (_, one) = send(&app, Method::GET, "/api/users/1", None).await;
        let (_, seven) = send(&app, Method::GET, "/api/users/7", None).await;
        assert_eq!(one, "ID: 1, Name: Zed, Height: 1.8, Age: 40\n");
        assert_eq!(seven, "");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_empty_200() {
        let app = app();
        send(&app, Method::POST, "/api/users", Some(ANN)).await;
        send(
            &app,
            Method::POST,
            "/api/users",
            Some(r#"{"id":2,"name":"Bob","age":25,"height":1.8}"#),
        )
        .await;

        let (status, body) = send(&app, Method::DELETE, "/api/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "WORKED!");

        let (status, body) = send(&app, Method::GET, "/api/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "");

        let (_, body) = send(&app, Method::GET, "/api/users", None).await;
        assert_eq!(body, "ID: 2, Name: Bob, Height: 1.8, Age: 25\n");
    }

    #[tokio::test]
    async fn test_writes_on_unknown_id_still_acknowledge() {
        let app = app();

        let (status, body) = send(&app, Method::DELETE, "/api/users/404", None).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "WORKED!"));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/users/404",
            Some(r#"{"name":"Nobody","age":1,"height":1.0}"#),
        )
        .await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "WORKED!"));

        let (status, body) = send(&app, Method::GET, "/api/users/404", None).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, ""));
    }

    #[tokio::test]
    async fn test_list_one_line_per_row() {
        let app = app();
        for id in 1..=3 {
            let payload = format!(r#"{{"id":{id},"name":"U{id}","age":{id},"height":1.5}}"#);
            send(&app, Method::POST, "/api/users", Some(&payload)).await;
        }

        let (status, body) = send(&app, Method::GET, "/api/users", None).await;
        assert_eq!(status, StatusCode::OK);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert!(line.starts_with("ID: "));
            assert!(line.contains(", Name: U"));
            assert!(line.contains(", Height: 1.5, Age: "));
        }
    }

    #[tokio::test]
    async fn test_missing_fields_become_zero_values() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/users", Some(r#"{"id":3}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, r#"{"id":3,"name":"","age":0,"height":0.0}"#);

        let (_, body) = send(&app, Method::GET, "/api/users/3", None).await;
        assert_eq!(body, "ID: 3, Name: , Height: 0, Age: 0\n");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_and_nothing_stored() {
        let repository = Arc::new(MemoryUserRepository::new());
        let app = app_with(repository.clone());

        let (status, _) = send(&app, Method::POST, "/api/users", Some("{not json")).await;
        assert!(status.is_client_error());

        let (status, _) =
            send(&app, Method::POST, "/api/users", Some(r#"{"id":"one"}"#)).await;
        assert!(status.is_client_error());
        assert!(repository.find_all().await.unwrap().is_empty());

        let (status, body) = send(&app, Method::GET, "/api/users", None).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, ""));
    }

    #[tokio::test]
    async fn test_null_fields_are_stored_as_zero_values() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(r#"{"id":1,"name":null,"age":30,"height":1.7}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, r#"{"id":1,"name":"","age":30,"height":1.7}"#);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/users/1",
            Some(r#"{"name":"Ann","age":null,"height":1.7}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, "/api/users/1", None).await;
        assert_eq!(body, "ID: 1, Name: Ann, Height: 1.7, Age: 0\n");
    }

    #[tokio::test]
    async fn test_id_outside_integer_column_is_rejected() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(r#"{"id":2147483648,"name":"Big","age":1,"height":1.0}"#),
        )
        .await;
        assert!(status.is_client_error());

        let (status, _) = send(&app, Method::GET, "/api/users/2147483648", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tiny_heights_render_in_exponent_form() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/api/users",
            Some(r#"{"id":5,"name":"Eve","age":2,"height":0.00001}"#),
        )
        .await;

        let (_, body) = send(&app, Method::GET, "/api/users/5", None).await;
        assert_eq!(body, "ID: 5, Name: Eve, Height: 1e-05, Age: 2\n");
    }

    #[tokio::test]
    async fn test_duplicate_id_is_a_server_error() {
        let app = app();
        send(&app, Method::POST, "/api/users", Some(ANN)).await;
        let (status, _) = send(&app, Method::POST, "/api/users", Some(ANN)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_bad_request() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/api/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_reads_on_accept_header() {
        let app = app();
        send(&app, Method::POST, "/api/users", Some(ANN)).await;

        let request = Request::builder()
            .uri("/api/users/1")
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": [{ "id": 1, "name": "Ann", "age": 30, "height": 1.7 }],
                "success": true
            })
        );
    }

    /// Fails every call, standing in for a broken database.
    struct BrokenRepository;

    #[async_trait]
    impl UserRepository for BrokenRepository {
        async fn find_by_id(&self, _id: i32) -> Result<Vec<User>> {
            Err(sea_orm::DbErr::Custom("row decode failed".to_string()).into())
        }

        async fn find_all(&self) -> Result<Vec<User>> {
            Err(sea_orm::DbErr::Custom("row decode failed".to_string()).into())
        }

        async fn insert(&self, _user: &User) -> Result<()> {
            Err(sea_orm::DbErr::Custom("insert failed".to_string()).into())
        }

        async fn update(&self, _id: i32, _changes: &UpdateUserRequest) -> Result<u64> {
            Err(sea_orm::DbErr::Custom("update failed".to_string()).into())
        }

        async fn delete(&self, _id: i32) -> Result<u64> {
            Err(sea_orm::DbErr::Custom("delete failed".to_string()).into())
        }
    }

    #[tokio::test]
    async fn test_store_failures_are_500_and_server_keeps_serving() {
        let app = app_with(Arc::new(BrokenRepository));

        for (method, uri, body) in [
            (Method::GET, "/api/users/1", None),
            (Method::GET, "/api/users", None),
            (Method::POST, "/api/users", Some(ANN)),
            (Method::PUT, "/api/users/1", Some(r#"{"name":"x","age":1,"height":1.0}"#)),
            (Method::DELETE, "/api/users/1", None),
        ] {
            let (status, _) = send(&app, method, uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        }

        // Failures are per request; the same router keeps answering.
        // Driver detail is logged, never sent to the client.
        let (status, body) = send(&app, Method::GET, "/api/users", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");
    }

    #[test]
    fn test_router_requires_registered_controller() {
        assert!(router(&Container::new()).is_err());
    }
}
