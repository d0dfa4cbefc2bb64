use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        categories::{
            create_category, delete_category, get_category, list_categories, update_category,
        },
        health::health,
        permissions::{grant_permission, revoke_permission},
        posts::{create_post, delete_post, get_post, list_posts, update_post},
        users::{sign_in, sign_out, sign_up},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        // Category routes
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        // Post routes
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        // Session routes
        .route("/users/signup", post(sign_up))
        .route("/users/signin", post(sign_in))
        .route("/users/signout", post(sign_out));

    let admin_routes = Router::new().route(
        "/user-permissions/{user_id}",
        post(grant_permission).delete(revoke_permission),
    );

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .nest("/admin-api", admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::testing::test_state;

    const ADMIN_EMAIL: &str = "admin@example.com";
    const ADMIN_PASSWORD: &str = "admin-password";

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Send a body verbatim, for inputs that are not valid JSON.
    async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn sign_up_and_in(app: &Router, email: &str) -> (String, String) {
        let (status, body) = send(
            app,
            "POST",
            "/api/users/signup",
            None,
            Some(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": email,
                "password": "analytical",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["data"]["id"].as_str().unwrap().to_string();

        let token = sign_in(app, email, "analytical").await;
        (user_id, token)
    }

    async fn sign_in(app: &Router, email: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/users/signin",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_app() -> (Router, String) {
        let (state, _) = test_state();
        state
            .sessions
            .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        let app = create_app(state);
        let token = sign_in(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        (app, token)
    }

    async fn grant(app: &Router, admin: &str, user_id: &str, resource: &str, method: &str) {
        let (status, _) = send(
            app,
            "POST",
            &format!("/admin-api/user-permissions/{user_id}"),
            Some(admin),
            Some(json!({ "resource": resource, "method": method })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, body) = send(&app, "GET", "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_credential_is_401_envelope() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, body) = send(&app, "GET", "/api/posts", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"]["type"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_malformed_token_is_401() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, body) = send(&app, "GET", "/api/categories", Some("garbage"), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"]["type"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_plain_user_is_403_until_granted() {
        let (app, admin) = admin_app().await;
        let (user_id, token) = sign_up_and_in(&app, "ada@example.com").await;

        let (status, body) = send(&app, "GET", "/api/categories", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["errors"]["type"], "UNAUTHORIZED");

        grant(&app, &admin, &user_id, "categories", "get").await;

        // Permissions travel in the token: the old one still lacks the grant.
        let (status, _) = send(&app, "GET", "/api/categories/1", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let token = sign_in(&app, "ada@example.com", "analytical").await;
        let (status, body) = send(&app, "GET", "/api/categories/1", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"]["type"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_admin_cannot_grant() {
        let (app, _) = admin_app().await;
        let (user_id, token) = sign_up_and_in(&app, "ada@example.com").await;

        let (status, _) = send(
            &app,
            "POST",
            &format!("/admin-api/user-permissions/{user_id}"),
            Some(&token),
            Some(json!({ "resource": "posts", "method": "POST" })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_validation_errors_are_422_field_maps() {
        let (app, admin) = admin_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/categories",
            Some(&admin),
            Some(json!({ "title": "Rust" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["content"], "content is required");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_422() {
        let (app, admin) = admin_app().await;

        let (status, body) = send(&app, "GET", "/api/categories/abc", Some(&admin), None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["id"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_input_without_token_is_401() {
        let (state, _) = test_state();
        let app = create_app(state);

        let (status, body) = send(&app, "GET", "/api/categories/abc", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"]["type"], "UNAUTHENTICATED");

        let (status, _) = send_raw(&app, "POST", "/api/posts", None, "{not json").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/api/posts?page=first", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            "POST",
            "/admin-api/user-permissions/not-a-uuid",
            None,
            Some(json!({ "resource": "posts", "method": "GET" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body_without_permission_is_403() {
        let (app, _) = admin_app().await;
        let (_, token) = sign_up_and_in(&app, "ada@example.com").await;

        let (status, body) =
            send_raw(&app, "POST", "/api/posts", Some(&token), "{not json").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["errors"]["type"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_malformed_body_from_permitted_caller_is_422() {
        let (app, admin) = admin_app().await;

        let (status, body) =
            send_raw(&app, "POST", "/api/posts", Some(&admin), "{not json").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["body"].is_string());
    }

    #[tokio::test]
    async fn test_category_lifecycle_keeps_list_coherent() {
        let (app, admin) = admin_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/categories",
            Some(&admin),
            Some(json!({ "title": "Rust", "content": "Systems" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Created");
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send(&app, "GET", "/api/categories", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"][0]["content"], "Systems");

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/categories/{id}"),
            Some(&admin),
            Some(json!({ "content": "Ownership" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Updated");

        let (_, body) = send(&app, "GET", "/api/categories", Some(&admin), None).await;
        assert_eq!(body["data"]["items"][0]["content"], "Ownership");

        let (status, body) = send(
            &app,
            "DELETE",
            &format!("/api/categories/{id}"),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Deleted");

        let (status, _) = send(&app, "GET", "/api/categories", Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_end_to_end_post_flow() {
        let (app, admin) = admin_app().await;
        let (user_id, _) = sign_up_and_in(&app, "ada@example.com").await;
        for method in ["GET", "POST", "PUT", "DELETE"] {
            grant(&app, &admin, &user_id, "posts", method).await;
        }
        let token = sign_in(&app, "ada@example.com", "analytical").await;

        for title in ["one", "two", "three"] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/posts",
                Some(&token),
                Some(json!({ "title": title, "content": "body" })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, "GET", "/api/posts?page=2&size=2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let page = &body["data"];
        assert_eq!(page["currentPage"], 2);
        assert_eq!(page["totalPages"], 2);
        assert_eq!(page["totalItems"], 2);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
        assert_eq!(page["items"][0]["title"], "three");
        assert_eq!(page["items"][0]["user"]["email"], "ada@example.com");

        // The admin is not the author.
        let (status, body) = send(&app, "DELETE", "/api/posts/1", Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["message"], "Cannot delete post");

        let (status, _) = send(&app, "POST", "/api/users/signout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/api/posts", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"]["type"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_sign_out_revokes_registry_entry() {
        let (state, registry) = test_state();
        let app = create_app(state);
        let (user_id, token) = sign_up_and_in(&app, "ada@example.com").await;
        assert!(registry.marker(&user_id).await.is_some());

        let (status, body) = send(&app, "POST", "/api/users/signout", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], user_id);
        assert!(registry.marker(&user_id).await.is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials_are_401() {
        let (state, _) = test_state();
        let app = create_app(state);
        sign_up_and_in(&app, "ada@example.com").await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/users/signin",
            None,
            Some(json!({ "email": "ada@example.com", "password": "not-the-one" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
