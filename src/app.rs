use std::net::SocketAddr;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::MessageBody;
use crate::state::AppState;
use crate::{courses, users};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest(
            "/api",
            Router::new().merge(users::router()).merge(courses::router()),
        )
        .fallback(route_not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        tracing::info!(%status, "response");
                    },
                ),
        )
}

async fn root() -> Json<MessageBody> {
    Json(MessageBody {
        message: "Welcome to the REST API project!".to_string(),
    })
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(MessageBody {
            message: "Route Not Found".to_string(),
        }),
    )
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json(res: axum::http::Response<axum::body::Body>) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn root_returns_greeting() {
        let app = build_app(AppState::fake());
        let res = app.oneshot(request("GET", "/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Welcome to the REST API project!");
    }

    #[tokio::test]
    async fn unmatched_route_returns_fixed_404() {
        let app = build_app(AppState::fake());
        let res = app.oneshot(request("GET", "/nonexistent")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Route Not Found");
    }

    #[tokio::test]
    async fn protected_route_without_header_is_opaque_401() {
        let app = build_app(AppState::fake());
        let res = app.oneshot(request("GET", "/api/users")).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Access Denied");
    }

    #[tokio::test]
    async fn malformed_course_id_gets_the_json_not_found_shape() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(request("GET", "/api/courses/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Course Not Found");
    }

    #[tokio::test]
    async fn protected_route_with_bad_scheme_is_opaque_401() {
        let app = build_app(AppState::fake());
        let req = axum::http::Request::builder()
            .method("DELETE")
            .uri("/api/courses/3f0b38fe-2f2f-4a10-8bf7-0f0a38b8f5a7")
            .header("authorization", "Bearer some-token")
            .body(axum::body::Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Access Denied");
    }
}
