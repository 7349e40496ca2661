#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use calcbot::{Engine, Reply};
    use serde::{Deserialize, Serialize};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower_http::cors::CorsLayer;
    use tracing::{error, info};

    /// One session shared by every client
    type SharedEngine = Arc<Mutex<Engine>>;

    #[derive(Debug, Deserialize)]
    struct RespondRequest {
        input: String,
    }

    #[derive(Debug, Serialize)]
    struct RespondResponse {
        reply: Reply,
        text: String,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    pub fn router(engine: Engine) -> Router {
        let shared_engine = Arc::new(Mutex::new(engine));

        Router::new()
            .route("/health", get(health_check))
            .route("/variables", get(list_variables))
            .route("/respond", post(respond))
            .layer(CorsLayer::permissive())
            .with_state(shared_engine)
    }

    pub async fn start_server(engine: Engine, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("calcbot server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "calcbot",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn list_variables(State(engine): State<SharedEngine>) -> impl IntoResponse {
        let engine = engine.lock().await;
        Json(serde_json::json!({ "variables": engine.variables().list() }))
    }

    async fn respond(
        State(engine): State<SharedEngine>,
        Json(payload): Json<RespondRequest>,
    ) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
        if payload.input.trim().is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Input cannot be empty".to_string(),
                }),
            ));
        }

        // Backend calls block for up to their timeout
        let input = payload.input;
        let reply = tokio::task::spawn_blocking(move || {
            let mut engine = engine.blocking_lock();
            engine.handle(&input)
        })
        .await
        .map_err(|e| {
            error!("Engine task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Engine task failed: {}", e),
                }),
            )
        })?;

        let text = reply.to_string();
        info!(error = reply.is_error(), "responded: {}", text);
        Ok(Json(RespondResponse { reply, text }))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use axum::body::{to_bytes, Body};
        use axum::http::{header, Request};
        use tower::ServiceExt;

        async fn body_json(response: axum::response::Response) -> serde_json::Value {
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }

        fn post_input(input: &str) -> Request<Body> {
            Request::builder()
                .method("POST")
                .uri("/respond")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "input": input }).to_string(),
                ))
                .unwrap()
        }

        #[tokio::test]
        async fn test_health() {
            let response = router(Engine::new())
                .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["status"], "ok");
        }

        #[tokio::test]
        async fn test_respond_evaluates_expression() {
            let response = router(Engine::new())
                .oneshot(post_input("What is 5 plus 5?"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["text"], "Bot: The result is 10.0.");
            assert_eq!(body["reply"]["type"], "evaluated");
            assert_eq!(body["reply"]["value"], 10.0);
        }

        #[tokio::test]
        async fn test_calculator_errors_are_replies() {
            let response = router(Engine::new())
                .oneshot(post_input("5 / 0"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["reply"]["type"], "error");
            assert_eq!(body["text"], "Bot: Error - Division by zero is not allowed.");
        }

        #[tokio::test]
        async fn test_empty_input_is_bad_request() {
            let response = router(Engine::new())
                .oneshot(post_input("   "))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[tokio::test]
        async fn test_session_is_shared_across_requests() {
            let app = router(Engine::new());

            let assigned = app.clone().oneshot(post_input("x = 4")).await.unwrap();
            assert_eq!(assigned.status(), StatusCode::OK);

            let response = app
                .oneshot(Request::builder().uri("/variables").body(Body::empty()).unwrap())
                .await
                .unwrap();
            let body = body_json(response).await;
            assert_eq!(body["variables"][0]["name"], "x");
            assert_eq!(body["variables"][0]["value"], 4.0);
        }
    }
}
