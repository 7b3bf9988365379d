//! The generation proxy: `POST /api/generate`, plus the page itself.
//!
//! Upstream failures are logged here with full detail. Callers only ever see
//! one of the three fixed messages in [`ApiError`].

use std::{net::SocketAddr, sync::LazyLock};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};

use crate::{
    request::{ErrorBody, MissingField, RawRequest},
    ui::Preview,
    Client, Flavor, GenerationRequest, GenerationResult,
};

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// The single page, rendered once from the compiled-in template.
pub static INDEX_HTML: LazyLock<String> = LazyLock::new(render_index);

/// Fill the page template: one selector option per [`Flavor`] and the
/// preview frame's [`Preview::SANDBOX`] attribute.
pub fn render_index() -> String {
    let options = Flavor::ALL
        .iter()
        .map(|flavor| {
            format!(
                r#"<option value="{}" data-extension="{}" data-editor-language="{}">{}</option>"#,
                flavor.as_str(),
                flavor.extension(),
                flavor.editor_language(),
                flavor.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    INDEX_TEMPLATE
        .replace("{{flavor_options}}", &options)
        .replace("{{sandbox}}", Preview::SANDBOX)
}

/// Errors the proxy reports to callers. The message for each variant is
/// fixed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, derive_more::IsVariant,
)]
pub enum ApiError {
    /// `prompt` or `language` missing or empty.
    #[error("Prompt and language are required")]
    Validation,
    /// Token exchange or model call failed, or the model returned nothing
    /// usable.
    #[error("Failed to generate code")]
    Generation,
    /// Anything else, such as a body that isn't JSON.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// HTTP status for the error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Generation | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MissingField> for ApiError {
    fn from(_: MissingField) -> Self {
        Self::Validation
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the router: `/`, `/health` and `/api/generate`.
pub fn router(client: Client) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .with_state(client)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(client: Client, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(client)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML.as_str())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate(
    State(client): State<Client>,
    body: Bytes,
) -> Result<Json<GenerationResult>, ApiError> {
    let raw: RawRequest = serde_json::from_slice(&body).map_err(|e| {
        log::error!("API Error: could not parse request body: {}", e);
        ApiError::Internal
    })?;
    let request = GenerationRequest::try_from(raw)?;

    log::debug!(
        "Generating {} for a {} byte prompt",
        request.flavor,
        request.prompt.len()
    );

    match client.generate(&request).await {
        Ok(code) => Ok(Json(GenerationResult { code })),
        Err(e) => {
            log::error!("Generation failed: {}", e);
            Err(ApiError::Generation)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::client::tests::{stub_client, Upstream};

    async fn call(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
        let body: Body = body.into();
        let response = app
            .oneshot(
                Request::post("/api/generate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_body(value: Value) -> Body {
        Body::from(value.to_string())
    }

    #[tokio::test]
    async fn test_success() {
        let upstream =
            Arc::new(Upstream::replying("```html\n<div>x</div>\n```"));
        let app = router(stub_client(upstream.clone()).await);

        let (status, body) = call(
            app,
            json_body(json!({"prompt": "a div", "language": "html"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"code": "<div>x</div>"}));
    }

    #[tokio::test]
    async fn test_missing_fields_make_no_calls() {
        let upstream = Arc::new(Upstream::replying("<p>unused</p>"));
        let client = stub_client(upstream.clone()).await;

        for value in [
            json!({"language": "html"}),
            json!({"prompt": "a div"}),
            json!({"prompt": "", "language": "html"}),
            json!({"prompt": "a div", "language": ""}),
            json!({}),
        ] {
            let (status, body) =
                call(router(client.clone()), json_body(value)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body,
                json!({"error": "Prompt and language are required"})
            );
        }

        assert_eq!(upstream.token_calls(), 0);
        assert_eq!(upstream.model_calls(), 0);
    }

    #[tokio::test]
    async fn test_token_failure() {
        let upstream = Arc::new(Upstream::replying("<p>ok</p>").token_status(
            StatusCode::UNAUTHORIZED,
            json!({"error": "invalid_client"}),
        ));
        let app = router(stub_client(upstream.clone()).await);

        let (status, body) =
            call(app, json_body(json!({"prompt": "x", "language": "html"})))
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to generate code"}));
        assert_eq!(upstream.model_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_token_body() {
        let upstream = Arc::new(
            Upstream::replying("<p>ok</p>")
                .token_status(StatusCode::OK, json!({"token": "wrong-field"})),
        );
        let app = router(stub_client(upstream.clone()).await);

        let (status, body) =
            call(app, json_body(json!({"prompt": "x", "language": "html"})))
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to generate code"}));
        assert_eq!(upstream.model_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let upstream =
            Arc::new(Upstream::with_model_body(json!({"candidates": []})));
        let app = router(stub_client(upstream.clone()).await);

        let (status, body) =
            call(app, json_body(json!({"prompt": "x", "language": "html"})))
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to generate code"}));
        assert_eq!(upstream.model_calls(), 1);
    }

    #[tokio::test]
    async fn test_not_json() {
        let upstream = Arc::new(Upstream::replying("<p>ok</p>"));
        let app = router(stub_client(upstream.clone()).await);

        let (status, body) = call(app, Body::from("prompt=x")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
        assert_eq!(upstream.token_calls(), 0);
    }

    #[tokio::test]
    async fn test_repeated_requests_exchange_twice() {
        let upstream = Arc::new(Upstream::replying("<p>same</p>"));
        let client = stub_client(upstream.clone()).await;
        let value = json!({"prompt": "same", "language": "html"});

        for _ in 0..2 {
            let (status, body) =
                call(router(client.clone()), json_body(value.clone())).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"code": "<p>same</p>"}));
        }

        assert_eq!(upstream.token_calls(), 2);
        assert_eq!(upstream.model_calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_language_uses_typescript_preamble() {
        let upstream = Arc::new(Upstream::replying("let a = 1;"));
        let app = router(stub_client(upstream.clone()).await);

        let (status, _) =
            call(app, json_body(json!({"prompt": "x", "language": "rust"})))
                .await;

        assert_eq!(status, StatusCode::OK);
        assert!(upstream
            .last_model_text()
            .unwrap()
            .contains("Generate TypeScript code"));
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let upstream = Arc::new(Upstream::replying(""));
        let client = stub_client(upstream).await;

        let response = router(client.clone())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, INDEX_HTML.as_bytes());

        let response = router(client)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_api_error_shape() {
        assert_eq!(ApiError::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Generation.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Internal.to_string(), "Internal server error");
        assert!(ApiError::from(MissingField).is_validation());
    }

    // The page mirrors `ui::Workbench`; check it carries the pieces it needs.

    #[test]
    fn test_index_html_has_controls() {
        assert!(INDEX_HTML.contains("/api/generate"));
        assert!(INDEX_HTML.contains(r#"sandbox="allow-scripts""#));
        assert!(INDEX_HTML.contains(r#"value="html""#));
        assert!(INDEX_HTML.contains(r#"value="jsx""#));
        assert!(INDEX_HTML.contains(r#"value="typescript""#));
        assert!(!INDEX_HTML.contains("{{"));
        assert!(INDEX_HTML.contains("Please enter a prompt"));
        assert!(INDEX_HTML.contains("Generating..."));
        assert!(INDEX_HTML.contains("website."));
    }

    #[test]
    fn test_index_html_options_follow_flavor() {
        assert!(INDEX_HTML
            .contains(&format!(r#"sandbox="{}""#, Preview::SANDBOX)));
        assert!(INDEX_HTML.contains(
            r#"<option value="html" data-extension="html" data-editor-language="html">HTML/CSS/JS</option>"#
        ));
        assert!(INDEX_HTML.contains(
            r#"<option value="jsx" data-extension="jsx" data-editor-language="javascript">React</option>"#
        ));
        assert!(INDEX_HTML.contains(
            r#"<option value="typescript" data-extension="jsx" data-editor-language="typescript">TypeScript</option>"#
        ));
        // The first option is the one selected on load.
        let first = INDEX_HTML.find("<option").unwrap();
        assert!(INDEX_HTML[first..]
            .starts_with(&format!(r#"<option value="{}""#, Flavor::default())));
    }

    #[test]
    fn test_index_html_no_external_deps() {
        assert!(!INDEX_HTML.contains("cdn."));
        assert!(!INDEX_HTML.contains("unpkg.com"));
        assert!(!INDEX_HTML.contains("jsdelivr"));
    }
}
