//! Health check endpoint.
//! Used by: server.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", backend: "rust" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok_and_identifies_the_backend() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.backend, "rust");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"ok","backend":"rust"}"#
        );
    }
}
