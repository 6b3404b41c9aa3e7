//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Built-in samples
        .route("/samples", get(handlers::list_samples))
        .route("/samples/:name", get(handlers::analyze_sample))
        // Uploads
        .route("/analyze", post(handlers::analyze_upload))
        // Workforce view
        .route("/hr", get(handlers::hr_report));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    info!(%addr, "server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use datalens::DashboardConfig;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(AppState::new(DashboardConfig::default()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_list_samples() {
        let (status, body) = send(get_request("/api/samples")).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["employees", "sales"]);
    }

    #[tokio::test]
    async fn test_sample_with_chart_params() {
        let (status, body) = send(get_request(
            "/api/samples/sales?chart=distribution&column=Revenue&group_by=Region",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"]["status"], "rendered");
        assert_eq!(body["chart"]["chart"]["chart"], "histogram");
        assert_eq!(body["preview"]["rows"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_sample_is_404() {
        let (status, body) = send(get_request("/api/samples/weather")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "datalens_error");
    }

    #[tokio::test]
    async fn test_bad_chart_type_is_400() {
        let (status, body) = send(get_request("/api/samples/sales?chart=pie")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_upload_analysis() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze?name=scores.csv&chart=relationship")
            .body(Body::from("name,score\nA,1\nB,\n"))
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"]["file"], "scores.csv");
        assert_eq!(body["chart"]["status"], "skipped");
        assert_eq!(body["quality"]["missing"][0]["column"], "score");
    }

    #[tokio::test]
    async fn test_upload_unsupported_format() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze?name=report.pdf")
            .body(Body::from("%PDF-1.4"))
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_hr_report_filtered() {
        let (status, body) = send(get_request("/api/hr?departments=Tech,HR&top=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["top_risk"].as_array().unwrap().len() <= 3);
        assert!(body["kpis"]["attrition_rate"].is_number());
        for count in body["department_counts"].as_array().unwrap() {
            let department = count["department"].as_str().unwrap();
            assert!(department == "Tech" || department == "HR");
        }
    }
}
