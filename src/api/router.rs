use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::health;
use super::middleware::{
    logging_middleware, metrics_middleware, security_headers_middleware, MAX_BODY_SIZE,
};
use super::predict;
use super::state::AppState;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Non-state inputs to the router
#[derive(Clone)]
pub struct RouterOptions {
    /// Directory served under `/static`
    pub static_dir: String,
    /// Prometheus handle; `None` leaves the metrics route unmounted
    pub metrics: Option<PrometheusMetrics>,
}

impl RouterOptions {
    pub fn new(static_dir: impl Into<String>) -> Self {
        Self {
            static_dir: static_dir.into(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Create the full router with application state
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let mut router = Router::new()
        // Prediction form
        .route("/", get(predict::show_form).post(predict::submit_form))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Stylesheet
        .nest_service("/static", ServeDir::new(&options.static_dir))
        .with_state(state);

    if let Some(metrics) = options.metrics {
        router = router.merge(create_metrics_router(metrics));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::inference::{MockFeatureScaler, MockPredictor};
    use crate::domain::{
        DomainError, FeatureScaler, FeatureVectorBuilder, InferencePipeline, Predictor,
        NOT_LOADED_MESSAGE,
    };
    use crate::infrastructure::artifacts::{LinearModel, StandardScaler};
    use crate::infrastructure::services::PredictionService;

    const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

    fn app(pipeline: InferencePipeline) -> Router {
        let service = PredictionService::new(FeatureVectorBuilder::default(), Arc::new(pipeline));
        create_router(AppState::new(Arc::new(service)), RouterOptions::new(STATIC_DIR))
    }

    fn linear_pipeline() -> InferencePipeline {
        InferencePipeline::new(
            Arc::new(StandardScaler::new(
                vec![2010.0, 3.0, 2.0, 1.5],
                vec![10.0, 1.0, 1.0, 0.5],
            )),
            Arc::new(LinearModel::new(vec![4.0, 1.0, 1.0, 2.0], 70.0)),
        )
    }

    /// Mocks that expect exactly one call with the given raw vector
    fn expecting_vector(raw: [f64; 4], prediction: f64) -> InferencePipeline {
        let mut scaler = MockFeatureScaler::new();
        scaler.expect_name().return_const("mock_scaler");
        scaler
            .expect_transform()
            .withf(move |features| features == raw)
            .times(1)
            .returning(|features| Ok(features.iter().map(|x| x / 10.0).collect()));

        let mut model = MockPredictor::new();
        model.expect_name().return_const("mock_model");
        model
            .expect_predict()
            .times(1)
            .returning(move |_| Ok(vec![prediction]));

        InferencePipeline::new(Arc::new(scaler), Arc::new(model))
    }

    /// Mocks that fail the test if either artifact is touched
    fn untouched_pipeline() -> InferencePipeline {
        let mut scaler = MockFeatureScaler::new();
        scaler.expect_name().return_const("mock_scaler");
        scaler.expect_transform().times(0);

        let mut model = MockPredictor::new();
        model.expect_name().return_const("mock_model");
        model.expect_predict().times(0);

        InferencePipeline::new(Arc::new(scaler), Arc::new(model))
    }

    fn not_ready_pipeline() -> InferencePipeline {
        let mut scaler = MockFeatureScaler::new();
        scaler.expect_transform().times(0);
        let scaler: Arc<dyn FeatureScaler> = Arc::new(scaler);
        let model: Result<Arc<dyn Predictor>, DomainError> = Err(DomainError::artifact_load(
            "model",
            "artifacts/best_model.json",
            "No such file or directory",
        ));

        InferencePipeline::from_load_results(
            ("artifacts/scaler.json".to_string(), Ok(scaler)),
            ("artifacts/best_model.json".to_string(), model),
        )
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_renders_empty_form() {
        let response = app(untouched_pipeline()).oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let html = body_text(response).await;
        assert!(html.contains("name=\"feature0\""));
        assert!(html.contains("name=\"feature3\""));
        assert!(!html.contains("Prediction:"));
        assert!(!html.contains("Error:"));
    }

    #[tokio::test]
    async fn test_post_known_labels_renders_prediction() {
        let app = app(expecting_vector([2020.0, 1.0, 1.0, 1.0], 73.5));

        let response = app
            .oneshot(post_form(
                "feature0=2020&feature1=Africa&feature2=India&feature3=Urban",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<h3>Prediction: 73.5</h3>"));
    }

    #[tokio::test]
    async fn test_post_invalid_year_renders_parse_error() {
        let app = app(untouched_pipeline());

        let response = app
            .oneshot(post_form(
                "feature0=abc&feature1=Europe&feature2=USA&feature3=Rural",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Error: invalid literal for year"));
        assert!(html.contains("invalid digit found in string"));
        assert!(!html.contains("Prediction:"));
    }

    #[tokio::test]
    async fn test_post_unknown_country_uses_code_zero() {
        let app = app(expecting_vector([2020.0, 1.0, 0.0, 1.0], 55.0));

        let response = app
            .oneshot(post_form(
                "feature0=2020&feature1=Africa&feature2=Germany&feature3=Urban",
            ))
            .await
            .unwrap();

        assert!(body_text(response).await.contains("Prediction: 55"));
    }

    #[tokio::test]
    async fn test_post_multi_word_region() {
        let app = app(expecting_vector([2011.0, 6.0, 1.0, 2.0], 12.0));

        let response = app
            .oneshot(post_form(
                "feature0=2011&feature1=South-East+Asia&feature2=India&feature3=Rural",
            ))
            .await
            .unwrap();

        assert!(body_text(response).await.contains("Prediction: 12"));
    }

    #[tokio::test]
    async fn test_post_with_pipeline_not_ready() {
        let app = app(not_ready_pipeline());

        let response = app
            .oneshot(post_form(
                "feature0=2020&feature1=Africa&feature2=India&feature3=Urban",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(&format!("Error: {}", NOT_LOADED_MESSAGE)));
    }

    #[tokio::test]
    async fn test_get_still_renders_form_when_not_ready() {
        let response = app(not_ready_pipeline()).oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!body_text(response).await.contains("Error:"));
    }

    #[tokio::test]
    async fn test_repeated_post_is_idempotent() {
        let app = app(linear_pipeline());
        let body = "feature0=2020&feature1=Africa&feature2=India&feature3=Urban";

        let first = body_text(app.clone().oneshot(post_form(body)).await.unwrap()).await;
        let second = body_text(app.oneshot(post_form(body)).await.unwrap()).await;

        assert!(first.contains("<h3>Prediction: 69</h3>"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_post_missing_fields_renders_error() {
        let response = app(untouched_pipeline())
            .oneshot(post_form("feature1=Africa"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("cannot parse integer from empty string"));
    }

    #[tokio::test]
    async fn test_post_wrong_content_type_renders_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"feature0":"2020"}"#))
            .unwrap();

        let response = app(untouched_pipeline()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Invalid Content-Type"));
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = app(untouched_pipeline()).oneshot(get("/")).await.unwrap();

        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));
    }

    #[tokio::test]
    async fn test_ready_reports_loaded_artifacts() {
        let response = app(linear_pipeline()).oneshot(get("/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_text(response).await;
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"name\":\"scaler\""));
    }

    #[tokio::test]
    async fn test_ready_unavailable_when_artifact_missing() {
        let response = app(not_ready_pipeline()).oneshot(get("/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_text(response).await;
        assert!(json.contains("No such file or directory"));
    }

    #[tokio::test]
    async fn test_health_and_live() {
        let health = app(not_ready_pipeline()).oneshot(get("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let live = app(not_ready_pipeline()).oneshot(get("/live")).await.unwrap();
        assert_eq!(live.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_stylesheet_served() {
        let response = app(untouched_pipeline())
            .oneshot(get("/static/style.css"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_custom_metrics_path_is_labelled_by_route() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let options = RouterOptions::new(STATIC_DIR)
            .with_metrics(Some(PrometheusMetrics::new(recorder.handle(), "/internal/scrape")));
        let service = PredictionService::new(
            FeatureVectorBuilder::default(),
            Arc::new(untouched_pipeline()),
        );
        let app = create_router(AppState::new(Arc::new(service)), options);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let rendered = metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let scrape = app.clone().oneshot(get("/internal/scrape")).await.unwrap();
                assert_eq!(scrape.status(), StatusCode::OK);
                app.oneshot(get("/")).await.unwrap();
            });
            recorder.handle().render()
        });

        assert!(rendered.contains("path=\"/internal/scrape\""));
        assert!(rendered.contains("path=\"/\""));
        assert!(!rendered.contains("path=\"other\""));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app(untouched_pipeline()).oneshot(get("/predict")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
