//! HTTP Activity Provider client against a local fake provider

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use uuid::Uuid;

use invenira_core::config::ProviderClientConfig;
use invenira_core::error::InveniraError;
use invenira_core::provider_client::{
    ActivityProviderApi, AnalyticsMetric, ConfigParameter, DeployActivityRequest, HttpClientFactory,
    ProviderClientError, ProviderClientFactory,
};

type Received = Arc<Mutex<Vec<(Uuid, Value)>>>;

fn fake_provider(received: Received) -> Router {
    Router::new()
        .route(
            "/config-interface",
            get(|| async { Json(json!({"interfaceUrl": "http://quiz.example.com/configure"})) }),
        )
        .route(
            "/config-parameters",
            get(|| async {
                Json(json!([
                    {"name": "title", "type": "string"},
                    {"name": "rounds", "type": "integer"},
                    {"name": "notes"}
                ]))
            }),
        )
        .route(
            "/analytics-contract",
            get(|| async {
                Json(json!({
                    "qualAnalytics": [{"name": "feedback", "type": "string"}],
                    "quantAnalytics": [{"name": "score", "type": "number"}, {"name": "attempts"}]
                }))
            }),
        )
        .route(
            "/deploy/:activity_id",
            post(
                |State(received): State<Received>,
                 Path(activity_id): Path<Uuid>,
                 Json(body): Json<Value>| async move {
                    received.lock().unwrap().push((activity_id, body));
                    StatusCode::OK
                },
            ),
        )
        .with_state(received)
}

fn broken_provider() -> Router {
    Router::new()
        .route("/config-parameters", get(|| async { "not json" }))
        .route(
            "/deploy/:activity_id",
            post(|| async { (StatusCode::BAD_GATEWAY, "deploy rejected") }),
        )
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn factory() -> HttpClientFactory {
    HttpClientFactory::new(&ProviderClientConfig::default()).unwrap()
}

#[tokio::test]
async fn test_reads_provider_contracts() {
    let received = Received::default();
    let base_url = serve(fake_provider(received)).await;
    let client = factory().create(&base_url).unwrap();

    let interface = client.get_config_interface().await.unwrap();
    assert_eq!(interface.url, "http://quiz.example.com/configure");

    let parameters = client.get_config_parameters().await.unwrap();
    assert_eq!(
        parameters,
        vec![
            ConfigParameter::new("title", Some("string")),
            ConfigParameter::new("rounds", Some("integer")),
            ConfigParameter::new("notes", None),
        ]
    );

    let contract = client.get_analytics_contract().await.unwrap();
    let metrics: Vec<&AnalyticsMetric> = contract.metrics().collect();
    assert_eq!(
        metrics,
        vec![
            &AnalyticsMetric::new("feedback", Some("string")),
            &AnalyticsMetric::new("score", Some("number")),
            &AnalyticsMetric::new("attempts", None),
        ]
    );
}

#[tokio::test]
async fn test_deploy_posts_parameters() {
    let received = Received::default();
    let base_url = serve(fake_provider(received.clone())).await;
    let client = factory().create(&base_url).unwrap();

    let activity_uuid = Uuid::new_v4();
    let request = DeployActivityRequest {
        parameters: json!({"title": "Quiz", "rounds": 3})
            .as_object()
            .cloned()
            .unwrap(),
    };
    client.deploy(activity_uuid, &request).await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(
        *received,
        vec![(
            activity_uuid,
            json!({"parameters": {"title": "Quiz", "rounds": 3}})
        )]
    );
}

#[tokio::test]
async fn test_base_path_prefix_is_preserved() {
    let app = Router::new().nest("/ap/v2", fake_provider(Received::default()));
    let base_url = format!("{}/ap/v2", serve(app).await);

    for url in [base_url.clone(), format!("{base_url}/")] {
        let client = factory().create(&url).unwrap();
        assert_eq!(client.get_config_parameters().await.unwrap().len(), 3);
    }
}

#[tokio::test]
async fn test_provider_errors_are_reported() {
    let base_url = serve(broken_provider()).await;
    let client = factory().create(&base_url).unwrap();

    let error = client
        .deploy(
            Uuid::new_v4(),
            &DeployActivityRequest {
                parameters: Default::default(),
            },
        )
        .await
        .unwrap_err();
    match error {
        ProviderClientError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "deploy rejected");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    let error = client.get_config_parameters().await.unwrap_err();
    assert!(matches!(error, ProviderClientError::InvalidResponse { .. }));

    // Unknown route
    let error = client.get_analytics_contract().await.unwrap_err();
    assert!(matches!(error, ProviderClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_closed_port_is_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = factory().create(&format!("http://{addr}")).unwrap();
    let error = client.get_config_parameters().await.unwrap_err();
    assert!(matches!(error, ProviderClientError::Http(_)));

    let service_error: InveniraError = error.into();
    assert!(service_error
        .to_string()
        .starts_with("Unable to contact Activity Provider"));
}
