use axum::{
    Json, Router,
    routing::{get, put},
};
use gather_server_domain::app::AppState;
use log::info;
use tower_http::cors::CorsLayer;

mod event;

pub async fn run(
    app: AppState,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    let router = Router::new()
        .route(
            "/api/events",
            get(event::list_events).post(event::create_event),
        )
        .route("/api/events/{id}", get(event::get_event))
        .route("/api/events/{id}/register", put(event::register))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(app);

    let host = std::env::var("GATHER_HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("GATHER_HTTP_PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(5000);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .unwrap();

    info!("API server listening on {}:{}", host, port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .unwrap();

    info!("HTTP API shut down gracefully");
}

#[derive(serde::Serialize)]
pub struct JsonHealth {
    status: String,
    timestamp: String,
}

async fn health() -> Json<JsonHealth> {
    Json(JsonHealth {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
