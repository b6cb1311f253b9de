use axum::{
    routing::{get, patch, post},
    Router,
};
use mathquiz_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/exams/readiness", get(routes::exam::check_readiness))
        .route("/api/exams", post(routes::exam::start_exam))
        .route("/api/exams/:id", get(routes::exam::get_exam))
        .route("/api/exams/:id/answer", patch(routes::exam::save_answer))
        .route("/api/exams/:id/submit", post(routes::exam::submit_exam))
        .route("/api/exams/:id/abandon", post(routes::exam::abandon_exam))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
