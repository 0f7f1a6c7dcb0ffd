use drawroom::routes;
use drawroom::state::AppState;

#[tokio::main]
async fn main() {
    if dotenvy::dotenv().is_err() {
        // No .env file; environment variables alone are fine.
    }
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3001".into())
        .parse()
        .expect("invalid PORT");

    let state = AppState::new();
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "drawroom listening");
    axum::serve(listener, app).await.expect("server failed");
}
