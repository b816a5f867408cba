use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sheet_optimizer::{OptimizationResult, Options, Piece, StockDef, optimize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct OptimizeRequest {
    pieces: Vec<Piece>,
    stock: Vec<StockDef>,
    #[serde(default)]
    options: Options,
}

async fn optimize_handler(
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizationResult>, (StatusCode, String)> {
    tracing::info!(
        pieces = req.pieces.len(),
        stock = req.stock.len(),
        algorithm = ?req.options.algorithm,
        "POST /optimize"
    );

    // The optimizer is CPU bound; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        optimize(&req.pieces, &req.stock, &req.options)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "optimizer task failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "optimizer failed".to_string())
    })?
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(result))
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: failed to open development.log: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(serve()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn serve() -> std::io::Result<()> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("Listening on {addr}");
    axum::serve(listener, app()).await
}
