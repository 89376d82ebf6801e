mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::extractor::AppShutdown;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::workers::SessionSweeper;
use crate::features::auth::{AuthService, SessionStore};
use crate::features::chat::{routes as chat_routes, services::ChatService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::laporan::{routes as laporan_routes, services::LaporanService};
use crate::features::program::{routes as program_routes, services::ProgramService};
use crate::features::transactions::{routes as transactions_routes, services::TransactionService};
use crate::features::umkm::{routes as umkm_routes, services::UmkmService};
use crate::features::uploads::{routes as uploads_routes, services::UploadService};
use crate::features::users::{routes as users_routes, services::UserService};
use crate::features::wisata::{routes as wisata_routes, services::WisataService};
use crate::modules::backend::BackendClient;
use crate::modules::maps::CoordinateResolver;
use crate::modules::weather::{OpenMeteoClient, WeatherProvider};
use crate::shared::chat::PlaceCardParser;
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Extension, Router};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Cancelled on SIGINT/SIGTERM; every backend call and countdown derives from it
    let shutdown = CancellationToken::new();

    // Village backend client (shared by all features)
    let backend = Arc::new(
        BackendClient::new(&config.backend)
            .map_err(|e| anyhow::anyhow!("Failed to initialize backend client: {}", e))?,
    );
    tracing::info!("Backend client initialized: {}", backend.base_url());

    let weather: Arc<dyn WeatherProvider> = Arc::new(
        OpenMeteoClient::new(&config.weather)
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {}", e))?,
    );
    let coordinate_resolver = Arc::new(
        CoordinateResolver::new()
            .map_err(|e| anyhow::anyhow!("Failed to initialize maps resolver: {}", e))?,
    );
    tracing::info!("External clients initialized (weather, maps)");

    // Sessions
    let session_store = Arc::new(SessionStore::new(config.session.ttl));
    let sweeper = SessionSweeper::new(Arc::clone(&session_store), config.session.sweep_interval);
    let sweeper_shutdown = shutdown.clone();
    tokio::spawn(async move {
        sweeper.run(sweeper_shutdown).await;
    });
    tracing::info!(
        "Session store initialized (ttl={}s, sweep every {}s)",
        config.session.ttl.as_secs(),
        config.session.sweep_interval.as_secs()
    );

    // Feature services
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&backend),
        Arc::clone(&session_store),
    ));
    let user_service = Arc::new(UserService::new(Arc::clone(&backend)));
    let laporan_service = Arc::new(LaporanService::new(Arc::clone(&backend)));
    let program_service = Arc::new(ProgramService::new(Arc::clone(&backend)));
    let wisata_service = Arc::new(WisataService::new(
        Arc::clone(&backend),
        Arc::clone(&coordinate_resolver),
    ));
    let umkm_service = Arc::new(UmkmService::new(Arc::clone(&backend)));
    let transaction_service = Arc::new(TransactionService::new(
        Arc::clone(&backend),
        config.app.frontend_url.clone(),
    ));
    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&backend),
        Arc::new(PlaceCardParser),
    ));
    let upload_service = Arc::new(UploadService::new(Arc::clone(&backend)));
    let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&backend), weather));
    tracing::info!("Feature services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require a live session)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(users_routes::routes(user_service))
        .merge(uploads_routes::routes(upload_service))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&session_store),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes: a session is attached when present, handlers guard admin/owner access
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(laporan_routes::routes(laporan_service))
        .merge(program_routes::routes(program_service))
        .merge(wisata_routes::routes(wisata_service))
        .merge(umkm_routes::routes(umkm_service))
        .merge(transactions_routes::routes(transaction_service))
        .merge(chat_routes::routes(chat_service))
        .merge(dashboard_routes::routes(dashboard_service))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&session_store),
            middleware::optional_auth_middleware,
        ));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(Extension(AppShutdown(shutdown.clone())))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM and cancels the process-wide token
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
    shutdown.cancel();
}
