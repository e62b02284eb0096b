use std::sync::Arc;

use auth_service::cli;
use auth_service::config::Config;
use auth_service::config::RunEnvironment;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::outbound::security::Argon2PasswordHasher;
use auth_service::outbound::security::JwtTokenIssuer;
use auth_service::proto::auth_server::AuthServer;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let matches = cli::new().get_matches();
    let config = Config::load(cli::config_path(&matches))?;

    init_tracing(config.environment);

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "Service starting"
    );

    tracing::info!(
        grpc_port = config.server.grpc_port,
        timeout_seconds = config.server.timeout_seconds,
        token_ttl_minutes = config.jwt.token_ttl_minutes,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let token_issuer = Arc::new(JwtTokenIssuer::new(config.jwt.secret.as_bytes()));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        user_repository,
        password_hasher,
        token_issuer,
        config.token_ttl()?,
        tracing::info_span!("auth"),
    ));

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service);
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .timeout(config.request_timeout())
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` overrides the per-environment level.
fn init_tracing(environment: RunEnvironment) {
    let default_level = match environment {
        RunEnvironment::Local | RunEnvironment::Dev => "auth_service=debug,tower=info",
        RunEnvironment::Prod => "auth_service=info,tower=warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    let registry = tracing_subscriber::registry().with(filter);
    match environment {
        RunEnvironment::Local => registry.with(tracing_subscriber::fmt::layer()).init(),
        RunEnvironment::Dev | RunEnvironment::Prod => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Resolve on Ctrl-C or SIGTERM; in-flight requests are drained before exit.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, stopping gRPC server");
}
