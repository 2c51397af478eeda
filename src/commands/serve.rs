use std::{io, net::SocketAddr};

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

use crate::{
    api::health_checks::ok, app::App, config::Config, database::setup_database,
    environment::Environment, router::router,
};

pub async fn handle_serve_command(environment: Environment, config: Config) {
    let port = config.server.port;

    // Answer liveness probes while migrations run
    let liveness_server_task = tokio::spawn(start_liveness_server(port));

    let (db, migration_receiver) = match setup_database(&config.database).await {
        Ok(setup) => setup,
        Err(e) => {
            error!("❌ Database connection failed: {}", e);
            liveness_server_task.abort();
            return;
        }
    };

    match migration_receiver.await {
        Ok(Ok(())) => {
            info!("✅ Database is ready!");
        }
        Ok(Err(e)) => {
            error!("❌ Database setup failed: {}", e);
            liveness_server_task.abort();
            return;
        }
        Err(_) => {
            error!("❌ Database setup channel closed unexpectedly");
            liveness_server_task.abort();
            return;
        }
    }

    // Release the port before the full server binds it
    liveness_server_task.abort();
    let _ = liveness_server_task.await;

    let app = App::new(config, environment, db);

    info!(%environment, "Starting interface monitor");
    if let Err(e) = start_server(router(app), port).await {
        error!("❌ Server error: {}", e);
    }
}

async fn start_liveness_server(port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            warn!("Liveness server could not bind {}: {}", addr, e);
            return;
        }
    };

    let migration_router = Router::new().route("/health", get(ok));
    if let Err(e) = axum::serve(listener, migration_router).await {
        warn!("Liveness server stopped: {}", e);
    }
}

async fn start_server(router: Router, port: u16) -> io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!("🌐 Server starting on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received, finishing in-flight requests");
}
