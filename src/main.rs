use actix_web::{middleware, web, App, HttpServer};
use anyhow::{bail, Result};
use clap::Parser;
use log::{error, info, warn};
use pollq::{http, logging, Broker, Config};
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};

/// Pause between receiving a shutdown signal and refusing new work, so
/// upstream load balancers have a moment to stop routing to us.
const SHUTDOWN_DELAY: Duration = Duration::from_secs(1);

/// How long in-flight requests get to finish before the process gives up.
const DRAIN_DEADLINE: Duration = Duration::from_secs(5);

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init()?;

    if config.is_default_port() {
        warn!("using default port {}", config.port);
    }

    let broker = web::Data::new(Broker::new());

    let bind_addr = config.bind_addr();
    let server = HttpServer::new({
        let broker = broker.clone();
        move || {
            App::new()
                .wrap(middleware::Logger::default())
                .app_data(broker.clone())
                .configure(http::configure)
        }
    })
    .disable_signals()
    .bind(&bind_addr)?
    .run();

    info!("server started on {}", bind_addr);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            result??;
        }
        received = shutdown_signal() => {
            received?;
            info!("shutdown signal received, delaying {:?}", SHUTDOWN_DELAY);
            tokio::time::sleep(SHUTDOWN_DELAY).await;

            info!("draining in-flight requests");
            if tokio::time::timeout(DRAIN_DEADLINE, server_handle.stop(true))
                .await
                .is_err()
            {
                error!("in-flight requests did not drain within {:?}", DRAIN_DEADLINE);
                bail!("shutdown drain deadline exceeded");
            }
        }
    }

    info!("server is shutdown");
    Ok(())
}

async fn shutdown_signal() -> std::io::Result<()> {
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}
