use std::sync::Arc;

use tokio::net::TcpListener;
use todo_core::{
    ClassifierClient, InMemoryTodoRepository, RemoteClassifier, SimulatedTransport, TodoService,
};
use todo_server::{telemetry, ServerConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    telemetry::init(config.log_format)?;

    let repository = Arc::new(InMemoryTodoRepository::seeded());
    let classifier = RemoteClassifier::new(
        ClassifierClient::new(&config.classifier_url),
        SimulatedTransport::default().with_delay_ms(config.classifier_delay_ms.clone()),
    )
    .with_timeout(config.classifier_timeout);
    let service = TodoService::new(repository, Arc::new(classifier));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, index_file = %config.index_file.display(), "server started");

    let app = todo_server::app(service, &config.index_file);
    todo_server::run(listener, app, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
