use todo_rest::{
    application::todo_service::ToDoServiceImpl,
    config::Config,
    domain::repository::ToDoRepository,
    http::routing,
    infrastructure::sqlite_repo::SqliteToDoRepository,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let repo = SqliteToDoRepository::connect(&config.database_url).await?;
    repo.init().await?;
    let service = ToDoServiceImpl::new(repo);
    let router = routing::build(service, &config);

    let addr = config.bind_addr;
    tracing::info!(%addr, database_url = %config.database_url, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
