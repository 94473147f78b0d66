use tokio::net::TcpListener;

use flatwiki::{build_router, logger::Logger, AppState, Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::default();
    let addr = config.socket_addr()?;
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    log::info!("Wiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
