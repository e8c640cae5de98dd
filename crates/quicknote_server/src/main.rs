//! QuickNote server binary.
//!
//! Startup order mirrors the storage-first contract: resolve config,
//! bring up logging, open and migrate the database, then listen.

use log::info;
use quicknote_core::db::open_db;
use quicknote_core::init_logging;
use quicknote_server::config::ServerConfig;
use quicknote_server::routes::api_router;
use quicknote_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("quicknote_server: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    if let Err(err) = init_logging(&config.log_level, &config.log_dir.display().to_string()) {
        // A broken log sink should not keep the service down.
        eprintln!("quicknote_server: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)?;
    let state = AppState::new(conn);
    let app = api_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        "event=server_start module=server status=ok addr={} db={}",
        config.addr,
        config.db_path.display()
    );
    println!("quicknote server listening on http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
