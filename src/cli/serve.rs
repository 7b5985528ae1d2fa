use std::sync::Arc;

use crate::{
    config, error, info,
    management::JsonStore,
    server::{self, AppState},
    success,
    upstream::{UpstreamClient, UpstreamEndpoints},
    warning,
};

/// Boots the gateway and serves until the process is stopped.
///
/// Prepares the data directory, seeds any missing data files, builds the
/// upstream client and binds the listener. With `open` set, the admin page is
/// opened in the default browser once the address is known.
///
/// # Error Handling
///
/// Failing to seed the store, build the HTTP client or bind the address is
/// fatal and terminates the program with an error message.
pub async fn serve(open: bool) {
    crate::init_tracing();

    let data_dir = config::data_dir();
    let store = Arc::new(JsonStore::new(data_dir.clone()));
    match server::seed_store(&store).await {
        Ok(seeded) if !seeded.is_empty() => {
            info!("Initialized data files: {}", seeded.join(", "))
        }
        Ok(_) => {}
        Err(e) => error!("Cannot prepare data directory {}: {}", data_dir.display(), e),
    }

    let upstream = match UpstreamClient::new(UpstreamEndpoints::from_env()) {
        Ok(client) => client,
        Err(e) => error!("Cannot build upstream client: {}", e),
    };

    let addr = config::server_addr();
    let public_dir = config::public_dir();
    let admin_url = format!("http://localhost:{}", addr.rsplit(':').next().unwrap_or("3000"));

    success!("Server running on {}", addr);
    info!("Admin panel: {}", admin_url);
    info!("Data directory: {}", data_dir.display());
    info!("Static files: {}", public_dir.display());

    if open && webbrowser::open(&admin_url).is_err() {
        warning!("Failed to open browser. Navigate to {} manually.", admin_url)
    }

    let state = AppState::new(store, upstream);
    if let Err(e) = server::start_api_server(state, &addr, public_dir).await {
        error!("Server stopped: {}", e);
    }
}
