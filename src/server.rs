use axum::{
    Router,
    routing::{delete, get, post},
};
use chrono::Utc;
use std::{net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    Res, api,
    management::{
        COLLECTION_PAIRS, COLLECTION_POSTS, ChatLog, DOCUMENT_VISITS, JsonStore, PairingService,
        PostManager, StoreError, VisitCounter,
    },
    types::{PairingCode, Post, Visits},
    upstream::UpstreamClient,
};

/// Everything a handler can reach. Cheap to clone; all members share state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pairing: PairingService,
    pub posts: PostManager,
    pub visits: VisitCounter,
    pub chat: Arc<ChatLog>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(store: Arc<JsonStore>, upstream: UpstreamClient) -> Self {
        Self {
            pairing: PairingService::new(Arc::clone(&store)),
            posts: PostManager::new(Arc::clone(&store)),
            visits: VisitCounter::new(store),
            chat: Arc::new(ChatLog::new()),
            upstream,
        }
    }
}

pub fn router(state: AppState, public_dir: impl Into<PathBuf>) -> Router {
    let api = Router::new()
        .route("/ai", post(api::ai))
        .route("/song", get(api::song))
        .route("/image", post(api::image))
        .route("/tiktok", get(api::tiktok))
        .route("/pies/{category}", get(api::pies))
        .route("/pair", post(api::pair))
        .route("/verify-pair", post(api::verify_pair))
        .route("/posts", get(api::list_posts).post(api::create_post))
        .route("/posts/{id}", delete(api::delete_post))
        .route("/stats", get(api::stats))
        .route("/visit", post(api::track_visit))
        .route("/chat", get(api::chat_history).post(api::post_chat));

    Router::new()
        .route("/health", get(api::health))
        .nest("/api", api)
        .fallback_service(ServeDir::new(public_dir.into()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the data files the gateway expects when they are missing.
/// Returns the names of the files that were written.
pub async fn seed_store(store: &JsonStore) -> Result<Vec<&'static str>, StoreError> {
    let mut seeded = Vec::new();

    if store.seed(COLLECTION_PAIRS, &Vec::<PairingCode>::new()).await? {
        seeded.push(COLLECTION_PAIRS);
    }
    if store.seed(COLLECTION_POSTS, &Vec::<Post>::new()).await? {
        seeded.push(COLLECTION_POSTS);
    }

    let visits = Visits {
        count: 0,
        last_visit: Some(Utc::now()),
    };
    if store.seed(DOCUMENT_VISITS, &visits).await? {
        seeded.push(DOCUMENT_VISITS);
    }

    Ok(seeded)
}

pub async fn start_api_server(state: AppState, addr: &str, public_dir: PathBuf) -> Res<()> {
    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state, public_dir)).await?;
    Ok(())
}
