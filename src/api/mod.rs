//! # API Module
//!
//! HTTP handlers of the gateway, grouped by concern:
//!
//! - **Pairing** ([`pair`], [`verify_pair`]): issue and consume single-use
//!   pairing codes. This is the only stateful workflow with real invariants.
//! - **Admin** ([`list_posts`], [`create_post`], [`delete_post`], [`stats`],
//!   [`track_visit`]): small read-modify-write operations on flat JSON files.
//! - **Chat** ([`chat_history`], [`post_chat`]): bounded in-memory message log.
//! - **Proxy** ([`ai`], [`song`], [`image`], [`tiktok`], [`pies`]): relay a
//!   request to a third-party API and hand back its response.
//! - **Monitoring** ([`health`]).
//!
//! Request bodies are read through [`JsonOrForm`], so every `POST` endpoint
//! takes JSON as well as urlencoded form data.
//!
//! Every failure leaves through [`ApiError`], so clients always receive a JSON
//! body of the form `{ "error": "..." }` and never an internal detail.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use pairgate::server::{AppState, router};
//!
//! let app = router(state);
//! axum::serve(listener, app).await?;
//! ```

mod admin;
mod chat;
mod error;
mod extract;
mod health;
mod pairing;
mod proxy;

pub use admin::create_post;
pub use admin::delete_post;
pub use admin::list_posts;
pub use admin::stats;
pub use admin::track_visit;
pub use chat::chat_history;
pub use chat::post_chat;
pub use error::ApiError;
pub use extract::JsonOrForm;
pub use health::health;
pub use pairing::pair;
pub use pairing::verify_pair;
pub use proxy::ai;
pub use proxy::image;
pub use proxy::pies;
pub use proxy::song;
pub use proxy::tiktok;
