mod chat;
mod pairing;
mod posts;
mod stats;
mod store;
mod visits;

pub use chat::CHAT_CAPACITY;
pub use chat::CHAT_READ_WINDOW;
pub use chat::ChatLog;
pub use pairing::PAIR_CODE_TTL_HOURS;
pub use pairing::PairingError;
pub use pairing::PairingService;
pub use posts::PostError;
pub use posts::PostManager;
pub use stats::collect_stats;
pub use store::COLLECTION_PAIRS;
pub use store::COLLECTION_POSTS;
pub use store::DOCUMENT_VISITS;
pub use store::JsonStore;
pub use store::StoreError;
pub use visits::VisitCounter;
