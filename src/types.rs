use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tabled::Tabled;
use uuid::Uuid;

/// A single-use pairing code bound to a caller-supplied phone number.
///
/// Field names on disk follow the gateway's historical layout
/// (`created`, `expires`, `usedAt`) so existing `pairs.json` files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingCode {
    pub id: Uuid,
    pub code: String,
    pub number: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub used: bool,
    #[serde(rename = "usedAt", default, skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
}

/// Lifecycle position of a [`PairingCode`] at a given instant.
///
/// `Expired` is never stored; it is derived from `expires` and the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingState {
    Active,
    Consumed,
    Expired,
}

impl std::fmt::Display for PairingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PairingState::Active => "active",
            PairingState::Consumed => "consumed",
            PairingState::Expired => "expired",
        };
        f.write_str(label)
    }
}

impl PairingCode {
    pub fn state_at(&self, now: DateTime<Utc>) -> PairingState {
        if self.used {
            PairingState::Consumed
        } else if now < self.expires {
            PairingState::Active
        } else {
            PairingState::Expired
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == PairingState::Active
    }
}

#[derive(Tabled)]
pub struct PairingTableRow {
    pub code: String,
    pub number: String,
    pub created: String,
    pub expires: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedCode {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifiedCode {
    pub number: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairRequest {
    pub number: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPairRequest {
    pub code: Option<String>,
}

/// An admin post. Apart from `id` and `time` the shape is whatever the
/// admin panel sends, so the remaining fields are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub time: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Visits {
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "lastVisit", default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_posts: usize,
    pub total_visits: u64,
    pub active_users: u32,
    pub pair_codes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub avatar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub user: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiRequest {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongQuery {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiktokQuery {
    pub username: Option<String>,
}
