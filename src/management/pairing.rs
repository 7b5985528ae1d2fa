use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::store::{COLLECTION_PAIRS, JsonStore, StoreError};
use crate::{
    types::{IssuedCode, PairingCode, VerifiedCode},
    utils,
};

pub const PAIR_CODE_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum PairingError {
    #[error("invalid phone number")]
    InvalidInput,
    /// Unknown, already consumed and expired codes all end up here on purpose.
    #[error("invalid or expired pair code")]
    NotFoundOrExpired,
    #[error("pair code store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Issues and verifies single-use pairing codes.
///
/// The service is the only writer of the `pairs` collection. Each operation
/// is a whole-collection read-modify-write performed under the store's
/// writer lock, so two verifications of the same code cannot both succeed and
/// two issuances cannot drop each other's record.
#[derive(Debug, Clone)]
pub struct PairingService {
    store: Arc<JsonStore>,
}

impl PairingService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn issue(&self, number: &str) -> Result<IssuedCode, PairingError> {
        self.issue_at(number, Utc::now()).await
    }

    pub async fn issue_at(
        &self,
        number: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedCode, PairingError> {
        if !utils::is_valid_number(number) {
            return Err(PairingError::InvalidInput);
        }

        // No uniqueness check against active codes; on a collision the
        // earliest issued record is the one verification consumes.
        let record = PairingCode {
            id: Uuid::new_v4(),
            code: utils::generate_pair_code(),
            number: number.to_string(),
            created: now,
            expires: now + Duration::hours(PAIR_CODE_TTL_HOURS),
            used: false,
            used_at: None,
        };
        let code = record.code.clone();

        self.store
            .update_collection(COLLECTION_PAIRS, |pairs: &mut Vec<PairingCode>| {
                pairs.push(record);
                Ok::<_, PairingError>(())
            })
            .await?;

        Ok(IssuedCode {
            message: format!("Pair code generated for {number}. Valid for 24 hours."),
            code,
        })
    }

    pub async fn verify(&self, code: &str) -> Result<VerifiedCode, PairingError> {
        self.verify_at(code, Utc::now()).await
    }

    pub async fn verify_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedCode, PairingError> {
        self.store
            .update_collection(
                COLLECTION_PAIRS,
                |pairs: &mut Vec<PairingCode>| -> Result<VerifiedCode, PairingError> {
                    let pair = pairs
                        .iter_mut()
                        .find(|p| p.code == code && p.is_active_at(now))
                        .ok_or(PairingError::NotFoundOrExpired)?;

                    pair.used = true;
                    pair.used_at = Some(now);

                    Ok(VerifiedCode {
                        number: pair.number.clone(),
                        message: "Pair code verified successfully!".to_string(),
                    })
                },
            )
            .await
    }

    /// Returns every stored code in issuance order.
    pub async fn all(&self) -> Result<Vec<PairingCode>, PairingError> {
        Ok(self.store.load_collection(COLLECTION_PAIRS).await?)
    }

    pub async fn count(&self) -> Result<usize, PairingError> {
        Ok(self.all().await?.len())
    }
}
