use std::sync::Arc;

use chrono::Utc;
use tabled::Table;

use crate::{
    config, error, info,
    management::{JsonStore, PairingError, PairingService},
    success,
    types::PairingTableRow,
    utils, warning,
};

fn service() -> PairingService {
    PairingService::new(Arc::new(JsonStore::new(config::data_dir())))
}

/// Issues a code from the command line against the same store the server uses.
pub async fn issue(number: &str) {
    match service().issue(number).await {
        Ok(issued) => {
            success!("{}", issued.message);
            info!("Code: {}", issued.code);
        }
        Err(PairingError::InvalidInput) => {
            error!("Invalid phone number: expected at least 10 characters")
        }
        Err(e) => error!("Cannot issue pair code: {}", e),
    }
}

pub async fn verify(code: &str) {
    if !utils::is_pair_code_shaped(code) {
        warning!("{} does not look like a pairing code", code);
    }

    match service().verify(code).await {
        Ok(verified) => success!("{} Number: {}", verified.message, verified.number),
        Err(PairingError::StoreUnavailable(e)) => error!("Verification failed: {}", e),
        Err(_) => error!("Invalid or expired pair code"),
    }
}

/// Prints stored codes as a table, oldest first.
///
/// With `active_only`, consumed and expired codes are left out.
pub async fn list(active_only: bool) {
    let codes = match service().all().await {
        Ok(codes) => codes,
        Err(e) => error!("Cannot read pair codes: {}", e),
    };

    let now = Utc::now();
    let rows: Vec<PairingTableRow> = codes
        .into_iter()
        .filter(|c| !active_only || c.is_active_at(now))
        .map(|c| PairingTableRow {
            state: c.state_at(now).to_string(),
            created: c.created.format("%Y-%m-%d %H:%M").to_string(),
            expires: c.expires.format("%Y-%m-%d %H:%M").to_string(),
            code: c.code,
            number: c.number,
        })
        .collect();

    if rows.is_empty() {
        warning!("No pair codes found.");
        return;
    }

    println!("{}", Table::new(rows));
}
