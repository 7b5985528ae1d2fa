//! # CLI Module
//!
//! Command implementations behind the `pairgate` binary.
//!
//! ## Commands
//!
//! - [`serve`] - Seeds the data directory and runs the HTTP gateway
//! - [`pair_issue`] - Issues a pairing code for a phone number
//! - [`pair_verify`] - Consumes a pairing code and prints its number
//! - [`pair_list`] - Shows stored codes with their current state
//!
//! The `pair` commands work on the same flat files as a running server and
//! go through the same [`crate::management::PairingService`], so the store's
//! writer lock and expiry rules apply identically. The lock is per process:
//! running them while a server is writing is last-write-wins between the two.
//!
//! ## Usage Patterns
//!
//! ```bash
//! pairgate serve --open
//! pairgate pair issue 15551234567
//! pairgate pair verify 7KQ2MXPA
//! pairgate pair list --active
//! ```
//!
//! Fatal problems are reported through the crate's `error!` macro, which
//! prints and exits with status 1.

mod pair;
mod serve;

pub use pair::issue as pair_issue;
pub use pair::list as pair_list;
pub use pair::verify as pair_verify;
pub use serve::serve;
