//! # FEXSE Assets - Asset Registry & Share Ledgers
//!
//! Per-asset fractional ownership accounting for tokenized real-world assets.
//!
//! ## Architecture
//!
//! - One [`ShareLedger`] per asset (the hardened one-ledger-per-asset layout;
//!   a shared multi-asset ledger is deliberately not supported)
//! - The [`AssetRegistry`] owns every asset record and its ledger; all share
//!   movements go through the registry, which applies the holdings-update
//!   callback synchronously after each ledger mutation
//! - The holder set is an `IndexSet`: order-preserving iteration for ranged
//!   distribution, O(1) `swap_remove` when a holder's balance reaches zero
//!
//! The holdings-update callback is a crate-private function: nothing outside
//! this crate can mutate holdings or the holder set, so the rule "only the
//! asset's own share ledger may report balance changes" is enforced by
//! visibility instead of by runtime identity checks.

pub mod error;
pub mod events;
pub mod registry;
pub mod share_ledger;

pub use error::{AssetError, Result};
pub use events::AssetEvent;
pub use registry::{AssetInfo, AssetRegistry, UserPosition};
pub use share_ledger::ShareLedger;
