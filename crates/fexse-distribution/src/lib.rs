//! # FEXSE Distribution - Pro-Rata Profit Engine
//!
//! Computes and credits per-holder pending profit for a tokenized asset, and
//! settles holder claims against a funding account.
//!
//! ## Distribution model
//!
//! `profit_per_share = profit_amount / total_shares` with integer division:
//! the truncated remainder ("dust") is never distributed and is an accepted
//! loss, not an error.
//!
//! Large holder sets are handled by **campaigns**: `begin_distribution`
//! snapshots the holder set, `distribute_range` sweeps contiguous inclusive
//! ranges of the snapshot, and bookkeeping (`total_profit_accrued`, the
//! distribution timestamp) finalizes only when the sweep reaches the end of
//! the snapshot. Because credits are computed against the snapshot, transfers
//! that land between ranged calls can neither double-count nor skip a holder.
//!
//! ## Claims
//!
//! Claims are caller-initiated and all-or-nothing across the requested asset
//! ids: every id must carry nonzero pending profit, and the aggregate payout
//! is made in a single FEXSE transfer from the funding account.

pub mod engine;
pub mod error;
pub mod events;

pub use engine::{CampaignStatus, DistributionEngine};
pub use error::{DistributionError, Result};
pub use events::DistributionEvent;
