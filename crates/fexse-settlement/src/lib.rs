//! # FEXSE Settlement - Atomic Peer-to-Peer Trades
//!
//! Orchestrates a single atomic trade: validates both parties' approvals,
//! balances and compliance status, moves payment value from buyer to seller
//! net of a basis-point service fee, moves shares from seller to buyer, and
//! credits the fee (plus an optional gas-cost surcharge) to a fee sink.
//!
//! ## Atomicity
//!
//! There is no persisted intermediate state and no retry path: every
//! precondition (including the gas surcharge, which is read from the meter
//! up front) is verified before the first value movement, so a settlement
//! either commits whole or returns an error with nothing changed.
//!
//! ## Reentrancy
//!
//! The engine holds a non-reentrant guard for the duration of each
//! settlement. A collaborator that re-enters the settlement path mid-trade
//! (the classic cross-ledger callback hazard) gets `ReentrantCall` instead
//! of interleaved state.

pub mod engine;
pub mod error;
pub mod events;

pub use engine::{SettlementConfig, SettlementEngine, SettlementReceipt};
pub use error::{Result, SettlementError};
pub use events::SettlementEvent;
