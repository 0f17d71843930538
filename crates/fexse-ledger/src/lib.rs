//! # FEXSE Ledger - Lockable Balance Books
//!
//! Balance accounting shared by the whole platform.
//!
//! ## Contents
//!
//! - [`LockableBook`]: a generic balance book with a locked-amount overlay.
//!   Locking reserves units against an account's free balance so they cannot
//!   be spent until explicitly released; debits always check
//!   `balance - locked >= amount`. One abstraction backs both the per-asset
//!   share ledgers and the payment ledger.
//! - [`PaymentLedger`]: the FEXSE/USDT settlement-currency ledger with
//!   transfer, allowance-based delegated transfer, and the same lock overlay.
//!
//! A lock is a claim on *some* units of a balance, not on specific token
//! serials: transfers that leave the locked portion covered are unaffected.

pub mod error;
pub mod lockable;
pub mod payment;

pub use error::{LedgerError, Result};
pub use lockable::LockableBook;
pub use payment::PaymentLedger;
