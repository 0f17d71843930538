//! Error types for ledger operations

use fexse_core::Balance;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur on a balance book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Zero-amount operations are always rejected
    #[error("amount must be nonzero")]
    ZeroAmount,

    /// Free balance (balance minus locked) does not cover the debit
    #[error("insufficient balance: requested {requested}, free {free}")]
    InsufficientBalance { requested: Balance, free: Balance },

    /// Lock request exceeds the free balance
    #[error("cannot lock {requested}: only {free} free")]
    LockExceedsFree { requested: Balance, free: Balance },

    /// Unlock request exceeds the currently locked amount
    #[error("cannot unlock {requested}: only {locked} locked")]
    InsufficientLocked { requested: Balance, locked: Balance },

    /// Delegated transfer exceeds the granted allowance
    #[error("insufficient allowance: requested {requested}, granted {granted}")]
    InsufficientAllowance { requested: Balance, granted: Balance },

    /// Credit would overflow the balance type
    #[error("balance overflow")]
    Overflow,
}
