//! Error types for settlement operations

use fexse_assets::AssetError;
use fexse_core::{AccountId, Balance, ComplianceError};
use fexse_ledger::LedgerError;
use thiserror::Error;

/// Result type alias for settlement operations
pub type Result<T> = std::result::Result<T, SettlementError>;

/// Errors that can occur in the settlement engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// A settlement re-entered the engine while one was in flight
    #[error("settlement re-entered while another is in flight")]
    ReentrantCall,

    /// Caller lacks the settlement-operator role
    #[error("account {0} is not authorized to execute settlements")]
    Unauthorized(AccountId),

    /// Seller or buyer is the null account
    #[error("trade party must not be the null account")]
    InvalidParty,

    /// Zero shares cannot be traded
    #[error("share amount must be nonzero")]
    ZeroShareAmount,

    /// Zero unit price is rejected
    #[error("unit price must be nonzero")]
    ZeroUnitPrice,

    /// Seller has not approved the settlement operator over their shares
    #[error("seller {0} has not approved the settlement operator")]
    SellerNotApproved(AccountId),

    /// Seller's transferable shares do not cover the trade
    #[error("seller holds {available} free shares, trade needs {requested}")]
    InsufficientSellerShares {
        requested: Balance,
        available: Balance,
    },

    /// Compliance collaborator rejected a party
    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    /// Registry-side failure
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Payment-side failure (allowance or balance short)
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
