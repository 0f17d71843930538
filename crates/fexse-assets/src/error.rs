//! Error types for asset registry operations

use fexse_core::{AccountId, AssetId, Balance};
use fexse_ledger::LedgerError;
use thiserror::Error;

/// Result type alias for asset operations
pub type Result<T> = std::result::Result<T, AssetError>;

/// Errors that can occur in the asset registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Asset id zero is the "does not exist" sentinel
    #[error("asset id zero is reserved")]
    ZeroAssetId,

    /// No asset registered under this id
    #[error("asset not found: {0}")]
    AssetNotFound(AssetId),

    /// An asset already exists under this id
    #[error("asset already exists: {0}")]
    AssetExists(AssetId),

    /// Assets must be created with a nonzero share supply
    #[error("total shares must be nonzero")]
    ZeroTotalShares,

    /// Nominal price must be nonzero
    #[error("nominal price must be nonzero")]
    ZeroPrice,

    /// Caller lacks the required role
    #[error("account {0} is not authorized for this operation")]
    Unauthorized(AccountId),

    /// Caller is neither the share owner nor an approved operator
    #[error("account {caller} is not an approved operator for {owner}")]
    NotOperator { owner: AccountId, caller: AccountId },

    /// A sale listing already exists for this holder and asset
    #[error("holder {0} already has an active sale listing on {1}")]
    ListingExists(AccountId, AssetId),

    /// No active sale listing, or the listing is smaller than requested
    #[error("no sale listing covering {requested} shares (listed: {listed})")]
    ListingTooSmall { requested: Balance, listed: Balance },

    /// Underlying balance-book failure
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
