//! Error types for profit distribution and claims

use fexse_assets::AssetError;
use fexse_core::{AccountId, AssetId};
use fexse_ledger::LedgerError;
use thiserror::Error;

/// Result type alias for distribution operations
pub type Result<T> = std::result::Result<T, DistributionError>;

/// Errors that can occur in the distribution engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    /// Distributions of zero profit are rejected
    #[error("profit amount must be nonzero")]
    ZeroProfit,

    /// Caller lacks the distributor role
    #[error("account {0} is not authorized to distribute profit")]
    Unauthorized(AccountId),

    /// A distribution campaign is already running for this asset
    #[error("distribution campaign already active for {0}")]
    CampaignActive(AssetId),

    /// No campaign to sweep; call begin_distribution first
    #[error("no active distribution campaign for {0}")]
    NoCampaign(AssetId),

    /// Ranges must be swept contiguously from the campaign cursor, so each
    /// snapshot entry is credited exactly once
    #[error("range must start at the campaign cursor {expected}, got {got}")]
    NonContiguousRange { expected: usize, got: usize },

    /// Range end past the snapshot
    #[error("range end {end} outside snapshot of length {len}")]
    RangeOutOfBounds { end: usize, len: usize },

    /// Claims must name at least one asset
    #[error("claim names no assets")]
    EmptyClaim,

    /// Claims may name each asset at most once; a repeated id would be
    /// counted twice in the payout but cleared only once
    #[error("asset {0} named more than once in one claim")]
    DuplicateAsset(AssetId),

    /// All-or-nothing claims: every named asset needs nonzero pending profit
    #[error("nothing to claim on {0}")]
    NothingToClaim(AssetId),

    /// Registry-side failure
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Payment-side failure (funding account short, etc.)
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
