//! Registry event records
//!
//! Every externally observable registry mutation appends one of these to the
//! registry's event history, timestamped at commit.

use fexse_core::{AccountId, AssetId, Balance};
use serde::{Deserialize, Serialize};

/// Asset registry events
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AssetEvent {
    /// New asset created and its full supply minted to the treasury
    AssetCreated {
        asset_id: AssetId,
        total_shares: Balance,
        nominal_price: Balance,
        initial_holder: AccountId,
        at: i64,
    },

    /// Operator overwrote the nominal per-share price
    NominalPriceUpdated {
        asset_id: AssetId,
        old_price: Balance,
        new_price: Balance,
        at: i64,
    },

    /// Operator replaced the metadata URI
    MetadataUpdated { asset_id: AssetId, at: i64 },

    /// Holder dropped to zero balance and was purged; any unclaimed
    /// pending profit was forfeited (recorded policy, see DESIGN.md)
    HolderPurged {
        asset_id: AssetId,
        account: AccountId,
        forfeited_profit: Balance,
        at: i64,
    },

    /// Holder listed shares for peer-to-peer resale
    SharesListed {
        asset_id: AssetId,
        seller: AccountId,
        amount: Balance,
        sale_price: Balance,
        at: i64,
    },

    /// Holder withdrew a sale listing
    ListingCancelled {
        asset_id: AssetId,
        seller: AccountId,
        amount: Balance,
        at: i64,
    },
}
