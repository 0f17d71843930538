//! Distribution event records

use fexse_core::{AccountId, AssetId, Balance};
use serde::{Deserialize, Serialize};

/// Profit distribution events
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DistributionEvent {
    /// One contiguous snapshot range was credited
    RangeDistributed {
        asset_id: AssetId,
        start: usize,
        end: usize,
        credited: Balance,
        at: i64,
    },

    /// The full snapshot sweep completed; accumulator and timestamp updated
    DistributionFinalized {
        asset_id: AssetId,
        profit_amount: Balance,
        profit_per_share: Balance,
        at: i64,
    },

    /// Holder claimed pending profit across one or more assets
    ProfitClaimed {
        account: AccountId,
        asset_ids: Vec<AssetId>,
        profit_value: Balance,
        payout: Balance,
        at: i64,
    },
}
