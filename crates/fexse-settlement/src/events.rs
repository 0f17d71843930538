//! Settlement event records

use fexse_core::{AccountId, AssetId, Balance, Currency, OrderId};
use serde::{Deserialize, Serialize};

/// Settlement events
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SettlementEvent {
    /// One trade settled atomically
    Executed {
        order_id: OrderId,
        asset_id: AssetId,
        seller: AccountId,
        buyer: AccountId,
        share_amount: Balance,
        unit_price: Balance,
        currency: Currency,
        gross_value: Balance,
        service_fee: Balance,
        gas_surcharge: Balance,
        at: i64,
    },
}
