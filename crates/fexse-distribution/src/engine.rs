//! Profit distribution engine

use crate::error::{DistributionError, Result};
use crate::events::DistributionEvent;
use fexse_assets::AssetRegistry;
use fexse_core::{AccessControl, AccountId, AssetId, Balance, Currency, RateOracle, Role};
use fexse_ledger::{LedgerError, PaymentLedger};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A running ranged-distribution campaign
///
/// The snapshot is taken at `begin_distribution` and never changes: transfers
/// landing between ranged calls cannot skew the sweep.
struct Campaign {
    profit_amount: Balance,
    profit_per_share: Balance,
    snapshot: Vec<(AccountId, Balance)>,
    /// Next snapshot index to credit
    cursor: usize,
    started_at: i64,
}

/// Public view of a campaign's progress
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignStatus {
    pub asset_id: AssetId,
    pub profit_amount: Balance,
    pub profit_per_share: Balance,
    pub snapshot_len: usize,
    pub cursor: usize,
    pub started_at: i64,
}

/// Pro-rata profit distribution and claim settlement
pub struct DistributionEngine {
    registry: Arc<AssetRegistry>,
    payments: Arc<PaymentLedger>,
    oracle: Arc<dyn RateOracle>,
    access: Arc<dyn AccessControl>,
    /// Account profit claims are paid from
    funding: AccountId,
    campaigns: RwLock<HashMap<AssetId, Campaign>>,
    events: RwLock<Vec<DistributionEvent>>,
}

impl DistributionEngine {
    pub fn new(
        registry: Arc<AssetRegistry>,
        payments: Arc<PaymentLedger>,
        oracle: Arc<dyn RateOracle>,
        access: Arc<dyn AccessControl>,
        funding: AccountId,
    ) -> Self {
        Self {
            registry,
            payments,
            oracle,
            access,
            funding,
            campaigns: RwLock::new(HashMap::new()),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Distribute `profit_amount` across the current holder set in one pass
    ///
    /// Equivalent to a campaign swept end-to-end in a single call.
    pub fn distribute_profit(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        profit_amount: Balance,
    ) -> Result<()> {
        let snapshot_len = self.begin_distribution(caller, asset_id, profit_amount)?;
        if snapshot_len > 0 {
            self.distribute_range(caller, asset_id, 0, snapshot_len - 1)?;
        }
        Ok(())
    }

    /// Start a ranged distribution campaign: snapshots the holder set and
    /// fixes `profit_per_share`; returns the snapshot length
    ///
    /// An empty holder set finalizes immediately (the full amount is dust).
    pub fn begin_distribution(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        profit_amount: Balance,
    ) -> Result<usize> {
        self.ensure_distributor(caller)?;
        if profit_amount == 0 {
            return Err(DistributionError::ZeroProfit);
        }
        let info = self.registry.asset_info(asset_id)?;

        let mut campaigns = self.campaigns.write();
        if campaigns.contains_key(&asset_id) {
            return Err(DistributionError::CampaignActive(asset_id));
        }

        let snapshot = self.registry.holder_snapshot(asset_id)?;
        let profit_per_share = profit_amount / info.total_shares;
        let now = chrono::Utc::now().timestamp();
        let snapshot_len = snapshot.len();

        if snapshot_len == 0 {
            self.finalize(asset_id, profit_amount, profit_per_share, now)?;
            return Ok(0);
        }

        campaigns.insert(
            asset_id,
            Campaign {
                profit_amount,
                profit_per_share,
                snapshot,
                cursor: 0,
                started_at: now,
            },
        );
        debug!(%asset_id, profit_amount, profit_per_share, snapshot_len, "distribution campaign started");
        Ok(snapshot_len)
    }

    /// Credit the inclusive snapshot range `[start, end]`
    ///
    /// Ranges must be contiguous from the campaign cursor. When the sweep
    /// reaches the end of the snapshot the campaign finalizes: the asset's
    /// profit accumulator and distribution timestamp are updated and the
    /// campaign is dropped.
    pub fn distribute_range(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        start: usize,
        end: usize,
    ) -> Result<()> {
        self.ensure_distributor(caller)?;

        let mut campaigns = self.campaigns.write();
        let campaign = campaigns
            .get_mut(&asset_id)
            .ok_or(DistributionError::NoCampaign(asset_id))?;

        if start != campaign.cursor {
            return Err(DistributionError::NonContiguousRange {
                expected: campaign.cursor,
                got: start,
            });
        }
        let len = campaign.snapshot.len();
        if end < start || end >= len {
            return Err(DistributionError::RangeOutOfBounds { end, len });
        }

        let mut credited: Balance = 0;
        for &(holder, holdings) in &campaign.snapshot[start..=end] {
            let share = holdings
                .checked_mul(campaign.profit_per_share)
                .ok_or(LedgerError::Overflow)?;
            // Holders purged since the snapshot forfeit their in-flight share
            credited += self
                .registry
                .credit_pending_profit(asset_id, &holder, share)?;
        }
        campaign.cursor = end + 1;

        let now = chrono::Utc::now().timestamp();
        self.events.write().push(DistributionEvent::RangeDistributed {
            asset_id,
            start,
            end,
            credited,
            at: now,
        });

        if campaign.cursor == len {
            let (amount, pps) = (campaign.profit_amount, campaign.profit_per_share);
            campaigns.remove(&asset_id);
            drop(campaigns);
            self.finalize(asset_id, amount, pps, now)?;
        }
        Ok(())
    }

    /// Progress of the running campaign, if any
    pub fn campaign_status(&self, asset_id: AssetId) -> Option<CampaignStatus> {
        self.campaigns.read().get(&asset_id).map(|c| CampaignStatus {
            asset_id,
            profit_amount: c.profit_amount,
            profit_per_share: c.profit_per_share,
            snapshot_len: c.snapshot.len(),
            cursor: c.cursor,
            started_at: c.started_at,
        })
    }

    /// Claim pending profit on a single asset
    pub fn claim_profit(&self, caller: &AccountId, asset_id: AssetId) -> Result<Balance> {
        self.claim_profit_multi(caller, &[asset_id])
    }

    /// Claim pending profit across several assets in one payout
    ///
    /// All-or-nothing: every named asset must carry nonzero pending profit
    /// for the caller, and the funding account must cover the aggregate
    /// payout, or nothing is touched. Returns the payment-token amount paid.
    pub fn claim_profit_multi(&self, caller: &AccountId, asset_ids: &[AssetId]) -> Result<Balance> {
        if asset_ids.is_empty() {
            return Err(DistributionError::EmptyClaim);
        }

        // Validate the whole batch before mutating anything. Each asset may
        // appear once: pending profit is summed per occurrence but cleared
        // per asset, so a repeated id would be paid twice.
        let mut profit_value: Balance = 0;
        for (i, &asset_id) in asset_ids.iter().enumerate() {
            if asset_ids[..i].contains(&asset_id) {
                return Err(DistributionError::DuplicateAsset(asset_id));
            }
            let pending = self.registry.pending_profit(asset_id, caller)?;
            if pending == 0 {
                return Err(DistributionError::NothingToClaim(asset_id));
            }
            profit_value = profit_value
                .checked_add(pending)
                .ok_or(LedgerError::Overflow)?;
        }

        let payout = self
            .oracle
            .convert(profit_value)
            .ok_or(LedgerError::Overflow)?;
        let free = self.payments.free_of(Currency::Fexse, &self.funding);
        if free < payout {
            return Err(DistributionError::Ledger(LedgerError::InsufficientBalance {
                requested: payout,
                free,
            }));
        }

        // Single aggregated transfer, then zero the pending balances
        self.payments
            .transfer(Currency::Fexse, self.funding, *caller, payout)?;
        for &asset_id in asset_ids {
            self.registry.clear_pending_profit(asset_id, caller)?;
        }

        let now = chrono::Utc::now().timestamp();
        self.events.write().push(DistributionEvent::ProfitClaimed {
            account: *caller,
            asset_ids: asset_ids.to_vec(),
            profit_value,
            payout,
            at: now,
        });
        info!(account = %caller, assets = asset_ids.len(), profit_value, payout, "profit claimed");
        Ok(payout)
    }

    /// Event history since construction
    pub fn events(&self) -> Vec<DistributionEvent> {
        self.events.read().clone()
    }

    fn finalize(
        &self,
        asset_id: AssetId,
        profit_amount: Balance,
        profit_per_share: Balance,
        now: i64,
    ) -> Result<()> {
        self.registry.finalize_distribution(asset_id, profit_amount)?;
        self.events
            .write()
            .push(DistributionEvent::DistributionFinalized {
                asset_id,
                profit_amount,
                profit_per_share,
                at: now,
            });
        info!(%asset_id, profit_amount, profit_per_share, "distribution finalized");
        Ok(())
    }

    fn ensure_distributor(&self, caller: &AccountId) -> Result<()> {
        if self.access.has_role(Role::Distributor, caller) {
            Ok(())
        } else {
            Err(DistributionError::Unauthorized(*caller))
        }
    }
}
