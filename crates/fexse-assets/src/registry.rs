//! Asset registry
//!
//! Maps asset ids to their share ledger, pricing, profit accumulator, holder
//! set and per-holder positions. The registry is the single writer for
//! holdings and the holder set: every ledger mutation is followed
//! synchronously by the holdings-update callback, which mutates local state
//! only and calls nothing external.

use crate::error::{AssetError, Result};
use crate::events::AssetEvent;
use crate::share_ledger::ShareLedger;
use fexse_core::{AccessControl, AccountId, AssetId, Balance, Role};
use indexmap::IndexSet;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-asset, per-holder position
///
/// `holdings` is a derived cache of the share ledger's authoritative balance,
/// kept in sync by the holdings-update callback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPosition {
    /// Current owned share count
    pub holdings: Balance,
    /// Accrued, unclaimed profit-value
    pub pending_profit: Balance,
    /// Shares currently locked behind a resale listing
    pub shares_for_sale: Balance,
    /// Per-share asking price of the active listing
    pub sale_price: Balance,
}

/// Public summary view of an asset record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetInfo {
    pub asset_id: AssetId,
    pub total_shares: Balance,
    pub nominal_price: Balance,
    pub total_profit_accrued: Balance,
    pub last_distribution_at: Option<i64>,
    pub metadata_uri: String,
    pub holder_count: usize,
}

/// Internal asset record; owns the asset's dedicated share ledger
struct Asset {
    id: AssetId,
    total_shares: Balance,
    nominal_price: Balance,
    total_profit_accrued: Balance,
    last_distribution_at: Option<i64>,
    metadata_uri: String,
    ledger: ShareLedger,
    /// Addresses with nonzero holdings; swap_remove keeps removal O(1)
    holders: IndexSet<AccountId>,
    positions: HashMap<AccountId, UserPosition>,
}

/// Registry of all tokenized assets
pub struct AssetRegistry {
    assets: RwLock<HashMap<AssetId, Asset>>,
    access: Arc<dyn AccessControl>,
    /// Initial holder of every newly minted share supply
    treasury: AccountId,
    events: RwLock<Vec<AssetEvent>>,
}

impl AssetRegistry {
    pub fn new(access: Arc<dyn AccessControl>, treasury: AccountId) -> Self {
        Self {
            assets: RwLock::new(HashMap::new()),
            access,
            treasury,
            events: RwLock::new(Vec::new()),
        }
    }

    /// The account that receives every freshly minted share supply
    pub fn treasury(&self) -> AccountId {
        self.treasury
    }

    // === Administrative operations ===

    /// Create a new asset and mint its full share supply to the treasury
    ///
    /// Rejects the zero sentinel id, duplicate ids, and zero supply/price.
    /// Nothing is persisted on failure.
    pub fn create_asset(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        total_shares: Balance,
        nominal_price: Balance,
        metadata_uri: String,
    ) -> Result<AssetId> {
        self.ensure_role(Role::Admin, caller)?;
        if asset_id.is_zero() {
            return Err(AssetError::ZeroAssetId);
        }
        if total_shares == 0 {
            return Err(AssetError::ZeroTotalShares);
        }
        if nominal_price == 0 {
            return Err(AssetError::ZeroPrice);
        }

        let mut assets = self.assets.write();
        if assets.contains_key(&asset_id) {
            return Err(AssetError::AssetExists(asset_id));
        }

        let mut asset = Asset {
            id: asset_id,
            total_shares,
            nominal_price,
            total_profit_accrued: 0,
            last_distribution_at: None,
            metadata_uri,
            ledger: ShareLedger::new(asset_id),
            holders: IndexSet::new(),
            positions: HashMap::new(),
        };

        asset.ledger.mint(self.treasury, total_shares)?;
        let now = chrono::Utc::now().timestamp();
        let mut events = self.events.write();
        apply_holdings_update(&mut asset, self.treasury, total_shares, &mut events, now);

        events.push(AssetEvent::AssetCreated {
            asset_id,
            total_shares,
            nominal_price,
            initial_holder: self.treasury,
            at: now,
        });
        assets.insert(asset_id, asset);

        info!(%asset_id, total_shares, nominal_price, "asset created");
        Ok(asset_id)
    }

    /// Overwrite the nominal per-share price
    pub fn update_nominal_price(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        new_price: Balance,
    ) -> Result<()> {
        self.ensure_role(Role::Admin, caller)?;
        if new_price == 0 {
            return Err(AssetError::ZeroPrice);
        }
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        let old_price = asset.nominal_price;
        asset.nominal_price = new_price;
        self.events.write().push(AssetEvent::NominalPriceUpdated {
            asset_id,
            old_price,
            new_price,
            at: chrono::Utc::now().timestamp(),
        });
        debug!(%asset_id, old_price, new_price, "nominal price updated");
        Ok(())
    }

    /// Replace the metadata URI (immutable by convention, admin override)
    pub fn update_metadata_uri(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        metadata_uri: String,
    ) -> Result<()> {
        self.ensure_role(Role::Admin, caller)?;
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        asset.metadata_uri = metadata_uri;
        self.events.write().push(AssetEvent::MetadataUpdated {
            asset_id,
            at: chrono::Utc::now().timestamp(),
        });
        Ok(())
    }

    /// Administrative share lock (advisory reservation)
    pub fn lock_shares(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        account: AccountId,
        amount: Balance,
    ) -> Result<()> {
        self.ensure_role(Role::Admin, caller)?;
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        asset.ledger.lock(account, amount)?;
        Ok(())
    }

    /// Administrative share unlock
    pub fn unlock_shares(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        account: AccountId,
        amount: Balance,
    ) -> Result<()> {
        self.ensure_role(Role::Admin, caller)?;
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        asset.ledger.unlock(account, amount)?;
        Ok(())
    }

    // === Share movement ===

    /// Approve (or revoke) `operator` to move `owner`'s shares of this asset
    pub fn set_operator(
        &self,
        owner: &AccountId,
        asset_id: AssetId,
        operator: AccountId,
        approved: bool,
    ) -> Result<()> {
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        asset.ledger.set_operator(*owner, operator, approved);
        Ok(())
    }

    /// Has `owner` approved `operator` on this asset's ledger?
    pub fn is_operator(&self, asset_id: AssetId, owner: &AccountId, operator: &AccountId) -> bool {
        self.assets
            .read()
            .get(&asset_id)
            .map(|asset| asset.ledger.is_operator(owner, operator))
            .unwrap_or(false)
    }

    /// Move shares between holders
    ///
    /// The caller must be the owner or an approved operator. The transfer is
    /// checked against the sender's free (unlocked) balance, and the
    /// holdings-update callback runs once per affected party before the call
    /// returns.
    pub fn transfer_shares(
        &self,
        caller: &AccountId,
        asset_id: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Balance,
    ) -> Result<()> {
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;

        if *caller != from && !asset.ledger.is_operator(&from, caller) {
            return Err(AssetError::NotOperator {
                owner: from,
                caller: *caller,
            });
        }

        asset.ledger.transfer(from, to, amount)?;

        let from_balance = asset.ledger.balance_of(&from);
        let to_balance = asset.ledger.balance_of(&to);
        let now = chrono::Utc::now().timestamp();
        let mut events = self.events.write();
        apply_holdings_update(asset, from, from_balance, &mut events, now);
        apply_holdings_update(asset, to, to_balance, &mut events, now);

        debug!(%asset_id, %from, %to, amount, "shares transferred");
        Ok(())
    }

    // === Resale listings ===

    /// List shares for peer-to-peer resale, locking them until the listing
    /// is settled or cancelled
    pub fn list_shares_for_sale(
        &self,
        seller: &AccountId,
        asset_id: AssetId,
        amount: Balance,
        sale_price: Balance,
    ) -> Result<()> {
        if sale_price == 0 {
            return Err(AssetError::ZeroPrice);
        }
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;

        let listed = asset
            .positions
            .get(seller)
            .map(|p| p.shares_for_sale)
            .unwrap_or(0);
        if listed > 0 {
            return Err(AssetError::ListingExists(*seller, asset_id));
        }
        asset.ledger.lock(*seller, amount)?;

        // A successful lock implies a nonzero balance, hence a position
        let position = asset
            .positions
            .get_mut(seller)
            .expect("locked shares imply a holder position");
        position.shares_for_sale = amount;
        position.sale_price = sale_price;

        self.events.write().push(AssetEvent::SharesListed {
            asset_id,
            seller: *seller,
            amount,
            sale_price,
            at: chrono::Utc::now().timestamp(),
        });
        info!(%asset_id, seller = %seller, amount, sale_price, "shares listed for sale");
        Ok(())
    }

    /// Withdraw an active sale listing and release the locked shares
    pub fn cancel_sale_listing(&self, seller: &AccountId, asset_id: AssetId) -> Result<()> {
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;

        let listed = asset
            .positions
            .get(seller)
            .map(|p| p.shares_for_sale)
            .unwrap_or(0);
        if listed == 0 {
            return Err(AssetError::ListingTooSmall {
                requested: 1,
                listed: 0,
            });
        }
        asset.ledger.unlock(*seller, listed)?;
        let position = asset.positions.get_mut(seller).expect("listing implies position");
        position.shares_for_sale = 0;
        position.sale_price = 0;

        self.events.write().push(AssetEvent::ListingCancelled {
            asset_id,
            seller: *seller,
            amount: listed,
            at: chrono::Utc::now().timestamp(),
        });
        Ok(())
    }

    /// Consume `amount` shares from the seller's listing ahead of settlement:
    /// releases the lock and returns the listed per-share price
    ///
    /// Engine-facing: the settlement engine is the only composed consumer.
    pub fn consume_listing(
        &self,
        asset_id: AssetId,
        seller: &AccountId,
        amount: Balance,
    ) -> Result<Balance> {
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;

        let (listed, price) = asset
            .positions
            .get(seller)
            .map(|p| (p.shares_for_sale, p.sale_price))
            .unwrap_or((0, 0));
        if listed < amount || amount == 0 {
            return Err(AssetError::ListingTooSmall {
                requested: amount,
                listed,
            });
        }
        asset.ledger.unlock(*seller, amount)?;
        let position = asset.positions.get_mut(seller).expect("listing implies position");
        position.shares_for_sale -= amount;
        if position.shares_for_sale == 0 {
            position.sale_price = 0;
        }
        Ok(price)
    }

    // === Profit bookkeeping (distribution-engine facing) ===

    /// Snapshot of `(holder, holdings)` pairs in holder-set order
    pub fn holder_snapshot(&self, asset_id: AssetId) -> Result<Vec<(AccountId, Balance)>> {
        let assets = self.assets.read();
        let asset = assets
            .get(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        Ok(asset
            .holders
            .iter()
            .map(|holder| {
                let holdings = asset
                    .positions
                    .get(holder)
                    .map(|p| p.holdings)
                    .unwrap_or(0);
                (*holder, holdings)
            })
            .collect())
    }

    /// Credit accrued profit to a holder's pending balance
    ///
    /// Returns the credited amount: zero if the holder was purged between the
    /// distribution snapshot and this credit (the forfeiture policy applies
    /// to in-flight credits as well).
    pub fn credit_pending_profit(
        &self,
        asset_id: AssetId,
        account: &AccountId,
        amount: Balance,
    ) -> Result<Balance> {
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        match asset.positions.get_mut(account) {
            Some(position) if position.holdings > 0 => {
                position.pending_profit += amount;
                Ok(amount)
            }
            _ => Ok(0),
        }
    }

    /// Accrued, unclaimed profit for one holder
    pub fn pending_profit(&self, asset_id: AssetId, account: &AccountId) -> Result<Balance> {
        let assets = self.assets.read();
        let asset = assets
            .get(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        Ok(asset
            .positions
            .get(account)
            .map(|p| p.pending_profit)
            .unwrap_or(0))
    }

    /// Zero a holder's pending profit and return the amount taken
    pub fn clear_pending_profit(&self, asset_id: AssetId, account: &AccountId) -> Result<Balance> {
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        Ok(asset
            .positions
            .get_mut(account)
            .map(|p| std::mem::take(&mut p.pending_profit))
            .unwrap_or(0))
    }

    /// Finalize a completed distribution sweep: bump the monotone profit
    /// accumulator and stamp the distribution time
    pub fn finalize_distribution(&self, asset_id: AssetId, amount: Balance) -> Result<()> {
        let mut assets = self.assets.write();
        let asset = assets
            .get_mut(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        asset.total_profit_accrued += amount;
        asset.last_distribution_at = Some(chrono::Utc::now().timestamp());
        Ok(())
    }

    // === Queries ===

    /// Does an asset exist under this id?
    pub fn exists(&self, asset_id: AssetId) -> bool {
        self.assets.read().contains_key(&asset_id)
    }

    /// Summary view of an asset
    pub fn asset_info(&self, asset_id: AssetId) -> Result<AssetInfo> {
        let assets = self.assets.read();
        let asset = assets
            .get(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        Ok(AssetInfo {
            asset_id: asset.id,
            total_shares: asset.total_shares,
            nominal_price: asset.nominal_price,
            total_profit_accrued: asset.total_profit_accrued,
            last_distribution_at: asset.last_distribution_at,
            metadata_uri: asset.metadata_uri.clone(),
            holder_count: asset.holders.len(),
        })
    }

    /// A holder's position, if any
    pub fn position(&self, asset_id: AssetId, account: &AccountId) -> Option<UserPosition> {
        self.assets
            .read()
            .get(&asset_id)
            .and_then(|asset| asset.positions.get(account).cloned())
    }

    /// Current holder set in iteration order
    pub fn holders(&self, asset_id: AssetId) -> Result<Vec<AccountId>> {
        let assets = self.assets.read();
        let asset = assets
            .get(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        Ok(asset.holders.iter().copied().collect())
    }

    /// Number of current holders
    pub fn holder_count(&self, asset_id: AssetId) -> Result<usize> {
        let assets = self.assets.read();
        let asset = assets
            .get(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        Ok(asset.holders.len())
    }

    /// Authoritative share balance from the asset's ledger
    pub fn share_balance(&self, asset_id: AssetId, account: &AccountId) -> Balance {
        self.assets
            .read()
            .get(&asset_id)
            .map(|asset| asset.ledger.balance_of(account))
            .unwrap_or(0)
    }

    /// Locked share amount
    pub fn locked_shares(&self, asset_id: AssetId, account: &AccountId) -> Balance {
        self.assets
            .read()
            .get(&asset_id)
            .map(|asset| asset.ledger.locked_of(account))
            .unwrap_or(0)
    }

    /// Transferable (free) share amount
    pub fn free_shares(&self, asset_id: AssetId, account: &AccountId) -> Balance {
        self.assets
            .read()
            .get(&asset_id)
            .map(|asset| asset.ledger.free_of(account))
            .unwrap_or(0)
    }

    /// Sum of all circulating shares on the asset's ledger
    pub fn total_in_circulation(&self, asset_id: AssetId) -> Result<Balance> {
        let assets = self.assets.read();
        let asset = assets
            .get(&asset_id)
            .ok_or(AssetError::AssetNotFound(asset_id))?;
        Ok(asset.ledger.total_in_circulation())
    }

    /// Event history since construction
    pub fn events(&self) -> Vec<AssetEvent> {
        self.events.read().clone()
    }

    fn ensure_role(&self, role: Role, caller: &AccountId) -> Result<()> {
        if self.access.has_role(role, caller) {
            Ok(())
        } else {
            Err(AssetError::Unauthorized(*caller))
        }
    }
}

/// The holdings-update callback: the single mutation point for positions and
/// the holder set
///
/// Mirrors the ledger's post-transfer notification. Idempotent on equal
/// balance; purges the position (forfeiting unclaimed profit) on zero;
/// appends first-time holders. Mutates local state only.
fn apply_holdings_update(
    asset: &mut Asset,
    account: AccountId,
    new_balance: Balance,
    events: &mut Vec<AssetEvent>,
    now: i64,
) {
    let current = asset
        .positions
        .get(&account)
        .map(|p| p.holdings)
        .unwrap_or(0);

    if new_balance == current {
        // Re-notification with no change: no-op, no event
        return;
    }

    if new_balance == 0 {
        let forfeited = asset
            .positions
            .remove(&account)
            .map(|p| p.pending_profit)
            .unwrap_or(0);
        asset.holders.swap_remove(&account);
        if forfeited > 0 {
            warn!(
                asset_id = %asset.id, %account, forfeited,
                "holder purged with unclaimed profit; amount forfeited"
            );
        }
        events.push(AssetEvent::HolderPurged {
            asset_id: asset.id,
            account,
            forfeited_profit: forfeited,
            at: now,
        });
        return;
    }

    if current == 0 {
        asset.holders.insert(account);
    }
    asset.positions.entry(account).or_default().holdings = new_balance;
}

#[cfg(test)]
mod tests {
    use super::*;
    use fexse_core::RoleBook;

    fn account(byte: u8) -> AccountId {
        AccountId::new([byte; 32])
    }

    fn registry_with_admin(admin: AccountId, treasury: AccountId) -> AssetRegistry {
        let roles = RoleBook::new();
        roles.grant(Role::Admin, admin);
        AssetRegistry::new(Arc::new(roles), treasury)
    }

    #[test]
    fn test_create_asset_scenario() {
        // create asset id=1, totalShares=1000, price=100
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);

        registry
            .create_asset(&admin, AssetId(1), 1000, 100, "ipfs://asset-1".into())
            .unwrap();

        let info = registry.asset_info(AssetId(1)).unwrap();
        assert_eq!(info.total_shares, 1000);
        assert_eq!(info.nominal_price, 100);
        assert_eq!(registry.share_balance(AssetId(1), &treasury), 1000);
        assert_eq!(registry.holders(AssetId(1)).unwrap(), vec![treasury]);
    }

    #[test]
    fn test_create_rejects_bad_preconditions() {
        let admin = account(1);
        let registry = registry_with_admin(admin, account(2));

        assert_eq!(
            registry.create_asset(&admin, AssetId::ZERO, 10, 10, String::new()),
            Err(AssetError::ZeroAssetId)
        );
        assert_eq!(
            registry.create_asset(&admin, AssetId(1), 0, 10, String::new()),
            Err(AssetError::ZeroTotalShares)
        );
        assert_eq!(
            registry.create_asset(&admin, AssetId(1), 10, 0, String::new()),
            Err(AssetError::ZeroPrice)
        );

        registry
            .create_asset(&admin, AssetId(1), 10, 10, String::new())
            .unwrap();
        assert_eq!(
            registry.create_asset(&admin, AssetId(1), 10, 10, String::new()),
            Err(AssetError::AssetExists(AssetId(1)))
        );

        // Failed creates persisted nothing beyond the first asset
        assert!(registry.exists(AssetId(1)));
        assert!(!registry.exists(AssetId(2)));
    }

    #[test]
    fn test_create_requires_admin() {
        let registry = registry_with_admin(account(1), account(2));
        let outsider = account(9);

        assert_eq!(
            registry.create_asset(&outsider, AssetId(1), 10, 10, String::new()),
            Err(AssetError::Unauthorized(outsider))
        );
    }

    #[test]
    fn test_holder_set_tracks_transfers() {
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);
        registry
            .create_asset(&admin, AssetId(1), 1000, 100, String::new())
            .unwrap();

        let alice = account(3);
        registry
            .transfer_shares(&treasury, AssetId(1), treasury, alice, 400)
            .unwrap();

        assert_eq!(registry.holder_count(AssetId(1)).unwrap(), 2);
        assert_eq!(
            registry.position(AssetId(1), &alice).unwrap().holdings,
            400
        );

        // Treasury empties out: purged from the holder set
        registry
            .transfer_shares(&treasury, AssetId(1), treasury, alice, 600)
            .unwrap();
        assert_eq!(registry.holders(AssetId(1)).unwrap(), vec![alice]);
        assert!(registry.position(AssetId(1), &treasury).is_none());

        // Conservation: circulating supply never changes on transfer
        assert_eq!(registry.total_in_circulation(AssetId(1)).unwrap(), 1000);
    }

    #[test]
    fn test_holdings_update_idempotent() {
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);
        registry
            .create_asset(&admin, AssetId(1), 100, 1, String::new())
            .unwrap();

        let mut assets = registry.assets.write();
        let asset = assets.get_mut(&AssetId(1)).unwrap();
        let mut events = Vec::new();

        // Same balance reported twice: second call is a no-op, no event
        apply_holdings_update(asset, treasury, 100, &mut events, 0);
        assert!(events.is_empty());
        assert_eq!(asset.holders.len(), 1);
    }

    #[test]
    fn test_purge_forfeits_pending_profit() {
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);
        registry
            .create_asset(&admin, AssetId(1), 100, 1, String::new())
            .unwrap();

        registry
            .credit_pending_profit(AssetId(1), &treasury, 55)
            .unwrap();

        let alice = account(3);
        registry
            .transfer_shares(&treasury, AssetId(1), treasury, alice, 100)
            .unwrap();

        // Position gone, profit forfeited, purge event recorded
        assert!(registry.position(AssetId(1), &treasury).is_none());
        let forfeited = registry
            .events()
            .iter()
            .find_map(|e| match e {
                AssetEvent::HolderPurged {
                    forfeited_profit, ..
                } => Some(*forfeited_profit),
                _ => None,
            })
            .unwrap();
        assert_eq!(forfeited, 55);
    }

    #[test]
    fn test_locked_shares_block_transfer() {
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);
        registry
            .create_asset(&admin, AssetId(1), 100, 1, String::new())
            .unwrap();

        registry
            .lock_shares(&admin, AssetId(1), treasury, 80)
            .unwrap();
        let err = registry
            .transfer_shares(&treasury, AssetId(1), treasury, account(3), 30)
            .unwrap_err();
        assert!(matches!(err, AssetError::Ledger(_)));

        // No side effects on either party
        assert_eq!(registry.share_balance(AssetId(1), &treasury), 100);
        assert_eq!(registry.share_balance(AssetId(1), &account(3)), 0);
        assert_eq!(registry.holder_count(AssetId(1)).unwrap(), 1);
    }

    #[test]
    fn test_operator_transfer() {
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);
        registry
            .create_asset(&admin, AssetId(1), 100, 1, String::new())
            .unwrap();

        let operator = account(7);
        let buyer = account(8);

        let err = registry
            .transfer_shares(&operator, AssetId(1), treasury, buyer, 10)
            .unwrap_err();
        assert!(matches!(err, AssetError::NotOperator { .. }));

        registry
            .set_operator(&treasury, AssetId(1), operator, true)
            .unwrap();
        registry
            .transfer_shares(&operator, AssetId(1), treasury, buyer, 10)
            .unwrap();
        assert_eq!(registry.share_balance(AssetId(1), &buyer), 10);
    }

    #[test]
    fn test_listing_locks_and_cancel_unlocks() {
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);
        registry
            .create_asset(&admin, AssetId(1), 100, 1, String::new())
            .unwrap();

        registry
            .list_shares_for_sale(&treasury, AssetId(1), 60, 5)
            .unwrap();
        assert_eq!(registry.locked_shares(AssetId(1), &treasury), 60);
        let position = registry.position(AssetId(1), &treasury).unwrap();
        assert_eq!(position.shares_for_sale, 60);
        assert_eq!(position.sale_price, 5);

        // Second listing rejected while one is active
        assert!(matches!(
            registry.list_shares_for_sale(&treasury, AssetId(1), 10, 5),
            Err(AssetError::ListingExists(..))
        ));

        registry.cancel_sale_listing(&treasury, AssetId(1)).unwrap();
        assert_eq!(registry.locked_shares(AssetId(1), &treasury), 0);
        let position = registry.position(AssetId(1), &treasury).unwrap();
        assert_eq!(position.shares_for_sale, 0);
        assert_eq!(position.sale_price, 0);
    }

    #[test]
    fn test_consume_listing_returns_price() {
        let admin = account(1);
        let treasury = account(2);
        let registry = registry_with_admin(admin, treasury);
        registry
            .create_asset(&admin, AssetId(1), 100, 1, String::new())
            .unwrap();

        registry
            .list_shares_for_sale(&treasury, AssetId(1), 40, 9)
            .unwrap();

        let price = registry.consume_listing(AssetId(1), &treasury, 25).unwrap();
        assert_eq!(price, 9);
        assert_eq!(registry.locked_shares(AssetId(1), &treasury), 15);
        assert_eq!(
            registry
                .position(AssetId(1), &treasury)
                .unwrap()
                .shares_for_sale,
            15
        );

        // Cannot consume more than listed
        assert!(matches!(
            registry.consume_listing(AssetId(1), &treasury, 16),
            Err(AssetError::ListingTooSmall { .. })
        ));
    }
}
