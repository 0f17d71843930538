//! Per-asset share token ledger
//!
//! Fungible-within-asset ownership units backed by the generic lockable
//! balance book, plus operator approvals so the settlement engine can move a
//! seller's shares with their prior consent.
//!
//! Mutating methods are crate-private: the registry is the only caller, and
//! it pairs every mutation with the holdings-update callback.

use fexse_core::{AccountId, AssetId, Balance};
use fexse_ledger::{LockableBook, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Share ledger scoped to a single asset
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShareLedger {
    asset_id: AssetId,
    book: LockableBook<AccountId>,
    /// (owner, operator) pairs approved to move the owner's shares
    operators: HashSet<(AccountId, AccountId)>,
}

impl ShareLedger {
    pub(crate) fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            book: LockableBook::new(),
            operators: HashSet::new(),
        }
    }

    /// The asset this ledger is scoped to
    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    /// Total share balance (free + locked)
    pub fn balance_of(&self, account: &AccountId) -> Balance {
        self.book.balance_of(account)
    }

    /// Currently locked share amount
    pub fn locked_of(&self, account: &AccountId) -> Balance {
        self.book.locked_of(account)
    }

    /// Transferable share amount
    pub fn free_of(&self, account: &AccountId) -> Balance {
        self.book.free_of(account)
    }

    /// Sum of all share balances on this ledger
    pub fn total_in_circulation(&self) -> Balance {
        self.book.total()
    }

    /// Has `owner` approved `operator` to move their shares?
    pub fn is_operator(&self, owner: &AccountId, operator: &AccountId) -> bool {
        self.operators.contains(&(*owner, *operator))
    }

    // Mutations below are registry-mediated only.

    pub(crate) fn mint(&mut self, to: AccountId, amount: Balance) -> Result<()> {
        self.book.credit(to, amount)
    }

    pub(crate) fn transfer(&mut self, from: AccountId, to: AccountId, amount: Balance) -> Result<()> {
        self.book.transfer(from, to, amount)
    }

    pub(crate) fn lock(&mut self, account: AccountId, amount: Balance) -> Result<()> {
        self.book.lock(account, amount)
    }

    pub(crate) fn unlock(&mut self, account: AccountId, amount: Balance) -> Result<()> {
        self.book.unlock(account, amount)
    }

    pub(crate) fn set_operator(&mut self, owner: AccountId, operator: AccountId, approved: bool) {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }
}
