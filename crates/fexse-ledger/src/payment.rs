//! Payment token ledger
//!
//! One balance book per settlement currency (FEXSE, USDT), each with the
//! lock overlay, plus ERC20-style absolute allowances so the settlement
//! engine can move buyer funds on the buyer's prior approval.

use crate::error::{LedgerError, Result};
use crate::lockable::LockableBook;
use fexse_core::{AccountId, Balance, Currency};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Multi-currency payment ledger
///
/// Issuance (`mint`) is the boundary to the external token contracts; inside
/// the platform it is only used to fund treasury/test accounts.
#[derive(Default)]
pub struct PaymentLedger {
    books: RwLock<HashMap<Currency, LockableBook<AccountId>>>,
    /// (currency, owner, spender) -> remaining allowance
    allowances: RwLock<HashMap<(Currency, AccountId, AccountId), Balance>>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue `amount` of `currency` to `to`
    pub fn mint(&self, currency: Currency, to: AccountId, amount: Balance) -> Result<()> {
        self.books
            .write()
            .entry(currency)
            .or_default()
            .credit(to, amount)
    }

    /// Direct transfer, checked against the sender's free balance
    pub fn transfer(
        &self,
        currency: Currency,
        from: AccountId,
        to: AccountId,
        amount: Balance,
    ) -> Result<()> {
        let mut books = self.books.write();
        books.entry(currency).or_default().transfer(from, to, amount)?;
        debug!(%currency, %from, %to, amount, "payment transfer");
        Ok(())
    }

    /// Grant `spender` an absolute allowance over `owner`'s `currency` balance
    pub fn approve(
        &self,
        currency: Currency,
        owner: AccountId,
        spender: AccountId,
        amount: Balance,
    ) {
        let mut allowances = self.allowances.write();
        if amount == 0 {
            allowances.remove(&(currency, owner, spender));
        } else {
            allowances.insert((currency, owner, spender), amount);
        }
    }

    /// Remaining allowance granted by `owner` to `spender`
    pub fn allowance(&self, currency: Currency, owner: &AccountId, spender: &AccountId) -> Balance {
        self.allowances
            .read()
            .get(&(currency, *owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Delegated transfer: `spender` moves `owner`'s funds within the
    /// granted allowance; the allowance is decremented on success
    pub fn transfer_from(
        &self,
        currency: Currency,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Balance,
    ) -> Result<()> {
        let granted = self.allowance(currency, &owner, &spender);
        if granted < amount {
            return Err(LedgerError::InsufficientAllowance {
                requested: amount,
                granted,
            });
        }
        self.books
            .write()
            .entry(currency)
            .or_default()
            .transfer(owner, to, amount)?;
        // Decrement only after the transfer succeeded
        let mut allowances = self.allowances.write();
        if granted == amount {
            allowances.remove(&(currency, owner, spender));
        } else {
            allowances.insert((currency, owner, spender), granted - amount);
        }
        debug!(%currency, %owner, %to, amount, "delegated payment transfer");
        Ok(())
    }

    /// Reserve `amount` of `account`'s free balance
    pub fn lock(&self, currency: Currency, account: AccountId, amount: Balance) -> Result<()> {
        self.books
            .write()
            .entry(currency)
            .or_default()
            .lock(account, amount)
    }

    /// Release `amount` of `account`'s locked balance
    pub fn unlock(&self, currency: Currency, account: AccountId, amount: Balance) -> Result<()> {
        self.books
            .write()
            .entry(currency)
            .or_default()
            .unlock(account, amount)
    }

    /// Total balance (free + locked)
    pub fn balance_of(&self, currency: Currency, account: &AccountId) -> Balance {
        self.books
            .read()
            .get(&currency)
            .map(|book| book.balance_of(account))
            .unwrap_or(0)
    }

    /// Currently locked amount
    pub fn locked_of(&self, currency: Currency, account: &AccountId) -> Balance {
        self.books
            .read()
            .get(&currency)
            .map(|book| book.locked_of(account))
            .unwrap_or(0)
    }

    /// Spendable balance (total minus locked)
    pub fn free_of(&self, currency: Currency, account: &AccountId) -> Balance {
        self.books
            .read()
            .get(&currency)
            .map(|book| book.free_of(account))
            .unwrap_or(0)
    }
}
