//! Generic lockable balance book
//!
//! The locking subsystem is identical on the share side and the payment side,
//! so both ledgers are backed by this one structure. Invariant:
//! `locked(k) <= balance(k)` for every key at all times.

use crate::error::{LedgerError, Result};
use fexse_core::Balance;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Balance book with a locked-amount overlay
///
/// Keys are account ids in practice; the book is generic so asset-scoped and
/// currency-scoped instances share one implementation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LockableBook<K: Eq + Hash> {
    balances: HashMap<K, Balance>,
    locked: HashMap<K, Balance>,
}

impl<K: Eq + Hash + Copy> LockableBook<K> {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            locked: HashMap::new(),
        }
    }

    /// Total balance (free + locked)
    pub fn balance_of(&self, key: &K) -> Balance {
        self.balances.get(key).copied().unwrap_or(0)
    }

    /// Currently locked amount
    pub fn locked_of(&self, key: &K) -> Balance {
        self.locked.get(key).copied().unwrap_or(0)
    }

    /// Spendable balance (total minus locked)
    pub fn free_of(&self, key: &K) -> Balance {
        self.balance_of(key).saturating_sub(self.locked_of(key))
    }

    /// Credit `amount` to `key`
    pub fn credit(&mut self, key: K, amount: Balance) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let balance = self.balances.entry(key).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Debit `amount` from `key`, rejecting if the free balance is short
    pub fn debit(&mut self, key: K, amount: Balance) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let free = self.free_of(&key);
        if free < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                free,
            });
        }
        let balance = self.balances.get_mut(&key).expect("free > 0 implies entry");
        *balance -= amount;
        if *balance == 0 {
            self.balances.remove(&key);
        }
        Ok(())
    }

    /// Reserve `amount` of the free balance
    pub fn lock(&mut self, key: K, amount: Balance) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let free = self.free_of(&key);
        if free < amount {
            return Err(LedgerError::LockExceedsFree {
                requested: amount,
                free,
            });
        }
        *self.locked.entry(key).or_insert(0) += amount;
        Ok(())
    }

    /// Release `amount` of the locked balance
    pub fn unlock(&mut self, key: K, amount: Balance) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let locked = self.locked_of(&key);
        if locked < amount {
            return Err(LedgerError::InsufficientLocked {
                requested: amount,
                locked,
            });
        }
        if locked == amount {
            self.locked.remove(&key);
        } else {
            *self.locked.get_mut(&key).expect("locked > 0 implies entry") -= amount;
        }
        Ok(())
    }

    /// Move `amount` between keys, honoring the sender's lock overlay
    pub fn transfer(&mut self, from: K, to: K, amount: Balance) -> Result<()> {
        self.debit(from, amount)?;
        self.credit(to, amount)
            .expect("credit after successful debit cannot fail");
        Ok(())
    }

    /// Sum of all balances in the book
    pub fn total(&self) -> Balance {
        self.balances.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type Book = LockableBook<u8>;

    #[test]
    fn test_credit_debit() {
        let mut book = Book::new();
        book.credit(1, 100).unwrap();
        assert_eq!(book.balance_of(&1), 100);

        book.debit(1, 40).unwrap();
        assert_eq!(book.balance_of(&1), 60);

        let err = book.debit(1, 61).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    }

    #[test]
    fn test_lock_blocks_debit() {
        let mut book = Book::new();
        book.credit(1, 100).unwrap();
        book.lock(1, 70).unwrap();

        assert_eq!(book.free_of(&1), 30);
        assert!(book.debit(1, 31).is_err());
        book.debit(1, 30).unwrap();

        // Locked portion is untouched by the debit
        assert_eq!(book.locked_of(&1), 70);
        assert_eq!(book.balance_of(&1), 70);
    }

    #[test]
    fn test_lock_beyond_free_rejected() {
        let mut book = Book::new();
        book.credit(1, 50).unwrap();
        book.lock(1, 30).unwrap();

        let err = book.lock(1, 21).unwrap_err();
        assert!(matches!(err, LedgerError::LockExceedsFree { .. }));
    }

    #[test]
    fn test_unlock_beyond_locked_rejected() {
        let mut book = Book::new();
        book.credit(1, 50).unwrap();
        book.lock(1, 20).unwrap();

        let err = book.unlock(1, 21).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientLocked { .. }));
    }

    #[test]
    fn test_lock_unlock_round_trip() {
        let mut book = Book::new();
        book.credit(1, 100).unwrap();

        let before = book.locked_of(&1);
        book.lock(1, 60).unwrap();
        book.unlock(1, 60).unwrap();

        assert_eq!(book.locked_of(&1), before);
        assert_eq!(book.balance_of(&1), 100);
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let mut book = Book::new();
        book.credit(1, 10).unwrap();

        assert_eq!(book.credit(1, 0), Err(LedgerError::ZeroAmount));
        assert_eq!(book.debit(1, 0), Err(LedgerError::ZeroAmount));
        assert_eq!(book.lock(1, 0), Err(LedgerError::ZeroAmount));
        assert_eq!(book.unlock(1, 0), Err(LedgerError::ZeroAmount));
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut book = Book::new();
        book.credit(1, 500).unwrap();
        book.transfer(1, 2, 200).unwrap();

        assert_eq!(book.balance_of(&1), 300);
        assert_eq!(book.balance_of(&2), 200);
        assert_eq!(book.total(), 500);
    }

    proptest! {
        /// locked <= balance always holds, whatever sequence of lock,
        /// unlock and debit calls is applied
        #[test]
        fn prop_locked_never_exceeds_balance(
            initial in 0u128..10_000,
            ops in prop::collection::vec((0u8..3, 0u128..2_000), 0..40),
        ) {
            let mut book = Book::new();
            if initial > 0 {
                book.credit(1, initial).unwrap();
            }
            for (op, amount) in ops {
                // Failures are fine; the invariant must survive regardless
                let _ = match op {
                    0 => book.lock(1, amount),
                    1 => book.unlock(1, amount),
                    _ => book.debit(1, amount),
                };
                prop_assert!(book.locked_of(&1) <= book.balance_of(&1));
            }
        }

        /// lock then unlock of the same amount is a no-op on both the
        /// lock overlay and the balance
        #[test]
        fn prop_lock_unlock_round_trip(balance in 1u128..10_000, amount in 1u128..10_000) {
            let mut book = Book::new();
            book.credit(1, balance).unwrap();
            if book.lock(1, amount).is_ok() {
                book.unlock(1, amount).unwrap();
            }
            prop_assert_eq!(book.locked_of(&1), 0);
            prop_assert_eq!(book.balance_of(&1), balance);
        }
    }
}
