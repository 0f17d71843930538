//! Compliance boundary
//!
//! Settlement consults an external compliance collaborator before moving any
//! value between two parties. The platform never reimplements the
//! whitelist/blacklist policy itself; it only honors the verdict.

use crate::types::AccountId;
use parking_lot::RwLock;
use std::collections::HashSet;
use thiserror::Error;

/// Compliance rejection reasons
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplianceError {
    /// One of the trade parties is on the blacklist
    #[error("account {0} is blacklisted")]
    Blacklisted(AccountId),
}

/// Pre-transfer compliance verdict
pub trait ComplianceCheck: Send + Sync {
    /// Rejects the transfer if either party fails the compliance policy
    fn pre_transfer_check(&self, from: &AccountId, to: &AccountId) -> Result<(), ComplianceError>;

    /// Is this account currently blacklisted?
    fn is_blacklisted(&self, account: &AccountId) -> bool;
}

/// Permissive policy: every transfer passes (single-party deployments, tests)
#[derive(Default)]
pub struct AllowAll;

impl ComplianceCheck for AllowAll {
    fn pre_transfer_check(&self, _from: &AccountId, _to: &AccountId) -> Result<(), ComplianceError> {
        Ok(())
    }

    fn is_blacklisted(&self, _account: &AccountId) -> bool {
        false
    }
}

/// Blacklist-backed policy: transfers touching a listed account are rejected
#[derive(Default)]
pub struct DenyList {
    blacklist: RwLock<HashSet<AccountId>>,
}

impl DenyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account to the blacklist
    pub fn deny(&self, account: AccountId) {
        self.blacklist.write().insert(account);
    }

    /// Remove an account from the blacklist
    pub fn allow(&self, account: &AccountId) {
        self.blacklist.write().remove(account);
    }
}

impl ComplianceCheck for DenyList {
    fn pre_transfer_check(&self, from: &AccountId, to: &AccountId) -> Result<(), ComplianceError> {
        let blacklist = self.blacklist.read();
        if blacklist.contains(from) {
            return Err(ComplianceError::Blacklisted(*from));
        }
        if blacklist.contains(to) {
            return Err(ComplianceError::Blacklisted(*to));
        }
        Ok(())
    }

    fn is_blacklisted(&self, account: &AccountId) -> bool {
        self.blacklist.read().contains(account)
    }
}
