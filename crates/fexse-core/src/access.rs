//! Access control boundary
//!
//! Every privileged operation on the platform (asset creation, price updates,
//! profit distribution, administrative lock/unlock, settlement execution) is
//! gated by an externally managed role membership check. The platform only
//! consults the check; managing role grants is the collaborator's business.
//!
//! [`RoleBook`] is the in-memory implementation used for service wiring and
//! tests.

use crate::types::AccountId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Platform roles
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative rights: asset creation, price updates,
    /// administrative lock/unlock
    Admin,
    /// May run profit distributions
    Distributor,
    /// May execute settlements on behalf of buyer/seller pairs
    SettlementOperator,
}

/// Role membership check consulted before every privileged operation
pub trait AccessControl: Send + Sync {
    /// Does `account` hold `role`?
    fn has_role(&self, role: Role, account: &AccountId) -> bool;
}

/// In-memory role registry
///
/// Admin implies every other role, mirroring the usual admin-superset
/// convention of role-gated systems.
#[derive(Default)]
pub struct RoleBook {
    grants: RwLock<HashMap<Role, HashSet<AccountId>>>,
}

impl RoleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `role` to `account`
    pub fn grant(&self, role: Role, account: AccountId) {
        self.grants.write().entry(role).or_default().insert(account);
    }

    /// Revoke `role` from `account`
    pub fn revoke(&self, role: Role, account: &AccountId) {
        if let Some(members) = self.grants.write().get_mut(&role) {
            members.remove(account);
        }
    }
}

impl AccessControl for RoleBook {
    fn has_role(&self, role: Role, account: &AccountId) -> bool {
        let grants = self.grants.read();
        let holds = |r: Role| {
            grants
                .get(&r)
                .map(|members| members.contains(account))
                .unwrap_or(false)
        };
        holds(role) || (role != Role::Admin && holds(Role::Admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_and_revoke() {
        let book = RoleBook::new();
        let operator = AccountId::new([1u8; 32]);

        assert!(!book.has_role(Role::Distributor, &operator));
        book.grant(Role::Distributor, operator);
        assert!(book.has_role(Role::Distributor, &operator));

        book.revoke(Role::Distributor, &operator);
        assert!(!book.has_role(Role::Distributor, &operator));
    }

    #[test]
    fn test_admin_implies_all_roles() {
        let book = RoleBook::new();
        let admin = AccountId::new([2u8; 32]);

        book.grant(Role::Admin, admin);
        assert!(book.has_role(Role::Admin, &admin));
        assert!(book.has_role(Role::Distributor, &admin));
        assert!(book.has_role(Role::SettlementOperator, &admin));
    }

    #[test]
    fn test_distributor_does_not_imply_admin() {
        let book = RoleBook::new();
        let distributor = AccountId::new([3u8; 32]);

        book.grant(Role::Distributor, distributor);
        assert!(!book.has_role(Role::Admin, &distributor));
    }
}
