//! # FEXSE Core - Shared Types & Collaborator Boundaries
//!
//! Foundation crate for the FEXSE real-world-asset tokenization platform.
//!
//! ## Contents
//!
//! - **Identifiers**: [`AccountId`], [`AssetId`], [`OrderId`] and the
//!   [`Balance`] precision type shared by every ledger
//! - **Constants**: token precision, service-fee rate, gas surcharge threshold
//! - **Access control boundary**: [`AccessControl`] trait plus the in-memory
//!   [`RoleBook`] used for wiring and tests
//! - **Compliance boundary**: [`ComplianceCheck`] trait plus [`DenyList`] and
//!   [`AllowAll`] implementations
//! - **Pricing boundary**: [`RateOracle`] / [`GasMeter`] traits with fixed
//!   implementations
//!
//! The asset registry, payment ledger, distribution engine and settlement
//! engine all consume these boundaries as injected `Arc<dyn Trait>` handles;
//! nothing in this crate holds ledger state of its own.

pub mod access;
pub mod compliance;
pub mod constants;
pub mod oracle;
pub mod types;

// Re-exports
pub use access::{AccessControl, Role, RoleBook};
pub use compliance::{AllowAll, ComplianceCheck, ComplianceError, DenyList};
pub use oracle::{FixedRate, FlatGasMeter, GasMeter, RateOracle};
pub use types::{AccountId, AssetId, Balance, Currency, OrderId};

pub use constants::*;
