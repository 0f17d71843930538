//! Core type definitions for the FEXSE platform
//!
//! Identifiers are small copyable newtypes so that asset ids, account ids and
//! order ids can never be confused for one another at a call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Balance type used by every ledger (u128 for high precision)
pub type Balance = u128;

/// AccountId - 32-byte address of a platform participant
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId {
    id: [u8; 32],
}

impl AccountId {
    /// Create an AccountId from raw bytes
    pub fn new(id: [u8; 32]) -> Self {
        Self { id }
    }

    /// Derive an AccountId from a public key via BLAKE3
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let hash = blake3::hash(public_key);
        Self {
            id: *hash.as_bytes(),
        }
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.id
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.id)
    }

    /// Parse from hex string (rejects anything but 64 hex chars)
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut id = [0u8; 32];
        hex::decode_to_slice(s, &mut id)?;
        Ok(Self { id })
    }

    /// Zero/null account (used as a "nobody" sentinel in validation)
    pub const ZERO: Self = Self { id: [0u8; 32] };

    /// Is this the null account?
    pub fn is_zero(&self) -> bool {
        self.id == [0u8; 32]
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", &self.to_hex()[..12])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..12])
    }
}

/// AssetId - integer identifier of a tokenized real-world asset
///
/// Zero is the "does not exist" sentinel and is never a valid asset id.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Debug, Serialize, Deserialize,
)]
pub struct AssetId(pub u64);

impl AssetId {
    /// The "no such asset" sentinel
    pub const ZERO: Self = Self(0);

    /// Is this the sentinel id?
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset-{}", self.0)
    }
}

/// OrderId - caller-supplied identifier correlating a settlement request
/// with the resulting settlement event
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Debug, Serialize, Deserialize,
)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order-{}", self.0)
    }
}

/// Settlement currency accepted by the payment ledger
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Currency {
    /// The platform's native payment/utility token
    Fexse,
    /// USDT stable currency
    Usdt,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Fexse => "FEXSE",
            Self::Usdt => "USDT",
        }
    }

    /// All currencies the platform settles in
    pub const ALL: [Currency; 2] = [Currency::Fexse, Currency::Usdt];
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
