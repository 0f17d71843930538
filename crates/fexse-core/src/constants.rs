//! FEXSE token and fee constants

use crate::types::Balance;

/// Token symbol
pub const SYMBOL: &str = "FEXSE";

/// Token name
pub const NAME: &str = "FEXSE Utility Token";

/// Decimal places (same as ETH)
pub const DECIMALS: u8 = 18;

/// One FEXSE in smallest unit
pub const ONE_FEXSE: Balance = 1_000_000_000_000_000_000; // 10^18

/// Basis-point denominator used by all fee math
pub const BPS_DENOMINATOR: Balance = 10_000;

/// Default settlement service fee: 50 bps = 0.5%
pub const DEFAULT_FEE_BPS: Balance = 50;

/// Gas surcharge kicks in when the execution cost of a settlement exceeds
/// this percentage of the collected service fee
pub const GAS_SURCHARGE_THRESHOLD_PCT: Balance = 30;
