//! Pricing and execution-cost boundaries
//!
//! The profit claim path converts accrued profit-value into payment-token
//! units via an external rate source; settlement converts measured execution
//! cost into a payment-denominated surcharge. Both are pure reads with no
//! side effects, and both have trivially configurable fixed implementations
//! for wiring and tests.

use crate::types::Balance;

/// Conversion rate source between profit-value units and payment-token units
pub trait RateOracle: Send + Sync {
    /// Payment-token units per profit-value unit
    fn conversion_rate(&self) -> Balance;

    /// Convert a profit-value amount into payment-token units
    ///
    /// `None` when the conversion overflows the balance type.
    fn convert(&self, value: Balance) -> Option<Balance> {
        value.checked_mul(self.conversion_rate())
    }
}

/// Fixed conversion rate (the hardcoded-rate strategy)
pub struct FixedRate(pub Balance);

impl FixedRate {
    /// 1:1 conversion - profit-value units are payment units
    pub fn identity() -> Self {
        Self(1)
    }
}

impl RateOracle for FixedRate {
    fn conversion_rate(&self) -> Balance {
        self.0
    }
}

/// Reports the execution cost of a settlement call, in gas units
///
/// The platform treats the meter as deterministic for a given call shape:
/// the settlement engine reads it once before committing anything, so the
/// surcharge can be included in the upfront balance checks and the whole
/// trade stays all-or-nothing.
pub trait GasMeter: Send + Sync {
    /// Gas units consumed by one settlement execution
    fn units(&self) -> u64;
}

/// Fixed-cost meter; `FlatGasMeter(0)` disables the surcharge entirely
pub struct FlatGasMeter(pub u64);

impl GasMeter for FlatGasMeter {
    fn units(&self) -> u64 {
        self.0
    }
}
