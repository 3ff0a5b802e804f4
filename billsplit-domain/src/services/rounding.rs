//! Numeric policy shared by every engine output.
//!
//! Equal splits are accumulated at full decimal precision and rounded to whole
//! units once, at the end of a computation. The rounded balances of a group can
//! miss exact zero-sum by up to one unit per member; that residual is kept as is
//! rather than redistributed.

use rust_decimal::RoundingStrategy;

/// Rounding mode for whole-unit quantization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.5 -> 1, -0.5 -> -1).
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Configuration carried by one engine invocation.
///
/// A single context applies one rounding rule to every rounded field the call
/// produces.
///
/// # Example
/// ```
/// use billsplit_domain::services::{RoundingMode, SettlementContext};
///
/// let ctx = SettlementContext {
///     rounding_mode: RoundingMode::HalfEven,
/// };
/// assert_ne!(ctx, SettlementContext::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettlementContext {
    pub rounding_mode: RoundingMode,
}

impl SettlementContext {
    pub fn with_rounding_mode(rounding_mode: RoundingMode) -> Self {
        Self { rounding_mode }
    }
}
