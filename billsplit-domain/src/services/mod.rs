pub mod balance_engine;
pub mod beneficiary_resolver;
pub mod debt_settlement;
pub mod private_matrix;
pub mod rounding;

pub use balance_engine::BalanceEngine;
pub use beneficiary_resolver::BeneficiaryResolver;
pub use debt_settlement::{DebtSettlement, SETTLED_TOLERANCE};
pub use rounding::{RoundingMode, SettlementContext};
