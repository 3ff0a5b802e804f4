#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    BalanceSet, BalanceSheet, Bill, BillKind, DebtTransaction, Diagnostic, MemberBalances,
    MemberStats, Money, PrivateMatrix,
};
pub use services::{
    BalanceEngine, BeneficiaryResolver, DebtSettlement, RoundingMode, SettlementContext,
};
