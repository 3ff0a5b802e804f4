use rust_decimal::Decimal;
use thiserror::Error;

/// Ledger contents the engine must not be handed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerValidationError {
    #[error("bill #{bill_index} has a negative amount ({amount})")]
    NegativeAmount { bill_index: usize, amount: Decimal },
    #[error("bill #{bill_index} pushes the ledger total past {limit}")]
    AmountTooLarge { bill_index: usize, limit: Decimal },
    #[error("private bill #{bill_index} lists no beneficiaries")]
    MissingBeneficiaries { bill_index: usize },
    #[error("member '{name}' appears more than once in the roster")]
    DuplicateMember { name: String },
}

#[derive(Debug, Error)]
pub enum LedgerSourceError {
    #[error("failed to read ledger from {location}: {reason}")]
    Unavailable { location: String, reason: String },
    #[error("malformed ledger: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Source(#[from] LedgerSourceError),
    #[error("invalid ledger: {0}")]
    Validation(#[from] LedgerValidationError),
    #[error("amount for '{member}' does not fit in whole units ({amount})")]
    AmountOutOfRange { member: String, amount: Decimal },
}
