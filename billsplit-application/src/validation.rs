use fxhash::FxHashSet;
use rust_decimal::Decimal;

use crate::{
    error::LedgerValidationError,
    model::{BillType, LedgerDocument},
};

/// Upper bound on the sum of all bill amounts (10^15 units).
///
/// Every balance and statistic the engine accumulates is bounded by this sum,
/// which keeps decimal arithmetic and whole-unit reporting in range.
pub const MAX_LEDGER_TOTAL: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Rejects input the balance engine leaves undefined.
///
/// Unknown payer or beneficiary names are allowed through; the engine skips
/// them and reports a diagnostic instead.
pub fn validate_ledger(ledger: &LedgerDocument) -> Result<(), LedgerValidationError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for name in &ledger.members {
        if !seen.insert(name.as_str()) {
            return Err(LedgerValidationError::DuplicateMember { name: name.clone() });
        }
    }

    let mut total = Decimal::ZERO;
    for (bill_index, bill) in ledger.bills.iter().enumerate() {
        if bill.amount.is_sign_negative() && !bill.amount.is_zero() {
            return Err(LedgerValidationError::NegativeAmount {
                bill_index,
                amount: bill.amount,
            });
        }
        total = total
            .checked_add(bill.amount)
            .filter(|total| *total <= MAX_LEDGER_TOTAL)
            .ok_or(LedgerValidationError::AmountTooLarge {
                bill_index,
                limit: MAX_LEDGER_TOTAL,
            })?;
        if bill.kind == BillType::Private && bill.beneficiaries.is_empty() {
            return Err(LedgerValidationError::MissingBeneficiaries { bill_index });
        }
    }

    Ok(())
}
