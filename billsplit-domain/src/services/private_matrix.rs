use indexmap::IndexMap;

use crate::{
    model::{Bill, Diagnostic, Money, PrivateMatrix, round_balances, zeroed_balances},
    services::{BalanceEngine, BeneficiaryResolver},
};

impl BalanceEngine {
    /// Builds the payer x beneficiary matrix of open private bills.
    ///
    /// Shared and settled bills are ignored. `totals[payer]` is the full amount of
    /// every counted bill the payer covered, self-share included.
    pub fn compute_private_matrix<'a>(
        &self,
        members: &'a [&'a str],
        bills: &[Bill<'a>],
    ) -> PrivateMatrix<'a> {
        let resolver = BeneficiaryResolver::new(members);
        let mut matrix: IndexMap<&'a str, _> = members
            .iter()
            .copied()
            .map(|payer| (payer, zeroed_balances(members)))
            .collect();
        let mut totals = zeroed_balances(members);
        let mut diagnostics = Vec::new();

        let open_private = bills
            .iter()
            .enumerate()
            .filter(|(_, bill)| bill.is_private() && !bill.is_settled);

        for (bill_index, bill) in open_private {
            if !resolver.is_member(bill.payer) {
                Diagnostic::UnknownPayer {
                    bill_index,
                    payer: bill.payer,
                }
                .emit(&mut diagnostics);
                continue;
            }

            let beneficiaries = resolver.resolve(bill_index, bill, &mut diagnostics);
            if beneficiaries.is_empty() {
                continue;
            }

            *totals.entry(bill.payer).or_insert(Money::ZERO) += bill.amount;

            let share = bill.amount.split(beneficiaries.len());
            let row = matrix
                .entry(bill.payer)
                .or_insert_with(|| zeroed_balances(members));
            for beneficiary in beneficiaries {
                *row.entry(beneficiary).or_insert(Money::ZERO) += share;
            }
        }

        let mode = self.context().rounding_mode;
        for row in matrix.values_mut() {
            round_balances(row, mode);
        }
        round_balances(&mut totals, mode);

        PrivateMatrix {
            matrix,
            totals,
            diagnostics,
        }
    }
}
