use crate::{
    model::{DebtTransaction, MemberBalances, Money},
    services::SettlementContext,
};

/// Balances within this distance of zero count as settled.
pub const SETTLED_TOLERANCE: Money = Money::ONE;

/// Greedy largest-debtor / largest-creditor settlement planner.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebtSettlement {
    context: SettlementContext,
}

impl DebtSettlement {
    pub fn new(context: SettlementContext) -> Self {
        Self { context }
    }

    /// Plans the transfers that bring `balances` back to (near) zero.
    ///
    /// Members with `balance < -1` pay, members with `balance > 1` receive; both
    /// sides are matched largest magnitude first. Equal balances keep the order
    /// they have in `balances`. Each transfer amount is rounded to whole units.
    ///
    /// For integral input the transferred total equals the smaller of the total
    /// owed and the total due.
    pub fn compute_transfers<'a>(
        &self,
        balances: &MemberBalances<'a>,
    ) -> Vec<DebtTransaction<'a>> {
        let mut debtors: Vec<(&'a str, Money)> = balances
            .iter()
            .filter(|(_, balance)| **balance < -SETTLED_TOLERANCE)
            .map(|(member, balance)| (*member, *balance))
            .collect();
        let mut creditors: Vec<(&'a str, Money)> = balances
            .iter()
            .filter(|(_, balance)| **balance > SETTLED_TOLERANCE)
            .map(|(member, balance)| (*member, *balance))
            .collect();

        if debtors.is_empty() || creditors.is_empty() {
            tracing::debug!(
                debtor_count = debtors.len(),
                creditor_count = creditors.len(),
                "All balances settled"
            );
            return Vec::new();
        }

        debtors.sort_by(|a, b| a.1.cmp(&b.1));
        creditors.sort_by(|a, b| b.1.cmp(&a.1));

        let mode = self.context.rounding_mode;
        let mut transfers = Vec::with_capacity(debtors.len() + creditors.len() - 1);
        let (mut i, mut j) = (0, 0);

        while i < debtors.len() && j < creditors.len() {
            let (debtor, owed) = debtors[i];
            let (creditor, due) = creditors[j];
            let amount = owed.abs().min(due);

            transfers.push(DebtTransaction {
                from: debtor,
                to: creditor,
                amount: amount.round(mode),
            });

            debtors[i].1 += amount;
            creditors[j].1 -= amount;

            if debtors[i].1.abs() < SETTLED_TOLERANCE {
                i += 1;
            }
            if creditors[j].1 < SETTLED_TOLERANCE {
                j += 1;
            }
        }

        tracing::debug!(
            debtor_count = debtors.len(),
            creditor_count = creditors.len(),
            transfer_count = transfers.len(),
            "Settlement plan computed"
        );

        transfers
    }
}
