use crate::{
    model::{
        BalanceSet, BalanceSheet, Bill, Diagnostic, MemberBalances, MemberStats, Money,
        round_balances, zeroed_balances,
    },
    services::{BeneficiaryResolver, SettlementContext},
};

/// Computes per-member balances and statistics from a set of bills.
///
/// Stateless: every call builds its working maps from scratch, so one engine can
/// be shared freely across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct BalanceEngine {
    context: SettlementContext,
}

impl BalanceEngine {
    pub fn new(context: SettlementContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> SettlementContext {
        self.context
    }

    /// Walks `bills` once and returns net balances, paid/consumed statistics and
    /// private-only balances for every name in `members`.
    ///
    /// * A bill whose payer is not in `members` is skipped entirely.
    /// * A settled bill still counts toward its payer's paid statistics but has
    ///   no effect on balances or consumption.
    /// * Balances and consumed statistics are rounded to whole units at the end;
    ///   paid statistics are not.
    pub fn compute_balances<'a>(
        &self,
        members: &'a [&'a str],
        bills: &[Bill<'a>],
    ) -> BalanceSheet<'a> {
        let resolver = BeneficiaryResolver::new(members);
        let mut balances = zeroed_balances(members);
        let mut private_balances = zeroed_balances(members);
        let mut stats: MemberStats<'a> = members
            .iter()
            .copied()
            .map(|member| (member, BalanceSet::default()))
            .collect();
        let mut diagnostics = Vec::new();

        tracing::debug!(
            member_count = members.len(),
            bill_count = bills.len(),
            rounding_mode = ?self.context.rounding_mode,
            "Balance computation started"
        );

        for (bill_index, bill) in bills.iter().enumerate() {
            let Some(payer_stats) = stats.get_mut(bill.payer) else {
                Diagnostic::UnknownPayer {
                    bill_index,
                    payer: bill.payer,
                }
                .emit(&mut diagnostics);
                continue;
            };
            payer_stats.record_paid(bill.kind, bill.amount);

            if bill.is_settled {
                continue;
            }

            adjust(&mut balances, bill.payer, bill.amount);
            if bill.is_private() {
                adjust(&mut private_balances, bill.payer, bill.amount);
            }

            let beneficiaries = resolver.resolve(bill_index, bill, &mut diagnostics);
            if beneficiaries.is_empty() {
                continue;
            }

            let share = bill.amount.split(beneficiaries.len());
            for beneficiary in beneficiaries {
                adjust(&mut balances, beneficiary, -share);
                if let Some(beneficiary_stats) = stats.get_mut(beneficiary) {
                    beneficiary_stats.record_consumed(bill.kind, share);
                }
                if bill.is_private() {
                    adjust(&mut private_balances, beneficiary, -share);
                }
            }
        }

        let mode = self.context.rounding_mode;
        round_balances(&mut balances, mode);
        round_balances(&mut private_balances, mode);
        for member_stats in stats.values_mut() {
            member_stats.round_consumed(mode);
        }

        tracing::debug!(
            skipped = diagnostics.len(),
            residual = %balances.values().sum::<Money>(),
            "Balance computation finished"
        );

        BalanceSheet {
            balances,
            stats,
            private_balances,
            diagnostics,
        }
    }
}

fn adjust<'a>(balances: &mut MemberBalances<'a>, member: &'a str, amount: Money) {
    *balances.entry(member).or_insert(Money::ZERO) += amount;
}
