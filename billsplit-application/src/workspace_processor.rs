use billsplit_domain::{
    BalanceEngine, BalanceSet, Bill, DebtSettlement, DebtTransaction, Diagnostic, MemberBalances,
    Money, SettlementContext,
};
use fxhash::FxHashSet;
use indexmap::IndexMap;

use crate::{
    error::WorkspaceError,
    model::{BillRecord, LedgerDocument, MemberStatsView, TransferView, WorkspaceReport},
    ports::LedgerSource,
    validation::validate_ledger,
};

/// Runs the balance engine over a ledger and assembles the report.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkspaceProcessor {
    engine: BalanceEngine,
    settlement: DebtSettlement,
}

impl WorkspaceProcessor {
    pub fn new(context: SettlementContext) -> Self {
        Self {
            engine: BalanceEngine::new(context),
            settlement: DebtSettlement::new(context),
        }
    }

    pub fn context(&self) -> SettlementContext {
        self.engine.context()
    }

    pub fn process(&self, source: &dyn LedgerSource) -> Result<WorkspaceReport, WorkspaceError> {
        let ledger = source.load()?;
        self.build_report(&ledger)
    }

    /// Validates `ledger`, computes balances and the private matrix, then plans
    /// settlement twice: once over net balances and once over private-only ones.
    pub fn build_report(
        &self,
        ledger: &LedgerDocument,
    ) -> Result<WorkspaceReport, WorkspaceError> {
        validate_ledger(ledger)?;

        let members = ledger.member_names();
        let bills: Vec<Bill<'_>> = ledger.bills.iter().map(BillRecord::as_bill).collect();

        let sheet = self.engine.compute_balances(&members, &bills);
        let matrix = self.engine.compute_private_matrix(&members, &bills);
        let transfers = self.settlement.compute_transfers(&sheet.balances);
        let private_transfers = self.settlement.compute_transfers(&sheet.private_balances);

        tracing::info!(
            member_count = members.len(),
            bill_count = bills.len(),
            transfer_count = transfers.len(),
            private_transfer_count = private_transfers.len(),
            diagnostic_count = sheet.diagnostics.len() + matrix.diagnostics.len(),
            "Workspace report computed"
        );

        let mut private_matrix = IndexMap::with_capacity(matrix.matrix.len());
        for (payer, row) in &matrix.matrix {
            private_matrix.insert(payer.to_string(), whole_unit_map(row)?);
        }

        let mut stats = IndexMap::with_capacity(sheet.stats.len());
        for (member, member_stats) in &sheet.stats {
            stats.insert(member.to_string(), stats_view(member, member_stats)?);
        }

        Ok(WorkspaceReport {
            balances: whole_unit_map(&sheet.balances)?,
            stats,
            private_balances: whole_unit_map(&sheet.private_balances)?,
            private_matrix,
            private_totals: whole_unit_map(&matrix.totals)?,
            transfers: transfer_views(&transfers)?,
            private_transfers: transfer_views(&private_transfers)?,
            diagnostics: merge_diagnostics(&sheet.diagnostics, &matrix.diagnostics),
        })
    }
}

fn whole_units(member: &str, amount: Money) -> Result<i64, WorkspaceError> {
    amount.to_i64().ok_or_else(|| WorkspaceError::AmountOutOfRange {
        member: member.to_string(),
        amount: amount.as_decimal(),
    })
}

fn whole_unit_map(
    balances: &MemberBalances<'_>,
) -> Result<IndexMap<String, i64>, WorkspaceError> {
    balances
        .iter()
        .map(|(member, amount)| whole_units(member, *amount).map(|units| (member.to_string(), units)))
        .collect()
}

fn stats_view(member: &str, stats: &BalanceSet) -> Result<MemberStatsView, WorkspaceError> {
    Ok(MemberStatsView {
        shared_paid: stats.shared_paid.as_decimal(),
        private_paid: stats.private_paid.as_decimal(),
        total_paid: stats.total_paid.as_decimal(),
        shared_consumed: whole_units(member, stats.shared_consumed)?,
        private_consumed: whole_units(member, stats.private_consumed)?,
        total_consumed: whole_units(member, stats.total_consumed)?,
    })
}

fn transfer_views(
    transfers: &[DebtTransaction<'_>],
) -> Result<Vec<TransferView>, WorkspaceError> {
    transfers
        .iter()
        .map(|transfer| {
            whole_units(transfer.from, transfer.amount).map(|amount| TransferView {
                from: transfer.from.to_string(),
                to: transfer.to.to_string(),
                amount,
            })
        })
        .collect()
}

/// Both engine passes report the same skipped private bills; keep one copy.
fn merge_diagnostics<'a>(first: &[Diagnostic<'a>], second: &[Diagnostic<'a>]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    first
        .iter()
        .chain(second)
        .filter(|diagnostic| seen.insert(*diagnostic))
        .map(ToString::to_string)
        .collect()
}
