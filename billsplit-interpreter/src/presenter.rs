use std::fmt;

use billsplit_application::{TransferView, WorkspaceReport};
use indexmap::IndexMap;

/// Plain-text rendering of a [`WorkspaceReport`].
///
/// Matrix cells where payer and beneficiary coincide are not printed, nor are
/// zero cells.
pub struct TextReport<'a>(pub &'a WorkspaceReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Balances")?;
        write_amounts(f, &report.balances)?;

        writeln!(f, "Stats")?;
        for (member, stats) in &report.stats {
            writeln!(
                f,
                "  {member}: paid {} (shared {}, private {}), consumed {} (shared {}, private {})",
                stats.total_paid.normalize(),
                stats.shared_paid.normalize(),
                stats.private_paid.normalize(),
                stats.total_consumed,
                stats.shared_consumed,
                stats.private_consumed,
            )?;
        }

        writeln!(f, "Transfers")?;
        write_transfers(f, &report.transfers)?;

        writeln!(f, "Private expenses")?;
        let mut any_cell = false;
        for (payer, row) in &report.private_matrix {
            for (beneficiary, amount) in row {
                if beneficiary == payer || *amount == 0 {
                    continue;
                }
                writeln!(f, "  {beneficiary} owes {payer}: {amount}")?;
                any_cell = true;
            }
        }
        if !any_cell {
            writeln!(f, "  (none)")?;
        }

        writeln!(f, "Private totals")?;
        write_amounts(f, &report.private_totals)?;

        writeln!(f, "Private transfers")?;
        write_transfers(f, &report.private_transfers)?;

        if !report.diagnostics.is_empty() {
            writeln!(f, "Warnings")?;
            for diagnostic in &report.diagnostics {
                writeln!(f, "  {diagnostic}")?;
            }
        }

        Ok(())
    }
}

fn write_amounts(f: &mut fmt::Formatter<'_>, amounts: &IndexMap<String, i64>) -> fmt::Result {
    if amounts.is_empty() {
        return writeln!(f, "  (no members)");
    }
    for (member, amount) in amounts {
        writeln!(f, "  {member}: {amount}")?;
    }
    Ok(())
}

fn write_transfers(f: &mut fmt::Formatter<'_>, transfers: &[TransferView]) -> fmt::Result {
    if transfers.is_empty() {
        return writeln!(f, "  (all settled)");
    }
    for transfer in transfers {
        writeln!(f, "  {} -> {}: {}", transfer.from, transfer.to, transfer.amount)?;
    }
    Ok(())
}
