use billsplit_domain::{Bill, BillKind, Money};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerSourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillType {
    Shared,
    Private,
}

impl From<BillType> for BillKind {
    fn from(value: BillType) -> Self {
        match value {
            BillType::Shared => BillKind::Shared,
            BillType::Private => BillKind::Private,
        }
    }
}

/// One bill as stored by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub amount: Decimal,
    pub payer: String,
    #[serde(rename = "type")]
    pub kind: BillType,
    #[serde(default)]
    pub beneficiaries: Vec<String>,
    #[serde(default)]
    pub is_settled: bool,
}

impl BillRecord {
    pub fn as_bill(&self) -> Bill<'_> {
        Bill {
            amount: Money::from_decimal(self.amount),
            payer: &self.payer,
            kind: self.kind.into(),
            beneficiaries: self.beneficiaries.iter().map(String::as_str).collect(),
            is_settled: self.is_settled,
        }
    }
}

/// Roster and bills of one workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub members: Vec<String>,
    #[serde(default)]
    pub bills: Vec<BillRecord>,
}

impl LedgerDocument {
    pub fn from_json(content: &str) -> Result<Self, LedgerSourceError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatsView {
    #[serde(with = "rust_decimal::serde::float")]
    pub shared_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub private_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_paid: Decimal,
    pub shared_consumed: i64,
    pub private_consumed: i64,
    pub total_consumed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferView {
    pub from: String,
    pub to: String,
    pub amount: i64,
}

/// Everything a caller needs to render or persist a workspace's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceReport {
    pub balances: IndexMap<String, i64>,
    pub stats: IndexMap<String, MemberStatsView>,
    pub private_balances: IndexMap<String, i64>,
    pub private_matrix: IndexMap<String, IndexMap<String, i64>>,
    pub private_totals: IndexMap<String, i64>,
    pub transfers: Vec<TransferView>,
    pub private_transfers: Vec<TransferView>,
    pub diagnostics: Vec<String>,
}

impl WorkspaceReport {
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty() && self.private_transfers.is_empty()
    }
}
