use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::services::RoundingMode;

/// Per-member signed amounts, iterated in roster order.
pub type MemberBalances<'a> = IndexMap<&'a str, Money>;

/// Per-member paid/consumed statistics, iterated in roster order.
pub type MemberStats<'a> = IndexMap<&'a str, BalanceSet>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Integral part of the amount; exact once the value has been rounded.
    pub fn to_i64(self) -> Option<i64> {
        self.0.trunc().to_i64()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Equal share of this amount across `parts` members.
    ///
    /// `parts` must be non-zero; callers check for an empty beneficiary set first.
    pub fn split(self, parts: usize) -> Self {
        debug_assert!(parts > 0);
        Self(self.0 / Decimal::from(parts))
    }

    /// Rounds to whole units with the given midpoint rule.
    pub fn round(self, mode: RoundingMode) -> Self {
        Self(self.0.round_dp_with_strategy(0, mode.strategy()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'b> Sum<&'b Money> for Money {
    fn sum<I: Iterator<Item = &'b Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BillKind {
    /// Split across the whole roster.
    Shared,
    /// Split across the bill's own beneficiary list.
    Private,
}

/// An expense record as handed to the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill<'a> {
    pub amount: Money,
    pub payer: &'a str,
    pub kind: BillKind,
    /// Ignored for shared bills.
    pub beneficiaries: Vec<&'a str>,
    pub is_settled: bool,
}

impl<'a> Bill<'a> {
    pub fn shared(amount: Money, payer: &'a str) -> Self {
        Self {
            amount,
            payer,
            kind: BillKind::Shared,
            beneficiaries: Vec::new(),
            is_settled: false,
        }
    }

    pub fn private<I>(amount: Money, payer: &'a str, beneficiaries: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            amount,
            payer,
            kind: BillKind::Private,
            beneficiaries: beneficiaries.into_iter().collect(),
            is_settled: false,
        }
    }

    pub fn settled(mut self) -> Self {
        self.is_settled = true;
        self
    }

    pub fn is_private(&self) -> bool {
        self.kind == BillKind::Private
    }
}

/// Paid and consumed totals for one member.
///
/// `total_paid == shared_paid + private_paid` and
/// `total_consumed == shared_consumed + private_consumed` hold after every update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceSet {
    pub shared_paid: Money,
    pub private_paid: Money,
    pub total_paid: Money,
    pub shared_consumed: Money,
    pub private_consumed: Money,
    pub total_consumed: Money,
}

impl BalanceSet {
    pub fn record_paid(&mut self, kind: BillKind, amount: Money) {
        match kind {
            BillKind::Shared => self.shared_paid += amount,
            BillKind::Private => self.private_paid += amount,
        }
        self.total_paid += amount;
    }

    pub fn record_consumed(&mut self, kind: BillKind, amount: Money) {
        match kind {
            BillKind::Shared => self.shared_consumed += amount,
            BillKind::Private => self.private_consumed += amount,
        }
        self.total_consumed += amount;
    }

    /// Paid fields are left as exact sums. The consumed total is rebuilt from
    /// its rounded parts so the decomposition survives rounding.
    pub(crate) fn round_consumed(&mut self, mode: RoundingMode) {
        self.shared_consumed = self.shared_consumed.round(mode);
        self.private_consumed = self.private_consumed.round(mode);
        self.total_consumed = self.shared_consumed + self.private_consumed;
    }
}

/// A record the engine skipped, fully or in part.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagnostic<'a> {
    UnknownPayer { bill_index: usize, payer: &'a str },
    UnknownBeneficiary { bill_index: usize, name: &'a str },
    NoBeneficiaries { bill_index: usize },
}

impl<'a> Diagnostic<'a> {
    pub fn bill_index(&self) -> usize {
        match self {
            Diagnostic::UnknownPayer { bill_index, .. }
            | Diagnostic::UnknownBeneficiary { bill_index, .. }
            | Diagnostic::NoBeneficiaries { bill_index } => *bill_index,
        }
    }

    /// Logs the diagnostic and appends it to `sink`.
    pub(crate) fn emit(self, sink: &mut Vec<Diagnostic<'a>>) {
        match &self {
            Diagnostic::UnknownPayer { bill_index, payer } => {
                tracing::warn!(bill_index, payer, "Skipping bill paid by unknown member");
            }
            Diagnostic::UnknownBeneficiary { bill_index, name } => {
                tracing::warn!(
                    bill_index,
                    beneficiary = name,
                    "Dropping unknown beneficiary from bill split"
                );
            }
            Diagnostic::NoBeneficiaries { bill_index } => {
                tracing::warn!(bill_index, "Private bill has no known beneficiaries");
            }
        }
        sink.push(self);
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownPayer { bill_index, payer } => {
                write!(f, "bill #{bill_index}: payer '{payer}' is not a member")
            }
            Diagnostic::UnknownBeneficiary { bill_index, name } => {
                write!(f, "bill #{bill_index}: beneficiary '{name}' is not a member")
            }
            Diagnostic::NoBeneficiaries { bill_index } => {
                write!(f, "bill #{bill_index}: no known beneficiaries")
            }
        }
    }
}

/// Output of [`BalanceEngine::compute_balances`](crate::BalanceEngine::compute_balances).
#[derive(Clone, Debug, PartialEq)]
pub struct BalanceSheet<'a> {
    pub balances: MemberBalances<'a>,
    pub stats: MemberStats<'a>,
    pub private_balances: MemberBalances<'a>,
    pub diagnostics: Vec<Diagnostic<'a>>,
}

/// Output of [`BalanceEngine::compute_private_matrix`](crate::BalanceEngine::compute_private_matrix).
///
/// `matrix[payer][beneficiary]` is what `payer` spent on behalf of `beneficiary`.
/// The diagonal holds self-shares and is not masked.
#[derive(Clone, Debug, PartialEq)]
pub struct PrivateMatrix<'a> {
    pub matrix: IndexMap<&'a str, MemberBalances<'a>>,
    pub totals: MemberBalances<'a>,
    pub diagnostics: Vec<Diagnostic<'a>>,
}

impl<'a> PrivateMatrix<'a> {
    pub fn owed(&self, payer: &str, beneficiary: &str) -> Money {
        self.matrix
            .get(payer)
            .and_then(|row| row.get(beneficiary))
            .copied()
            .unwrap_or(Money::ZERO)
    }

    pub fn total(&self, payer: &str) -> Money {
        self.totals.get(payer).copied().unwrap_or(Money::ZERO)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebtTransaction<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

pub(crate) fn zeroed_balances<'a>(members: &'a [&'a str]) -> MemberBalances<'a> {
    members
        .iter()
        .copied()
        .map(|member| (member, Money::ZERO))
        .collect()
}

pub(crate) fn round_balances(balances: &mut MemberBalances<'_>, mode: RoundingMode) {
    for balance in balances.values_mut() {
        *balance = balance.round(mode);
    }
}
