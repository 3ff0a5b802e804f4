use crate::model::{Bill, BillKind, Diagnostic};
use fxhash::FxHashSet;

/// Resolves who a bill is split across, against the roster of one computation.
pub struct BeneficiaryResolver<'a> {
    members: &'a [&'a str],
    lookup: FxHashSet<&'a str>,
}

impl<'a> BeneficiaryResolver<'a> {
    pub fn new(members: &'a [&'a str]) -> Self {
        Self {
            members,
            lookup: members.iter().copied().collect(),
        }
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    /// Shared bills go to the whole roster. Private bills keep their listed
    /// beneficiaries in order, minus unknown names, which are reported to `sink`.
    pub fn resolve(
        &self,
        bill_index: usize,
        bill: &Bill<'a>,
        sink: &mut Vec<Diagnostic<'a>>,
    ) -> Vec<&'a str> {
        match bill.kind {
            BillKind::Shared => self.members.to_vec(),
            BillKind::Private => {
                let mut resolved = Vec::with_capacity(bill.beneficiaries.len());
                for &name in &bill.beneficiaries {
                    if self.is_member(name) {
                        resolved.push(name);
                    } else {
                        Diagnostic::UnknownBeneficiary { bill_index, name }.emit(sink);
                    }
                }
                if resolved.is_empty() {
                    Diagnostic::NoBeneficiaries { bill_index }.emit(sink);
                }
                resolved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Money;
    use rstest::{fixture, rstest};

    const MEMBERS: [&str; 3] = ["Alice", "Bob", "Charlie"];

    #[fixture]
    fn resolver() -> BeneficiaryResolver<'static> {
        BeneficiaryResolver::new(&MEMBERS)
    }

    #[rstest]
    fn shared_bill_ignores_listed_beneficiaries(resolver: BeneficiaryResolver<'static>) {
        let mut bill = Bill::shared(Money::from_i64(90), "Alice");
        bill.beneficiaries = vec!["Bob"];
        let mut diagnostics = Vec::new();

        let resolved = resolver.resolve(0, &bill, &mut diagnostics);

        assert_eq!(resolved, MEMBERS.to_vec());
        assert!(diagnostics.is_empty());
    }

    #[rstest]
    #[case::all_known(&["Charlie", "Alice"], &["Charlie", "Alice"], 0)]
    #[case::one_unknown(&["Alice", "Mallory", "Bob"], &["Alice", "Bob"], 1)]
    #[case::all_unknown(&["Mallory", "Trent"], &[], 3)]
    fn private_bill_filters_unknown_names(
        resolver: BeneficiaryResolver<'static>,
        #[case] listed: &'static [&'static str],
        #[case] expected: &[&str],
        #[case] expected_diagnostics: usize,
    ) {
        let bill = Bill::private(Money::from_i64(60), "Alice", listed.iter().copied());
        let mut diagnostics = Vec::new();

        let resolved = resolver.resolve(7, &bill, &mut diagnostics);

        assert_eq!(resolved, expected);
        assert_eq!(diagnostics.len(), expected_diagnostics);
        assert!(diagnostics.iter().all(|d| d.bill_index() == 7));
    }

    #[rstest]
    fn membership_lookup(resolver: BeneficiaryResolver<'static>) {
        assert!(resolver.is_member("Bob"));
        assert!(!resolver.is_member("bob"));
    }
}
