use billsplit_domain::{
    BalanceEngine, Bill, DebtSettlement, MemberBalances, Money, services::SETTLED_TOLERANCE,
};
use proptest::prelude::*;
use rstest::rstest;

const NAMES: [&str; 6] = ["Alice", "Bob", "Charlie", "Dave", "Erin", "Frank"];

fn build_bills<'a>(
    members: &'a [&'a str],
    amounts: &[u64],
    payer_indexes: &[usize],
    beneficiary_masks: &[u8],
    settled_flags: &[bool],
) -> Vec<Bill<'a>> {
    amounts
        .iter()
        .enumerate()
        .map(|(idx, &amount)| {
            let payer = members[payer_indexes.get(idx).copied().unwrap_or(0) % members.len()];
            let mask = beneficiary_masks.get(idx).copied().unwrap_or(0);
            let amount = Money::from_u64(amount);
            let bill = if mask == 0 {
                Bill::shared(amount, payer)
            } else {
                let beneficiaries = members
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, name)| *name)
                    .collect::<Vec<_>>();
                if beneficiaries.is_empty() {
                    Bill::private(amount, payer, [payer])
                } else {
                    Bill::private(amount, payer, beneficiaries)
                }
            };
            if settled_flags.get(idx).copied().unwrap_or(false) {
                bill.settled()
            } else {
                bill
            }
        })
        .collect()
}

fn transferred_total(transfers: &[billsplit_domain::DebtTransaction<'_>]) -> Money {
    transfers.iter().map(|transfer| transfer.amount).sum()
}

proptest! {
    #[test]
    fn balances_sum_to_zero_within_rounding(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(0u64..=100_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        beneficiary_masks in prop::collection::vec(0u8..=63, 0..=30),
    ) {
        let members = &NAMES[..member_count];
        let bills = build_bills(members, &amounts, &payer_indexes, &beneficiary_masks, &[]);

        let sheet = BalanceEngine::default().compute_balances(members, &bills);

        let residual: Money = sheet.balances.values().sum();
        prop_assert!(residual.abs() <= Money::from_u64(member_count as u64));
        let private_residual: Money = sheet.private_balances.values().sum();
        prop_assert!(private_residual.abs() <= Money::from_u64(member_count as u64));
        prop_assert!(sheet.diagnostics.is_empty());
    }

    #[test]
    fn stats_decompose_into_shared_and_private(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(0u64..=100_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        beneficiary_masks in prop::collection::vec(0u8..=63, 0..=30),
        settled_flags in prop::collection::vec(any::<bool>(), 0..=30),
    ) {
        let members = &NAMES[..member_count];
        let bills = build_bills(
            members,
            &amounts,
            &payer_indexes,
            &beneficiary_masks,
            &settled_flags,
        );

        let sheet = BalanceEngine::default().compute_balances(members, &bills);

        for stats in sheet.stats.values() {
            prop_assert_eq!(stats.total_paid, stats.shared_paid + stats.private_paid);
            prop_assert_eq!(
                stats.total_consumed,
                stats.shared_consumed + stats.private_consumed
            );
        }
        let paid: Money = sheet.stats.values().map(|stats| stats.total_paid).sum();
        let logged: Money = bills.iter().map(|bill| bill.amount).sum();
        prop_assert_eq!(paid, logged);
    }

    #[test]
    fn settling_a_bill_keeps_paid_but_drops_balance_effect(
        member_count in 2usize..=6,
        amount in 1u64..=100_000,
        payer_index in 0usize..=5,
        mask in 1u8..=63,
    ) {
        let members = &NAMES[..member_count];
        let open = build_bills(members, &[amount], &[payer_index], &[mask], &[false]);
        let settled = build_bills(members, &[amount], &[payer_index], &[mask], &[true]);
        let engine = BalanceEngine::default();

        let open_sheet = engine.compute_balances(members, &open);
        let settled_sheet = engine.compute_balances(members, &settled);

        let payer = open[0].payer;
        prop_assert_eq!(
            open_sheet.stats[payer].total_paid,
            settled_sheet.stats[payer].total_paid
        );
        prop_assert!(settled_sheet.balances.values().all(|balance| balance.is_zero()));
        prop_assert!(settled_sheet.private_balances.values().all(|balance| balance.is_zero()));
    }

    #[test]
    fn transfers_conserve_debt(
        balances in prop::collection::vec(-20_000i64..=20_000, 1..=6),
    ) {
        let mut values: Vec<i64> = balances
            .into_iter()
            .map(|value| if value.abs() == 1 { value * 2 } else { value })
            .collect();
        let closing = -values.iter().sum::<i64>();
        prop_assume!(closing.abs() != 1);
        values.push(closing);

        let input: MemberBalances<'_> = NAMES
            .iter()
            .copied()
            .chain(["Grace"])
            .zip(values.iter().map(|&value| Money::from_i64(value)))
            .collect();

        let transfers = DebtSettlement::default().compute_transfers(&input);

        let due: Money = input
            .values()
            .filter(|balance| **balance > SETTLED_TOLERANCE)
            .sum();
        prop_assert_eq!(transferred_total(&transfers), due);

        let mut remaining = input.clone();
        for transfer in &transfers {
            prop_assert!(transfer.amount > Money::ZERO);
            prop_assert_ne!(transfer.from, transfer.to);
            prop_assert!(input[transfer.from] < Money::ZERO);
            prop_assert!(input[transfer.to] > Money::ZERO);
            remaining[transfer.from] += transfer.amount;
            remaining[transfer.to] -= transfer.amount;
        }
        prop_assert!(remaining.values().all(|balance| balance.abs() <= SETTLED_TOLERANCE));
    }

    #[test]
    fn members_within_tolerance_never_transfer(
        balances in prop::collection::vec(-3i64..=3, 2..=6),
    ) {
        let input: MemberBalances<'_> = NAMES
            .iter()
            .copied()
            .zip(balances.iter().map(|&value| Money::from_i64(value)))
            .collect();

        let transfers = DebtSettlement::default().compute_transfers(&input);

        for transfer in &transfers {
            prop_assert!(input[transfer.from].abs() > SETTLED_TOLERANCE);
            prop_assert!(input[transfer.to].abs() > SETTLED_TOLERANCE);
        }
    }
}

#[rstest]
fn two_member_bill_settles_in_one_transfer() {
    let members = ["Alice", "Bob"];
    let bills = [Bill::private(
        Money::from_i64(100_000),
        "Alice",
        ["Alice", "Bob"],
    )];
    let shared = [Bill::shared(Money::from_i64(100_000), "Alice")];

    let sheet = BalanceEngine::default().compute_balances(&members, &shared);
    let transfers = DebtSettlement::default().compute_transfers(&sheet.balances);

    assert_eq!(sheet.balances["Alice"], Money::from_i64(50_000));
    assert_eq!(sheet.balances["Bob"], Money::from_i64(-50_000));
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].from, "Bob");
    assert_eq!(transfers[0].to, "Alice");
    assert_eq!(transfers[0].amount, Money::from_i64(50_000));

    let private_sheet = BalanceEngine::default().compute_balances(&members, &bills);
    assert_eq!(private_sheet.balances, sheet.balances);
}

#[rstest]
#[case::three_way(&["A", "B", "C"], 100_000)]
#[case::seven_way(&["A", "B", "C", "D", "E", "F", "G"], 10)]
fn uneven_split_stays_within_one_unit(#[case] members: &[&str], #[case] amount: i64) {
    let bills = [Bill::shared(Money::from_i64(amount), members[0])];

    let sheet = BalanceEngine::default().compute_balances(members, &bills);

    let residual: Money = sheet.balances.values().sum();
    assert!(residual.abs() <= Money::from_u64(members.len() as u64));
}

#[rstest]
fn private_and_global_plans_are_independent() {
    let members = ["Alice", "Bob", "Charlie"];
    let bills = [
        Bill::shared(Money::from_i64(300), "Charlie"),
        Bill::private(Money::from_i64(60_000), "Alice", ["Alice", "Bob"]),
    ];
    let engine = BalanceEngine::default();
    let settlement = DebtSettlement::default();

    let sheet = engine.compute_balances(&members, &bills);
    let matrix = engine.compute_private_matrix(&members, &bills);
    let private_plan = settlement.compute_transfers(&sheet.private_balances);
    let global_plan = settlement.compute_transfers(&sheet.balances);

    assert_eq!(sheet.private_balances["Charlie"], Money::ZERO);
    assert_eq!(matrix.owed("Alice", "Bob"), Money::from_i64(30_000));
    assert_eq!(private_plan.len(), 1);
    assert_eq!(private_plan[0].from, "Bob");
    assert_eq!(private_plan[0].amount, Money::from_i64(30_000));
    assert_eq!(transferred_total(&global_plan), Money::from_i64(30_100));
}
