//! Property-based and scenario tests for the reports module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::service::ReportService;
use super::types::{AccountActivity, OutstandingSale};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn activity(
    code: &str,
    account_type: &str,
    total_debit: Decimal,
    total_credit: Decimal,
) -> AccountActivity {
    let balance = if matches!(account_type, "asset" | "expense") {
        total_debit - total_credit
    } else {
        total_credit - total_debit
    };
    AccountActivity {
        account_id: Uuid::new_v4(),
        code: code.to_string(),
        name: format!("Account {code}"),
        account_type: account_type.to_string(),
        total_debit,
        total_credit,
        balance,
    }
}

proptest! {
    /// Trial balance totals must equal the naive reference sum of the same
    /// rows, regardless of how many accounts or what amounts are involved.
    #[test]
    fn test_trial_balance_totals_match_reference_sum(
        cents in prop::collection::vec((0i64..10_000_000, 0i64..10_000_000), 1..20),
    ) {
        let accounts: Vec<AccountActivity> = cents
            .iter()
            .enumerate()
            .map(|(i, &(debit, credit))| {
                activity(
                    &format!("{}", 1000 + i),
                    if i % 2 == 0 { "asset" } else { "liability" },
                    Decimal::new(debit, 2),
                    Decimal::new(credit, 2),
                )
            })
            .collect();

        let expected_debits: Decimal = accounts.iter().map(|a| a.total_debit).sum();
        let expected_credits: Decimal = accounts.iter().map(|a| a.total_credit).sum();

        let report = ReportService::generate_trial_balance(
            date(2026, 1, 1),
            date(2026, 12, 31),
            accounts,
        );

        prop_assert_eq!(report.total_debits, expected_debits);
        prop_assert_eq!(report.total_credits, expected_credits);
        prop_assert_eq!(
            report.is_balanced,
            (expected_debits - expected_credits).abs() < dec!(0.01)
        );
    }

    /// Aging buckets are mutually exclusive and collectively exhaustive:
    /// bucket counts and totals always sum to the overall totals.
    #[test]
    fn test_aging_buckets_partition_unpaid_sales(
        ages in prop::collection::vec((-10i64..400, 1i64..1_000_000), 0..30),
    ) {
        let as_of = date(2026, 8, 1);
        let sales: Vec<OutstandingSale> = ages
            .iter()
            .enumerate()
            .map(|(i, &(age, cents))| OutstandingSale {
                sale_id: Uuid::new_v4(),
                invoice_number: format!("INV-{i:04}"),
                sale_date: as_of - chrono::Duration::days(age),
                outstanding: Decimal::new(cents, 2),
            })
            .collect();

        let expected_count = sales.len() as u64;
        let expected_total: Decimal = sales.iter().map(|s| s.outstanding).sum();

        let report = ReportService::generate_aging_analysis(as_of, sales);

        let bucket_count = report.current.count
            + report.thirty_days.count
            + report.sixty_days.count
            + report.ninety_days.count;
        let bucket_total = report.current.total
            + report.thirty_days.total
            + report.sixty_days.total
            + report.ninety_days.total;

        prop_assert_eq!(bucket_count, expected_count);
        prop_assert_eq!(bucket_count, report.total.count);
        prop_assert_eq!(bucket_total, expected_total);
        prop_assert_eq!(bucket_total, report.total.total);
    }

    /// The accounting equation check holds for any generated ledger where
    /// equity is derived as assets minus liabilities.
    #[test]
    fn test_balance_sheet_equation(
        asset_cents in 0i64..1_000_000_000,
        liability_cents in 0i64..500_000_000,
    ) {
        let assets = Decimal::new(asset_cents, 2);
        let liabilities = Decimal::new(liability_cents, 2);
        let equity = assets - liabilities;

        let accounts = vec![
            activity("1000", "asset", assets, Decimal::ZERO),
            activity("2000", "liability", Decimal::ZERO, liabilities),
            activity("3000", "equity", Decimal::ZERO, equity),
        ];

        let report = ReportService::generate_balance_sheet(date(2026, 6, 30), accounts);

        prop_assert_eq!(report.total_assets, assets);
        prop_assert_eq!(report.total_liabilities, liabilities);
        prop_assert_eq!(report.total_equity, equity);
        prop_assert!(report.is_balanced);
    }
}

#[test]
fn test_balance_tolerance_boundary() {
    // Difference of exactly 0.01 is out of balance; 0.0099 is in balance.
    assert!(!ReportService::within_tolerance(dec!(100.01), dec!(100.00)));
    assert!(ReportService::within_tolerance(dec!(100.0099), dec!(100.00)));
    assert!(ReportService::within_tolerance(dec!(100.00), dec!(100.00)));
}

#[test]
fn test_trial_balance_two_account_scenario() {
    // 100 debit against asset 1000, 100 credit against income 4000.
    let accounts = vec![
        activity("1000", "asset", dec!(100), Decimal::ZERO),
        activity("4000", "income", Decimal::ZERO, dec!(100)),
    ];
    let report =
        ReportService::generate_trial_balance(date(2026, 1, 1), date(2026, 12, 31), accounts);

    assert_eq!(report.total_debits, dec!(100));
    assert_eq!(report.total_credits, dec!(100));
    assert!(report.is_balanced);
}

#[test]
fn test_profit_and_loss_scenario() {
    // One sale of 200 and expenses of 50 + 30 in range.
    let accounts = vec![
        activity("4000", "income", Decimal::ZERO, dec!(200)),
        activity("5000", "expense", dec!(50), Decimal::ZERO),
        activity("5100", "expense", dec!(30), Decimal::ZERO),
    ];
    let report =
        ReportService::generate_profit_and_loss(date(2026, 1, 1), date(2026, 1, 31), accounts);

    assert_eq!(report.total_revenue, dec!(200));
    assert_eq!(report.total_expenses, dec!(80));
    assert_eq!(report.net_income, dec!(120));
    assert_eq!(report.profit_margin, dec!(60));
}

#[test]
fn test_profit_margin_zero_when_no_revenue() {
    let accounts = vec![activity("5000", "expense", dec!(500), Decimal::ZERO)];
    let report =
        ReportService::generate_profit_and_loss(date(2026, 1, 1), date(2026, 1, 31), accounts);

    assert_eq!(report.total_revenue, Decimal::ZERO);
    assert_eq!(report.net_income, dec!(-500));
    assert_eq!(report.profit_margin, Decimal::ZERO);
}

#[test]
fn test_profit_and_loss_ignores_other_account_types() {
    let accounts = vec![
        activity("1000", "asset", dec!(999), Decimal::ZERO),
        activity("4000", "income", Decimal::ZERO, dec!(100)),
    ];
    let report =
        ReportService::generate_profit_and_loss(date(2026, 1, 1), date(2026, 1, 31), accounts);

    assert_eq!(report.total_revenue, dec!(100));
    assert!(report.expenses.is_empty());
}

#[test]
fn test_cash_flow_hardcoded_sections() {
    let report = ReportService::generate_cash_flow(
        date(2026, 1, 1),
        date(2026, 3, 31),
        dec!(1200),
        dec!(700),
        dec!(50000),
    );

    assert_eq!(report.net_operating, dec!(500));
    assert_eq!(report.investing_activities, Decimal::ZERO);
    assert_eq!(report.financing_activities, Decimal::ZERO);
    assert_eq!(report.ending_cash, dec!(50500));
}

#[test]
fn test_aging_bucket_boundaries() {
    let as_of = date(2026, 8, 1);
    let sale = |days: i64, amount: Decimal| OutstandingSale {
        sale_id: Uuid::new_v4(),
        invoice_number: format!("INV-{days}"),
        sale_date: as_of - chrono::Duration::days(days),
        outstanding: amount,
    };

    let report = ReportService::generate_aging_analysis(
        as_of,
        vec![
            sale(30, dec!(10)),  // current boundary
            sale(31, dec!(20)),  // 31-60
            sale(60, dec!(30)),  // 31-60 boundary
            sale(61, dec!(40)),  // 61-90
            sale(90, dec!(50)),  // 61-90 boundary
            sale(91, dec!(60)),  // over 90
            sale(-5, dec!(70)),  // future-dated counts as current
        ],
    );

    assert_eq!(report.current.count, 2);
    assert_eq!(report.current.total, dec!(80));
    assert_eq!(report.thirty_days.count, 2);
    assert_eq!(report.thirty_days.total, dec!(50));
    assert_eq!(report.sixty_days.count, 2);
    assert_eq!(report.sixty_days.total, dec!(90));
    assert_eq!(report.ninety_days.count, 1);
    assert_eq!(report.ninety_days.total, dec!(60));
    assert_eq!(report.total.count, 7);
}

#[test]
fn test_report_json_round_trips_numeric_fields() {
    let accounts = vec![
        activity("1000", "asset", dec!(123.45), dec!(0.01)),
        activity("4000", "income", dec!(0.00), dec!(123.44)),
    ];
    let report =
        ReportService::generate_trial_balance(date(2026, 1, 1), date(2026, 12, 31), accounts);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: super::types::TrialBalanceReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.total_debits, report.total_debits);
    assert_eq!(parsed.total_credits, report.total_credits);
    assert_eq!(parsed.accounts[0].total_debit, report.accounts[0].total_debit);
    assert_eq!(parsed.accounts[0].balance, report.accounts[0].balance);
}
