//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    AccountActivity, AgingReport, BalanceSheetReport, BalanceSheetSection, CashFlowReport,
    OutstandingSale, ProfitAndLossReport, TrialBalanceReport,
};

/// Two totals are considered in agreement when they differ by less than one
/// cent. A difference of exactly 0.01 is out of balance.
const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Service for assembling financial reports from aggregated figures.
pub struct ReportService;

impl ReportService {
    /// Returns true if `a` and `b` agree within the balance tolerance.
    #[must_use]
    pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < BALANCE_TOLERANCE
    }

    /// Generates a trial balance report from per-account activity.
    ///
    /// The trial balance verifies that total debits equal total credits.
    #[must_use]
    pub fn generate_trial_balance(
        start_date: NaiveDate,
        end_date: NaiveDate,
        accounts: Vec<AccountActivity>,
    ) -> TrialBalanceReport {
        let total_debits: Decimal = accounts.iter().map(|a| a.total_debit).sum();
        let total_credits: Decimal = accounts.iter().map(|a| a.total_credit).sum();

        TrialBalanceReport {
            start_date,
            end_date,
            accounts,
            total_debits,
            total_credits,
            is_balanced: Self::within_tolerance(total_debits, total_credits),
        }
    }

    /// Generates a profit & loss report from income/expense activity.
    ///
    /// Revenue is income-account credits minus debits; expenses are
    /// expense-account debits minus credits (the `balance` column carries
    /// each, per the account's normal side). Accounts of other types are
    /// ignored.
    #[must_use]
    pub fn generate_profit_and_loss(
        start_date: NaiveDate,
        end_date: NaiveDate,
        accounts: Vec<AccountActivity>,
    ) -> ProfitAndLossReport {
        let mut income = Vec::new();
        let mut expenses = Vec::new();

        for account in accounts {
            match account.account_type.as_str() {
                "income" => income.push(account),
                "expense" => expenses.push(account),
                _ => {}
            }
        }

        let total_revenue: Decimal = income.iter().map(|a| a.balance).sum();
        let total_expenses: Decimal = expenses.iter().map(|a| a.balance).sum();
        let net_income = total_revenue - total_expenses;
        let profit_margin = if total_revenue == Decimal::ZERO {
            Decimal::ZERO
        } else {
            net_income / total_revenue * Decimal::ONE_HUNDRED
        };

        ProfitAndLossReport {
            start_date,
            end_date,
            income,
            expenses,
            total_revenue,
            total_expenses,
            net_income,
            profit_margin,
        }
    }

    /// Generates a balance sheet report from as-of account activity.
    ///
    /// Verifies the accounting equation: Assets = Liabilities + Equity.
    #[must_use]
    pub fn generate_balance_sheet(
        as_of: NaiveDate,
        accounts: Vec<AccountActivity>,
    ) -> BalanceSheetReport {
        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();

        for account in accounts {
            match account.account_type.as_str() {
                "asset" => Self::add_to_section(&mut assets, account),
                "liability" => Self::add_to_section(&mut liabilities, account),
                "equity" => Self::add_to_section(&mut equity, account),
                _ => {}
            }
        }

        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total;

        BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            is_balanced: Self::within_tolerance(total_assets, total_liabilities + total_equity),
        }
    }

    /// Generates a cash flow report from period cash movements.
    ///
    /// Investing and financing lines are fixed at zero.
    #[must_use]
    pub fn generate_cash_flow(
        start_date: NaiveDate,
        end_date: NaiveDate,
        operating_inflows: Decimal,
        operating_outflows: Decimal,
        beginning_cash: Decimal,
    ) -> CashFlowReport {
        let net_operating = operating_inflows - operating_outflows;

        CashFlowReport {
            start_date,
            end_date,
            operating_inflows,
            operating_outflows,
            net_operating,
            investing_activities: Decimal::ZERO,
            financing_activities: Decimal::ZERO,
            beginning_cash,
            ending_cash: beginning_cash + net_operating,
        }
    }

    /// Generates an aging analysis of unpaid sales.
    ///
    /// Buckets by invoice age in days relative to `as_of`: up to 30 days,
    /// 31-60, 61-90, over 90. Invoices dated after `as_of` count as current.
    #[must_use]
    pub fn generate_aging_analysis(as_of: NaiveDate, sales: Vec<OutstandingSale>) -> AgingReport {
        let mut report = AgingReport::empty(as_of);

        for sale in sales {
            let age_days = (as_of - sale.sale_date).num_days();
            report.place(age_days, sale.outstanding);
        }

        report
    }

    fn add_to_section(section: &mut BalanceSheetSection, account: AccountActivity) {
        section.total += account.balance;
        section.accounts.push(account);
    }
}
