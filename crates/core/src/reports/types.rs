//! Report data types.
//!
//! All shapes serialize with the camelCase field names the API exposes, and
//! monetary fields serialize as `Decimal` so report JSON round-trips numeric
//! values bit-for-bit with no locale-dependent formatting.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-account debit/credit activity over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountActivity {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type string (asset, liability, equity, income, expense).
    pub account_type: String,
    /// Total debit amount in the period.
    pub total_debit: Decimal,
    /// Total credit amount in the period.
    pub total_credit: Decimal,
    /// Net balance per the account type's normal side.
    pub balance: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceReport {
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Per-account debit/credit sums, code ascending.
    pub accounts: Vec<AccountActivity>,
    /// Sum of all debit columns.
    pub total_debits: Decimal,
    /// Sum of all credit columns.
    pub total_credits: Decimal,
    /// Whether debits and credits agree within tolerance.
    pub is_balanced: bool,
}

/// Profit & loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLossReport {
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Income accounts with activity.
    pub income: Vec<AccountActivity>,
    /// Expense accounts with activity.
    pub expenses: Vec<AccountActivity>,
    /// Total revenue (income credits minus debits).
    pub total_revenue: Decimal,
    /// Total expenses (expense debits minus credits).
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub net_income: Decimal,
    /// Net income as a percentage of revenue; zero when revenue is zero.
    pub profit_margin: Decimal,
}

/// One section of the balance sheet (assets, liabilities, or equity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetSection {
    /// Accounts in this section, code ascending.
    pub accounts: Vec<AccountActivity>,
    /// Section total.
    pub total: Decimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetReport {
    /// Snapshot date.
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity section.
    pub equity: BalanceSheetSection,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// Whether assets equal liabilities plus equity within tolerance.
    pub is_balanced: bool,
}

/// Cash flow report.
///
/// Only operating activity is derived from data; the ERP records no
/// investing or financing transactions, so those lines stay at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Cash collected on sales in the period.
    pub operating_inflows: Decimal,
    /// Expenses paid in the period.
    pub operating_outflows: Decimal,
    /// Inflows minus outflows.
    pub net_operating: Decimal,
    /// Investing activity (always zero).
    pub investing_activities: Decimal,
    /// Financing activity (always zero).
    pub financing_activities: Decimal,
    /// Configured opening cash position.
    pub beginning_cash: Decimal,
    /// Beginning cash plus net change.
    pub ending_cash: Decimal,
}

/// An unpaid sale considered by the aging analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingSale {
    /// Sale ID.
    pub sale_id: Uuid,
    /// Invoice number.
    pub invoice_number: String,
    /// Invoice date.
    pub sale_date: NaiveDate,
    /// Outstanding amount (`grand_total - amount_paid`).
    pub outstanding: Decimal,
}

/// One aging bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingBucket {
    /// Number of unpaid invoices in the bucket.
    pub count: u64,
    /// Total outstanding amount in the bucket.
    pub total: Decimal,
}

impl AgingBucket {
    fn add(&mut self, outstanding: Decimal) {
        self.count += 1;
        self.total += outstanding;
    }
}

/// Receivables aging report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingReport {
    /// Date the ages were measured against.
    pub as_of: NaiveDate,
    /// Invoices up to 30 days old.
    pub current: AgingBucket,
    /// Invoices 31 to 60 days old.
    pub thirty_days: AgingBucket,
    /// Invoices 61 to 90 days old.
    pub sixty_days: AgingBucket,
    /// Invoices over 90 days old.
    pub ninety_days: AgingBucket,
    /// All unpaid invoices.
    pub total: AgingBucket,
}

impl AgingReport {
    pub(super) fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            current: AgingBucket::default(),
            thirty_days: AgingBucket::default(),
            sixty_days: AgingBucket::default(),
            ninety_days: AgingBucket::default(),
            total: AgingBucket::default(),
        }
    }

    pub(super) fn place(&mut self, age_days: i64, outstanding: Decimal) {
        match age_days {
            i64::MIN..=30 => self.current.add(outstanding),
            31..=60 => self.thirty_days.add(outstanding),
            61..=90 => self.sixty_days.add(outstanding),
            _ => self.ninety_days.add(outstanding),
        }
        self.total.add(outstanding);
    }
}
