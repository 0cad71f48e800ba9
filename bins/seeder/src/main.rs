//! Database seeder for Rxledger development and testing.
//!
//! Seeds a pharmacy chart of accounts plus sample sales, expenses, and a
//! balanced opening journal entry for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use rxledger_core::ledger::{JournalLineInput, validate_lines};
use rxledger_db::entities::{accounts, expenses, sales, sea_orm_active_enums::AccountType};
use rxledger_db::repositories::journal::{CreateJournalEntryInput, JournalRepository};

/// Pharmacy chart of accounts seeded for development.
const CHART: &[(&str, &str, AccountType, Option<&str>)] = &[
    ("1000", "Cash", AccountType::Asset, Some("cash")),
    ("1100", "Accounts Receivable", AccountType::Asset, None),
    ("1200", "Pharmacy Inventory", AccountType::Asset, Some("inventory")),
    ("2000", "Accounts Payable", AccountType::Liability, None),
    ("3000", "Owner's Equity", AccountType::Equity, None),
    ("4000", "Sales Revenue", AccountType::Income, None),
    ("5000", "Cost of Goods Sold", AccountType::Expense, None),
    ("5100", "Salaries Expense", AccountType::Expense, None),
    ("5200", "Rent Expense", AccountType::Expense, None),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = rxledger_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding chart of accounts...");
    seed_accounts(&db).await;

    println!("Seeding sales...");
    seed_sales(&db).await;

    println!("Seeding expenses...");
    seed_expenses(&db).await;

    println!("Seeding opening journal entry...");
    seed_opening_entry(&db).await;

    println!("Seeding complete!");
}

/// Seeds the pharmacy chart of accounts, skipping codes that exist.
async fn seed_accounts(db: &DatabaseConnection) {
    let mut inserted = 0;
    for (code, name, account_type, subtype) in CHART {
        let exists = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(*code))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            continue;
        }

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set((*code).to_string()),
            name: Set((*name).to_string()),
            account_type: Set(account_type.clone()),
            subtype: Set(subtype.map(ToString::to_string)),
            parent_id: Set(None),
            is_active: Set(true),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        if let Err(e) = account.insert(db).await {
            eprintln!("Failed to insert account {code}: {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} accounts");
}

/// Seeds sample sales, one paid in full and one partially paid.
async fn seed_sales(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let rows = [
        ("INV-0001", "Apotek Sehat", today - Duration::days(45), dec!(1500.00), dec!(1500.00)),
        ("INV-0002", "Klinik Medika", today - Duration::days(20), dec!(2750.50), dec!(1000.00)),
        ("INV-0003", "RS Harapan", today - Duration::days(75), dec!(980.00), dec!(0.00)),
    ];

    let mut inserted = 0;
    for (invoice, customer, sale_date, grand_total, amount_paid) in rows {
        let exists = sales::Entity::find()
            .filter(sales::Column::InvoiceNumber.eq(invoice))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            continue;
        }

        let sale = sales::ActiveModel {
            id: Set(Uuid::new_v4()),
            invoice_number: Set(invoice.to_string()),
            customer_name: Set(Some(customer.to_string())),
            sale_date: Set(sale_date),
            grand_total: Set(grand_total),
            amount_paid: Set(amount_paid),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = sale.insert(db).await {
            eprintln!("Failed to insert sale {invoice}: {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} sales");
}

/// Seeds sample expenses for the current month.
async fn seed_expenses(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);
    let rows = [
        (month_start, dec!(800.00), "rent", "Monthly store rent"),
        (month_start + Duration::days(5), dec!(350.00), "utilities", "Electricity and water"),
        (month_start + Duration::days(10), dec!(1200.00), "salaries", "Pharmacist payroll"),
    ];

    let count = expenses::Entity::find().all(db).await.map(|v| v.len());
    if matches!(count, Ok(n) if n > 0) {
        println!("  Expenses already exist, skipping...");
        return;
    }

    let mut inserted = 0;
    for (expense_date, amount, category, description) in rows {
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            expense_date: Set(expense_date),
            amount: Set(amount),
            category: Set(Some(category.to_string())),
            description: Set(Some(description.to_string())),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = expense.insert(db).await {
            eprintln!("Failed to insert expense {category}: {e}");
        } else {
            inserted += 1;
        }
    }
    println!("  Inserted {inserted} expenses");
}

/// Posts a balanced opening entry: cash and inventory against equity.
async fn seed_opening_entry(db: &DatabaseConnection) {
    let repo = JournalRepository::new(db.clone());
    match repo.count_entries().await {
        Ok(n) if n > 0 => {
            println!("  Journal entries already exist, skipping...");
            return;
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Failed to count journal entries: {e}");
            return;
        }
    }

    let cash = find_account(db, "1000").await;
    let inventory = find_account(db, "1200").await;
    let equity = find_account(db, "3000").await;
    let (Some(cash), Some(inventory), Some(equity)) = (cash, inventory, equity) else {
        eprintln!("Chart of accounts incomplete, skipping opening entry");
        return;
    };

    let lines = vec![
        JournalLineInput {
            account_id: cash.id,
            description: Some("Opening cash balance".to_string()),
            debit: dec!(50000.00),
            credit: Decimal::ZERO,
        },
        JournalLineInput {
            account_id: inventory.id,
            description: Some("Opening inventory".to_string()),
            debit: dec!(25000.00),
            credit: Decimal::ZERO,
        },
        JournalLineInput {
            account_id: equity.id,
            description: Some("Owner's capital".to_string()),
            debit: Decimal::ZERO,
            credit: dec!(75000.00),
        },
    ];

    let totals = validate_lines(&lines).expect("Opening entry must balance");
    let input = CreateJournalEntryInput {
        entry_date: Utc::now().date_naive(),
        reference: Some("OPENING".to_string()),
        memo: Some("Opening balances".to_string()),
        source_type: None,
        source_id: None,
        created_by: None,
        lines,
    };

    match repo.create_entry(input, &totals).await {
        Ok(created) => println!("  Posted {}", created.entry.entry_number),
        Err(e) => eprintln!("Failed to post opening entry: {e}"),
    }
}

async fn find_account(db: &DatabaseConnection, code: &str) -> Option<accounts::Model> {
    accounts::Entity::find()
        .filter(accounts::Column::Code.eq(code))
        .one(db)
        .await
        .ok()
        .flatten()
}
