use chrono::{NaiveDateTime, Weekday};
use rust_decimal::Decimal;

use crate::calendar::DateFilter;
use crate::models::{Transaction, TransactionType};
use crate::report::errors::ReportError;

/// Sums of amounts per transaction type for one reporting window.
///
/// Opening balances never land here, so `Initial` always reads as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub transfer: Decimal,
    pub savings: Decimal,
    pub investment: Decimal
}

impl TypeTotals {
    pub fn get(&self, transaction_type: TransactionType) -> Decimal {
        match transaction_type {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
            TransactionType::Transfer => self.transfer,
            TransactionType::Savings => self.savings,
            TransactionType::Investment => self.investment,
            TransactionType::Initial => Decimal::ZERO
        }
    }

    fn add(&mut self, transaction_type: TransactionType, amount: Decimal) -> Result<(), ReportError> {
        let (total, quantity) = match transaction_type {
            TransactionType::Income => (&mut self.income, "income total"),
            TransactionType::Expense => (&mut self.expense, "expense total"),
            TransactionType::Transfer => (&mut self.transfer, "transfer total"),
            TransactionType::Savings => (&mut self.savings, "savings total"),
            TransactionType::Investment => (&mut self.investment, "investment total"),
            TransactionType::Initial => return Ok(())
        };

        *total = total.checked_add(amount)
            .ok_or_else(|| ReportError::overflow(quantity))?;

        Ok(())
    }
}

/// Category sums kept in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, Decimal)>
}

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Decimal {
        self.entries.iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    fn add(&mut self, category: &str, amount: Decimal) -> Result<(), ReportError> {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => {
                *total = total.checked_add(amount)
                    .ok_or_else(|| ReportError::overflow("category total"))?;
            }
            None => self.entries.push((category.to_string(), amount))
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    pub expense: CategoryTotals,
    pub income: CategoryTotals,
    pub investment: CategoryTotals,
    pub savings: CategoryTotals
}

impl CategoryBreakdown {
    /// Breakdown for a type, `None` for types that are not broken down by category.
    pub fn get(&self, transaction_type: TransactionType) -> Option<&CategoryTotals> {
        match transaction_type {
            TransactionType::Expense => Some(&self.expense),
            TransactionType::Income => Some(&self.income),
            TransactionType::Investment => Some(&self.investment),
            TransactionType::Savings => Some(&self.savings),
            TransactionType::Transfer | TransactionType::Initial => None
        }
    }

    fn add(&mut self, transaction: &Transaction) -> Result<(), ReportError> {
        let totals = match transaction.transaction_type {
            TransactionType::Expense => &mut self.expense,
            TransactionType::Income => &mut self.income,
            TransactionType::Investment => &mut self.investment,
            TransactionType::Savings => &mut self.savings,
            TransactionType::Transfer | TransactionType::Initial => return Ok(())
        };

        totals.add(&transaction.category, transaction.amount)
    }
}

/// Everything the dashboard derives from one owner's ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSummary {
    /// Computed over the entire history; never windowed.
    pub net_worth: Decimal,
    pub period_totals: TypeTotals,
    pub category_breakdown: CategoryBreakdown
}

impl LedgerSummary {
    /// Non-zero totals for the overall distribution chart, in display order.
    pub fn overall(&self) -> Vec<(TransactionType, Decimal)> {
        [TransactionType::Income, TransactionType::Expense, TransactionType::Investment, TransactionType::Savings]
            .into_iter()
            .map(|transaction_type| (transaction_type, self.period_totals.get(transaction_type)))
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .collect()
    }
}

/// Opening balance plus income minus expenses over the whole history.
///
/// Savings, investments and transfers move money between assets and leave
/// net worth untouched.
///
/// # Errors
/// Returns `ReportError::Overflow` when a running sum leaves the `Decimal` range.
pub fn net_worth(transactions: &[Transaction]) -> Result<Decimal, ReportError> {
    let mut worth = Decimal::ZERO;

    for transaction in transactions {
        let change = if transaction.is_opening_balance() {
            transaction.amount
        } else {
            match transaction.transaction_type {
                TransactionType::Income => transaction.amount,
                TransactionType::Expense => -transaction.amount,
                TransactionType::Transfer | TransactionType::Savings | TransactionType::Investment => continue,
                TransactionType::Initial => transaction.amount
            }
        };

        worth = worth.checked_add(change)
            .ok_or_else(|| ReportError::overflow("net worth"))?;
    }

    Ok(worth)
}

/// Non-opening-balance transactions inside `filter` relative to `now`.
pub fn windowed(
    transactions: &[Transaction],
    filter: DateFilter,
    now: NaiveDateTime,
    week_start: Weekday
) -> impl Iterator<Item = &Transaction> {
    transactions.iter()
        .filter(move |transaction| !transaction.is_opening_balance())
        .filter(move |transaction| filter.matches(transaction.date, now, week_start))
}

pub fn summarize(
    transactions: &[Transaction],
    filter: DateFilter,
    now: NaiveDateTime,
    week_start: Weekday
) -> Result<LedgerSummary, ReportError> {
    let mut period_totals = TypeTotals::default();
    let mut category_breakdown = CategoryBreakdown::default();

    for transaction in windowed(transactions, filter, now, week_start) {
        period_totals.add(transaction.transaction_type, transaction.amount)?;
        category_breakdown.add(transaction)?;
    }

    Ok(LedgerSummary {
        net_worth: net_worth(transactions)?,
        period_totals,
        category_breakdown
    })
}
