// 📚 Journal Entries - Double-entry postings
//
// Each transaction becomes exactly two postings:
//   incoming → Debit bank,  Credit offset account
//   outgoing → Credit bank, Debit offset account
// Exactly one of debit/credit is set per posting.

use crate::accounts::{ChartOfAccounts, GlAccount};
use crate::error::LedgerResult;
use crate::generator::{GeneratedLedger, Transaction};
use crate::period::Period;
use serde::{Deserialize, Serialize};

pub const OFFSET_MEMO: &str = "Offset entry";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub journal_no: String,
    pub date: String,
    pub account_code: String,
    pub account_name: String,
    pub description: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub memo: String,
}

impl Posting {
    fn new(tx: &Transaction, account: &GlAccount, debit: Option<f64>, credit: Option<f64>, memo: String) -> Self {
        Posting {
            journal_no: tx.journal_no(),
            date: tx.display_date(),
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            description: tx.description.clone(),
            debit,
            credit,
            memo,
        }
    }

    /// Debit minus credit
    pub fn net(&self) -> f64 {
        self.debit.unwrap_or(0.0) - self.credit.unwrap_or(0.0)
    }

    pub fn is_debit(&self) -> bool {
        self.debit.is_some()
    }
}

/// Bank posting first, offset posting second
pub fn post_transaction(tx: &Transaction, chart: &ChartOfAccounts) -> LedgerResult<[Posting; 2]> {
    let bank = chart.bank_account()?;
    let offset = chart.resolve(&tx.category)?;
    let amount = tx.magnitude();

    let postings = if tx.direction.is_incoming() {
        [
            Posting::new(tx, bank, Some(amount), None, format!("Bank receipt - {}", tx.display_date())),
            Posting::new(tx, offset, None, Some(amount), OFFSET_MEMO.to_string()),
        ]
    } else {
        [
            Posting::new(tx, bank, None, Some(amount), format!("Bank payment - {}", tx.display_date())),
            Posting::new(tx, offset, Some(amount), None, OFFSET_MEMO.to_string()),
        ]
    };
    Ok(postings)
}

// ============================================================================
// JOURNAL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub period: Period,
    pub entry_count: usize,
    pub postings: Vec<Posting>,
    pub total_debits: f64,
    pub total_credits: f64,
}

impl Journal {
    pub fn from_ledger(ledger: &GeneratedLedger, chart: &ChartOfAccounts) -> LedgerResult<Self> {
        let mut postings = Vec::with_capacity(ledger.len() * 2);
        for tx in &ledger.transactions {
            postings.extend(post_transaction(tx, chart)?);
        }

        let total_debits: f64 = postings.iter().filter_map(|p| p.debit).sum();
        let total_credits: f64 = postings.iter().filter_map(|p| p.credit).sum();

        Ok(Journal {
            period: ledger.period,
            entry_count: ledger.len(),
            postings,
            total_debits,
            total_credits,
        })
    }

    pub fn difference(&self) -> f64 {
        (self.total_debits - self.total_credits).abs()
    }

    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.difference() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationPolicy, LedgerGenerator};
    use crate::rng::SeededRandom;
    use crate::templates::{Direction, TemplateSet};
    use chrono::NaiveDate;

    fn tx(category: &str, amount: f64, direction: Direction) -> Transaction {
        Transaction {
            journal_number: 1001,
            date: NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(),
            description: "Test".to_string(),
            category: category.to_string(),
            amount,
            direction,
        }
    }

    #[test]
    fn test_incoming_debits_bank() {
        let chart = ChartOfAccounts::default_chf();
        let [bank, offset] = post_transaction(&tx("ar", 1500.0, Direction::Incoming), &chart).unwrap();

        assert_eq!(bank.account_code, "10100");
        assert_eq!(bank.debit, Some(1500.0));
        assert_eq!(bank.credit, None);
        assert_eq!(bank.memo, "Bank receipt - 03.12.2024");

        assert_eq!(offset.account_code, "12000");
        assert_eq!(offset.credit, Some(1500.0));
        assert_eq!(offset.debit, None);
        assert_eq!(offset.memo, "Offset entry");

        assert_eq!(bank.net() + offset.net(), 0.0);
    }

    #[test]
    fn test_outgoing_credits_bank() {
        let chart = ChartOfAccounts::default_chf();
        let [bank, offset] = post_transaction(&tx("rent", -9000.0, Direction::Outgoing), &chart).unwrap();

        assert_eq!(bank.credit, Some(9000.0));
        assert!(!bank.is_debit());
        assert_eq!(bank.memo, "Bank payment - 03.12.2024");
        assert_eq!(offset.account_name, "Rent Expense");
        assert_eq!(offset.debit, Some(9000.0));
        assert_eq!(bank.journal_no, "JE-1001");
    }

    #[test]
    fn test_unmapped_category_is_configuration_error() {
        let chart = ChartOfAccounts::default_chf();
        let err = post_transaction(&tx("bogus", 1.0, Direction::Incoming), &chart).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_generated_journal_balances() {
        let chart = ChartOfAccounts::default_chf();
        let generator = LedgerGenerator::new(&chart, GenerationPolicy::journal());
        let period = Period::month(2024, 12).unwrap();

        for seed in 0..20 {
            let ledger = generator
                .generate(&period, 0.0, &TemplateSet::journal_defaults(), &mut SeededRandom::new(seed))
                .unwrap();
            let journal = Journal::from_ledger(&ledger, &chart).unwrap();

            assert_eq!(journal.postings.len(), ledger.len() * 2);
            assert!(journal.is_balanced(0.01));
            for pair in journal.postings.chunks(2) {
                assert!(pair.iter().all(|p| p.debit.is_some() != p.credit.is_some()));
                assert!((pair[0].net() + pair[1].net()).abs() < 1e-9);
            }
        }
    }
}
