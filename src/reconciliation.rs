// ⚖️ Reconciliation Engine - Validate generated batches before handoff
//
// Statement:  opening_balance + total_credits - total_debits = closing_balance
// Journal:    total_debits = total_credits
//
// Every batch is re-checked here before it is handed to a renderer.

use crate::journal::Journal;
use crate::money::format_amount;
use crate::statement::Statement;
use serde::{Deserialize, Serialize};

// ============================================================================
// RECONCILIATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReconciliationResult {
    /// Within tolerance
    Balanced { expected: f64, actual: f64 },

    /// Off by less than the major threshold
    MinorDiscrepancy {
        expected: f64,
        actual: f64,
        difference: f64,
        tolerance: f64,
    },

    /// Off by at least the major threshold
    MajorDiscrepancy {
        expected: f64,
        actual: f64,
        difference: f64,
    },
}

impl ReconciliationResult {
    pub fn is_balanced(&self) -> bool {
        matches!(self, ReconciliationResult::Balanced { .. })
    }

    pub fn has_discrepancy(&self) -> bool {
        !self.is_balanced()
    }

    pub fn difference(&self) -> f64 {
        match self {
            ReconciliationResult::Balanced { .. } => 0.0,
            ReconciliationResult::MinorDiscrepancy { difference, .. } => *difference,
            ReconciliationResult::MajorDiscrepancy { difference, .. } => *difference,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_balanced() {
            "BALANCED"
        } else {
            "UNBALANCED"
        }
    }
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Statement,
    Journal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub kind: ReportKind,
    pub result: ReconciliationResult,
    pub transaction_count: usize,
    pub total_credits: f64,
    pub total_debits: f64,
}

impl ReconciliationReport {
    pub fn is_balanced(&self) -> bool {
        self.result.is_balanced()
    }

    pub fn summary(&self) -> String {
        match self.kind {
            ReportKind::Statement => format!(
                "Statement: {} transactions, credits {}, debits {}, difference {} ({})",
                self.transaction_count,
                format_amount(self.total_credits),
                format_amount(self.total_debits),
                format_amount(self.result.difference()),
                self.result.label()
            ),
            ReportKind::Journal => format!(
                "Journal: {} entries, debits {}, credits {} ({})",
                self.transaction_count,
                format_amount(self.total_debits),
                format_amount(self.total_credits),
                self.result.label()
            ),
        }
    }
}

// ============================================================================
// RECONCILIATION ENGINE
// ============================================================================

pub struct ReconciliationEngine {
    /// Tolerance for floating-point comparisons (default: 0.01)
    pub tolerance: f64,

    /// Threshold for minor vs major discrepancy (default: 10.00)
    pub major_discrepancy_threshold: f64,
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        ReconciliationEngine {
            tolerance: 0.01,
            major_discrepancy_threshold: 10.0,
        }
    }

    pub fn with_thresholds(tolerance: f64, major_threshold: f64) -> Self {
        ReconciliationEngine {
            tolerance,
            major_discrepancy_threshold: major_threshold,
        }
    }

    /// opening + credits - debits must land on the closing balance
    pub fn reconcile_statement(&self, statement: &Statement) -> ReconciliationReport {
        let total_credits = statement.total_credits();
        let total_debits = statement.total_debits();
        let calculated = statement.opening_balance + total_credits - total_debits;

        ReconciliationReport {
            kind: ReportKind::Statement,
            result: self.classify(statement.closing_balance, calculated),
            transaction_count: statement.transaction_count(),
            total_credits,
            total_debits,
        }
    }

    /// Debits must equal credits across the whole batch
    pub fn check_journal(&self, journal: &Journal) -> ReconciliationReport {
        ReconciliationReport {
            kind: ReportKind::Journal,
            result: self.classify(journal.total_debits, journal.total_credits),
            transaction_count: journal.entry_count,
            total_credits: journal.total_credits,
            total_debits: journal.total_debits,
        }
    }

    fn classify(&self, expected: f64, actual: f64) -> ReconciliationResult {
        let difference = (actual - expected).abs();

        if difference < self.tolerance {
            ReconciliationResult::Balanced { expected, actual }
        } else if difference < self.major_discrepancy_threshold {
            ReconciliationResult::MinorDiscrepancy {
                expected,
                actual,
                difference,
                tolerance: self.tolerance,
            }
        } else {
            ReconciliationResult::MajorDiscrepancy {
                expected,
                actual,
                difference,
            }
        }
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::ChartOfAccounts;
    use crate::generator::{GeneratedLedger, GenerationPolicy, LedgerGenerator, Transaction};
    use crate::period::Period;
    use crate::rng::SeededRandom;
    use crate::statement::StatementHeader;
    use crate::templates::{Direction, TemplateSet};
    use chrono::NaiveDate;

    fn create_test_transaction(day: u32, amount: f64) -> Transaction {
        Transaction {
            journal_number: 1000 + day,
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            description: "Test transaction".to_string(),
            category: "ar".to_string(),
            amount,
            direction: if amount >= 0.0 { Direction::Incoming } else { Direction::Outgoing },
        }
    }

    fn statement_with_closing(closing_balance: f64) -> Statement {
        let ledger = GeneratedLedger {
            period: Period::month(2025, 1).unwrap(),
            opening_balance: 1000.0,
            closing_balance: 0.0,
            transactions: vec![
                create_test_transaction(1, 2000.0),
                create_test_transaction(2, -500.0),
                create_test_transaction(3, -300.0),
            ],
        };
        let mut statement = Statement::from_ledger(StatementHeader::default(), &ledger);
        statement.closing_balance = closing_balance;
        statement
    }

    #[test]
    fn test_statement_balanced() {
        let engine = ReconciliationEngine::new();
        let report = engine.reconcile_statement(&statement_with_closing(2200.0));

        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.total_credits, 2000.0);
        assert_eq!(report.total_debits, 800.0);
        assert!(report.is_balanced());

        println!("✅ Test passed: {}", report.summary());
    }

    #[test]
    fn test_statement_minor_discrepancy() {
        let engine = ReconciliationEngine::new();
        let report = engine.reconcile_statement(&statement_with_closing(2195.0));

        assert!(!report.is_balanced());
        assert!(matches!(report.result, ReconciliationResult::MinorDiscrepancy { .. }));
        assert!((report.result.difference() - 5.0).abs() < 0.01);
        assert_eq!(report.result.label(), "UNBALANCED");
    }

    #[test]
    fn test_statement_major_discrepancy() {
        let engine = ReconciliationEngine::new();
        let report = engine.reconcile_statement(&statement_with_closing(2300.0));

        assert!(matches!(report.result, ReconciliationResult::MajorDiscrepancy { .. }));
        assert!((report.result.difference() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_custom_thresholds() {
        let statement = statement_with_closing(2195.0);

        // 5.00 off: major under a tight threshold, balanced under a loose tolerance
        let strict = ReconciliationEngine::with_thresholds(0.01, 1.0);
        let report = strict.reconcile_statement(&statement);
        assert!(matches!(report.result, ReconciliationResult::MajorDiscrepancy { .. }));

        let loose = ReconciliationEngine::with_thresholds(10.0, 50.0);
        assert!(loose.reconcile_statement(&statement).is_balanced());
    }

    #[test]
    fn test_generated_batches_reconcile() {
        let chart = ChartOfAccounts::default_chf();
        let period = Period::month(2024, 12).unwrap();
        let engine = ReconciliationEngine::new();

        for seed in 0..10 {
            let ledger = LedgerGenerator::new(&chart, GenerationPolicy::statement())
                .generate(&period, 245678.50, &TemplateSet::statement_defaults(), &mut SeededRandom::new(seed))
                .unwrap();
            let statement = Statement::from_ledger(StatementHeader::default(), &ledger);
            assert!(engine.reconcile_statement(&statement).is_balanced());

            let ledger = LedgerGenerator::new(&chart, GenerationPolicy::journal())
                .generate(&period, 0.0, &TemplateSet::journal_defaults(), &mut SeededRandom::new(seed))
                .unwrap();
            let journal = Journal::from_ledger(&ledger, &chart).unwrap();
            let report = engine.check_journal(&journal);
            assert!(report.is_balanced());
            assert!(report.summary().ends_with("(BALANCED)"));
        }
    }

    #[test]
    fn test_unbalanced_journal_detected() {
        let chart = ChartOfAccounts::default_chf();
        let ledger = GeneratedLedger {
            period: Period::month(2025, 1).unwrap(),
            opening_balance: 0.0,
            closing_balance: 0.0,
            transactions: vec![create_test_transaction(1, 250.0)],
        };
        let mut journal = Journal::from_ledger(&ledger, &chart).unwrap();
        journal.total_credits -= 0.5;

        let report = ReconciliationEngine::new().check_journal(&journal);
        assert!(matches!(report.result, ReconciliationResult::MinorDiscrepancy { .. }));
    }

    #[test]
    fn test_reconciliation_result_methods() {
        let balanced = ReconciliationResult::Balanced { expected: 2500.0, actual: 2500.0 };
        assert!(balanced.is_balanced());
        assert!(!balanced.has_discrepancy());
        assert_eq!(balanced.difference(), 0.0);

        let minor = ReconciliationResult::MinorDiscrepancy {
            expected: 2500.0,
            actual: 2495.0,
            difference: 5.0,
            tolerance: 0.01,
        };
        assert!(minor.has_discrepancy());
        assert_eq!(minor.difference(), 5.0);
    }
}
