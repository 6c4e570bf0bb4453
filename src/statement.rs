// 🧾 Bank Statement - Running balance per transaction
//
// balance[i] = round(balance[i-1] + amount[i], 2), balance[-1] = opening.
// Strict left-to-right fold in chronological order; lines are never reordered.

use crate::generator::{GeneratedLedger, Transaction};
use crate::money::round_cents;
use crate::period::Period;
use serde::{Deserialize, Serialize};

/// Running balances after each amount
pub fn fold_balances(opening_balance: f64, amounts: &[f64]) -> Vec<f64> {
    amounts
        .iter()
        .scan(opening_balance, |balance, amount| {
            *balance = round_cents(*balance + amount);
            Some(*balance)
        })
        .collect()
}

// ============================================================================
// STATEMENT HEADER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementHeader {
    pub bank_name: String,
    pub bank_address: String,
    pub account_holder: String,
    pub account_holder_address: String,
    pub account_number: String,
    pub currency: String,
}

impl Default for StatementHeader {
    fn default() -> Self {
        StatementHeader {
            bank_name: "Global Commerce Bank".to_string(),
            bank_address: "123 Financial District, Zurich, Switzerland".to_string(),
            account_holder: "TechFlow Industries GmbH".to_string(),
            account_holder_address: "456 Innovation Park, Basel, Switzerland".to_string(),
            account_number: "CH93 0076 2011 6238 5295 7".to_string(),
            currency: "CHF".to_string(),
        }
    }
}

// ============================================================================
// STATEMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub transaction: Transaction,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub header: StatementHeader,
    pub period: Period,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub lines: Vec<StatementLine>,
}

impl Statement {
    pub fn from_ledger(header: StatementHeader, ledger: &GeneratedLedger) -> Self {
        let amounts: Vec<f64> = ledger.transactions.iter().map(|tx| tx.amount).collect();
        let balances = fold_balances(ledger.opening_balance, &amounts);

        let lines: Vec<StatementLine> = ledger
            .transactions
            .iter()
            .cloned()
            .zip(balances)
            .map(|(transaction, balance)| StatementLine { transaction, balance })
            .collect();

        let closing_balance = lines
            .last()
            .map(|line| line.balance)
            .unwrap_or(ledger.opening_balance);

        Statement {
            header,
            period: ledger.period,
            opening_balance: ledger.opening_balance,
            closing_balance,
            lines,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of incoming amounts
    pub fn total_credits(&self) -> f64 {
        self.lines
            .iter()
            .filter(|l| l.transaction.amount > 0.0)
            .map(|l| l.transaction.amount)
            .sum()
    }

    /// Sum of outgoing magnitudes
    pub fn total_debits(&self) -> f64 {
        self.lines
            .iter()
            .filter(|l| l.transaction.amount < 0.0)
            .map(|l| -l.transaction.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Direction;
    use chrono::NaiveDate;

    fn tx(n: u32, day: u32, amount: f64) -> Transaction {
        Transaction {
            journal_number: n,
            date: NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
            description: format!("Test transaction {}", n),
            category: "ar".to_string(),
            amount,
            direction: if amount >= 0.0 { Direction::Incoming } else { Direction::Outgoing },
        }
    }

    fn ledger(opening: f64, txs: Vec<Transaction>) -> GeneratedLedger {
        let amounts: Vec<f64> = txs.iter().map(|t| t.amount).collect();
        let closing = fold_balances(opening, &amounts).last().copied().unwrap_or(opening);
        GeneratedLedger {
            period: Period::month(2024, 12).unwrap(),
            opening_balance: opening,
            closing_balance: closing,
            transactions: txs,
        }
    }

    #[test]
    fn test_fold_balances() {
        let balances = fold_balances(1000.0, &[2000.0, -500.0, -300.0]);
        assert_eq!(balances, vec![3000.0, 2500.0, 2200.0]);

        assert!(fold_balances(1000.0, &[]).is_empty());
    }

    #[test]
    fn test_fold_balances_rounds_each_step() {
        let balances = fold_balances(0.1, &[0.2, 0.1]);
        // 0.1 + 0.2 would drift to 0.30000000000000004 without per-step rounding
        assert_eq!(balances, vec![0.3, 0.4]);
    }

    #[test]
    fn test_statement_lines_follow_recurrence() {
        let ledger = ledger(
            245678.50,
            vec![tx(1001, 2, 12500.25), tx(1002, 2, -87.10), tx(1003, 3, -50000.0)],
        );
        let statement = Statement::from_ledger(StatementHeader::default(), &ledger);

        assert_eq!(statement.transaction_count(), 3);
        assert_eq!(statement.lines[0].balance, round_cents(245678.50 + 12500.25));
        for i in 1..statement.lines.len() {
            let expected = round_cents(statement.lines[i - 1].balance + statement.lines[i].transaction.amount);
            assert_eq!(statement.lines[i].balance, expected);
        }
        assert_eq!(statement.closing_balance, ledger.closing_balance);
        assert_eq!(statement.total_credits(), 12500.25);
        assert!((statement.total_debits() - 50087.10).abs() < 1e-9);
    }

    #[test]
    fn test_empty_statement() {
        let statement = Statement::from_ledger(StatementHeader::default(), &ledger(500.0, vec![]));

        assert_eq!(statement.closing_balance, 500.0);
        assert_eq!(statement.total_credits(), 0.0);
    }
}
