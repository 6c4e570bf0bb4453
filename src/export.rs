// 📤 Export - Hand finished batches to external renderers
//
// CSV mirrors the statement and journal tables; JSON is the full serde
// form. Writers take any io::Write so callers pick the destination.

use crate::journal::Journal;
use crate::period::DISPLAY_DATE_FORMAT;
use crate::statement::Statement;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Statement table truncates long descriptions
pub const DESCRIPTION_WIDTH: usize = 45;

pub const STATEMENT_HEADERS: [&str; 4] = ["Date", "Description", "Amount", "Balance"];

pub const JOURNAL_HEADERS: [&str; 8] = [
    "Journal No",
    "Date",
    "GL Account",
    "Account Name",
    "Description",
    "Debit",
    "Credit",
    "Memo",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn cents(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

// ============================================================================
// CSV
// ============================================================================

pub fn write_statement_csv<W: Write>(statement: &Statement, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(STATEMENT_HEADERS)
        .context("Failed to write statement header")?;

    let start = statement.period.start.format(DISPLAY_DATE_FORMAT).to_string();
    let end = statement.period.end.format(DISPLAY_DATE_FORMAT).to_string();

    wtr.write_record([
        start,
        "Opening Balance".to_string(),
        String::new(),
        format!("{:.2}", statement.opening_balance),
    ])
    .context("Failed to write opening balance")?;

    for line in &statement.lines {
        let tx = &line.transaction;
        wtr.write_record([
            tx.display_date(),
            truncate(&tx.description, DESCRIPTION_WIDTH),
            format!("{:+.2}", tx.amount),
            format!("{:.2}", line.balance),
        ])
        .with_context(|| format!("Failed to write statement line {}", tx.journal_no()))?;
    }

    wtr.write_record([
        end,
        "Closing Balance".to_string(),
        String::new(),
        format!("{:.2}", statement.closing_balance),
    ])
    .context("Failed to write closing balance")?;

    wtr.flush().context("Failed to flush statement CSV")?;
    Ok(())
}

pub fn write_journal_csv<W: Write>(journal: &Journal, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(JOURNAL_HEADERS)
        .context("Failed to write journal header")?;

    for posting in &journal.postings {
        wtr.write_record([
            posting.journal_no.as_str(),
            posting.date.as_str(),
            posting.account_code.as_str(),
            posting.account_name.as_str(),
            posting.description.as_str(),
            cents(posting.debit).as_str(),
            cents(posting.credit).as_str(),
            posting.memo.as_str(),
        ])
        .with_context(|| format!("Failed to write posting {}", posting.journal_no))?;
    }

    let debits = format!("{:.2}", journal.total_debits);
    let credits = format!("{:.2}", journal.total_credits);
    wtr.write_record(["", "", "", "", "TOTALS", debits.as_str(), credits.as_str(), ""])
        .context("Failed to write journal totals")?;

    wtr.flush().context("Failed to flush journal CSV")?;
    Ok(())
}

// ============================================================================
// JSON
// ============================================================================

pub fn write_json<T: Serialize, W: Write>(value: &T, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, value).context("Failed to serialize JSON")
}

// ============================================================================
// FILES
// ============================================================================

pub fn export_statement(statement: &Statement, path: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    match format {
        ExportFormat::Csv => write_statement_csv(statement, file),
        ExportFormat::Json => write_json(statement, file),
    }
}

pub fn export_journal(journal: &Journal, path: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    match format {
        ExportFormat::Csv => write_journal_csv(journal, file),
        ExportFormat::Json => write_json(journal, file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::ChartOfAccounts;
    use crate::generator::{GeneratedLedger, Transaction};
    use crate::period::Period;
    use crate::statement::StatementHeader;
    use crate::templates::Direction;
    use chrono::NaiveDate;

    fn sample_ledger() -> GeneratedLedger {
        let day = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        GeneratedLedger {
            period: Period::month(2024, 12).unwrap(),
            opening_balance: 245678.50,
            closing_balance: 257128.40,
            transactions: vec![
                Transaction {
                    journal_number: 1001,
                    date: day,
                    description: "Payment received - INV-2024-4821".to_string(),
                    category: "ar".to_string(),
                    amount: 12500.0,
                    direction: Direction::Incoming,
                },
                Transaction {
                    journal_number: 1002,
                    date: day,
                    description: "Professional services - Audit fee for year-end closing".to_string(),
                    category: "professional_fees".to_string(),
                    amount: -1050.10,
                    direction: Direction::Outgoing,
                },
            ],
        }
    }

    #[test]
    fn test_statement_csv() {
        let statement = Statement::from_ledger(StatementHeader::default(), &sample_ledger());
        let mut buf = Vec::new();
        write_statement_csv(&statement, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Date,Description,Amount,Balance");
        assert_eq!(lines[1], "01.12.2024,Opening Balance,,245678.50");
        assert_eq!(lines[2], "02.12.2024,Payment received - INV-2024-4821,+12500.00,258178.50");
        // Description cut at 45 characters
        assert_eq!(
            lines[3],
            "02.12.2024,Professional services - Audit fee for year-en,-1050.10,257128.40"
        );
        assert_eq!(lines[4], "31.12.2024,Closing Balance,,257128.40");
    }

    #[test]
    fn test_journal_csv_leaves_empty_side_blank() {
        let chart = ChartOfAccounts::default_chf();
        let journal = Journal::from_ledger(&sample_ledger(), &chart).unwrap();
        let mut buf = Vec::new();
        write_journal_csv(&journal, &mut buf).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[0][2], "10100");
        assert_eq!(&rows[0][5], "12500.00");
        assert_eq!(&rows[0][6], "");
        assert_eq!(&rows[1][3], "Accounts Receivable");
        assert_eq!(&rows[1][5], "");
        assert_eq!(&rows[1][6], "12500.00");
        assert_eq!(&rows[2][7], "Bank payment - 02.12.2024");
        assert_eq!(&rows[3][5], "1050.10");

        let totals = &rows[4];
        assert_eq!(&totals[0], "");
        assert_eq!(&totals[4], "TOTALS");
        assert_eq!(&totals[5], "13550.10");
        assert_eq!(&totals[6], "13550.10");
        assert_eq!(&totals[7], "");    }

    #[test]
    fn test_json_export_to_file() {
        let statement = Statement::from_ledger(StatementHeader::default(), &sample_ledger());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.json");

        export_statement(&statement, &path, ExportFormat::Json).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Statement = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, statement);
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let chart = ChartOfAccounts::default_chf();
        let journal = Journal::from_ledger(&sample_ledger(), &chart).unwrap();
        let err = export_journal(&journal, Path::new("/nonexistent/dir/out.csv"), ExportFormat::Csv)
            .unwrap_err();

        assert!(err.to_string().contains("Failed to create output file"));
    }
}
