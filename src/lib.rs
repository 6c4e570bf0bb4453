// Ledger Synth - Core Library
// Synthetic bank statements and double-entry journals for demo documents

pub mod error;
pub mod money;
pub mod period;
pub mod accounts;
pub mod rng;
pub mod templates;
pub mod generator;
pub mod statement;
pub mod journal;
pub mod reconciliation;
pub mod profile;
pub mod export;

// Re-export commonly used types
pub use error::{LedgerError, LedgerResult};
pub use period::Period;
pub use accounts::{ChartOfAccounts, GlAccount};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use templates::{Direction, Fill, TemplateSet, TransactionTemplate};
pub use generator::{
    generate, GeneratedLedger, GenerationPolicy, LedgerGenerator, SelectionPolicy, Transaction,
};
pub use statement::{Statement, StatementHeader, StatementLine};
pub use journal::{post_transaction, Journal, Posting};
pub use reconciliation::{ReconciliationEngine, ReconciliationReport, ReconciliationResult};
pub use profile::Profile;
pub use export::ExportFormat;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
