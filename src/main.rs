use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ledger_synth::money::format_amount;
use ledger_synth::{
    ExportFormat, GeneratedLedger, Journal, LedgerResult, Profile, ReconciliationEngine, SeededRandom,
    Statement,
};

#[derive(Parser)]
#[command(name = "ledger-synth", version, about = "Generate synthetic bank statements and journal entries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bank statement with running balances
    Statement(RunArgs),

    /// Double-entry journal (two postings per transaction)
    Journal(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// JSON profile (defaults to the built-in December 2024 profile)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Seed for a reproducible batch (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (defaults to <profile name>.<format>)
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Statement(args) => run_statement(args),
        Command::Journal(args) => run_journal(args),
    }
}

/// Load profile, generate the batch, pick the output path
fn prepare(args: &RunArgs, builtin: fn() -> LedgerResult<Profile>) -> Result<(Profile, GeneratedLedger, PathBuf)> {
    let profile = match &args.profile {
        Some(path) => Profile::from_file(path)?,
        None => builtin()?,
    };

    let mut rng = match args.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };

    let ledger = profile
        .generate(&mut rng)
        .with_context(|| format!("Failed to generate '{}'", profile.name))?;

    let format = ExportFormat::from(args.format);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.{}", profile.name, format.extension())));

    Ok((profile, ledger, output))
}

fn run_statement(args: RunArgs) -> Result<()> {
    let (profile, ledger, output) = prepare(&args, Profile::december_2024_statement)?;
    let statement = Statement::from_ledger(profile.header, &ledger);
    let header = &statement.header;
    let report = ReconciliationEngine::new().reconcile_statement(&statement);
    if !report.is_balanced() {
        bail!("Statement does not reconcile: {}", report.summary());
    }

    ledger_synth::export::export_statement(&statement, &output, args.format.into())?;

    println!("🧾 Statement generated: {}", output.display());
    println!("   Bank:               {}", header.bank_name);
    println!("   Account holder:     {}", header.account_holder);
    println!("   Account number:     {}", header.account_number);
    println!("   Period:             {}", statement.period.label());
    println!("   Total transactions: {}", statement.transaction_count());
    println!("   Opening balance:    {} {}", header.currency, format_amount(statement.opening_balance));
    println!("   Closing balance:    {} {}", header.currency, format_amount(statement.closing_balance));
    println!("   Fingerprint:        {}", ledger.fingerprint());

    Ok(())
}

fn run_journal(args: RunArgs) -> Result<()> {
    let (profile, ledger, output) = prepare(&args, Profile::december_2024_journal)?;
    let currency = profile.header.currency.clone();

    let journal = Journal::from_ledger(&ledger, &profile.chart)?;
    let report = ReconciliationEngine::new().check_journal(&journal);
    if !report.is_balanced() {
        bail!("Journal does not balance: {}", report.summary());
    }

    ledger_synth::export::export_journal(&journal, &output, args.format.into())?;

    println!("📚 Journal generated: {}", output.display());
    println!("   Total journal entries: {}", journal.entry_count);
    println!("   Total rows (debit + credit lines): {}", journal.postings.len());
    println!("   Total Debits:  {} {}", currency, format_amount(journal.total_debits));
    println!("   Total Credits: {} {}", currency, format_amount(journal.total_credits));
    println!("   Balance check: {}", report.result.label());

    Ok(())
}
