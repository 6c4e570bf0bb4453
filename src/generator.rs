// 🏭 Synthetic Ledger Generator
//
// Walks every calendar day of a period, decides whether the day gets
// activity, draws transactions from templates and folds the running
// balance left to right. Pure function of (period, opening balance,
// templates, chart, policy, rng): no globals, no I/O.

use crate::accounts::ChartOfAccounts;
use crate::error::{LedgerError, LedgerResult};
use crate::period::{is_weekend, Period, DISPLAY_DATE_FORMAT};
use crate::rng::RandomSource;
use crate::statement::fold_balances;
use crate::templates::{pick_weighted, Direction, TemplateSet, TransactionTemplate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

// ============================================================================
// POLICY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Weighted pick over all templates
    Uniform,

    /// Pick the branch first (incoming with the given probability), then a template within it
    DirectionWeighted { incoming_probability: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPolicy {
    /// Probability that a Saturday/Sunday gets any activity
    pub weekend_inclusion_probability: f64,

    /// Inclusive bounds on transactions per included day
    pub min_per_day: u32,
    pub max_per_day: u32,

    pub selection: SelectionPolicy,

    /// First journal number handed out ("JE-1001")
    #[serde(default = "default_first_journal_number")]
    pub first_journal_number: u32,
}

fn default_first_journal_number() -> u32 {
    1001
}

impl GenerationPolicy {
    /// Bank statement: quiet weekends, 0-3 per day, 40% incoming
    pub fn statement() -> Self {
        GenerationPolicy {
            weekend_inclusion_probability: 0.2,
            min_per_day: 0,
            max_per_day: 3,
            selection: SelectionPolicy::DirectionWeighted {
                incoming_probability: 0.4,
            },
            first_journal_number: default_first_journal_number(),
        }
    }

    /// Journal entries: 1-4 per included day, any template
    pub fn journal() -> Self {
        GenerationPolicy {
            weekend_inclusion_probability: 0.3,
            min_per_day: 1,
            max_per_day: 4,
            selection: SelectionPolicy::Uniform,
            first_journal_number: default_first_journal_number(),
        }
    }

    pub fn validate(&self) -> LedgerResult<()> {
        check_probability("weekend_inclusion_probability", self.weekend_inclusion_probability)?;

        if let SelectionPolicy::DirectionWeighted { incoming_probability } = self.selection {
            check_probability("incoming_probability", incoming_probability)?;
        }

        if self.min_per_day > self.max_per_day {
            return Err(LedgerError::configuration(
                "transactions_per_day",
                format!("min {} > max {}", self.min_per_day, self.max_per_day),
            ));
        }
        Ok(())
    }
}

fn check_probability(key: &str, p: f64) -> LedgerResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(LedgerError::configuration(
            key,
            format!("probability {} outside [0, 1]", p),
        ));
    }
    Ok(())
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub journal_number: u32,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,

    /// Signed: positive incoming, negative outgoing. Cents precision.
    pub amount: f64,

    pub direction: Direction,
}

impl Transaction {
    /// "JE-1001"
    pub fn journal_no(&self) -> String {
        format!("JE-{}", self.journal_number)
    }

    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }
}

// ============================================================================
// GENERATED LEDGER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLedger {
    pub period: Period,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub transactions: Vec<Transaction>,
}

impl GeneratedLedger {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn total_incoming(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|tx| tx.direction.is_incoming())
            .map(|tx| tx.magnitude())
            .sum()
    }

    pub fn total_outgoing(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|tx| !tx.direction.is_incoming())
            .map(|tx| tx.magnitude())
            .sum()
    }

    /// SHA-256 over the canonical fields of every transaction.
    /// Equal fingerprints mean two runs produced the same batch.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{:.2}|", self.opening_balance));
        for tx in &self.transactions {
            hasher.update(format!(
                "{}|{}|{}|{}|{:.2}|{}\n",
                tx.journal_number,
                tx.date,
                tx.description,
                tx.category,
                tx.amount,
                tx.direction.as_str()
            ));
        }
        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

pub struct LedgerGenerator<'a> {
    chart: &'a ChartOfAccounts,
    policy: GenerationPolicy,
}

impl<'a> LedgerGenerator<'a> {
    pub fn new(chart: &'a ChartOfAccounts, policy: GenerationPolicy) -> Self {
        LedgerGenerator { chart, policy }
    }

    /// Generate one batch.
    ///
    /// All configuration (period, policy, bank account, every template
    /// category) is checked before the first random draw. A malformed amount
    /// range only fails once its template is actually selected.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        period: &Period,
        opening_balance: f64,
        templates: &TemplateSet,
        rng: &mut R,
    ) -> LedgerResult<GeneratedLedger> {
        period.validate()?;
        self.policy.validate()?;
        self.chart.bank_account()?;
        templates.check_categories(self.chart)?;

        let mut transactions = Vec::new();

        if templates.templates.iter().any(|t| t.weight > 0) {
            // None once the counter has passed u32::MAX
            let mut next_number = Some(self.policy.first_journal_number);

            for day in period.days() {
                if is_weekend(day) && !rng.chance(self.policy.weekend_inclusion_probability) {
                    debug!(date = %day, "weekend day skipped");
                    continue;
                }

                let count = rng.int_in(self.policy.min_per_day as i64, self.policy.max_per_day as i64);
                debug!(date = %day, count, "drawing transactions");

                for _ in 0..count.max(0) {
                    let template = self.select(templates, rng)?;
                    let amount = template.draw_amount(rng)?;
                    let description = template.render_description(rng);
                    let journal_number = next_number.ok_or_else(|| {
                        LedgerError::configuration(
                            "first_journal_number",
                            format!(
                                "journal numbers starting at {} run past {}",
                                self.policy.first_journal_number,
                                u32::MAX
                            ),
                        )
                    })?;

                    transactions.push(Transaction {
                        journal_number,
                        date: day,
                        description,
                        category: template.category.clone(),
                        amount,
                        direction: template.direction,
                    });
                    next_number = journal_number.checked_add(1);
                }
            }
        }

        let amounts: Vec<f64> = transactions.iter().map(|tx| tx.amount).collect();
        let closing_balance = fold_balances(opening_balance, &amounts)
            .last()
            .copied()
            .unwrap_or(opening_balance);

        info!(
            transactions = transactions.len(),
            opening_balance,
            closing_balance,
            "ledger generated"
        );

        Ok(GeneratedLedger {
            period: *period,
            opening_balance,
            closing_balance,
            transactions,
        })
    }

    fn select<'t, R: RandomSource + ?Sized>(
        &self,
        templates: &'t TemplateSet,
        rng: &mut R,
    ) -> LedgerResult<&'t TransactionTemplate> {
        let picked = match self.policy.selection {
            SelectionPolicy::Uniform => {
                let all: Vec<&TransactionTemplate> = templates.iter().collect();
                pick_weighted(&all, rng)
            }
            SelectionPolicy::DirectionWeighted { incoming_probability } => {
                let (first, second) = if rng.chance(incoming_probability) {
                    (Direction::Incoming, Direction::Outgoing)
                } else {
                    (Direction::Outgoing, Direction::Incoming)
                };
                // An empty branch falls through to the other one
                pick_weighted(&templates.by_direction(first), rng)
                    .or_else(|| pick_weighted(&templates.by_direction(second), rng))
            }
        };

        picked.ok_or_else(|| LedgerError::configuration("templates", "no selectable template"))
    }
}

/// Convenience wrapper over [`LedgerGenerator::generate`]
pub fn generate<R: RandomSource + ?Sized>(
    period: &Period,
    opening_balance: f64,
    templates: &TemplateSet,
    chart: &ChartOfAccounts,
    policy: &GenerationPolicy,
    rng: &mut R,
) -> LedgerResult<GeneratedLedger> {
    LedgerGenerator::new(chart, policy.clone()).generate(period, opening_balance, templates, rng)
}

// ============================================================================
// TESTS
// ============================================================================
