// 🧩 Transaction Templates - Rules as data
//
// A template describes one kind of transaction: description pattern,
// category key, amount range and direction. Templates are plain values
// loaded once and never mutated.

use crate::accounts::ChartOfAccounts;
use crate::error::{LedgerError, LedgerResult};
use crate::money::round_cents;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// Placeholder substituted in description patterns
pub const PLACEHOLDER: &str = "{}";

pub const DEFAULT_REFERENCE_MIN: i64 = 1000;
pub const DEFAULT_REFERENCE_MAX: i64 = 9999;

// ============================================================================
// DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Money coming into the bank account
    Incoming,

    /// Money leaving the bank account
    Outgoing,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        }
    }

    /// +1.0 for incoming, -1.0 for outgoing
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Incoming => 1.0,
            Direction::Outgoing => -1.0,
        }
    }

    pub fn is_incoming(&self) -> bool {
        matches!(self, Direction::Incoming)
    }
}

// ============================================================================
// PLACEHOLDER FILL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    /// Random reference number, e.g. invoice or order number
    Reference { min: i64, max: i64 },

    /// One of a fixed list of counterparty names
    Counterparty { names: Vec<String> },
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Reference {
            min: DEFAULT_REFERENCE_MIN,
            max: DEFAULT_REFERENCE_MAX,
        }
    }
}

impl Fill {
    fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            Fill::Reference { min, max } => rng.int_in(*min, *max).to_string(),
            Fill::Counterparty { names } => {
                if names.is_empty() {
                    return String::new();
                }
                let idx = rng.int_in(0, names.len() as i64 - 1) as usize;
                names[idx.min(names.len() - 1)].clone()
            }
        }
    }
}

// ============================================================================
// TEMPLATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTemplate {
    /// Description pattern, optionally containing "{}"
    pub description: String,

    /// Key into the chart of accounts
    pub category: String,

    /// Amount bounds; the sign of the drawn amount comes from `direction`.
    /// Non-positive bounds may be given in either order (see `amount_bounds`).
    pub min_amount: f64,
    pub max_amount: f64,

    pub direction: Direction,

    /// Relative selection weight (0 = never selected)
    #[serde(default = "default_weight")]
    pub weight: u32,

    /// How to fill "{}" (defaults to a 1000-9999 reference number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
}

fn default_weight() -> u32 {
    1
}

impl TransactionTemplate {
    pub fn new(
        description: &str,
        category: &str,
        min_amount: f64,
        max_amount: f64,
        direction: Direction,
    ) -> Self {
        TransactionTemplate {
            description: description.to_string(),
            category: category.to_string(),
            min_amount,
            max_amount,
            direction,
            weight: 1,
            fill: None,
        }
    }

    pub fn incoming(description: &str, category: &str, min_amount: f64, max_amount: f64) -> Self {
        Self::new(description, category, min_amount, max_amount, Direction::Incoming)
    }

    pub fn outgoing(description: &str, category: &str, min_amount: f64, max_amount: f64) -> Self {
        Self::new(description, category, min_amount, max_amount, Direction::Outgoing)
    }

    /// Builder pattern: selection weight
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Builder pattern: fill "{}" with a counterparty name
    pub fn with_counterparties(mut self, names: &[&str]) -> Self {
        self.fill = Some(Fill::Counterparty {
            names: names.iter().map(|n| n.to_string()).collect(),
        });
        self
    }

    /// Builder pattern: fill "{}" with a reference number in [min, max]
    pub fn with_reference(mut self, min: i64, max: i64) -> Self {
        self.fill = Some(Fill::Reference { min, max });
        self
    }

    pub fn has_placeholder(&self) -> bool {
        self.description.contains(PLACEHOLDER)
    }

    /// Magnitude bounds `(low, high)` of the drawn amount.
    ///
    /// Non-negative bounds must be ordered (`min <= max`). Non-positive bounds
    /// are accepted in either order, `(-100, -25)` and `(-25, -100)` alike,
    /// and sorted by magnitude. Bounds straddling zero cannot be expressed in
    /// one direction and are rejected.
    pub fn amount_bounds(&self) -> LedgerResult<(f64, f64)> {
        let (min, max) = (self.min_amount, self.max_amount);
        let range_error = || LedgerError::Range {
            template: self.description.clone(),
            min,
            max,
        };

        if !min.is_finite() || !max.is_finite() {
            return Err(range_error());
        }

        if min >= 0.0 && max >= 0.0 {
            if min > max {
                return Err(range_error());
            }
            Ok((min, max))
        } else if min <= 0.0 && max <= 0.0 {
            let (a, b) = (min.abs(), max.abs());
            Ok((a.min(b), a.max(b)))
        } else {
            Err(range_error())
        }
    }

    /// Signed amount, rounded to cents
    pub fn draw_amount<R: RandomSource + ?Sized>(&self, rng: &mut R) -> LedgerResult<f64> {
        let (min, max) = self.amount_bounds()?;
        let magnitude = round_cents(rng.uniform(min, max));
        Ok(magnitude * self.direction.sign())
    }

    /// Description with the placeholder substituted (first occurrence only)
    pub fn render_description<R: RandomSource + ?Sized>(&self, rng: &mut R) -> String {
        if !self.has_placeholder() {
            return self.description.clone();
        }
        let value = match &self.fill {
            Some(fill) => fill.draw(rng),
            None => Fill::default().draw(rng),
        };
        self.description.replacen(PLACEHOLDER, &value, 1)
    }
}

// ============================================================================
// TEMPLATE SET
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSet {
    pub templates: Vec<TransactionTemplate>,
}

impl TemplateSet {
    pub fn new(templates: Vec<TransactionTemplate>) -> Self {
        TemplateSet { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionTemplate> {
        self.templates.iter()
    }

    pub fn by_direction(&self, direction: Direction) -> Vec<&TransactionTemplate> {
        self.templates
            .iter()
            .filter(|t| t.direction == direction)
            .collect()
    }

    /// Every category must resolve in the chart
    pub fn check_categories(&self, chart: &ChartOfAccounts) -> LedgerResult<()> {
        for template in &self.templates {
            chart.resolve(&template.category)?;
        }
        Ok(())
    }

    /// Every amount range must be well formed
    pub fn check_ranges(&self) -> LedgerResult<()> {
        for template in &self.templates {
            template.amount_bounds()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Built-in sets
    // ------------------------------------------------------------------------

    /// Bank statement templates (7 incoming, 10 outgoing)
    pub fn statement_defaults() -> Self {
        let suppliers = [
            "Nordic Supply",
            "Alpine Tech",
            "Central Euro",
            "Pacific Trade",
            "Atlantic Corp",
        ];

        TemplateSet::new(vec![
            TransactionTemplate::incoming("Payment received - INV-2024-{}", "ar", 5000.0, 50000.0),
            TransactionTemplate::incoming("Customer payment - Order #{}", "ar", 1000.0, 15000.0),
            TransactionTemplate::incoming("Intercompany transfer from TechFlow UK", "interco_receivable", 10000.0, 100000.0),
            TransactionTemplate::incoming("Intercompany transfer from TechFlow DE", "interco_receivable", 15000.0, 80000.0),
            TransactionTemplate::incoming("Refund - Vendor credit note", "ap", 500.0, 3000.0),
            TransactionTemplate::incoming("Interest income", "interest_income", 50.0, 500.0),
            TransactionTemplate::incoming("FX Gain adjustment", "fx_gain_loss", 100.0, 2000.0),
            TransactionTemplate::outgoing("Supplier payment - {} Ltd", "ap", 2000.0, 30000.0)
                .with_counterparties(&suppliers),
            TransactionTemplate::outgoing("Payroll transfer - December", "payroll", 50000.0, 150000.0),
            TransactionTemplate::outgoing("Bank charges - Monthly fee", "bank_fees", 25.0, 100.0),
            TransactionTemplate::outgoing("SWIFT transfer fee", "bank_fees", 15.0, 50.0),
            TransactionTemplate::outgoing("Intercompany payment to TechFlow US", "interco_payable", 20000.0, 80000.0),
            TransactionTemplate::outgoing("Rent payment - Q4", "rent", 5000.0, 15000.0),
            TransactionTemplate::outgoing("Insurance premium", "insurance", 1000.0, 5000.0),
            TransactionTemplate::outgoing("Utility payment", "utilities", 500.0, 2000.0),
            TransactionTemplate::outgoing("Tax payment - VAT", "tax_payable", 10000.0, 50000.0),
            TransactionTemplate::outgoing("Professional services - Audit fee", "professional_fees", 3000.0, 15000.0),
        ])
    }

    /// Journal entry templates (6 incoming, 12 outgoing)
    pub fn journal_defaults() -> Self {
        TemplateSet::new(vec![
            TransactionTemplate::incoming("Customer payment - INV-{}", "ar", 5000.0, 45000.0),
            TransactionTemplate::incoming("Payment received - Order #{}", "ar", 1000.0, 12000.0),
            TransactionTemplate::incoming("Intercompany transfer from TechFlow UK", "interco_receivable", 15000.0, 80000.0),
            TransactionTemplate::incoming("Intercompany transfer from TechFlow DE", "interco_receivable", 20000.0, 60000.0),
            TransactionTemplate::incoming("Interest income - December", "interest_income", 100.0, 800.0),
            TransactionTemplate::incoming("FX Gain adjustment", "fx_gain_loss", 200.0, 1500.0),
            TransactionTemplate::outgoing("Supplier payment - Nordic Supply Ltd", "ap", 3000.0, 25000.0),
            TransactionTemplate::outgoing("Supplier payment - Alpine Systems AG", "ap", 2000.0, 18000.0),
            TransactionTemplate::outgoing("Supplier payment - Central Trading Co", "ap", 5000.0, 30000.0),
            TransactionTemplate::outgoing("Payroll transfer - December", "payroll", 80000.0, 120000.0),
            TransactionTemplate::outgoing("Bank charges - Monthly fee", "bank_fees", 35.0, 75.0),
            TransactionTemplate::outgoing("SWIFT transfer fee", "bank_fees", 20.0, 45.0),
            TransactionTemplate::outgoing("Intercompany payment to TechFlow US", "interco_payable", 25000.0, 70000.0),
            TransactionTemplate::outgoing("Rent payment - Office Q4", "rent", 8000.0, 12000.0),
            TransactionTemplate::outgoing("Insurance premium - Annual", "insurance", 2500.0, 5000.0),
            TransactionTemplate::outgoing("Utility payment - December", "utilities", 800.0, 2000.0),
            TransactionTemplate::outgoing("Tax payment - VAT Q4", "tax_payable", 15000.0, 45000.0),
            TransactionTemplate::outgoing("Audit fee - Year end", "professional_fees", 5000.0, 12000.0),
        ])
    }
}

/// Weighted pick: one `int_in(0, total - 1)` draw, then walk cumulative weights.
/// Returns None when nothing carries weight.
pub fn pick_weighted<'a, R: RandomSource + ?Sized>(
    candidates: &[&'a TransactionTemplate],
    rng: &mut R,
) -> Option<&'a TransactionTemplate> {
    let total: u64 = candidates.iter().map(|t| t.weight as u64).sum();
    if total == 0 {
        return None;
    }

    let mut ticket = rng.int_in(0, total as i64 - 1).clamp(0, total as i64 - 1) as u64;
    for template in candidates {
        let weight = template.weight as u64;
        if ticket < weight {
            return Some(template);
        }
        ticket -= weight;
    }
    None
}
