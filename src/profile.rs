// ⚙️ Generation Profiles - Named configurations as data
//
// A profile bundles everything a run needs: period, opening balance,
// statement header, policy, templates and chart of accounts. The two
// built-in profiles keep their own weekend and direction ratios.

use crate::accounts::ChartOfAccounts;
use crate::error::LedgerResult;
use crate::generator::{GeneratedLedger, GenerationPolicy, LedgerGenerator};
use crate::period::Period;
use crate::rng::RandomSource;
use crate::statement::StatementHeader;
use crate::templates::TemplateSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub period: Period,

    #[serde(default)]
    pub opening_balance: f64,

    #[serde(default)]
    pub header: StatementHeader,

    pub policy: GenerationPolicy,
    pub templates: TemplateSet,

    #[serde(default)]
    pub chart: ChartOfAccounts,
}

impl Profile {
    /// Statement for December 2024, opening at CHF 245,678.50
    pub fn december_2024_statement() -> LedgerResult<Self> {
        Ok(Profile {
            name: "bank_statement_december_2024".to_string(),
            period: Period::month(2024, 12)?,
            opening_balance: 245678.50,
            header: StatementHeader::default(),
            policy: GenerationPolicy::statement(),
            templates: TemplateSet::statement_defaults(),
            chart: ChartOfAccounts::default_chf(),
        })
    }

    /// Journal entries for December 2024
    pub fn december_2024_journal() -> LedgerResult<Self> {
        Ok(Profile {
            name: "journal_entries_december_2024".to_string(),
            period: Period::month(2024, 12)?,
            opening_balance: 0.0,
            header: StatementHeader::default(),
            policy: GenerationPolicy::journal(),
            templates: TemplateSet::journal_defaults(),
            chart: ChartOfAccounts::default_chf(),
        })
    }

    /// Load profile from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read profile file: {:?}", path.as_ref()))?;

        let profile: Profile =
            serde_json::from_str(&content).context("Failed to parse profile JSON")?;

        profile
            .validate()
            .with_context(|| format!("Invalid profile '{}'", profile.name))?;

        Ok(profile)
    }

    /// Check everything up front, including ranges of templates that may never be drawn
    pub fn validate(&self) -> LedgerResult<()> {
        self.period.validate()?;
        self.policy.validate()?;
        self.chart.bank_account()?;
        self.templates.check_categories(&self.chart)?;
        self.templates.check_ranges()
    }

    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> LedgerResult<GeneratedLedger> {
        LedgerGenerator::new(&self.chart, self.policy.clone()).generate(
            &self.period,
            self.opening_balance,
            &self.templates,
            rng,
        )
    }
}
