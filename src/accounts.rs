// 📒 Chart of Accounts - Category key → GL account
//
// Static mapping, never mutated after construction. Every template category
// must resolve here, and one key is reserved for the bank account itself.

use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_BANK_KEY: &str = "bank";

// ============================================================================
// GL ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlAccount {
    /// Stable identifier (e.g. "10100")
    pub code: String,

    /// Display name (e.g. "Bank Account - CHF")
    pub name: String,
}

impl GlAccount {
    pub fn new(code: &str, name: &str) -> Self {
        GlAccount {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

// ============================================================================
// CHART OF ACCOUNTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    /// Key of the bank account entry
    #[serde(default = "default_bank_key")]
    pub bank_key: String,

    pub accounts: BTreeMap<String, GlAccount>,
}

fn default_bank_key() -> String {
    DEFAULT_BANK_KEY.to_string()
}

impl ChartOfAccounts {
    pub fn new(bank_key: &str, bank: GlAccount) -> Self {
        let mut accounts = BTreeMap::new();
        accounts.insert(bank_key.to_string(), bank);
        ChartOfAccounts {
            bank_key: bank_key.to_string(),
            accounts,
        }
    }

    /// Builder pattern: add an offset account
    pub fn with_account(mut self, key: &str, code: &str, name: &str) -> Self {
        self.accounts.insert(key.to_string(), GlAccount::new(code, name));
        self
    }

    /// Fictional CHF chart used by the built-in profiles
    pub fn default_chf() -> Self {
        ChartOfAccounts::new(DEFAULT_BANK_KEY, GlAccount::new("10100", "Bank Account - CHF"))
            .with_account("ar", "12000", "Accounts Receivable")
            .with_account("ap", "20000", "Accounts Payable")
            .with_account("interco_receivable", "13100", "Intercompany Receivable")
            .with_account("interco_payable", "21100", "Intercompany Payable")
            .with_account("bank_fees", "65100", "Bank Charges & Fees")
            .with_account("interest_income", "42000", "Interest Income")
            .with_account("fx_gain_loss", "43500", "FX Gain/Loss")
            .with_account("payroll", "62000", "Payroll Expense")
            .with_account("rent", "63000", "Rent Expense")
            .with_account("utilities", "63500", "Utilities Expense")
            .with_account("insurance", "64000", "Insurance Expense")
            .with_account("tax_payable", "22000", "Tax Payable - VAT")
            .with_account("professional_fees", "66000", "Professional Services")
    }

    pub fn get(&self, key: &str) -> Option<&GlAccount> {
        self.accounts.get(key)
    }

    /// Resolve a category key, failing with a configuration error
    pub fn resolve(&self, key: &str) -> LedgerResult<&GlAccount> {
        self.get(key).ok_or_else(|| {
            LedgerError::configuration(key, "category has no chart of accounts mapping")
        })
    }

    pub fn bank_account(&self) -> LedgerResult<&GlAccount> {
        self.get(&self.bank_key).ok_or_else(|| {
            LedgerError::configuration(&self.bank_key, "chart of accounts has no bank account")
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self::default_chf()
    }
}
