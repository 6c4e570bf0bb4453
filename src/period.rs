// 📅 Period - Inclusive range of calendar days

use crate::error::{LedgerError, LedgerResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Date format used on statements and journals (e.g. "01.12.2024")
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Create a period, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> LedgerResult<Self> {
        let period = Period { start, end };
        period.validate()?;
        Ok(period)
    }

    /// Whole calendar month
    pub fn month(year: i32, month: u32) -> LedgerResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            LedgerError::configuration("period", format!("invalid month {}-{:02}", year, month))
        })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| LedgerError::configuration("period", "month end out of range"))?;
        Period::new(start, end)
    }

    /// Periods can arrive through deserialization, so this is re-checked by the generator
    pub fn validate(&self) -> LedgerResult<()> {
        if self.start > self.end {
            return Err(LedgerError::configuration(
                "period",
                format!("start {} is after end {}", self.start, self.end),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every calendar day, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start
            .iter_days()
            .take_while(move |d| *d <= end)
    }

    pub fn day_count(&self) -> usize {
        ((self.end - self.start) + Duration::days(1)).num_days().max(0) as usize
    }

    pub fn weekday_count(&self) -> usize {
        self.days().filter(|d| !is_weekend(*d)).count()
    }

    /// "01.12.2024 - 31.12.2024"
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(DISPLAY_DATE_FORMAT),
            self.end.format(DISPLAY_DATE_FORMAT)
        )
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
