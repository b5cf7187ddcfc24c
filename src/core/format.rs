//! Locale-aware currency and date rendering.
//!
//! Output mirrors what browsers produce for the same locale: a no-break space
//! between symbol and amount where the locale uses one, the sign in front of
//! the symbol, and `Invalid Date` for anything that cannot be read as a date.

use crate::domain::model::{Locale, SymbolPlacement};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

pub const INVALID_DATE: &str = "Invalid Date";

const NO_BREAK_SPACE: char = '\u{a0}';

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Anything `format_date` accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Text(String),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    Date(NaiveDate),
    /// Wall-clock time in the formatter's offset.
    Local(NaiveDateTime),
    Instant(DateTime<Utc>),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::EpochMillis(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::Local(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateInput::Instant(value.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone)]
pub struct Formatter {
    locale: Locale,
    offset: FixedOffset,
}

impl Formatter {
    pub fn new(locale: Locale, offset: FixedOffset) -> Self {
        Self { locale, offset }
    }

    /// Formatter for `locale` rendering dates in UTC.
    pub fn utc(locale: Locale) -> Self {
        Self::new(locale, Utc.fix())
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn format_currency(&self, value: f64) -> String {
        let body = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            "∞".to_string()
        } else {
            self.format_amount(value.abs())
        };
        let sign = if value.is_sign_negative() && !value.is_nan() {
            "-"
        } else {
            ""
        };

        let symbol = self.locale.currency_symbol;
        let gap = if self.locale.symbol_spaced {
            NO_BREAK_SPACE.to_string()
        } else {
            String::new()
        };

        match self.locale.symbol_placement {
            SymbolPlacement::Before => format!("{}{}{}{}", sign, symbol, gap, body),
            SymbolPlacement::After => format!("{}{}{}{}", sign, body, gap, symbol),
        }
    }

    fn format_amount(&self, amount: f64) -> String {
        let fixed = round_to_cents(amount);
        let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let digits: Vec<char> = integer.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.locale.group_separator);
            }
            grouped.push(*digit);
        }

        format!("{}{}{}", grouped, self.locale.decimal_separator, fraction)
    }

    /// Renders `input` as a locale date, or [`INVALID_DATE`].
    pub fn format_date(&self, input: impl Into<DateInput>) -> String {
        match self.resolve_date(input.into()) {
            Some(date) => date.format(self.locale.date_pattern).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }

    fn resolve_date(&self, input: DateInput) -> Option<NaiveDate> {
        match input {
            DateInput::Text(text) => self.parse_text(&text),
            DateInput::EpochMillis(ms) => {
                DateTime::from_timestamp_millis(ms).map(|dt| self.calendar_day(dt))
            }
            DateInput::Date(date) => Some(date),
            DateInput::Local(naive) => Some(naive.date()),
            DateInput::Instant(instant) => Some(self.calendar_day(instant)),
        }
    }

    fn calendar_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn parse_text(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(self.calendar_day(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(self.calendar_day(dt.with_timezone(&Utc)));
        }
        // Date-only text is a calendar day, not midnight UTC.
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Some(date);
        }
        if let Some(date) = parse_partial_date(text) {
            return Some(date);
        }
        NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|naive| naive.date())
    }
}

/// `YYYY` and `YYYY-MM` name the first day of that year or month.
fn parse_partial_date(text: &str) -> Option<NaiveDate> {
    let (year, month) = match text.split_once('-') {
        Some((year, month)) if month.len() == 2 => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (text, 1),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Two-decimal text of a non-negative amount, exact half cents rounded up.
///
/// `{:.2}` sends ties to even. Only odd eighths (`.125`, `.375`, `.625`,
/// `.875`) land exactly on a half cent, and those scale to cents exactly.
fn round_to_cents(amount: f64) -> String {
    let eighths = amount * 8.0;
    let on_half_cent = eighths.fract() == 0.0 && (amount * 4.0).fract() != 0.0;
    if !on_half_cent {
        return format!("{:.2}", amount);
    }

    let cents = format!("{:03.0}", (amount * 100.0).round());
    let (integer, fraction) = cents.split_at(cents.len() - 2);
    format!("{}.{}", integer, fraction)
}

impl Default for Formatter {
    fn default() -> Self {
        Self::utc(Locale::default())
    }
}
