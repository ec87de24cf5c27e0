//! Live `YYYY-MM` month selector.

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// Reformat free text as the user types: keep digits only, take up to four
/// as the year and, once a fifth digit arrives, up to two more as the month
/// after a dash.
pub fn format_month_input(text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    let mut formatted: String = digits.chars().take(4).collect();
    if digits.len() > 4 {
        formatted.push('-');
        formatted.extend(digits.chars().skip(4).take(2));
    }
    formatted
}

/// Parse an already formatted value into `(year, month_index)`.
///
/// Only complete values in `1000-01..=9999-12` are accepted.
pub fn parse_month_input(formatted: &str) -> Option<(i32, u32)> {
    if formatted.len() != 7 {
        return None;
    }
    let (year, month) = formatted.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month - 1))
}

/// Input text plus the last month it committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSelector {
    text: String,
    year: i32,
    month_index: u32,
}

impl Default for MonthSelector {
    fn default() -> Self {
        Self {
            text: "2024-09".to_string(),
            year: 2024,
            month_index: 8,
        }
    }
}

impl MonthSelector {
    pub fn new(year: i32, month_index: u32) -> Self {
        Self {
            text: format!("{year:04}-{:02}", month_index + 1),
            year,
            month_index,
        }
    }

    /// Feed raw input. The text is always reformatted; the selected month
    /// only changes when the result is a complete valid month. Returns
    /// whether the selection changed.
    pub fn input(&mut self, raw: &str) -> bool {
        self.text = format_month_input(raw);
        match parse_month_input(&self.text) {
            Some((year, month_index)) => {
                let changed = (year, month_index) != (self.year, self.month_index);
                self.year = year;
                self.month_index = month_index;
                changed
            }
            None => false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_index(&self) -> u32 {
        self.month_index
    }
}
