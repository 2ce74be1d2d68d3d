//! Format - Formatting Utilities

use crate::components::data_table::CellValue;

/// Format a number with thousand separators and up to three decimals,
/// dropping trailing zeros: `1234567.5` → `1,234,567.5`
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "-".to_string();
    }
    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut result = String::new();
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if !frac_part.is_empty() {
        result.push('.');
        result.push_str(frac_part);
    }
    // -0.0001 rounds to 0
    if n < 0.0 && result.chars().any(|c| c.is_ascii_digit() && c != '0') {
        result.insert(0, '-');
    }
    result
}

/// `$1,234.5`
pub fn format_currency(n: f64) -> String {
    let formatted = format_number(n);
    match formatted.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${formatted}"),
    }
}

/// Dollar amount with exactly two decimals: `$0.42`
pub fn format_rate(n: f64) -> String {
    format!("${n:.2}")
}

/// Hours with one decimal: `2.5h`
pub fn format_hours(n: f64) -> String {
    format!("{n:.1}h")
}

/// Percentage with one decimal: `97.3%`
pub fn format_percent(n: f64) -> String {
    format!("{n:.1}%")
}

/// Signed trend, e.g. `+4.2%` or `-1.0%`
pub fn format_trend(n: f64) -> String {
    format!("{n:+.1}%")
}

/// Shown in place of a missing value
pub const MISSING: &str = "-";

/// Cell renderers for table columns
pub fn number_cell(value: CellValue<'_>) -> String {
    value.as_f64().map(format_number).unwrap_or_default()
}

pub fn currency_cell(value: CellValue<'_>) -> String {
    value.as_f64().map(format_currency).unwrap_or_default()
}

pub fn hours_cell(value: CellValue<'_>) -> String {
    value.as_f64().map(format_hours).unwrap_or_default()
}

pub fn percent_cell(value: CellValue<'_>) -> String {
    value.as_f64().map(format_percent).unwrap_or_default()
}

/// Render `value` with `render`, or [`MISSING`] when the value is null
pub fn or_missing(value: CellValue<'_>, render: fn(CellValue<'_>) -> String) -> String {
    if value.is_null() {
        MISSING.to_string()
    } else {
        render(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.5), "1,234,567.5");
        assert_eq!(format_number(-98765.4321), "-98,765.432");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(f64::NAN), "-");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1250.5), "$1,250.5");
        assert_eq!(format_currency(-12.0), "-$12");
        assert_eq!(format_rate(0.4213), "$0.42");
    }

    #[test]
    fn test_units() {
        assert_eq!(format_hours(2.46), "2.5h");
        assert_eq!(format_percent(97.26), "97.3%");
        assert_eq!(format_trend(4.2), "+4.2%");
        assert_eq!(format_trend(-1.0), "-1.0%");
    }

    #[test]
    fn test_cells() {
        assert_eq!(currency_cell(CellValue::Float(5.0)), "$5");
        assert_eq!(number_cell(CellValue::Int(12000)), "12,000");
        assert_eq!(hours_cell(CellValue::Null), "");
        assert_eq!(or_missing(CellValue::Null, currency_cell), "-");
        assert_eq!(or_missing(CellValue::Float(310.0), number_cell), "310");
    }
}
