// File: crates/pie-core/src/format.rs
// Summary: Numeral-style number formatting for tooltips (grouping, fixed decimals, compact suffixes).
//
// Pattern tokens:
//   `,`        group thousands
//   `.000`     fixed decimals (one per `0` after the dot)
//   `a` / `m`  compact form with K / M / B / T suffix
//   `$`        currency prefix
//   `%`        scale by 100 and append `%`
// An absent or blank pattern uses the default locale style: grouped, at most
// three fraction digits, trailing zeros trimmed.

use serde_json::Value;
use thousands::Separable;

const DEFAULT_MAX_DECIMALS: usize = 3;

const ABBREVIATIONS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct NumberPattern {
    grouping: bool,
    decimals: usize,
    compact: bool,
    currency: bool,
    percent: bool,
}

impl NumberPattern {
    fn parse(pattern: &str) -> Self {
        let decimals = pattern
            .split_once('.')
            .map(|(_, frac)| frac.chars().take_while(|c| *c == '0').count())
            .unwrap_or(0);
        Self {
            grouping: pattern.contains(','),
            decimals,
            compact: pattern.contains('a') || pattern.contains('m'),
            currency: pattern.contains('$'),
            percent: pattern.contains('%'),
        }
    }

    fn apply(self, value: f64) -> String {
        let mut v = if self.percent { value * 100.0 } else { value };
        let mut suffix = "";
        if self.compact {
            if let Some((scale, s)) = ABBREVIATIONS.iter().find(|(scale, _)| v.abs() >= *scale) {
                v /= scale;
                suffix = s;
            }
        }
        let body = fixed(v.abs(), self.decimals, self.grouping);
        let sign = if v < 0.0 && has_nonzero_digit(&body) { "-" } else { "" };
        let currency = if self.currency { "$" } else { "" };
        let percent = if self.percent { "%" } else { "" };
        format!("{sign}{currency}{body}{suffix}{percent}")
    }
}

/// Format `value` with an optional numeral-style pattern.
pub fn format_number(value: f64, pattern: Option<&str>) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    match pattern.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => NumberPattern::parse(p).apply(value),
        None => default_format(value),
    }
}

/// Format a dataset cell. Numbers and numeric strings go through
/// [`format_number`]; other strings are shown as-is.
pub fn format_value(value: &Value, pattern: Option<&str>) -> String {
    match value {
        Value::Number(n) => n.as_f64().map(|f| format_number(f, pattern)).unwrap_or_else(|| n.to_string()),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => format_number(f, pattern),
            Err(_) => s.clone(),
        },
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Numeric reading of a cell, used for slice shares. Non-numeric cells count as zero.
pub fn numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn default_format(value: f64) -> String {
    let raw = format!("{:.*}", DEFAULT_MAX_DECIMALS, value.abs());
    let trimmed = if raw.contains('.') { raw.trim_end_matches('0').trim_end_matches('.') } else { raw.as_str() };
    let body = group(trimmed);
    let sign = if value < 0.0 && has_nonzero_digit(&body) { "-" } else { "" };
    format!("{sign}{body}")
}

fn fixed(v: f64, decimals: usize, grouping: bool) -> String {
    let raw = format!("{:.*}", decimals, v);
    if grouping {
        group(&raw)
    } else {
        raw
    }
}

fn group(digits: &str) -> String {
    match digits.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", int.separate_with_commas()),
        None => digits.separate_with_commas(),
    }
}

fn has_nonzero_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit() && c != '0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_style_groups_and_trims() {
        assert_eq!(format_number(1500.0, None), "1,500");
        assert_eq!(format_number(1234567.25, None), "1,234,567.25");
        assert_eq!(format_number(0.5, Some("  ")), "0.5");
        assert_eq!(format_number(-42.0, None), "-42");
    }

    #[test]
    fn fixed_decimals_with_grouping() {
        assert_eq!(format_number(1234567.891, Some("0,000.00")), "1,234,567.89");
        assert_eq!(format_number(1234.5, Some("0.0")), "1234.5");
        assert_eq!(format_number(-1234.5, Some("0,0.0")), "-1,234.5");
    }

    #[test]
    fn grouping_boundaries() {
        assert_eq!(format_number(999.0, Some("0,0")), "999");
        assert_eq!(format_number(1000.0, Some("0,0")), "1,000");
        assert_eq!(format_number(999_999.5, Some("0,0.0")), "999,999.5");
        assert_eq!(format_number(12_345_678.0, None), "12,345,678");
        assert_eq!(format_number(0.125, Some("0,0.000")), "0.125");
    }

    #[test]
    fn compact_suffixes() {
        assert_eq!(format_number(1234567.891, Some("0,000.00ma")), "1.23M");
        assert_eq!(format_number(2500.0, Some("0.0a")), "2.5K");
        assert_eq!(format_number(3_000_000_000.0, Some("0a")), "3B");
        assert_eq!(format_number(999.0, Some("0a")), "999");
    }

    #[test]
    fn currency_and_percent() {
        assert_eq!(format_number(1234.5, Some("$0,0.00")), "$1,234.50");
        assert_eq!(format_number(0.25, Some("0%")), "25%");
    }

    #[test]
    fn non_finite_and_cells() {
        assert_eq!(format_number(f64::NAN, None), "-");
        assert_eq!(format_value(&json!(100), None), "100");
        assert_eq!(format_value(&json!("2500"), Some("0.0a")), "2.5K");
        assert_eq!(format_value(&json!("n/a"), None), "n/a");
        assert_eq!(format_value(&Value::Null, None), "-");
    }

    #[test]
    fn numeric_reads_numbers_and_strings() {
        assert_eq!(numeric(&json!(3)), 3.0);
        assert_eq!(numeric(&json!(" 4.5 ")), 4.5);
        assert_eq!(numeric(&json!(true)), 0.0);
    }
}
