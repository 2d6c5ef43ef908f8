//! CLI to Config conversion utilities

use crate::config::cli;
use crate::series::Formula;
use crate::util::time::ClockKind;
use anyhow::{Context, Result};

/// Parse an iteration count (e.g., "1000", "5k", "200M", "200_000_000", "1g")
///
/// Suffixes are decimal: k = 10^3, m = 10^6, g/b = 10^9. Underscores and commas
/// are ignored.
pub fn parse_count(s: &str) -> Result<i64> {
    let s: String = s
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('k') {
        (stripped, 1_000i64)
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 1_000_000)
    } else if let Some(stripped) = s.strip_suffix('g').or_else(|| s.strip_suffix('b')) {
        (stripped, 1_000_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: i64 = num_str
        .parse()
        .with_context(|| format!("Invalid iteration count: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Iteration count overflows i64: {}", s))
}

/// Convert CLI FormulaType to series Formula
pub fn convert_formula(cli_type: cli::FormulaType) -> Formula {
    match cli_type {
        cli::FormulaType::Combined => Formula::Combined,
        cli::FormulaType::Expanded => Formula::Expanded,
    }
}

/// Convert CLI ClockType to ClockKind
pub fn convert_clock(cli_type: cli::ClockType) -> ClockKind {
    match cli_type {
        cli::ClockType::System => ClockKind::System,
        cli::ClockType::Fast => ClockKind::Fast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_plain() {
        assert_eq!(parse_count("1000").unwrap(), 1000);
        assert_eq!(parse_count(" 42 ").unwrap(), 42);
        assert_eq!(parse_count("200_000_000").unwrap(), 200_000_000);
        assert_eq!(parse_count("1,000,000").unwrap(), 1_000_000);
        assert_eq!(parse_count("-3").unwrap(), -3);
    }

    #[test]
    fn test_parse_count_suffixes() {
        assert_eq!(parse_count("5k").unwrap(), 5_000);
        assert_eq!(parse_count("200M").unwrap(), 200_000_000);
        assert_eq!(parse_count("2G").unwrap(), 2_000_000_000);
        assert_eq!(parse_count("3b").unwrap(), 3_000_000_000);
    }

    #[test]
    fn test_parse_count_invalid() {
        assert!(parse_count("").is_err());
        assert!(parse_count("abc").is_err());
        assert!(parse_count("1.5M").is_err());
        assert!(parse_count("9223372036854775807k").is_err());
    }

    #[test]
    fn test_convert_enums() {
        assert_eq!(convert_formula(cli::FormulaType::Combined), Formula::Combined);
        assert_eq!(convert_formula(cli::FormulaType::Expanded), Formula::Expanded);
        assert_eq!(convert_clock(cli::ClockType::System), ClockKind::System);
        assert_eq!(convert_clock(cli::ClockType::Fast), ClockKind::Fast);
    }
}
