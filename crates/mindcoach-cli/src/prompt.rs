//! Interactive input helpers for the command line.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Environment variable checked before prompting for a password
const PASSWORD_ENV: &str = "MINDCOACH_PASSWORD";

/// Ask for a line of input, offering `default` when one is known.
pub fn prompt_line(label: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(d) => print!("{} [{}]: ", label, d),
        None => print!("{}: ", label),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;

    Ok(resolve_input(&input, default))
}

/// Password from the environment, or a hidden prompt
pub fn prompt_password() -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        if !password.is_empty() {
            return Ok(password);
        }
    }
    rpassword::prompt_password("Password: ").context("Failed to read password")
}

fn resolve_input(input: &str, default: Option<&str>) -> String {
    let input = input.trim();
    match default {
        Some(d) if input.is_empty() => d.to_string(),
        _ => input.to_string(),
    }
}

/// Split a comma-separated subject list, dropping blanks
pub fn parse_subjects(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `YYYY-MM-DD` exam date as midnight UTC
pub fn parse_exam_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid exam date '{}', expected YYYY-MM-DD", raw))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| anyhow::anyhow!("Invalid exam date '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resolve_input() {
        assert_eq!(resolve_input("  bob@example.com\n", None), "bob@example.com");
        assert_eq!(resolve_input("\n", Some("last@example.com")), "last@example.com");
        assert_eq!(resolve_input("new@example.com\n", Some("last@example.com")), "new@example.com");
        assert_eq!(resolve_input("\n", None), "");
    }

    #[test]
    fn test_parse_subjects() {
        assert_eq!(parse_subjects("math, politics,,english "), vec!["math", "politics", "english"]);
        assert!(parse_subjects(" , ").is_empty());
    }

    #[test]
    fn test_parse_exam_date() {
        assert_eq!(
            parse_exam_date("2025-12-20").unwrap(),
            Utc.with_ymd_and_hms(2025, 12, 20, 0, 0, 0).unwrap()
        );
        assert!(parse_exam_date("20/12/2025").is_err());
    }
}
