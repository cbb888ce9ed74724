//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

/// Returns "s" for plural counts
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// A single failed check on a stored mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Stable kind, e.g. `route-no-match`.
    pub kind: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Failures grouped by mapping key.
#[derive(Debug, Default)]
pub struct ValidationReport {
    failures: BTreeMap<String, Vec<Failure>>,
    checked: usize,
}

impl ValidationReport {
    /// Count a checked record.
    pub fn checked(&mut self) {
        self.checked += 1;
    }

    pub fn add(&mut self, key: &str, kind: impl Into<String>, reason: impl Into<String>) {
        self.failures
            .entry(key.to_string())
            .or_default()
            .push(Failure {
                kind: kind.into(),
                reason: reason.into(),
            });
    }

    pub fn failures(&self) -> &BTreeMap<String, Vec<Failure>> {
        &self.failures
    }

    pub fn key_count(&self) -> usize {
        self.failures.len()
    }

    pub fn error_count(&self) -> usize {
        self.failures.values().map(Vec::len).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Print failures to stderr, grouped by key.
    pub fn print(&self) {
        if self.failures.is_empty() {
            return;
        }
        eprintln!();

        let key_count = self.key_count();
        let error_count = self.error_count();
        eprintln!(
            "{} {}",
            "mappings".red().bold(),
            format!(
                "({key_count} key{}, {error_count} error{})",
                plural_s(key_count),
                plural_s(error_count)
            )
            .dimmed()
        );

        for (key, failures) in &self.failures {
            eprintln!("{}{}{}", "[".dimmed(), key.cyan(), "]".dimmed());
            for f in failures {
                eprintln!("{} {} {}", "→".red(), f.reason, format!("({})", f.kind).dimmed());
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        if total == 0 {
            write!(
                f,
                "{} ({} mapping{})",
                "all checks passed".green(),
                self.checked,
                plural_s(self.checked)
            )
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_s() {
        assert_eq!(plural_s(0), "s");
        assert_eq!(plural_s(1), "");
        assert_eq!(plural_s(2), "s");
    }

    #[test]
    fn test_report_counts() {
        let mut report = ValidationReport::default();
        report.checked();
        report.checked();
        assert!(report.is_clean());
        let summary = report.to_string();
        assert!(summary.contains("all checks passed"));
        assert!(summary.contains("(2 mappings)"));

        report.add("terms", "unroutable-url", "URL /x/ does not correspond to a valid application route");
        report.add("terms", "disallowed-kind", "Object mappings are not allowed");
        report.add("about", "object-not-found", "gone");
        assert_eq!(report.key_count(), 2);
        assert_eq!(report.error_count(), 3);
        assert!(report.to_string().contains("errors"));
        assert_eq!(report.failures()["terms"][1].kind, "disallowed-kind");
    }
}
