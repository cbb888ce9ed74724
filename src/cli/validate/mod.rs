//! Stored mapping validation command.
//!
//! Records are validated on write, but routes and objects can change
//! afterwards. This re-runs every check against the current collaborators.

mod report;

use anyhow::Result;

use crate::engine::UrlMapper;
use crate::log;
use crate::mapping::ValidationError;

pub use report::{Failure, ValidationReport, plural_s};

/// Check every stored record (function keys included).
pub fn check_store(mapper: &UrlMapper) -> ValidationReport {
    let registry = mapper.registry();
    let env = mapper.env();
    let mut report = ValidationReport::default();

    for record in mapper.store().list() {
        report.checked();

        if !registry.is_known(&record.key) || registry.is_function_key(&record.key) {
            let err = ValidationError::InvalidKey(record.key.clone());
            report.add(&record.key, err.kind(), err.to_string());
        }

        if let Some(kind) = record.mapping_kind()
            && !registry.allows(kind)
        {
            report.add(
                &record.key,
                "disallowed-kind",
                format!("{} mappings are not allowed", kind.label()),
            );
        }

        if let Err(err) = record.validate(env) {
            report.add(&record.key, err.kind(), err.to_string());
        }
    }
    report
}

/// Validate the store and print a report. Returns whether it is clean.
pub fn validate_store(mapper: &UrlMapper) -> Result<bool> {
    let count = mapper.store().list().len();
    log!("validate"; "checking {} stored mapping{}", count, plural_s(count));
    let report = check_store(mapper);

    report.print();
    eprintln!();
    log!("validate"; "{}", report);
    Ok(report.is_clean())
}
