/// Catalog linting — startup failures as errors, low-variety data as warnings.

use std::collections::HashSet;

use crate::core::generator::EventGenerator;
use crate::core::template::Template;
use crate::schema::catalog::Catalog;

/// Findings for one catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn lint_catalog(catalog: &Catalog) -> LintReport {
    let mut report = LintReport::default();

    // Anything the generator would refuse at startup is an error here.
    if let Err(e) = EventGenerator::from_catalog(catalog) {
        report.errors.push(e.to_string());
    }

    let mut seen = HashSet::new();
    let mut referenced = HashSet::new();
    for raw in &catalog.templates {
        if !seen.insert(raw.as_str()) {
            report
                .warnings
                .push(format!("Template '{}' appears more than once", raw));
        }
        if let Ok(template) = Template::parse(raw) {
            referenced.extend(template.slots().map(str::to_string));
        }
    }

    let mut slot_names: Vec<&str> = catalog.slots.slot_names().collect();
    slot_names.sort_unstable();
    for slot in slot_names {
        if !referenced.contains(slot) {
            report
                .warnings
                .push(format!("Slot '{}' is not referenced by any template", slot));
        }

        let fragments = catalog.slots.get(slot).unwrap_or(&[]);
        if fragments.len() == 1 {
            report
                .warnings
                .push(format!("Slot '{}' has a single fragment (no variety)", slot));
        }

        let mut unique = HashSet::new();
        for fragment in fragments {
            if !unique.insert(fragment.as_str()) {
                report.warnings.push(format!(
                    "Slot '{}' lists fragment '{}' more than once",
                    slot, fragment
                ));
            }
        }
    }

    report
}
