//! Cascading multi-rule ordering of candidates
//!
//! Rules run in listed order, each as a full stable sort over the output of
//! the previous one. The **last** rule therefore decides the overall order
//! and earlier rules only break its ties:
//!
//! ```text
//! sort_by = [alphabetical(suffix), timestamp(date)]
//!
//! svc-2024-01-01.a.log  ─┐ alphabetical  svc-2024-01-01.b.log ─┐ timestamp  svc-2024-02-01.a.log  <- selected
//! svc-2024-01-01.b.log   ├─────────────> svc-2024-01-01.a.log  ├──────────> svc-2024-01-01.b.log
//! svc-2024-02-01.a.log  ─┘               svc-2024-02-01.a.log ─┘            svc-2024-01-01.a.log
//! ```

use std::path::PathBuf;

use crate::criteria::OrderingCriteria;
use crate::error::{RuleError, RuleErrors};
use crate::extract::KeyExtractor;
use crate::selector::Selection;
use crate::sort_rule::SortRule;

/// Reduce `candidates` to the single top-ranked file
///
/// Without sort rules, or without candidates, the input comes back
/// unchanged. A rule that cannot be built is recorded and skipped; a rule
/// whose keys partly fail to parse is still applied with its fallbacks.
pub fn order(candidates: Vec<PathBuf>, criteria: &OrderingCriteria) -> Selection {
    if criteria.sort_by.is_empty() || candidates.is_empty() {
        return Selection::new(candidates);
    }

    let mut errors = RuleErrors::new();
    let mut working = candidates;

    match KeyExtractor::new(&criteria.regex) {
        Ok(extractor) => {
            for (index, config) in criteria.sort_by.iter().enumerate() {
                let rule = match SortRule::from_config(index, config, &extractor) {
                    Ok(rule) => rule,
                    Err(e) => {
                        log::debug!("Skipping {e}");
                        errors.push(e);
                        continue;
                    }
                };

                let (sorted, key_errors) = rule.sort(&extractor, &working);
                for e in &key_errors {
                    log::debug!("{e}");
                }
                errors.extend(key_errors);
                working = sorted;
            }
        }
        Err(e) => {
            log::debug!("Extraction regex does not compile, ordering skipped: {e}");
            errors.extend(
                criteria
                    .sort_by
                    .iter()
                    .enumerate()
                    .map(|(index, config)| RuleError::InvalidRegex {
                        index,
                        sort_type: config.sort_type,
                        reason: e.to_string(),
                    }),
            );
        }
    }

    working.truncate(1);
    Selection::with_errors(working, errors)
}
