//! fileselect core library
//!
//! Decides which file(s) a log collector should read: include/exclude glob
//! patterns produce a deduplicated candidate list and, when ordering rules
//! are configured, a cascade of regex-keyed sorts reduces it to a single
//! winning file.
//!
//! ```no_run
//! use fileselect_core::{MatchingCriteria, Selector, SortRuleConfig};
//!
//! let criteria = MatchingCriteria::new(["/var/log/app/app.log.*"])
//!     .with_ordering(r"^app\.log\.(?P<n>\d+)$", vec![SortRuleConfig::numeric("n")]);
//!
//! let selection = Selector::new(criteria)?.select();
//! if let Some(path) = selection.first() {
//!     println!("tailing {}", path.display());
//! }
//! # Ok::<(), fileselect_core::Error>(())
//! ```

pub mod criteria;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod ordering;
pub mod selector;
pub mod sort_rule;

// Re-export main types
pub use criteria::{MatchingCriteria, OrderingCriteria, SortRuleConfig, SortType};
pub use error::{Error, Result, RuleError, RuleErrors, ValidationError};
pub use extract::KeyExtractor;
pub use matcher::find_candidates;
pub use ordering::order;
pub use selector::{Selection, SelectionReport, Selector, find_files};
pub use sort_rule::{RuleKind, SortKey, SortRule};
