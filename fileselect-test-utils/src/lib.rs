//! Test utilities for fileselect
//!
//! Builders for temporary log directory trees and matching criteria.

pub mod builders;

// Re-export commonly used types
pub use builders::{BuiltTree, CriteriaBuilder, TestTree};
