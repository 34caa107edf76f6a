//! Builders for test scenarios

mod criteria;
mod tree;

pub use criteria::CriteriaBuilder;
pub use tree::{BuiltTree, TestTree};
