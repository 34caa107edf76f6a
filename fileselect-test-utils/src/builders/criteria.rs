//! Matching criteria builder anchored at a test tree

use fileselect_core::{MatchingCriteria, SortRuleConfig};

use super::tree::BuiltTree;

/// Builds [`MatchingCriteria`] whose patterns are relative to a [`BuiltTree`]
pub struct CriteriaBuilder<'a> {
    tree: &'a BuiltTree,
    include: Vec<String>,
    exclude: Vec<String>,
    regex: String,
    sort_by: Vec<SortRuleConfig>,
}

impl<'a> CriteriaBuilder<'a> {
    pub fn new(tree: &'a BuiltTree) -> Self {
        Self {
            tree,
            include: Vec::new(),
            exclude: Vec::new(),
            regex: String::new(),
            sort_by: Vec::new(),
        }
    }

    pub fn include(mut self, glob: &str) -> Self {
        self.include.push(self.tree.pattern(glob));
        self
    }

    pub fn exclude(mut self, glob: &str) -> Self {
        self.exclude.push(self.tree.pattern(glob));
        self
    }

    pub fn regex(mut self, regex: &str) -> Self {
        self.regex = regex.to_string();
        self
    }

    pub fn sort_by(mut self, rule: SortRuleConfig) -> Self {
        self.sort_by.push(rule);
        self
    }

    pub fn build(self) -> MatchingCriteria {
        MatchingCriteria::new(self.include)
            .with_exclude(self.exclude)
            .with_ordering(&self.regex, self.sort_by)
    }
}
