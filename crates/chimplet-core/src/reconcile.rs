// ── Set reconciliation ──
//
// Computes the deletions and additions that turn an observed set of group
// names into a desired one. Pure planning only; the facade executes plans.

use indexmap::IndexSet;

use crate::error::CoreError;

/// Changes needed to make the observed set equal the desired set.
///
/// `to_delete` keeps the observed order, `to_add` keeps the desired order,
/// and both are free of duplicates. Names present on both sides appear in
/// neither list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_delete: Vec<String>,
    pub to_add: Vec<String>,
}

impl ReconcilePlan {
    pub fn new<L, R>(desired: L, observed: R) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let desired: IndexSet<String> = desired
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .collect();
        let observed: IndexSet<String> = observed
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .collect();

        Self {
            to_delete: observed.difference(&desired).cloned().collect(),
            to_add: desired.difference(&observed).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty()
    }
}

/// Outcome of executing a [`ReconcilePlan`] against the service.
///
/// Individual failures do not abort the run; they are collected here.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub deleted: Vec<String>,
    pub added: Vec<String>,
    pub failed: Vec<(String, CoreError)>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn minimal_symmetric_difference() {
        let plan = ReconcilePlan::new(["a", "b", "c"], ["b", "c", "d"]);

        assert_eq!(plan.to_delete, vec!["d".to_owned()]);
        assert_eq!(plan.to_add, vec!["a".to_owned()]);
    }

    #[test]
    fn identical_sets_need_nothing() {
        let plan = ReconcilePlan::new(["x", "y"], ["y", "x"]);
        assert!(plan.is_empty());
    }

    #[test]
    fn empty_desired_deletes_everything() {
        let plan = ReconcilePlan::new(Vec::<String>::new(), ["one", "two"]);
        assert_eq!(plan.to_delete, vec!["one".to_owned(), "two".to_owned()]);
        assert!(plan.to_add.is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let plan = ReconcilePlan::new(["new", "new", "kept"], ["kept", "old", "old"]);
        assert_eq!(plan.to_add, vec!["new".to_owned()]);
        assert_eq!(plan.to_delete, vec!["old".to_owned()]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let plan = ReconcilePlan::new(["News"], ["news"]);
        assert_eq!(plan.to_add, vec!["News".to_owned()]);
        assert_eq!(plan.to_delete, vec!["news".to_owned()]);
    }
}
