//! Report aggregate wrapping classified inconsistencies with precomputed counts.

use std::collections::BTreeMap;

use crate::domain::{Inconsistency, InconsistencyKind};

/// Outcome of one detection run.
///
/// ## Invariants
/// - `total_count() == inconsistencies().len()`.
/// - `counts_by_kind()` only holds kinds that occur, and its values sum to
///   `total_count()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InconsistencyReport {
    inconsistencies: Vec<Inconsistency>,
    counts_by_kind: BTreeMap<InconsistencyKind, usize>,
}

impl InconsistencyReport {
    /// Build a report, deriving counts from the records.
    ///
    /// # Examples
    /// ```
    /// use folder_consistency::domain::InconsistencyReport;
    ///
    /// let report = InconsistencyReport::from_inconsistencies(Vec::new());
    /// assert_eq!(report.total_count(), 0);
    /// assert!(report.counts_by_kind().is_empty());
    /// ```
    pub fn from_inconsistencies(inconsistencies: Vec<Inconsistency>) -> Self {
        let mut counts_by_kind = BTreeMap::new();
        for inconsistency in &inconsistencies {
            *counts_by_kind.entry(inconsistency.kind()).or_insert(0) += 1;
        }
        Self {
            inconsistencies,
            counts_by_kind,
        }
    }

    /// Report for a run that found nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records in detection order.
    pub fn inconsistencies(&self) -> &[Inconsistency] {
        &self.inconsistencies
    }

    pub fn total_count(&self) -> usize {
        self.inconsistencies.len()
    }

    pub fn counts_by_kind(&self) -> &BTreeMap<InconsistencyKind, usize> {
        &self.counts_by_kind
    }

    /// Count for one kind; zero when it never occurred.
    pub fn count_of(&self, kind: InconsistencyKind) -> usize {
        self.counts_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_inconsistencies(&self) -> bool {
        !self.inconsistencies.is_empty()
    }
}
