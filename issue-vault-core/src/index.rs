//! Folds the issue set into per-issue names and the label / milestone groupings.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::info;

use crate::model::{FilenameMeta, IssueRecord};

/// Category key → set of issue numbers, remembering the order keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    order: Vec<String>,
    members: HashMap<String, BTreeSet<u64>>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, number: u64) {
        match self.members.get_mut(key) {
            Some(set) => {
                set.insert(number);
            }
            None => {
                self.order.push(key.to_owned());
                self.members.insert(key.to_owned(), BTreeSet::from([number]));
            }
        }
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Members of `key`, ascending.
    pub fn members(&self, key: &str) -> Option<&BTreeSet<u64>> {
        self.members.get(key)
    }

    /// `(key, members)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<u64>)> {
        self.order
            .iter()
            .filter_map(|key| self.members.get(key).map(|set| (key.as_str(), set)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Output of the indexing pass. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ExportIndex {
    pub meta: BTreeMap<u64, FilenameMeta>,
    pub labels: CategoryIndex,
    pub milestones: CategoryIndex,
}

pub fn build_index(records: &[IssueRecord]) -> ExportIndex {
    let mut index = ExportIndex::default();

    for record in records {
        index
            .meta
            .insert(record.number, FilenameMeta::for_issue(record.number, &record.title));

        for label in &record.labels {
            index.labels.insert(label, record.number);
        }
        if let Some(milestone) = &record.milestone {
            index.milestones.insert(milestone, record.number);
        }
    }

    info!(
        issues = index.meta.len(),
        labels = index.labels.len(),
        milestones = index.milestones.len(),
        "Built category indices"
    );
    index
}
